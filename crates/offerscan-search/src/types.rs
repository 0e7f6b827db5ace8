//! Response types for the training-offer search endpoint.
//!
//! ## Observed envelope shape
//!
//! ```json
//! {
//!   "_embedded": { "termine": [ { ...listing... }, ... ] },
//!   "page": { "size": 20, "totalElements": 57, "totalPages": 3, "number": 0 }
//! }
//! ```
//!
//! An empty result set omits `_embedded` entirely, so it is optional here.
//!
//! ## Listings
//! Listings are kept as raw JSON. Only a handful of nested fields are read:
//!
//! - `id`: a number on most listings, occasionally a string, sometimes absent.
//! - `angebot.titel`: the course title.
//! - `angebot.bildungsanbieter.name`: the provider.
//! - `adresse.ortStrasse.name`: the location label.
//! - `adresse.ortStrasse.koordinaten.{lat,lon}`: numbers, numeric strings,
//!   `null`, or missing. Missing coordinates are common.
//!
//! Everything else passes through untouched into the JSON export.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of one listing, normalised to its string form so numeric and
/// string ids compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OfferId(String);

impl OfferId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads an identity from a raw `id` value. Empty strings, zero, `null`,
    /// booleans, and nested values are not usable identities.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| OfferId(trimmed.to_owned()))
            }
            Value::Number(n) => {
                if n.as_f64().is_some_and(|f| f == 0.0) {
                    return None;
                }
                // 42.0 and 42 are the same listing
                let text = match (n.as_i64(), n.as_u64(), n.as_f64()) {
                    (Some(i), _, _) => i.to_string(),
                    (None, Some(u), _) => u.to_string(),
                    (None, None, Some(f)) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                        format!("{f:.0}")
                    }
                    _ => n.to_string(),
                };
                Some(OfferId(text))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for OfferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OfferId {
    fn from(value: &str) -> Self {
        OfferId(value.to_owned())
    }
}

/// One listing as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offer(Value);

impl Offer {
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Offer(raw)
    }

    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn id(&self) -> Option<OfferId> {
        self.0.get("id").and_then(OfferId::from_value)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        non_empty_str(self.0.pointer("/angebot/titel"))
    }

    #[must_use]
    pub fn provider_name(&self) -> Option<&str> {
        non_empty_str(self.0.pointer("/angebot/bildungsanbieter/name"))
    }

    #[must_use]
    pub fn location_name(&self) -> Option<&str> {
        non_empty_str(self.0.pointer("/adresse/ortStrasse/name"))
    }

    /// `(lat, lon)` when both coordinates are present and numeric.
    ///
    /// Numeric strings are accepted; `null`, missing keys, non-numeric text,
    /// and non-finite values yield `None`.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let coords = self.0.pointer("/adresse/ortStrasse/koordinaten")?;
        let lat = coordinate_value(coords.get("lat")?)?;
        let lon = coordinate_value(coords.get("lon")?)?;
        Some((lat, lon))
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn coordinate_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Top-level response for one page of search results.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: Option<PageMeta>,

    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,

    #[serde(rename = "totalElements", default)]
    pub total_elements: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub termine: Option<Vec<Offer>>,
}

impl SearchPage {
    /// Page count announced by the pagination block, if any.
    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.page.as_ref().map(|p| p.total_pages)
    }

    /// The embedded listing collection. `None` when the envelope lacks
    /// `_embedded.termine`, which the API uses for "no results".
    #[must_use]
    pub fn into_offers(self) -> Option<Vec<Offer>> {
        self.embedded.and_then(|e| e.termine)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn offer(raw: Value) -> Offer {
        Offer::new(raw)
    }

    #[test]
    fn numeric_and_string_ids_normalise_to_same_identity() {
        assert_eq!(offer(json!({"id": 42})).id(), offer(json!({"id": "42"})).id());
    }

    #[test]
    fn whole_float_ids_match_integer_ids() {
        let int_id = offer(json!({"id": 42})).id();
        assert_eq!(offer(json!({"id": 42.0})).id(), int_id);
        assert_eq!(int_id.as_ref().map(OfferId::as_str), Some("42"));
        assert_eq!(offer(json!({"id": -7.0})).id(), offer(json!({"id": -7})).id());
        assert_eq!(
            offer(json!({"id": 4.5})).id().as_ref().map(OfferId::as_str),
            Some("4.5")
        );
    }

    #[test]
    fn unusable_ids_are_none() {
        for raw in [
            json!({}),
            json!({"id": null}),
            json!({"id": ""}),
            json!({"id": "   "}),
            json!({"id": 0}),
            json!({"id": true}),
            json!({"id": {"nested": 1}}),
        ] {
            assert!(offer(raw.clone()).id().is_none(), "expected no id for {raw}");
        }
    }

    #[test]
    fn reads_nested_fields() {
        let o = offer(json!({
            "id": 7,
            "angebot": {"titel": "Fachinformatiker", "bildungsanbieter": {"name": "ACME Bildung"}},
            "adresse": {"ortStrasse": {"name": "Berlin", "koordinaten": {"lat": 52.5, "lon": 13.4}}}
        }));
        assert_eq!(o.title(), Some("Fachinformatiker"));
        assert_eq!(o.provider_name(), Some("ACME Bildung"));
        assert_eq!(o.location_name(), Some("Berlin"));
        assert_eq!(o.coordinates(), Some((52.5, 13.4)));
    }

    #[test]
    fn coordinates_accept_numeric_strings() {
        let o = offer(json!({"adresse": {"ortStrasse": {"koordinaten": {"lat": "52.5", "lon": " 13.4 "}}}}));
        assert_eq!(o.coordinates(), Some((52.5, 13.4)));
    }

    #[test]
    fn coordinates_reject_null_text_and_missing() {
        for coords in [
            json!({"lat": null, "lon": 13.4}),
            json!({"lat": 52.5}),
            json!({"lat": "north", "lon": 13.4}),
            json!({"lat": "NaN", "lon": 13.4}),
            json!({"lat": [52.5], "lon": 13.4}),
        ] {
            let o = offer(json!({"adresse": {"ortStrasse": {"koordinaten": coords}}}));
            assert!(o.coordinates().is_none(), "expected None for {coords}");
        }
        assert!(offer(json!({"adresse": {}})).coordinates().is_none());
        assert!(offer(json!("not an object")).coordinates().is_none());
    }

    #[test]
    fn envelope_without_embedded_has_no_offers() {
        let page: SearchPage =
            serde_json::from_value(json!({"page": {"totalPages": 0}})).unwrap();
        assert_eq!(page.total_pages(), Some(0));
        assert!(page.into_offers().is_none());
    }

    #[test]
    fn envelope_with_listings_parses() {
        let page: SearchPage = serde_json::from_value(json!({
            "_embedded": {"termine": [{"id": 1}, {"id": 2}]},
            "page": {"totalPages": 4, "totalElements": 70}
        }))
        .unwrap();
        assert_eq!(page.total_pages(), Some(4));
        assert_eq!(page.into_offers().map(|o| o.len()), Some(2));
    }
}
