//! Decoding of shared search links from the public Ausbildungssuche website.
//!
//! A link carries the search in its query string:
//!
//! ```text
//! https://web.arbeitsagentur.de/ausbildungssuche/...?beruf=7856&uk=50&kat=1&ort=Berlin_13.386738_52.531976
//! ```
//!
//! `ort` packs the city name, longitude, and latitude separated by `_`.

use url::Url;

use crate::offer_type::OfferType;
use crate::params::SearchParameters;
use crate::ParamError;

/// Radius used when the link carries no `uk` parameter.
pub const DEFAULT_LINK_RADIUS_KM: u32 = 50;

/// Offer type used when the link carries no `kat` parameter.
pub const DEFAULT_LINK_OFFER_TYPE: OfferType = OfferType::Retraining;

/// Decodes a website search link into validated [`SearchParameters`].
///
/// # Errors
///
/// Returns [`ParamError::InvalidLink`] when the URL does not parse, `ort` is
/// missing or does not hold `<city>_<lon>_<lat>`, `beruf` is missing, or
/// `kat` is not one of the website's four tabs. Numeric fields that do not
/// parse yield [`ParamError::NotANumber`].
pub fn parse_search_link(link: &str) -> Result<SearchParameters, ParamError> {
    let url = Url::parse(link.trim())
        .map_err(|e| ParamError::InvalidLink(format!("\"{link}\" is not a URL: {e}")))?;

    let query = |key: &str| -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };

    let ort = query("ort").ok_or_else(|| ParamError::InvalidLink("missing 'ort'".to_string()))?;
    let (city, lon, lat) = split_ort(&ort)?;

    let job_id = query("beruf").ok_or_else(|| {
        ParamError::InvalidLink("missing 'beruf'; only links with a job id are supported".into())
    })?;

    let radius = query("uk").unwrap_or_else(|| DEFAULT_LINK_RADIUS_KM.to_string());

    let offer_type = match query("kat") {
        None => DEFAULT_LINK_OFFER_TYPE,
        Some(kat) => OfferType::from_link_category(kat.trim()).ok_or_else(|| {
            ParamError::InvalidLink(format!("unknown 'kat' value \"{kat}\""))
        })?,
    };

    SearchParameters::from_fields(
        city,
        &job_id,
        &radius,
        lat,
        lon,
        &offer_type.code().to_string(),
    )
}

/// Splits `ort` from the right so city names containing `_` survive.
fn split_ort(ort: &str) -> Result<(&str, &str, &str), ParamError> {
    let mut parts = ort.rsplitn(3, '_');
    let lat = parts.next();
    let lon = parts.next();
    let city = parts.next();
    match (city, lon, lat) {
        (Some(city), Some(lon), Some(lat)) if !city.is_empty() => Ok((city, lon, lat)),
        _ => Err(ParamError::InvalidLink(format!(
            "'ort' must look like <city>_<lon>_<lat>, got \"{ort}\""
        ))),
    }
}
