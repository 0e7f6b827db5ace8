//! Validated parameters for one search run.

use crate::ParamError;

/// Immutable input of one run. Constructed only through the validating
/// constructors, so the search core never sees unparseable numbers, a
/// negative radius, or coordinates off the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    location: String,
    job_category_id: i64,
    radius_km: u32,
    center_lat: f64,
    center_lon: f64,
    offer_type_code: i64,
}

impl SearchParameters {
    /// Builds parameters from already-typed values.
    ///
    /// # Errors
    ///
    /// - [`ParamError::EmptyLocation`] if `location` is blank.
    /// - [`ParamError::OutOfRange`] if a coordinate is not finite or lies
    ///   outside ±90 (lat) / ±180 (lon).
    pub fn new(
        location: &str,
        job_category_id: i64,
        radius_km: u32,
        center_lat: f64,
        center_lon: f64,
        offer_type_code: i64,
    ) -> Result<Self, ParamError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ParamError::EmptyLocation);
        }
        check_coordinate("lat", center_lat, 90.0)?;
        check_coordinate("lon", center_lon, 180.0)?;

        Ok(Self {
            location: location.to_owned(),
            job_category_id,
            radius_km,
            center_lat,
            center_lon,
            offer_type_code,
        })
    }

    /// Builds parameters from raw form fields, parsing every numeric field.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::NotANumber`] for any field that does not parse
    /// (a negative radius fails here, since radius is unsigned), plus the
    /// errors of [`SearchParameters::new`].
    pub fn from_fields(
        location: &str,
        job_category_id: &str,
        radius_km: &str,
        center_lat: &str,
        center_lon: &str,
        offer_type_code: &str,
    ) -> Result<Self, ParamError> {
        let job_category_id = parse_field::<i64>("job_id", "integer", job_category_id)?;
        let radius_km = parse_field::<u32>("radius", "non-negative integer", radius_km)?;
        let center_lat = parse_field::<f64>("lat", "number", center_lat)?;
        let center_lon = parse_field::<f64>("lon", "number", center_lon)?;
        let offer_type_code = parse_field::<i64>("offer_type", "integer", offer_type_code)?;

        Self::new(
            location,
            job_category_id,
            radius_km,
            center_lat,
            center_lon,
            offer_type_code,
        )
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn job_category_id(&self) -> i64 {
        self.job_category_id
    }

    #[must_use]
    pub fn radius_km(&self) -> u32 {
        self.radius_km
    }

    #[must_use]
    pub fn center_lat(&self) -> f64 {
        self.center_lat
    }

    #[must_use]
    pub fn center_lon(&self) -> f64 {
        self.center_lon
    }

    #[must_use]
    pub fn offer_type_code(&self) -> i64 {
        self.offer_type_code
    }

    /// Compact one-line description of the query, used in progress output
    /// and repeated in export rows when no originating link exists.
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!(
            "ort={} beruf={} uk={} lat={} lon={} bart={}",
            self.location,
            self.job_category_id,
            self.radius_km,
            self.center_lat,
            self.center_lon,
            self.offer_type_code
        )
    }

    /// Labelled `(name, value)` pairs for printing the parameter block.
    #[must_use]
    pub fn labelled_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Location", self.location.clone()),
            ("Job ID", self.job_category_id.to_string()),
            ("Radius (km)", self.radius_km.to_string()),
            ("Latitude", self.center_lat.to_string()),
            ("Longitude", self.center_lon.to_string()),
            ("Offer type", self.offer_type_code.to_string()),
        ]
    }
}

fn parse_field<T: std::str::FromStr>(
    field: &'static str,
    expected: &'static str,
    raw: &str,
) -> Result<T, ParamError> {
    raw.trim().parse::<T>().map_err(|_| ParamError::NotANumber {
        field,
        expected,
        value: raw.to_owned(),
    })
}

fn check_coordinate(field: &'static str, value: f64, limit: f64) -> Result<(), ParamError> {
    if !value.is_finite() {
        return Err(ParamError::OutOfRange {
            field,
            reason: format!("{value} is not a finite number"),
        });
    }
    if value.abs() > limit {
        return Err(ParamError::OutOfRange {
            field,
            reason: format!("{value} is outside ±{limit}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fields_parses_valid_form_input() {
        let params =
            SearchParameters::from_fields("Berlin", "7856", "50", "52.531976", "13.386738", "109")
                .unwrap();
        assert_eq!(params.location(), "Berlin");
        assert_eq!(params.job_category_id(), 7856);
        assert_eq!(params.radius_km(), 50);
        assert!((params.center_lat() - 52.531_976).abs() < 1e-9);
        assert!((params.center_lon() - 13.386_738).abs() < 1e-9);
        assert_eq!(params.offer_type_code(), 109);
    }

    #[test]
    fn from_fields_trims_whitespace() {
        let params =
            SearchParameters::from_fields(" Hamburg ", " 1 ", " 0 ", " 53.5 ", " 10.0 ", " 102 ")
                .unwrap();
        assert_eq!(params.location(), "Hamburg");
        assert_eq!(params.radius_km(), 0);
    }

    #[test]
    fn from_fields_rejects_negative_radius() {
        let err = SearchParameters::from_fields("Berlin", "1", "-5", "52.5", "13.4", "109")
            .unwrap_err();
        assert!(
            matches!(err, ParamError::NotANumber { field: "radius", .. }),
            "expected radius rejection, got: {err:?}"
        );
    }

    #[test]
    fn from_fields_rejects_non_numeric_lat() {
        let err = SearchParameters::from_fields("Berlin", "1", "5", "north", "13.4", "109")
            .unwrap_err();
        assert!(matches!(err, ParamError::NotANumber { field: "lat", .. }));
    }

    #[test]
    fn new_rejects_empty_location() {
        let err = SearchParameters::new("   ", 1, 5, 52.5, 13.4, 109).unwrap_err();
        assert_eq!(err, ParamError::EmptyLocation);
    }

    #[test]
    fn new_rejects_out_of_range_coordinates() {
        assert!(matches!(
            SearchParameters::new("X", 1, 5, 91.0, 13.4, 109),
            Err(ParamError::OutOfRange { field: "lat", .. })
        ));
        assert!(matches!(
            SearchParameters::new("X", 1, 5, 52.0, -180.5, 109),
            Err(ParamError::OutOfRange { field: "lon", .. })
        ));
        assert!(matches!(
            SearchParameters::new("X", 1, 5, f64::NAN, 0.0, 109),
            Err(ParamError::OutOfRange { field: "lat", .. })
        ));
    }

    #[test]
    fn descriptor_names_every_field() {
        let params = SearchParameters::new("Berlin", 7856, 50, 52.5, 13.4, 109).unwrap();
        let d = params.descriptor();
        assert!(d.contains("ort=Berlin"));
        assert!(d.contains("beruf=7856"));
        assert!(d.contains("uk=50"));
        assert!(d.contains("bart=109"));
    }
}
