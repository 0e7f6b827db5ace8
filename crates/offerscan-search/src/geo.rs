//! Great-circle distance and radius membership for listings.

use crate::types::{Offer, OfferId};

/// Equatorial Earth radius. The search website measures with this value, so
/// listings right at the edge of the radius agree with what users see there.
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// Haversine great-circle distance between two lat/lon points in kilometers.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Whether the listing lies within `radius_km` of the search center.
///
/// Listings without usable coordinates are never within the radius and are
/// logged at `warn`, one line per listing.
#[must_use]
pub fn is_within_radius(offer: &Offer, center_lat: f64, center_lon: f64, radius_km: f64) -> bool {
    let Some((lat, lon)) = offer.coordinates() else {
        let id = offer.id();
        tracing::warn!(
            offer_id = id.as_ref().map_or("n/a", OfferId::as_str),
            "listing has no usable coordinates; excluded from radius"
        );
        return false;
    };

    distance_km(center_lat, center_lon, lat, lon) <= radius_km
}
