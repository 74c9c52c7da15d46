//! Advisory bounding box for input coordinates.
//!
//! Points outside the region are still queried; the check only produces
//! [`LookupWarning`]s so that callers notice swapped axes or the wrong CRS.

use crate::error::{Huc12Error, Result};
use crate::point::Point;
use crate::warning::LookupWarning;

/// Approximate extent of Oregon in WGS84 degrees.
pub const OREGON_MIN_LON: f64 = -124.6155;
pub const OREGON_MAX_LON: f64 = -116.3519;
pub const OREGON_MIN_LAT: f64 = 41.8075;
pub const OREGON_MAX_LAT: f64 = 46.3586;

/// A named longitude/latitude box used for the advisory range check.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionBounds {
    /// Name used in warning messages.
    pub name: String,
    /// Western boundary longitude.
    pub min_lon: f64,
    /// Eastern boundary longitude.
    pub max_lon: f64,
    /// Southern boundary latitude.
    pub min_lat: f64,
    /// Northern boundary latitude.
    pub max_lat: f64,
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::oregon()
    }
}

impl RegionBounds {
    /// Create a new region.
    ///
    /// # Arguments
    ///
    /// * `name` - Region name used in warnings
    /// * `min_lon` - Western boundary longitude
    /// * `min_lat` - Southern boundary latitude
    /// * `max_lon` - Eastern boundary longitude
    /// * `max_lat` - Northern boundary latitude
    pub fn new(
        name: impl Into<String>,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Self {
        Self {
            name: name.into(),
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    /// The default region served by the Oregon DEQ WBD layer.
    pub fn oregon() -> Self {
        Self::new(
            "Oregon",
            OREGON_MIN_LON,
            OREGON_MIN_LAT,
            OREGON_MAX_LON,
            OREGON_MAX_LAT,
        )
    }

    /// Parse a `min_lon,min_lat,max_lon,max_lat` string.
    ///
    /// # Errors
    ///
    /// Returns [`Huc12Error::InvalidConfig`] unless the value holds exactly
    /// four numbers with `min <= max` on both axes.
    ///
    /// # Example
    ///
    /// ```
    /// use huc12::RegionBounds;
    ///
    /// let region = RegionBounds::parse("Idaho", "-117.24,41.99,-111.04,49.0").unwrap();
    /// assert_eq!(region.max_lat, 49.0);
    /// ```
    pub fn parse(name: impl Into<String>, value: &str) -> Result<Self> {
        let parts = value
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Huc12Error::InvalidConfig {
                message: format!("Invalid region bounds '{}': {}", value, e),
            })?;

        let &[min_lon, min_lat, max_lon, max_lat] = parts.as_slice() else {
            return Err(Huc12Error::InvalidConfig {
                message: format!(
                    "Invalid region bounds '{}': expected min_lon,min_lat,max_lon,max_lat",
                    value
                ),
            });
        };

        if min_lon > max_lon || min_lat > max_lat {
            return Err(Huc12Error::InvalidConfig {
                message: format!("Invalid region bounds '{}': minimum exceeds maximum", value),
            });
        }

        Ok(Self::new(name, min_lon, min_lat, max_lon, max_lat))
    }

    /// Compare a point's coordinates against the bounds.
    ///
    /// Returns one warning per axis that falls outside its range. The bounds
    /// themselves are inside the region; NaN is outside.
    pub fn check(&self, point: &Point) -> Vec<LookupWarning> {
        let mut warnings = Vec::new();

        if !(self.min_lon..=self.max_lon).contains(&point.x) {
            warnings.push(LookupWarning::LongitudeOutOfRange {
                value: point.x,
                region: self.name.clone(),
            });
        }

        if !(self.min_lat..=self.max_lat).contains(&point.y) {
            warnings.push(LookupWarning::LatitudeOutOfRange {
                value: point.y,
                region: self.name.clone(),
            });
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_point_has_no_warnings() {
        let region = RegionBounds::oregon();
        let point = Point::new(-122.3822, 42.09361, 4326);
        assert!(region.check(&point).is_empty());
    }

    #[test]
    fn test_origin_triggers_both_warnings() {
        let region = RegionBounds::oregon();
        let warnings = region.check(&Point::new(0.0, 0.0, 4326));

        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            warnings[0],
            LookupWarning::LongitudeOutOfRange { value, .. } if value == 0.0
        ));
        assert!(matches!(
            warnings[1],
            LookupWarning::LatitudeOutOfRange { value, .. } if value == 0.0
        ));
    }

    #[test]
    fn test_single_axis_violations() {
        let region = RegionBounds::oregon();

        // Seattle: longitude fine, latitude north of the box
        let warnings = region.check(&Point::new(-122.33, 47.61, 4326));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], LookupWarning::LatitudeOutOfRange { .. }));

        // Boise: latitude fine, longitude east of the box
        let warnings = region.check(&Point::new(-116.20, 43.62, 4326));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], LookupWarning::LongitudeOutOfRange { .. }));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let region = RegionBounds::oregon();
        let corner = Point::new(OREGON_MIN_LON, OREGON_MAX_LAT, 4326);
        assert!(region.check(&corner).is_empty());
    }

    #[test]
    fn test_nan_coordinates_are_out_of_range() {
        let region = RegionBounds::oregon();

        let warnings = region.check(&Point::new(f64::NAN, f64::NAN, 4326));
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], LookupWarning::LongitudeOutOfRange { .. }));
        assert!(matches!(warnings[1], LookupWarning::LatitudeOutOfRange { .. }));

        let warnings = region.check(&Point::new(-122.3822, f64::NAN, 4326));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], LookupWarning::LatitudeOutOfRange { .. }));
    }

    #[test]
    fn test_parse_region() {
        let region = RegionBounds::parse("Box", " -120, 40 ,-110,45").unwrap();
        assert_eq!(region.min_lon, -120.0);
        assert_eq!(region.min_lat, 40.0);
        assert_eq!(region.max_lon, -110.0);
        assert_eq!(region.max_lat, 45.0);
        assert_eq!(region.name, "Box");
    }

    #[test]
    fn test_parse_region_invalid() {
        assert!(RegionBounds::parse("Box", "-120,40,-110").is_err());
        assert!(RegionBounds::parse("Box", "-120,40,-110,45,1").is_err());
        assert!(RegionBounds::parse("Box", "a,b,c,d").is_err());
        assert!(RegionBounds::parse("Box", "-110,40,-120,45").is_err());
    }
}
