//! Input points and coordinate reference system identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinate reference system identifier.
///
/// The identifier is opaque: it is rendered verbatim into the `inSR` query
/// parameter and interpretation is left to the feature service. Numeric EPSG
/// codes and strings are both accepted.
///
/// # Examples
///
/// ```
/// use huc12::Crs;
///
/// assert_eq!(Crs::from(4326).as_str(), "4326");
/// assert_eq!(Crs::from("EPSG:2992").as_str(), "EPSG:2992");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crs(String);

impl Crs {
    /// WGS84 geographic coordinates, the GeoJSON default.
    pub fn wgs84() -> Self {
        Crs::from(4326)
    }

    /// The identifier as passed to the service.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for Crs {
    fn from(code: u32) -> Self {
        Crs(code.to_string())
    }
}

impl From<i32> for Crs {
    fn from(code: i32) -> Self {
        Crs(code.to_string())
    }
}

impl From<&str> for Crs {
    fn from(id: &str) -> Self {
        Crs(id.to_string())
    }
}

impl From<String> for Crs {
    fn from(id: String) -> Self {
        Crs(id)
    }
}

impl From<&Crs> for Crs {
    fn from(crs: &Crs) -> Self {
        crs.clone()
    }
}

/// A single location to resolve.
///
/// `x` is the easting/longitude and `y` the northing/latitude, both expressed
/// in `crs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub crs: Crs,
}

impl Point {
    /// Create a new point.
    ///
    /// # Example
    ///
    /// ```
    /// use huc12::Point;
    ///
    /// let point = Point::new(-122.3822, 42.09361, 4326);
    /// assert_eq!(point.crs.as_str(), "4326");
    /// ```
    pub fn new(x: f64, y: f64, crs: impl Into<Crs>) -> Self {
        Self {
            x,
            y,
            crs: crs.into(),
        }
    }
}
