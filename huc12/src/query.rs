//! Feature service query URLs.
//!
//! The lookup is a point-intersection query against an ArcGIS MapServer
//! layer exposing the Watershed Boundary Dataset HUC12 polygons:
//!
//! ```text
//! {service_url}?geometryType=esriGeometryPoint&geometry={x},{y}&inSR={crs}
//!     &outFields=*&returnGeometry=false&returnIdsOnly=false&f=GeoJSON
//! ```

use url::Url;

use crate::error::Result;
use crate::point::Point;

/// Default query endpoint: Oregon DEQ's WBD MapServer, HUC12 layer.
pub const DEFAULT_SERVICE_URL: &str =
    "https://arcgis.deq.state.or.us/arcgis/rest/services/WQ/WBD/MapServer/3/query";

/// Build the point-intersection query URL for `point`.
///
/// The query string is assembled first and then handed to the URL parser,
/// which percent-encodes characters outside the query-safe set (spaces,
/// quotes, `<`, `>`, non-ASCII) while leaving the `&`, `=` and `,`
/// delimiters as they are. The CRS identifier is not validated.
///
/// # Arguments
///
/// * `service_url` - The layer's `/query` endpoint
/// * `point` - The location to look up
///
/// # Errors
///
/// Returns [`Huc12Error::InvalidUrl`](crate::Huc12Error::InvalidUrl) if the
/// assembled string cannot be parsed as a URL.
///
/// # Example
///
/// ```
/// use huc12::{query::build_query_url, Point};
/// use url::Url;
///
/// let base = Url::parse("https://example.com/WBD/MapServer/3/query").unwrap();
/// let url = build_query_url(&base, &Point::new(-122.5, 45.5, 4326)).unwrap();
/// assert!(url.as_str().contains("geometry=-122.5,45.5&inSR=4326"));
/// ```
pub fn build_query_url(service_url: &Url, point: &Point) -> Result<Url> {
    let mut base = service_url.clone();
    base.set_query(None);
    base.set_fragment(None);

    let raw = format!(
        "{}?geometryType=esriGeometryPoint&geometry={},{}&inSR={}\
         &outFields=*&returnGeometry=false&returnIdsOnly=false&f=GeoJSON",
        base, point.x, point.y, point.crs
    );

    Ok(Url::parse(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://services.example.com/arcgis/rest/services/WBD/MapServer/3/query")
            .unwrap()
    }

    #[test]
    fn test_build_query_url() {
        let url = build_query_url(&base(), &Point::new(-122.3822, 42.09361, 4326)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://services.example.com/arcgis/rest/services/WBD/MapServer/3/query\
             ?geometryType=esriGeometryPoint&geometry=-122.3822,42.09361&inSR=4326\
             &outFields=*&returnGeometry=false&returnIdsOnly=false&f=GeoJSON"
        );
    }

    #[test]
    fn test_parameters_in_order() {
        let url = build_query_url(&base(), &Point::new(1.0, 2.0, 4326)).unwrap();
        let keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(
            keys,
            vec![
                "geometryType",
                "geometry",
                "inSR",
                "outFields",
                "returnGeometry",
                "returnIdsOnly",
                "f"
            ]
        );
    }

    #[test]
    fn test_delimiters_survive_encoding() {
        let url = build_query_url(&base(), &Point::new(-120.0, 44.0, "EPSG:4326")).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("geometry=-120,44&"));
        assert!(query.contains("inSR=EPSG:4326&"));
        assert!(!query.contains("%2C"));
        assert!(!query.contains("%26"));
        assert!(!query.contains("%3D"));
    }

    #[test]
    fn test_unsafe_characters_are_escaped() {
        let url = build_query_url(&base(), &Point::new(-120.0, 44.0, "NAD 83 \"HARN\"")).unwrap();
        assert!(url.query().unwrap().contains("inSR=NAD%2083%20%22HARN%22&"));
    }

    #[test]
    fn test_existing_query_on_base_is_replaced() {
        let base = Url::parse("https://example.com/query?f=json#top").unwrap();
        let url = build_query_url(&base, &Point::new(0.0, 0.0, 4326)).unwrap();
        assert!(url.as_str().starts_with("https://example.com/query?geometryType="));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_default_service_url_parses() {
        let url = Url::parse(DEFAULT_SERVICE_URL).unwrap();
        assert!(url.path().ends_with("/MapServer/3/query"));
    }
}
