//! GeoJSON response parsing.
//!
//! The service is asked for `f=GeoJSON`, so a successful answer is a
//! FeatureCollection whose feature properties carry the layer attributes.
//! Anything else (an HTTP error, an ArcGIS `{"error": ...}` payload, an empty
//! collection) is reported as a [`FallbackReason`] for the caller to turn into
//! a missing-value record.

use geojson::{GeoJson, JsonObject};
use serde_json::Value as JsonValue;

use crate::client::ServiceResponse;
use crate::warning::FallbackReason;

/// Result of interpreting a service response.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// Properties of every matched feature, in service order.
    Matched(Vec<JsonObject>),
    /// The response yields no usable records.
    Fallback(FallbackReason),
}

/// Interpret a raw service response.
///
/// An error status short-circuits without looking at the body. A collection
/// with no features is a fallback; several features are all kept.
pub fn parse_response(response: &ServiceResponse) -> ParsedResponse {
    if response.is_error() {
        return ParsedResponse::Fallback(FallbackReason::HttpStatus(response.status));
    }

    match parse_feature_properties(&response.body) {
        Ok(features) if features.is_empty() => {
            ParsedResponse::Fallback(FallbackReason::NoFeatures)
        }
        Ok(features) => ParsedResponse::Matched(features),
        Err(reason) => ParsedResponse::Fallback(FallbackReason::Malformed(reason)),
    }
}

fn parse_feature_properties(body: &str) -> Result<Vec<JsonObject>, String> {
    let mut value: JsonValue = serde_json::from_str(body).map_err(|e| e.to_string())?;

    if let Some(error) = value.get("error") {
        return Err(format!("service error: {}", error));
    }

    // Layers queried with returnGeometry=false may omit `geometry` entirely.
    if let Some(JsonValue::Array(features)) = value.get_mut("features") {
        for feature in features.iter_mut() {
            if let JsonValue::Object(feature) = feature {
                feature.entry("geometry").or_insert(JsonValue::Null);
            }
        }
    }

    match GeoJson::from_json_value(value).map_err(|e| e.to_string())? {
        GeoJson::FeatureCollection(collection) => Ok(collection
            .features
            .into_iter()
            .map(|feature| feature.properties.unwrap_or_default())
            .collect()),
        GeoJson::Feature(_) => Err("expected FeatureCollection, found Feature".to_string()),
        GeoJson::Geometry(_) => Err("expected FeatureCollection, found Geometry".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_FEATURE: &str = r#"{
        "type": "FeatureCollection",
        "crs": {"type": "name", "properties": {"name": "EPSG:4326"}},
        "features": [{
            "type": "Feature",
            "id": 1821,
            "geometry": null,
            "properties": {"OBJECTID": 1821, "HUC12": "180102060903", "Name": "Jenny Creek"}
        }]
    }"#;

    const NO_GEOMETRY_MEMBER: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "id": 4,
            "properties": {"HUC12": "170900120201", "Name": "Johnson Creek"}
        }]
    }"#;

    const EMPTY: &str = r#"{"type": "FeatureCollection", "features": []}"#;

    const ARCGIS_ERROR: &str =
        r#"{"error": {"code": 400, "message": "Unable to complete operation.", "details": []}}"#;

    #[test]
    fn test_single_feature() {
        let parsed = parse_response(&ServiceResponse::new(200, ONE_FEATURE));
        let ParsedResponse::Matched(features) = parsed else {
            panic!("Expected Matched");
        };
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["HUC12"], "180102060903");
        assert_eq!(features[0]["Name"], "Jenny Creek");
    }

    #[test]
    fn test_feature_without_geometry_member() {
        let parsed = parse_response(&ServiceResponse::new(200, NO_GEOMETRY_MEMBER));
        assert!(matches!(parsed, ParsedResponse::Matched(ref f) if f.len() == 1));
    }

    #[test]
    fn test_empty_collection_falls_back() {
        let parsed = parse_response(&ServiceResponse::new(200, EMPTY));
        assert_eq!(parsed, ParsedResponse::Fallback(FallbackReason::NoFeatures));
    }

    #[test]
    fn test_error_status_ignores_body() {
        let parsed = parse_response(&ServiceResponse::new(500, ONE_FEATURE));
        assert_eq!(parsed, ParsedResponse::Fallback(FallbackReason::HttpStatus(500)));
    }

    #[test]
    fn test_arcgis_error_payload_is_malformed() {
        let parsed = parse_response(&ServiceResponse::new(200, ARCGIS_ERROR));
        assert!(matches!(
            parsed,
            ParsedResponse::Fallback(FallbackReason::Malformed(ref msg)) if msg.contains("Unable to complete")
        ));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let parsed = parse_response(&ServiceResponse::new(200, "<html>Service Unavailable</html>"));
        assert!(matches!(
            parsed,
            ParsedResponse::Fallback(FallbackReason::Malformed(_))
        ));
    }

    #[test]
    fn test_multiple_features_are_all_kept() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null, "properties": {"HUC12": "1", "Name": "A"}},
                {"type": "Feature", "geometry": null, "properties": {"HUC12": "2", "Name": "B"}}
            ]
        }"#;
        let parsed = parse_response(&ServiceResponse::new(200, body));
        assert!(matches!(parsed, ParsedResponse::Matched(ref f) if f.len() == 2));
    }

    #[test]
    fn test_feature_without_properties() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "geometry": null, "properties": null}]
        }"#;
        let parsed = parse_response(&ServiceResponse::new(200, body));
        let ParsedResponse::Matched(features) = parsed else {
            panic!("Expected Matched");
        };
        assert!(features[0].is_empty());
    }
}
