//! Output records and the field selector.

use geojson::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Source attribute holding the 12-digit hydrologic unit code.
pub const CODE_FIELD: &str = "HUC12";

/// Source attribute holding the subwatershed name; emitted as `HUC12_Name`.
pub const NAME_FIELD: &str = "Name";

/// The subwatershed resolved for one point.
///
/// `None` in either field means the point could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Huc12Record {
    #[serde(rename = "HUC12")]
    pub huc12: Option<String>,
    #[serde(rename = "HUC12_Name")]
    pub huc12_name: Option<String>,
}

impl Huc12Record {
    /// Create a record with both fields set.
    pub fn new(huc12: impl Into<String>, huc12_name: impl Into<String>) -> Self {
        Self {
            huc12: Some(huc12.into()),
            huc12_name: Some(huc12_name.into()),
        }
    }

    /// The fallback record: both fields missing.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Whether both fields are missing.
    pub fn is_missing(&self) -> bool {
        self.huc12.is_none() && self.huc12_name.is_none()
    }
}

/// Ordered lookup results, one row per resolved feature.
///
/// Rows follow input order. A point matching several features contributes
/// one row per feature, so the table can be longer than the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Huc12Table {
    rows: Vec<Huc12Record>,
}

impl Huc12Table {
    pub fn new(rows: Vec<Huc12Record>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Huc12Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Huc12Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `HUC12` column.
    pub fn codes(&self) -> Vec<Option<String>> {
        self.rows.iter().map(|r| r.huc12.clone()).collect()
    }

    /// The `HUC12_Name` column.
    pub fn names(&self) -> Vec<Option<String>> {
        self.rows.iter().map(|r| r.huc12_name.clone()).collect()
    }

    pub fn into_codes(self) -> Vec<Option<String>> {
        self.rows.into_iter().map(|r| r.huc12).collect()
    }

    pub fn into_names(self) -> Vec<Option<String>> {
        self.rows.into_iter().map(|r| r.huc12_name).collect()
    }
}

impl FromIterator<Huc12Record> for Huc12Table {
    fn from_iter<I: IntoIterator<Item = Huc12Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Huc12Record> for Huc12Table {
    fn extend<I: IntoIterator<Item = Huc12Record>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl IntoIterator for Huc12Table {
    type Item = Huc12Record;
    type IntoIter = std::vec::IntoIter<Huc12Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Narrow feature properties to the code and name fields.
///
/// Every other attribute is dropped. One record is produced per input
/// object, in order.
pub fn select_fields(features: &[JsonObject]) -> Vec<Huc12Record> {
    features
        .iter()
        .map(|properties| Huc12Record {
            huc12: properties.get(CODE_FIELD).and_then(property_as_string),
            huc12_name: properties.get(NAME_FIELD).and_then(property_as_string),
        })
        .collect()
}

/// Render an attribute value as text, treating `null` as missing.
fn property_as_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn properties(value: JsonValue) -> JsonObject {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("Expected JSON object"),
        }
    }

    #[test]
    fn test_select_fields_keeps_code_and_name() {
        let features = vec![properties(json!({
            "OBJECTID": 1821,
            "HUC12": "180102060903",
            "Name": "Jenny Creek",
            "AreaAcres": 24615.2,
            "States": "CA,OR"
        }))];

        let records = select_fields(&features);
        assert_eq!(records, vec![Huc12Record::new("180102060903", "Jenny Creek")]);
    }

    #[test]
    fn test_select_fields_missing_and_null_values() {
        let features = vec![
            properties(json!({ "HUC12": null, "Name": "Unnamed" })),
            properties(json!({ "OBJECTID": 7 })),
        ];

        let records = select_fields(&features);
        assert_eq!(records[0].huc12, None);
        assert_eq!(records[0].huc12_name.as_deref(), Some("Unnamed"));
        assert!(records[1].is_missing());
    }

    #[test]
    fn test_select_fields_stringifies_numbers() {
        let features = vec![properties(json!({ "HUC12": 170900030101u64, "Name": "Abiqua" }))];
        let records = select_fields(&features);
        assert_eq!(records[0].huc12.as_deref(), Some("170900030101"));
    }

    #[test]
    fn test_select_fields_preserves_order() {
        let features = vec![
            properties(json!({ "HUC12": "a", "Name": "first" })),
            properties(json!({ "HUC12": "b", "Name": "second" })),
        ];
        let codes: Vec<_> = select_fields(&features)
            .into_iter()
            .map(|r| r.huc12.unwrap())
            .collect();
        assert_eq!(codes, vec!["a", "b"]);
    }

    #[test]
    fn test_record_serializes_with_output_column_names() {
        let json = serde_json::to_value(Huc12Record::new("170900030101", "Abiqua Creek")).unwrap();
        assert_eq!(json, json!({ "HUC12": "170900030101", "HUC12_Name": "Abiqua Creek" }));

        let json = serde_json::to_value(Huc12Record::missing()).unwrap();
        assert_eq!(json, json!({ "HUC12": null, "HUC12_Name": null }));
    }

    #[test]
    fn test_table_columns() {
        let table: Huc12Table = vec![Huc12Record::new("1", "One"), Huc12Record::missing()]
            .into_iter()
            .collect();

        assert_eq!(table.len(), 2);
        assert_eq!(table.codes(), vec![Some("1".to_string()), None]);
        assert_eq!(table.names(), vec![Some("One".to_string()), None]);
        assert_eq!(table.clone().into_codes(), table.codes());
    }

    #[cfg(feature = "utoipa")]
    #[test]
    fn test_record_schema_uses_output_column_names() {
        use utoipa::PartialSchema;

        let schema = serde_json::to_value(Huc12Record::schema()).unwrap();
        assert!(schema["properties"]["HUC12"].is_object());
        assert!(schema["properties"]["HUC12_Name"].is_object());
        assert!(schema["properties"].get("huc12").is_none());
    }
}
