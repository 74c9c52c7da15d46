//! Advisory warnings raised while resolving a point.

use std::fmt;

/// Why a lookup fell back to a missing-value record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The service answered with an HTTP error status.
    HttpStatus(u16),
    /// The response parsed, but no feature contains the point.
    NoFeatures,
    /// The body was not a GeoJSON feature collection.
    Malformed(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::HttpStatus(status) => write!(f, "HTTP status {}", status),
            FallbackReason::NoFeatures => f.write_str("no matching features"),
            FallbackReason::Malformed(detail) => write!(f, "malformed response: {}", detail),
        }
    }
}

/// A non-fatal condition encountered during a lookup.
///
/// Warnings never stop a lookup. They are logged through `tracing` as they
/// occur and returned on [`PointLookup`](crate::PointLookup).
#[derive(Debug, Clone, PartialEq)]
pub enum LookupWarning {
    /// `x` lies outside the region's longitude bounds.
    LongitudeOutOfRange { value: f64, region: String },
    /// `y` lies outside the region's latitude bounds.
    LatitudeOutOfRange { value: f64, region: String },
    /// The point resolved to the missing-value fallback record.
    NoResult(FallbackReason),
}

impl fmt::Display for LookupWarning {
    // The range messages name the opposite axis from the bound checked; the
    // wording is kept as published.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupWarning::LongitudeOutOfRange { region, .. } => {
                write!(f, "y is far outside of {}", region)
            }
            LookupWarning::LatitudeOutOfRange { region, .. } => {
                write!(f, "x is far outside of {}", region)
            }
            LookupWarning::NoResult(_) => f.write_str("Error, NA returned"),
        }
    }
}
