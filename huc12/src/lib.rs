//! # HUC12 - Subwatershed Lookup Library
//!
//! Resolve coordinates to their enclosing HUC12 (12-digit Hydrologic Unit
//! Code) subwatershed by querying an ArcGIS feature service that publishes
//! the Watershed Boundary Dataset.
//!
//! ## Features
//!
//! - **Simple**: One GET per point, no caching, no retries
//! - **Order-preserving**: Vectorized lookups return rows in input order
//! - **Forgiving**: Empty or failed responses become missing-value rows
//! - **Testable**: The transport sits behind the [`HttpClient`] trait
//!
//! ## Quick Start
//!
//! ```ignore
//! use huc12::{Huc12Service, Point};
//!
//! let service = Huc12Service::new()?;
//!
//! // One point, with warnings
//! let lookup = service.lookup_point(&Point::new(-122.3822, 42.09361, 4326))?;
//! println!("{:?}", lookup.records);
//!
//! // Parallel sequences; length-one inputs broadcast
//! let codes = service.lookup_codes(&[-122.3822, -123.0351], &[42.09361, 44.9429], &[4326])?;
//! ```
//!
//! ## Query
//!
//! Each point becomes a point-intersection query requesting every attribute,
//! no geometry, GeoJSON output. Only the `HUC12` and `Name` attributes are
//! kept; `Name` is reported as `HUC12_Name`.
//!
//! ## Warnings
//!
//! Coordinates outside the configured region (Oregon by default) and
//! responses that resolve to nothing are reported as [`LookupWarning`]s and
//! logged with `tracing`; they never abort a lookup. Transport failures do.

pub mod client;
pub mod error;
pub mod point;
pub mod query;
pub mod record;
pub mod region;
pub mod response;
pub mod service;
pub mod warning;

// Re-export main types at crate root for convenience
pub use client::{HttpClient, ReqwestClient, ServiceResponse};
pub use error::{Huc12Error, Result};
pub use point::{Crs, Point};
pub use query::DEFAULT_SERVICE_URL;
pub use record::{Huc12Record, Huc12Table};
pub use region::RegionBounds;
pub use service::{Huc12Service, Huc12ServiceBuilder, PointLookup};
pub use url::Url;
pub use warning::{FallbackReason, LookupWarning};
