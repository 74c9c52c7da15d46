//! HUC12 lookup service.
//!
//! [`Huc12Service`] ties the pieces together: range check, query URL,
//! one GET per point, response parsing and field selection. The vectorized
//! lookups walk their inputs in order and resolve each point independently.
//!
//! ```ignore
//! use huc12::Huc12ServiceBuilder;
//!
//! let service = Huc12ServiceBuilder::from_env()?.build()?;
//!
//! let table = service.lookup_table(&[-122.3822, -123.0351], &[42.09361, 44.9429], &[4326])?;
//! for row in table.rows() {
//!     println!("{:?} {:?}", row.huc12, row.huc12_name);
//! }
//! ```

use tracing::{debug, warn};
use url::Url;

use crate::client::{HttpClient, ReqwestClient};
use crate::error::{Huc12Error, Result};
use crate::point::{Crs, Point};
use crate::query::{build_query_url, DEFAULT_SERVICE_URL};
use crate::record::{select_fields, Huc12Record, Huc12Table};
use crate::region::RegionBounds;
use crate::response::{parse_response, ParsedResponse};
use crate::warning::LookupWarning;

/// The outcome of resolving a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLookup {
    /// One record per matched feature, or the single missing-value record.
    pub records: Vec<Huc12Record>,
    /// Advisory conditions raised along the way, in the order they occurred.
    pub warnings: Vec<LookupWarning>,
}

impl PointLookup {
    /// Whether the lookup fell back to the missing-value record.
    pub fn is_fallback(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, LookupWarning::NoResult(_)))
    }
}

/// Client for resolving points to HUC12 subwatersheds.
///
/// Every lookup issues a fresh request; nothing is cached between calls.
///
/// # Example
///
/// ```ignore
/// use huc12::{Huc12Service, Point};
///
/// let service = Huc12Service::new()?;
/// let lookup = service.lookup_point(&Point::new(-122.3822, 42.09361, 4326))?;
/// println!("{:?}", lookup.records);
/// ```
pub struct Huc12Service {
    client: Box<dyn HttpClient>,
    service_url: Url,
    region: RegionBounds,
}

impl std::fmt::Debug for Huc12Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Huc12Service")
            .field("service_url", &self.service_url.as_str())
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl Huc12Service {
    /// Create a service against the default endpoint with a `reqwest` client.
    pub fn new() -> Result<Self> {
        Huc12ServiceBuilder::new().build()
    }

    /// Create a builder for more configuration options.
    pub fn builder() -> Huc12ServiceBuilder {
        Huc12ServiceBuilder::new()
    }

    /// The feature service query endpoint.
    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    /// The advisory region for the range check.
    pub fn region(&self) -> &RegionBounds {
        &self.region
    }

    /// Resolve one point.
    ///
    /// The range check runs first and never blocks the request. An HTTP
    /// error status, an unparsable body or an empty result yields a single
    /// missing-value record together with a [`LookupWarning::NoResult`].
    ///
    /// # Errors
    ///
    /// Transport failures propagate as [`Huc12Error::Http`]; an unusable URL
    /// as [`Huc12Error::InvalidUrl`].
    pub fn lookup_point(&self, point: &Point) -> Result<PointLookup> {
        let mut warnings = self.region.check(point);
        for warning in &warnings {
            warn!(x = point.x, y = point.y, crs = %point.crs, "{}", warning);
        }

        let url = build_query_url(&self.service_url, point)?;
        debug!(url = %url, "Querying feature service");

        let response = self.client.get(&url)?;

        let records = match parse_response(&response) {
            ParsedResponse::Matched(features) => {
                debug!(
                    x = point.x,
                    y = point.y,
                    matches = features.len(),
                    "Point resolved"
                );
                select_fields(&features)
            }
            ParsedResponse::Fallback(reason) => {
                let warning = LookupWarning::NoResult(reason.clone());
                warn!(
                    x = point.x,
                    y = point.y,
                    crs = %point.crs,
                    reason = %reason,
                    "{}",
                    warning
                );
                warnings.push(warning);
                vec![Huc12Record::missing()]
            }
        };

        Ok(PointLookup { records, warnings })
    }

    /// Resolve parallel sequences of coordinates to a table.
    ///
    /// `xs`, `ys` and `crss` are read positionally; a sequence of length one
    /// is reused for every position. Rows come back in input order, one per
    /// matched feature.
    ///
    /// # Arguments
    ///
    /// * `xs` - Longitudes (or eastings)
    /// * `ys` - Latitudes (or northings)
    /// * `crss` - CRS identifiers, e.g. `&[4326]` or `&["EPSG:2992"]`
    ///
    /// # Errors
    ///
    /// Returns [`Huc12Error::LengthMismatch`] if the lengths cannot be
    /// broadcast, or the first transport error encountered.
    pub fn lookup_table<C>(&self, xs: &[f64], ys: &[f64], crss: &[C]) -> Result<Huc12Table>
    where
        C: Clone + Into<Crs>,
    {
        let mut table = Huc12Table::default();
        for point in broadcast_points(xs, ys, crss)? {
            table.extend(self.lookup_point(&point)?.records);
        }
        Ok(table)
    }

    /// Like [`lookup_table`](Self::lookup_table), returning only `HUC12`.
    pub fn lookup_codes<C>(
        &self,
        xs: &[f64],
        ys: &[f64],
        crss: &[C],
    ) -> Result<Vec<Option<String>>>
    where
        C: Clone + Into<Crs>,
    {
        Ok(self.lookup_table(xs, ys, crss)?.into_codes())
    }

    /// Like [`lookup_table`](Self::lookup_table), returning only `HUC12_Name`.
    pub fn lookup_names<C>(
        &self,
        xs: &[f64],
        ys: &[f64],
        crss: &[C],
    ) -> Result<Vec<Option<String>>>
    where
        C: Clone + Into<Crs>,
    {
        Ok(self.lookup_table(xs, ys, crss)?.into_names())
    }
}

/// Common length of three sequences under length-one broadcasting.
///
/// All empty gives zero. Otherwise every length must be one or equal to the
/// longest.
pub fn broadcast_len(x: usize, y: usize, crs: usize) -> Result<usize> {
    let len = x.max(y).max(crs);
    let fits = |n: usize| n == len || n == 1;

    if len == 0 || (fits(x) && fits(y) && fits(crs)) {
        Ok(len)
    } else {
        Err(Huc12Error::LengthMismatch { x, y, crs })
    }
}

fn broadcast_points<C>(xs: &[f64], ys: &[f64], crss: &[C]) -> Result<Vec<Point>>
where
    C: Clone + Into<Crs>,
{
    let len = broadcast_len(xs.len(), ys.len(), crss.len())?;
    let pick = |n: usize, i: usize| if n == 1 { 0 } else { i };

    Ok((0..len)
        .map(|i| {
            Point::new(
                xs[pick(xs.len(), i)],
                ys[pick(ys.len(), i)],
                crss[pick(crss.len(), i)].clone(),
            )
        })
        .collect())
}

/// Builder for [`Huc12Service`].
pub struct Huc12ServiceBuilder {
    service_url: String,
    region: RegionBounds,
    client: Option<Box<dyn HttpClient>>,
}

impl Default for Huc12ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Huc12ServiceBuilder {
    /// Create a builder targeting [`DEFAULT_SERVICE_URL`] with Oregon bounds.
    pub fn new() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            region: RegionBounds::oregon(),
            client: None,
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `HUC12_SERVICE_URL` | Feature service `/query` endpoint | Oregon DEQ WBD layer 3 |
    /// | `HUC12_REGION` | Advisory bounds `min_lon,min_lat,max_lon,max_lat` | Oregon |
    /// | `HUC12_REGION_NAME` | Region name used in warnings | `Oregon` |
    ///
    /// # Errors
    ///
    /// Returns [`Huc12Error::InvalidConfig`] if `HUC12_REGION` is set but
    /// malformed.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();

        if let Ok(url) = std::env::var("HUC12_SERVICE_URL") {
            builder = builder.service_url(url);
        }

        let name = std::env::var("HUC12_REGION_NAME").ok();
        match std::env::var("HUC12_REGION") {
            Ok(bounds) => {
                let name = name.unwrap_or_else(|| "the configured region".to_string());
                builder = builder.region(RegionBounds::parse(name, &bounds)?);
            }
            Err(_) => {
                if let Some(name) = name {
                    builder.region.name = name;
                }
            }
        }

        Ok(builder)
    }

    /// Set the feature service query endpoint.
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    /// Set the advisory region.
    pub fn region(mut self, region: RegionBounds) -> Self {
        self.region = region;
        self
    }

    /// Use a custom transport instead of [`ReqwestClient`].
    pub fn client(mut self, client: impl HttpClient + 'static) -> Self {
        self.client = Some(Box::new(client));
        self
    }

    /// Build the [`Huc12Service`].
    ///
    /// # Errors
    ///
    /// Returns an error if the service URL does not parse, or if the default
    /// client cannot be created.
    pub fn build(self) -> Result<Huc12Service> {
        let service_url = Url::parse(&self.service_url)?;
        let client = match self.client {
            Some(client) => client,
            None => Box::new(ReqwestClient::new()?),
        };

        Ok(Huc12Service {
            client,
            service_url,
            region: self.region,
        })
    }
}
