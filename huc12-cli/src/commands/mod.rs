pub mod batch;
pub mod query;

use anyhow::{Context, Result};
use huc12::{Huc12Service, Huc12ServiceBuilder};

/// Build the lookup service from the environment, honoring `--service-url`.
pub fn build_service(service_url: Option<String>) -> Result<Huc12Service> {
    let mut builder =
        Huc12ServiceBuilder::from_env().context("Invalid HUC12_* environment configuration")?;

    if let Some(url) = service_url {
        builder = builder.service_url(url);
    }

    builder.build().context("Failed to create HUC12 service")
}

/// Text rendering of a possibly missing value.
pub fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("NA")
}
