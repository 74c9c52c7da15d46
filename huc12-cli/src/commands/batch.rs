use anyhow::{bail, Context, Result};
use huc12::{Crs, Huc12Record, Huc12Service, Point};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::{build_service, or_na};

/// Column names appended to CSV rows and properties set on GeoJSON features.
const CODE_COLUMN: &str = "HUC12";
const NAME_COLUMN: &str = "HUC12_Name";

#[allow(clippy::too_many_arguments)]
pub fn run(
    service_url: Option<String>,
    input: PathBuf,
    output: Option<PathBuf>,
    x_col: String,
    y_col: String,
    crs_col: Option<String>,
    crs: String,
) -> Result<()> {
    let service = build_service(service_url)?;

    // Detect file format
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let output_path = output.unwrap_or_else(|| default_output_path(&input, &extension));

    match extension.as_str() {
        "csv" => {
            let columns = CsvColumns {
                x: &x_col,
                y: &y_col,
                crs: crs_col.as_deref(),
            };
            let reader = File::open(&input).context("Failed to open input file")?;
            let writer = File::create(&output_path).context("Failed to create output file")?;
            process_csv(&service, reader, writer, &columns, &Crs::from(crs))?
        }
        "geojson" | "json" => {
            let reader = File::open(&input).context("Failed to open input file")?;
            let writer = File::create(&output_path).context("Failed to create output file")?;
            process_geojson(&service, reader, writer, &Crs::from(crs))?
        }
        _ => bail!(
            "Unsupported file format: {}. Use .csv or .geojson",
            extension
        ),
    }

    println!("Output written to: {}", output_path.display());
    Ok(())
}

fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_huc12.{}", stem, extension))
}

fn progress_bar(total: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

struct CsvColumns<'a> {
    x: &'a str,
    y: &'a str,
    crs: Option<&'a str>,
}

/// Append `HUC12` and `HUC12_Name` to every row.
///
/// A row whose point matches several features is written once per match.
fn process_csv<R: Read, W: Write>(
    service: &Huc12Service,
    input: R,
    output: W,
    columns: &CsvColumns<'_>,
    default_crs: &Crs,
) -> Result<()> {
    let mut reader = csv::Reader::from_reader(BufReader::new(input));

    // Find column indices
    let headers = reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("Column '{}' not found in CSV", name))
    };
    let x_idx = find(columns.x)?;
    let y_idx = find(columns.y)?;
    let crs_idx = columns.crs.map(find).transpose()?;

    // Collect records for progress bar
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;
    let pb = progress_bar(records.len() as u64)?;

    let mut writer = csv::Writer::from_writer(BufWriter::new(output));

    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.push(CODE_COLUMN);
    new_headers.push(NAME_COLUMN);
    writer.write_record(&new_headers)?;

    for (line, record) in records.iter().enumerate() {
        let parse = |idx: usize, label: &str| -> Result<f64> {
            record
                .get(idx)
                .with_context(|| format!("Missing {} on data row {}", label, line + 1))?
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid {} on data row {}", label, line + 1))
        };
        let x = parse(x_idx, "x")?;
        let y = parse(y_idx, "y")?;
        let crs = match crs_idx.and_then(|idx| record.get(idx)) {
            Some(value) if !value.trim().is_empty() => Crs::from(value.trim()),
            _ => default_crs.clone(),
        };

        let lookup = service
            .lookup_point(&Point::new(x, y, crs))
            .with_context(|| format!("Lookup failed on data row {}", line + 1))?;

        for matched in &lookup.records {
            let mut new_record: Vec<&str> = record.iter().collect();
            new_record.push(or_na(&matched.huc12));
            new_record.push(or_na(&matched.huc12_name));
            writer.write_record(&new_record)?;
        }

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;
    Ok(())
}

/// Set `HUC12` and `HUC12_Name` on every Point feature.
///
/// Features matching several subwatersheds are duplicated, one per match.
/// Non-point features are passed through unchanged.
fn process_geojson<R: Read, W: Write>(
    service: &Huc12Service,
    input: R,
    output: W,
    crs: &Crs,
) -> Result<()> {
    let geojson: geojson::GeoJson =
        serde_json::from_reader(BufReader::new(input)).context("Failed to parse GeoJSON")?;

    let result = match geojson {
        geojson::GeoJson::Feature(feature) => {
            let mut features = annotate_feature(service, feature, crs)?;
            if features.len() == 1 {
                geojson::GeoJson::Feature(features.remove(0))
            } else {
                geojson::GeoJson::FeatureCollection(geojson::FeatureCollection {
                    bbox: None,
                    features,
                    foreign_members: None,
                })
            }
        }
        geojson::GeoJson::FeatureCollection(mut fc) => {
            let pb = progress_bar(fc.features.len() as u64)?;

            let mut annotated = Vec::with_capacity(fc.features.len());
            for feature in std::mem::take(&mut fc.features) {
                annotated.extend(annotate_feature(service, feature, crs)?);
                pb.inc(1);
            }
            pb.finish_with_message("done");

            fc.features = annotated;
            geojson::GeoJson::FeatureCollection(fc)
        }
        geojson::GeoJson::Geometry(_) => {
            bail!("Bare geometries carry no properties; wrap them in a Feature")
        }
    };

    let mut writer = BufWriter::new(output);
    serde_json::to_writer_pretty(&mut writer, &result)?;
    writer.flush()?;
    Ok(())
}

fn annotate_feature(
    service: &Huc12Service,
    feature: geojson::Feature,
    crs: &Crs,
) -> Result<Vec<geojson::Feature>> {
    let coords = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(geojson::Value::Point(pos)) if pos.len() >= 2 => (pos[0], pos[1]),
        _ => {
            tracing::warn!(id = ?feature.id, "Skipping feature without a Point geometry");
            return Ok(vec![feature]);
        }
    };

    let lookup = service
        .lookup_point(&Point::new(coords.0, coords.1, crs.clone()))
        .context("Lookup failed")?;

    Ok(lookup
        .records
        .iter()
        .map(|record| with_huc12_properties(feature.clone(), record))
        .collect())
}

fn with_huc12_properties(mut feature: geojson::Feature, record: &Huc12Record) -> geojson::Feature {
    let as_json = |value: &Option<String>| {
        value
            .as_ref()
            .map(|s| JsonValue::String(s.clone()))
            .unwrap_or(JsonValue::Null)
    };
    feature.set_property(CODE_COLUMN, as_json(&record.huc12));
    feature.set_property(NAME_COLUMN, as_json(&record.huc12_name));
    feature
}
