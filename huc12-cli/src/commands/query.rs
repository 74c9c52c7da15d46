use anyhow::{Context, Result};
use huc12::Huc12Table;

use super::{build_service, or_na};
use crate::OutputKind;

pub fn run(
    service_url: Option<String>,
    x: Vec<f64>,
    y: Vec<f64>,
    crs: Vec<String>,
    output: OutputKind,
    json: bool,
) -> Result<()> {
    let service = build_service(service_url)?;

    let rendered = match output {
        OutputKind::Table => {
            let table = service
                .lookup_table(&x, &y, &crs)
                .context("Failed to look up HUC12")?;
            render_table(&table, json)?
        }
        OutputKind::Codes => {
            let codes = service
                .lookup_codes(&x, &y, &crs)
                .context("Failed to look up HUC12")?;
            render_column(&codes, json)?
        }
        OutputKind::Names => {
            let names = service
                .lookup_names(&x, &y, &crs)
                .context("Failed to look up HUC12")?;
            render_column(&names, json)?
        }
    };

    println!("{}", rendered);
    Ok(())
}

fn render_table(table: &Huc12Table, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(table)?);
    }

    let mut lines = vec!["HUC12\tHUC12_Name".to_string()];
    lines.extend(
        table
            .rows()
            .iter()
            .map(|row| format!("{}\t{}", or_na(&row.huc12), or_na(&row.huc12_name))),
    );
    Ok(lines.join("\n"))
}

fn render_column(values: &[Option<String>], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(values)?);
    }

    Ok(values.iter().map(or_na).collect::<Vec<_>>().join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use huc12::Huc12Record;

    fn table() -> Huc12Table {
        vec![
            Huc12Record::new("180102060903", "Jenny Creek"),
            Huc12Record::missing(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_table_text() {
        let text = render_table(&table(), false).unwrap();
        assert_eq!(
            text,
            "HUC12\tHUC12_Name\n180102060903\tJenny Creek\nNA\tNA"
        );
    }

    #[test]
    fn test_render_table_json() {
        let json = render_table(&table(), true).unwrap();
        assert_eq!(
            json,
            r#"[{"HUC12":"180102060903","HUC12_Name":"Jenny Creek"},{"HUC12":null,"HUC12_Name":null}]"#
        );
    }

    #[test]
    fn test_render_column() {
        let codes = table().codes();
        assert_eq!(render_column(&codes, false).unwrap(), "180102060903\nNA");
        assert_eq!(render_column(&codes, true).unwrap(), r#"["180102060903",null]"#);
    }
}
