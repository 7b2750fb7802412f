use std::error::Error;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::validation::ProductInput;

/// Reads a product manifest: `name,length,width,height,weight,quantity`.
/// A header row is optional; it is recognised by a `length` second column.
/// Values are passed through unchecked so validation can report them by field.
pub fn read_manifest_csv(path: &Path) -> Result<Vec<ProductInput>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut products = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let record = row?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let length_field = record.get(1).unwrap_or_default();
        if idx == 0 && length_field.eq_ignore_ascii_case("length") {
            debug!("Skipping manifest header: {:?}", record);
            continue;
        }

        if record.len() < 6 {
            return Err(format!(
                "manifest row {} has {} columns, expected 6",
                idx + 1,
                record.len()
            )
            .into());
        }

        let number = |col: usize| -> Result<f64, Box<dyn Error>> {
            let raw = record.get(col).unwrap_or_default();
            raw.parse::<f64>()
                .map_err(|e| format!("manifest row {} column {}: '{}' ({})", idx + 1, col + 1, raw, e).into())
        };

        let name = record.get(0).unwrap_or_default();
        let quantity_raw = record.get(5).unwrap_or_default();
        products.push(ProductInput {
            name: (!name.is_empty()).then(|| name.to_string()),
            length: number(1)?,
            width: number(2)?,
            height: number(3)?,
            weight: number(4)?,
            quantity: quantity_raw.parse::<i64>().map_err(|e| {
                format!("manifest row {} quantity '{}' ({})", idx + 1, quantity_raw, e)
            })?,
        });
    }

    info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}
