use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;

// Table data is compiled into the binary; there is nothing to configure or
// fetch at runtime.
const NUTRITION_CSV: &str = include_str!("../../data/nutrition.csv");
const COOKING_TIMES_CSV: &str = include_str!("../../data/cooking_times.csv");

/// Nutritional values for one table entry, per 100g-equivalent unit.
#[derive(Debug, Deserialize, Clone)]
pub struct NutritionRow {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Base cooking time for one table entry, in minutes.
#[derive(Debug, Deserialize, Clone)]
pub struct CookingTimeRow {
    pub name: String,
    pub minutes: u32,
}

/// Immutable lookup tables backing the estimation engine. Row order is
/// significant: substring matching resolves to the first matching row, so
/// reordering the embedded CSV changes estimates.
#[derive(Debug, Clone)]
pub struct EstimationTables {
    pub nutrition: Vec<NutritionRow>,
    pub cooking_times: Vec<CookingTimeRow>,
}

impl EstimationTables {
    /// Parse the embedded CSV data. Failure here means the shipped data is
    /// malformed and should surface at startup, never per request.
    pub fn load() -> Result<Self> {
        let nutrition = load_rows::<NutritionRow>(NUTRITION_CSV)
            .context("Failed to load embedded nutrition table")?;
        let cooking_times = load_rows::<CookingTimeRow>(COOKING_TIMES_CSV)
            .context("Failed to load embedded cooking time table")?;
        Ok(Self {
            nutrition,
            cooking_times,
        })
    }
}

fn load_rows<T: for<'de> Deserialize<'de>>(data: &str) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let mut rows = Vec::new();
    for (row_index, result) in rdr.deserialize().enumerate() {
        let row: T =
            result.with_context(|| format!("Failed to parse table row {}", row_index))?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(anyhow::anyhow!("Embedded table contains no data rows"));
    }
    Ok(rows)
}
