//! # Beer CSV Import
//!
//! Reads a beer list in the craft-cans CSV layout (`row`, `count.x`, `beer`, `abv`, `ibu`, `id`,
//! `ounces`, `style`, `style2`, `count.y`, `brewery`, `city`, `state`, `label`) into
//! [`BeerCsvRecord`]s, and turns those into [`BeerCreate`] payloads for the beer service.
//!
//! Missing measurements show up as `NA` or an empty cell; both decode to `None`.

use crate::model::{BeerCreate, BeerStyle};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Longest beer name kept on import.
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One line of the CSV file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeerCsvRecord {
    pub row: u32,
    #[serde(rename = "count.x")]
    pub count_x: i32,
    pub beer: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub abv: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub ibu: Option<u32>,
    pub id: u32,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub ounces: Option<f32>,
    pub style: String,
    pub style2: String,
    #[serde(rename = "count.y")]
    pub count_y: i32,
    pub brewery: String,
    pub city: String,
    pub state: String,
    pub label: String,
}

impl BeerCsvRecord {
    /// Payload for `save_new_beer`. The row number becomes the UPC, `count.x` the stock level,
    /// and every imported beer is listed at 10.00.
    pub fn to_beer_create(&self) -> BeerCreate {
        BeerCreate {
            beer_name: self.beer.chars().take(MAX_NAME_LEN).collect(),
            beer_style: style_for(&self.style),
            upc: self.row.to_string(),
            price: Decimal::new(1000, 2),
            quantity_on_hand: Some(self.count_x),
        }
    }
}

/// Maps a free-text CSV style onto the catalog's styles. Unrecognized styles become pilsners.
pub fn style_for(style: &str) -> BeerStyle {
    match style {
        "American Pale Lager" => BeerStyle::Lager,
        "American Pale Ale (APA)"
        | "American Black Ale"
        | "Belgian Dark Ale"
        | "American Blonde Ale" => BeerStyle::Ale,
        "American IPA" | "American Double / Imperial IPA" | "Belgian IPA" => BeerStyle::Ipa,
        "American Porter" => BeerStyle::Porter,
        "Oatmeal Stout" | "American Stout" => BeerStyle::Stout,
        "Saison / Farmhouse Ale" => BeerStyle::Saison,
        "Fruit / Vegetable Beer" | "Winter Warmer" | "Berliner Weissbier" => BeerStyle::Wheat,
        "English Pale Ale" => BeerStyle::PaleAle,
        _ => BeerStyle::Pilsner,
    }
}

/// Reads every record of a CSV file with a header row.
pub fn convert_csv(path: &Path) -> Result<Vec<BeerCsvRecord>, CsvImportError> {
    let file = File::open(path).map_err(|source| CsvImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = csv::Reader::from_reader(file)
        .deserialize()
        .collect::<Result<Vec<BeerCsvRecord>, _>>()
        .map_err(|source| CsvImportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "Parsed beer CSV");
    info!(records = records.len(), "Converted CSV");
    Ok(records)
}
