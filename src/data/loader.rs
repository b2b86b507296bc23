//! CSV Data Loader Module
//! Fetches the published sheet over HTTP and parses it into a [`Catalog`] using Polars.

use super::{Catalog, Item};
use crate::config::AppConfig;
use polars::prelude::*;
use reqwest::blocking::Client;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Columns the sheet must provide, in sheet order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "ID",
    "Name",
    "Main_Crystal",
    "Color",
    "Size",
    "Type",
    "Status",
    "Image_URL",
    "Note",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("data unavailable: request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("data unavailable: failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("data unavailable: missing required column '{0}'")]
    MissingColumn(String),
}

/// Build the blocking HTTP client used for the sheet and for thumbnails.
pub fn http_client(config: &AppConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.clone())
        .build()
}

/// Loads the collection from the published CSV feed.
pub struct DataLoader {
    config: AppConfig,
}

impl DataLoader {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn source_url(&self) -> &str {
        &self.config.sheet_url
    }

    /// Download the raw CSV body.
    pub fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
        let url = self.source_url();
        debug!(url, "fetching sheet");

        let body = http_client(&self.config)?
            .get(url)
            .send()?
            .error_for_status()?
            .bytes()?;

        debug!(url, bytes = body.len(), "sheet downloaded");
        Ok(body.to_vec())
    }

    /// Fetch and parse the sheet.
    pub fn load(&self) -> Result<Catalog, LoaderError> {
        let bytes = self.fetch()?;
        let catalog = parse_csv(bytes)?;
        info!(url = self.source_url(), rows = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Like [`DataLoader::load`], but never fails: an error yields an empty catalog
    /// and is handed back for display.
    pub fn load_or_empty(&self) -> (Catalog, Option<LoaderError>) {
        match self.load() {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                error!(url = self.source_url(), error = %e, "failed to load catalog");
                (Catalog::default(), Some(e))
            }
        }
    }
}

/// Parse a CSV body into a catalog.
///
/// Every column is read as text so IDs such as `007` keep their form; Size is
/// parsed afterwards.
pub fn parse_csv(bytes: Vec<u8>) -> Result<Catalog, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    // Header cells are matched after trimming, so "ID " still counts as ID.
    let mut columns = HashMap::new();
    for name in df.get_column_names() {
        columns
            .entry(name.trim().to_string())
            .or_insert_with(|| name.to_string());
    }
    let column = |required: &str| -> Result<Vec<Option<String>>, LoaderError> {
        let name = columns
            .get(required)
            .ok_or_else(|| LoaderError::MissingColumn(required.to_string()))?;
        text_column(&df, name)
    };
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|required| !columns.contains_key(**required))
    {
        return Err(LoaderError::MissingColumn(missing.to_string()));
    }

    let ids = column("ID")?;
    let names = column("Name")?;
    let crystals = column("Main_Crystal")?;
    let colors = column("Color")?;
    let sizes = column("Size")?;
    let types = column("Type")?;
    let statuses = column("Status")?;
    let image_urls = column("Image_URL")?;
    let notes = column("Note")?;

    let mut items = Vec::with_capacity(df.height());
    let mut seen_ids = HashSet::new();
    for i in 0..df.height() {
        let id = ids[i].clone().unwrap_or_default();
        if id.is_empty() {
            debug!(row = i, "row without ID");
        } else if !seen_ids.insert(id.clone()) {
            warn!(id = %id, "duplicate ID in sheet");
        }

        items.push(Item {
            id,
            name: names[i].clone().unwrap_or_default(),
            main_crystal: crystals[i].clone().unwrap_or_default(),
            color: colors[i].clone().unwrap_or_default(),
            size_mm: sizes[i].as_deref().and_then(parse_size),
            bracelet_type: types[i].clone().unwrap_or_default(),
            status: statuses[i].clone().unwrap_or_default(),
            image_url: image_urls[i].clone(),
            note: notes[i].clone(),
        });
    }

    Ok(Catalog::new(items))
}

/// Trimmed cell values of a column; empty cells become `None`.
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column.str()?;
    Ok(values
        .into_iter()
        .map(|v| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect())
}

/// Parse a size cell such as `15.5` or `16 mm`.
fn parse_size(raw: &str) -> Option<f64> {
    let number = raw.trim().trim_end_matches("mm").trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}
