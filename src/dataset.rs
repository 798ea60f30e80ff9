//! CSV dataset loading.
//!
//! Maps configured header names onto [`Item`] fields. Required columns are
//! title, author, genre, rating and reviews; price and year are optional.
//! Empty text cells become `""`, empty rating/review cells become `0`, and
//! empty price/year cells become `None`. Anything else that fails to parse
//! is an error naming the row and column.

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::io::Read;

use shelfwise_core::models::Item;

use crate::config::{ColumnsConfig, DatasetConfig, DuplicatePolicy};

/// Header positions resolved once per file.
struct ColumnIndex {
    title: usize,
    author: usize,
    genre: usize,
    rating: usize,
    reviews: usize,
    price: Option<usize>,
    year: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, columns: &ColumnsConfig) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).with_context(|| format!("dataset is missing required column '{}'", name))
        };

        Ok(Self {
            title: require(&columns.title)?,
            author: require(&columns.author)?,
            genre: require(&columns.genre)?,
            rating: require(&columns.rating)?,
            reviews: require(&columns.reviews)?,
            price: find(&columns.price),
            year: find(&columns.year),
        })
    }
}

/// Load items from the configured CSV file.
pub fn load_items(cfg: &DatasetConfig) -> Result<Vec<Item>> {
    let file = std::fs::File::open(&cfg.path)
        .with_context(|| format!("Failed to open dataset: {}", cfg.path.display()))?;
    let items = read_items(file, &cfg.columns, cfg.duplicate_titles)
        .with_context(|| format!("Failed to load dataset: {}", cfg.path.display()))?;

    tracing::info!(path = %cfg.path.display(), items = items.len(), "dataset loaded");
    Ok(items)
}

/// Parse items from any CSV reader.
pub fn read_items<R: Read>(
    reader: R,
    columns: &ColumnsConfig,
    duplicates: DuplicatePolicy,
) -> Result<Vec<Item>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut items = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut dropped = 0usize;

    for (row, record) in rdr.records().enumerate() {
        // Row 1 is the header.
        let line = row + 2;
        let record = record?;
        let item = parse_record(&record, &index, columns, line)?;

        if !seen.insert(item.title.to_lowercase()) {
            match duplicates {
                DuplicatePolicy::KeepFirst => {
                    dropped += 1;
                    continue;
                }
                DuplicatePolicy::Error => {
                    bail!("duplicate title '{}' at row {}", item.title, line)
                }
            }
        }
        items.push(item);
    }

    if dropped > 0 {
        tracing::warn!(dropped, "dropped rows with duplicate titles (kept first occurrence)");
    }

    Ok(items)
}

fn parse_record(
    record: &StringRecord,
    index: &ColumnIndex,
    columns: &ColumnsConfig,
    line: usize,
) -> Result<Item> {
    let text = |i: usize| record.get(i).unwrap_or("").trim().to_string();
    let cell = |i: usize| record.get(i).unwrap_or("").trim();

    let rating = parse_or(cell(index.rating), 0.0, &columns.rating, line)?;
    let review_count = parse_reviews(cell(index.reviews), &columns.reviews, line)?;
    let price = match index.price {
        Some(i) => parse_finite(cell(i), &columns.price, line)?,
        None => None,
    };
    let year = match index.year {
        Some(i) => parse_opt::<i32>(cell(i), &columns.year, line)?,
        None => None,
    };

    Ok(Item {
        title: text(index.title),
        author: text(index.author),
        genre: text(index.genre),
        rating,
        review_count,
        price,
        year,
    })
}

fn parse_or(raw: &str, sentinel: f64, column: &str, line: usize) -> Result<f64> {
    Ok(parse_finite(raw, column, line)?.unwrap_or(sentinel))
}

/// `f64::from_str` accepts `NaN` and `inf`; those are rejected here.
fn parse_finite(raw: &str, column: &str, line: usize) -> Result<Option<f64>> {
    match parse_opt::<f64>(raw, column, line)? {
        Some(v) if !v.is_finite() => {
            bail!("row {}: non-finite value '{}' in column '{}'", line, raw, column)
        }
        parsed => Ok(parsed),
    }
}

/// Review counts may carry thousands separators (`"1,234"`).
fn parse_reviews(raw: &str, column: &str, line: usize) -> Result<u64> {
    let cleaned: String = raw.chars().filter(|&c| c != ',' && c != '_').collect();
    Ok(parse_opt::<u64>(&cleaned, column, line)?.unwrap_or(0))
}

fn parse_opt<T: std::str::FromStr>(raw: &str, column: &str, line: usize) -> Result<Option<T>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>().map(Some).map_err(|_| {
        anyhow::anyhow!("row {}: invalid value '{}' in column '{}'", line, raw, column)
    })
}
