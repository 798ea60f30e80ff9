//! TOML configuration parsing and validation.
//!
//! See `config/shelf.example.toml` for a complete example.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use shelfwise_core::popularity::PopularityWeights;
use shelfwise_core::recommend::{BuildOptions, RankingParams};
use shelfwise_core::stopwords::StopWords;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub duplicate_titles: DuplicatePolicy,
}

/// What to do when two rows share a title once lowercased.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the first row, drop later ones.
    #[default]
    KeepFirst,
    /// Fail the load.
    Error,
}

/// CSV header names for each item field.
#[derive(Debug, Deserialize, Clone)]
pub struct ColumnsConfig {
    #[serde(default = "default_title_col")]
    pub title: String,
    #[serde(default = "default_author_col")]
    pub author: String,
    #[serde(default = "default_genre_col")]
    pub genre: String,
    #[serde(default = "default_rating_col")]
    pub rating: String,
    #[serde(default = "default_reviews_col")]
    pub reviews: String,
    #[serde(default = "default_price_col")]
    pub price: String,
    #[serde(default = "default_year_col")]
    pub year: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            title: default_title_col(),
            author: default_author_col(),
            genre: default_genre_col(),
            rating: default_rating_col(),
            reviews: default_reviews_col(),
            price: default_price_col(),
            year: default_year_col(),
        }
    }
}

fn default_title_col() -> String {
    "Name".to_string()
}
fn default_author_col() -> String {
    "Author".to_string()
}
fn default_genre_col() -> String {
    "Genre".to_string()
}
fn default_rating_col() -> String {
    "User Rating".to_string()
}
fn default_reviews_col() -> String {
    "Reviews".to_string()
}
fn default_price_col() -> String {
    "Price".to_string()
}
fn default_year_col() -> String {
    "Year".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorizerConfig {
    /// `"english"` or `"none"`.
    #[serde(default = "default_stop_words")]
    pub stop_words: String,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
            extra_stop_words: Vec::new(),
        }
    }
}

fn default_stop_words() -> String {
    "english".to_string()
}

impl VectorizerConfig {
    pub fn build_options(&self) -> BuildOptions {
        let base = match self.stop_words.as_str() {
            "none" => StopWords::none(),
            _ => StopWords::english(),
        };
        BuildOptions {
            stop_words: base.with_extra(&self.extra_stop_words),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_weight_content")]
    pub weight_content: f64,
    #[serde(default = "default_weight_popularity")]
    pub weight_popularity: f64,
    #[serde(default = "default_rating_weight")]
    pub rating_weight: f64,
    #[serde(default = "default_reviews_weight")]
    pub reviews_weight: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            weight_content: default_weight_content(),
            weight_popularity: default_weight_popularity(),
            rating_weight: default_rating_weight(),
            reviews_weight: default_reviews_weight(),
        }
    }
}

fn default_top_n() -> usize {
    10
}
fn default_weight_content() -> f64 {
    0.7
}
fn default_weight_popularity() -> f64 {
    0.3
}
fn default_rating_weight() -> f64 {
    0.6
}
fn default_reviews_weight() -> f64 {
    0.4
}

impl RankingConfig {
    pub fn params(&self) -> RankingParams {
        RankingParams {
            top_n: self.top_n,
            weight_content: self.weight_content,
            weight_popularity: self.weight_popularity,
            popularity: PopularityWeights {
                rating: self.rating_weight,
                reviews: self.reviews_weight,
            },
        }
    }
}

/// Check that a weight is usable in a linear blend.
pub fn validate_weight(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{} must be a finite, non-negative number (got {})", name, value);
    }
    Ok(())
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate ranking
    if config.ranking.top_n < 1 {
        anyhow::bail!("ranking.top_n must be >= 1");
    }
    validate_weight("ranking.weight_content", config.ranking.weight_content)?;
    validate_weight("ranking.weight_popularity", config.ranking.weight_popularity)?;
    validate_weight("ranking.rating_weight", config.ranking.rating_weight)?;
    validate_weight("ranking.reviews_weight", config.ranking.reviews_weight)?;

    // Validate vectorizer
    match config.vectorizer.stop_words.as_str() {
        "english" | "none" => {}
        other => anyhow::bail!(
            "Unknown stop word list: '{}'. Must be english or none.",
            other
        ),
    }

    Ok(config)
}
