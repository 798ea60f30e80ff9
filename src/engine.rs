//! Construction phase: load the dataset and build the [`Recommender`].

use anyhow::{Context, Result};
use std::time::Instant;

use shelfwise_core::recommend::Recommender;

use crate::config::Config;
use crate::dataset;

/// Load items and build the immutable recommender. Fatal on any failure.
pub fn build_recommender(config: &Config) -> Result<Recommender> {
    let start = Instant::now();
    let items = dataset::load_items(&config.dataset)?;
    let options = config.vectorizer.build_options();

    let recommender = Recommender::build(items, &options).with_context(|| {
        format!(
            "Failed to build recommender from {}",
            config.dataset.path.display()
        )
    })?;

    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "construction complete");
    Ok(recommender)
}
