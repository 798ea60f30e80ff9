//! Corpus statistics and health overview.
//!
//! Used by `shelf stats` to show what was loaded and whether either
//! popularity metric is degenerate.

use anyhow::Result;
use serde::Serialize;

use shelfwise_core::recommend::Recommender;

use crate::config::Config;

#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub items: usize,
    pub vocabulary: usize,
    pub zero_vectors: usize,
    pub rating_min: f64,
    pub rating_max: f64,
    pub reviews_min: u64,
    pub reviews_max: u64,
    pub rating_constant: bool,
    pub reviews_constant: bool,
    pub mean_similarity: f64,
}

pub fn collect(recommender: &Recommender) -> CorpusStats {
    let items = recommender.corpus().items();
    let pop = recommender.popularity();

    CorpusStats {
        items: items.len(),
        vocabulary: recommender.vocabulary().len(),
        zero_vectors: recommender.vectors().iter().filter(|v| v.is_zero()).count(),
        rating_min: items.iter().map(|i| i.rating).fold(f64::INFINITY, f64::min),
        rating_max: items.iter().map(|i| i.rating).fold(f64::NEG_INFINITY, f64::max),
        reviews_min: items.iter().map(|i| i.review_count).min().unwrap_or(0),
        reviews_max: items.iter().map(|i| i.review_count).max().unwrap_or(0),
        rating_constant: pop.rating_constant,
        reviews_constant: pop.reviews_constant,
        mean_similarity: recommender.similarity().mean_off_diagonal(),
    }
}

/// Run the stats command: summarize the built recommender.
pub fn run_stats(config: &Config, recommender: &Recommender) -> Result<()> {
    let stats = collect(recommender);

    println!("Shelfwise — Corpus Stats");
    println!("========================");
    println!();
    println!("  Dataset:     {}", config.dataset.path.display());
    println!("  Items:       {}", stats.items);
    println!("  Vocabulary:  {} terms", stats.vocabulary);
    println!("  Zero vectors: {}", stats.zero_vectors);
    println!();
    println!("  Rating:      {} – {}", stats.rating_min, stats.rating_max);
    println!("  Reviews:     {} – {}", stats.reviews_min, stats.reviews_max);
    println!("  Mean similarity: {:.4}", stats.mean_similarity);

    if stats.rating_constant {
        println!();
        println!("  warning: rating is constant; it contributes 0 to every score");
    }
    if stats.reviews_constant {
        println!();
        println!("  warning: review count is constant; it contributes 0 to every score");
    }

    Ok(())
}
