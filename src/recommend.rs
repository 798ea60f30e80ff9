//! The `shelf recommend` command: query the engine and render the results.

use anyhow::{bail, Result};
use std::io::Write;

use shelfwise_core::models::Recommendation;
use shelfwise_core::recommend::{RankingParams, RecommendRequest, Recommender};

use crate::chart;
use crate::config::{validate_weight, Config};

/// Per-invocation overrides of the `[ranking]` section.
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    pub top_n: Option<usize>,
    pub weight_content: Option<f64>,
    pub weight_popularity: Option<f64>,
    pub format: String,
    pub explain: bool,
}

/// Merge CLI overrides over the config and validate the result.
pub fn resolve_params(config: &Config, opts: &RecommendOptions) -> Result<RankingParams> {
    let mut params = config.ranking.params();
    if let Some(n) = opts.top_n {
        if n == 0 {
            bail!("--top-n must be >= 1");
        }
        params.top_n = n;
    }
    if let Some(w) = opts.weight_content {
        validate_weight("--weight-content", w)?;
        params.weight_content = w;
    }
    if let Some(w) = opts.weight_popularity {
        validate_weight("--weight-popularity", w)?;
        params.weight_popularity = w;
    }
    Ok(params)
}

pub fn run_recommend(
    config: &Config,
    recommender: &Recommender,
    title: &str,
    opts: &RecommendOptions,
) -> Result<()> {
    match opts.format.as_str() {
        "text" | "json" | "chart" => {}
        other => bail!("Unknown output format: {}. Use text, json, or chart.", other),
    }

    let params = resolve_params(config, opts)?;
    let req = RecommendRequest::new(title)
        .with_params(params)
        .with_explain(opts.explain);
    let results = recommender.recommend(&req)?;

    tracing::debug!(title, results = results.len(), "recommendation complete");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match opts.format.as_str() {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?,
        "chart" => write!(out, "{}", chart::render(title, params.top_n, &results))?,
        _ => write!(out, "{}", render_text(&results))?,
    }
    Ok(())
}

/// Numbered list, one block per recommendation.
pub fn render_text(results: &[Recommendation<'_>]) -> String {
    if results.is_empty() {
        return "No results.\n".to_string();
    }

    let mut s = String::new();
    for (i, rec) in results.iter().enumerate() {
        let item = rec.item;
        s.push_str(&format!(
            "{}. [{:.4}] {} / {}\n",
            i + 1,
            rec.score,
            item.title,
            display_or(&item.author, "(unknown author)")
        ));
        s.push_str(&format!("    genre: {}\n", display_or(&item.genre, "-")));
        s.push_str(&format!(
            "    rating: {} ({} reviews)\n",
            item.rating, item.review_count
        ));
        if let Some(price) = item.price {
            s.push_str(&format!("    price: {}\n", price));
        }
        if let Some(year) = item.year {
            s.push_str(&format!("    year: {}\n", year));
        }
        if let Some(ex) = &rec.explain {
            s.push_str(&format!(
                "    explain: similarity={:.4} popularity={:.4} (rating={:.4}, reviews={:.4})\n",
                ex.similarity, ex.popularity, ex.norm_rating, ex.norm_reviews
            ));
            if !ex.shared_terms.is_empty() {
                s.push_str(&format!("    shared terms: {}\n", ex.shared_terms.join(", ")));
            }
        }
        s.push('\n');
    }
    s
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfwise_core::models::Item;

    fn config() -> Config {
        toml::from_str("[dataset]\npath = \"x.csv\"\n").unwrap()
    }

    #[test]
    fn test_resolve_params_overrides() {
        let opts = RecommendOptions {
            top_n: Some(3),
            weight_popularity: Some(1.0),
            ..Default::default()
        };
        let params = resolve_params(&config(), &opts).unwrap();
        assert_eq!(params.top_n, 3);
        assert_eq!(params.weight_content, 0.7);
        assert_eq!(params.weight_popularity, 1.0);
    }

    #[test]
    fn test_resolve_params_rejects_zero_top_n() {
        let opts = RecommendOptions {
            top_n: Some(0),
            ..Default::default()
        };
        assert!(resolve_params(&config(), &opts).is_err());
    }

    #[test]
    fn test_resolve_params_rejects_nan() {
        let opts = RecommendOptions {
            weight_content: Some(f64::NAN),
            ..Default::default()
        };
        assert!(resolve_params(&config(), &opts).is_err());
    }

    #[test]
    fn test_render_text() {
        let item = Item::new("Dune Messiah", "Frank Herbert", "Fiction", 4.5, 200).with_year(1969);
        let results = vec![Recommendation {
            item: &item,
            score: 0.61234,
            explain: None,
        }];
        let text = render_text(&results);
        assert!(text.starts_with("1. [0.6123] Dune Messiah / Frank Herbert\n"));
        assert!(text.contains("rating: 4.5 (200 reviews)"));
        assert!(text.contains("year: 1969"));
        assert!(!text.contains("price"));
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[]), "No results.\n");
    }
}
