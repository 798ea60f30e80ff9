//! Popularity signal: per-metric min-max normalization of rating and review
//! count, plus the weighting that folds them into one score.

use serde::Serialize;

use crate::models::Item;

/// `(min, max)` over the finite values, or `None` when fewer than two
/// distinct finite values exist.
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let min = finite.clone().fold(f64::INFINITY, f64::min);
    let max = finite.fold(f64::NEG_INFINITY, f64::max);
    (max > min).then_some((min, max))
}

/// Min-max normalize values to `[0.0, 1.0]`.
///
/// If every value is equal (or the input is empty), every output is `0.0`.
/// Non-finite values are ignored when finding the range and map to `0.0`.
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = value_range(values) else {
        return vec![0.0; values.len()];
    };

    let range = max - min;
    values
        .iter()
        .map(|&x| {
            if x.is_finite() {
                ((x - min) / range).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Weights applied to the two normalized popularity columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopularityWeights {
    pub rating: f64,
    pub reviews: f64,
}

impl Default for PopularityWeights {
    fn default() -> Self {
        Self {
            rating: 0.6,
            reviews: 0.4,
        }
    }
}

/// Normalized rating and review columns, one entry per item.
#[derive(Debug, Clone, Default)]
pub struct NormalizedPopularity {
    pub rating: Vec<f64>,
    pub reviews: Vec<f64>,
    /// Every item shares one rating, so the column is all zeros.
    pub rating_constant: bool,
    /// Every item shares one review count, so the column is all zeros.
    pub reviews_constant: bool,
}

impl NormalizedPopularity {
    pub fn from_items(items: &[Item]) -> Self {
        let ratings: Vec<f64> = items.iter().map(|it| it.rating).collect();
        let reviews: Vec<f64> = items.iter().map(|it| it.review_count as f64).collect();

        let rating_constant = value_range(&ratings).is_none();
        let reviews_constant = value_range(&reviews).is_none();

        if rating_constant {
            tracing::debug!("rating is constant across the corpus; normalized to 0");
        }
        if reviews_constant {
            tracing::debug!("review count is constant across the corpus; normalized to 0");
        }

        Self {
            rating: min_max_normalize(&ratings),
            reviews: min_max_normalize(&reviews),
            rating_constant,
            reviews_constant,
        }
    }

    /// Weighted popularity for item `i`.
    pub fn score(&self, i: usize, weights: &PopularityWeights) -> f64 {
        weights.rating * self.rating[i] + weights.reviews * self.reviews[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty() {
        assert!(min_max_normalize(&[]).is_empty());
    }

    #[test]
    fn test_normalize_single_is_zero() {
        assert_eq!(min_max_normalize(&[5.0]), vec![0.0]);
    }

    #[test]
    fn test_normalize_range() {
        let out = min_max_normalize(&[10.0, 5.0, 0.0]);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - 0.5).abs() < 1e-12);
        assert!(out[2].abs() < 1e-12);
    }

    #[test]
    fn test_normalize_all_equal_is_zero() {
        assert_eq!(min_max_normalize(&[3.0, 3.0, 3.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_always_in_unit() {
        for v in min_max_normalize(&[-5.0, 100.0, 42.0, 7.5]) {
            assert!((0.0..=1.0).contains(&v), "out of range: {}", v);
        }
    }

    #[test]
    fn test_normalize_non_finite_stays_in_unit() {
        let values = [4.8, 4.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 4.0];
        let out = min_max_normalize(&values);
        for v in &out {
            assert!((0.0..=1.0).contains(v), "out of range: {}", v);
        }
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert_eq!(&out[2..5], &[0.0, 0.0, 0.0]);
        assert!(out[5].abs() < 1e-12);
    }

    #[test]
    fn test_normalize_only_non_finite_is_zero() {
        assert_eq!(min_max_normalize(&[f64::NAN, f64::INFINITY]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_constant_flag_matches_normalization() {
        let items = vec![
            Item::new("a", "", "", 4.0, 10),
            Item::new("b", "", "", f64::NAN, 10),
            Item::new("c", "", "", 4.0, 10),
        ];
        let pop = NormalizedPopularity::from_items(&items);
        assert!(pop.rating_constant);
        assert_eq!(pop.rating, vec![0.0, 0.0, 0.0]);
        assert!(pop.reviews_constant);
    }

    #[test]
    fn test_from_items_independent_columns() {
        let items = vec![
            Item::new("a", "", "", 4.0, 100),
            Item::new("b", "", "", 4.0, 300),
        ];
        let pop = NormalizedPopularity::from_items(&items);
        assert_eq!(pop.rating, vec![0.0, 0.0]);
        assert_eq!(pop.reviews, vec![0.0, 1.0]);
        assert!(pop.rating_constant);
        assert!(!pop.reviews_constant);
    }

    #[test]
    fn test_weighted_score() {
        let items = vec![
            Item::new("a", "", "", 5.0, 0),
            Item::new("b", "", "", 3.0, 10),
        ];
        let pop = NormalizedPopularity::from_items(&items);
        let w = PopularityWeights::default();
        assert!((pop.score(0, &w) - 0.6).abs() < 1e-12);
        assert!((pop.score(1, &w) - 0.4).abs() < 1e-12);
    }
}
