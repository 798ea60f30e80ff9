//! Core data models shared by the engine and its callers.
//!
//! An [`Item`] is one dataset row. A [`Recommendation`] borrows an item from
//! the recommender that produced it and carries its combined score.

use serde::Serialize;

/// One book in the corpus.
///
/// Missing text fields arrive as empty strings. `price` and `year` are
/// informational and never take part in scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub title: String,
    pub author: String,
    pub genre: String,
    /// User rating, typically in `[0, 5]`.
    pub rating: f64,
    pub review_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Item {
    /// Build an item with the scored fields only.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        rating: f64,
        review_count: u64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            rating,
            review_count,
            price: None,
            year: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Title, author and genre joined by single spaces.
    ///
    /// This is the only text the vectorizer sees.
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.title, self.author, self.genre)
    }
}

/// A single ranked candidate returned by
/// [`Recommender::recommend`](crate::recommend::Recommender::recommend).
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    #[serde(flatten)]
    pub item: &'a Item,
    /// Combined score rounded to four decimal places.
    pub score: f64,
    /// Scoring breakdown (populated when `explain` is requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreBreakdown>,
}

/// How a candidate's combined score was assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Unrounded combined score used for ranking.
    pub raw_score: f64,
    /// Cosine similarity to the query item.
    pub similarity: f64,
    /// `rating_weight * norm_rating + reviews_weight * norm_reviews`.
    pub popularity: f64,
    pub norm_rating: f64,
    pub norm_reviews: f64,
    pub weight_content: f64,
    pub weight_popularity: f64,
    /// Vocabulary terms present in both the query and the candidate.
    pub shared_terms: Vec<String>,
}

/// Round to four decimal places for display and stable comparisons.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_text_joins_fields() {
        let item = Item::new("Dune", "Frank Herbert", "Fiction", 4.8, 10);
        assert_eq!(item.combined_text(), "Dune Frank Herbert Fiction");
    }

    #[test]
    fn test_combined_text_empty_fields() {
        let item = Item::new("", "", "", 0.0, 0);
        assert_eq!(item.combined_text(), "  ");
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.123_456), 0.1235);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn test_recommendation_serializes_flat() {
        let item = Item::new("Dune", "Frank Herbert", "Fiction", 4.8, 10).with_year(1965);
        let rec = Recommendation {
            item: &item,
            score: 0.5,
            explain: None,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["year"], 1965);
        assert_eq!(json["score"], 0.5);
        assert!(json.get("price").is_none());
        assert!(json.get("explain").is_none());
    }
}
