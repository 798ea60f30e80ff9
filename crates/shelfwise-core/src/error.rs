//! Typed failures for the two phases of a [`Recommender`](crate::recommend::Recommender).
//!
//! Construction errors are fatal and reported once. Query errors are
//! per-call and never affect later queries.

use thiserror::Error;

/// Failure while building the recommender from a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The dataset contained no items.
    #[error("dataset is empty: at least one item is required")]
    DatasetEmpty,
    /// Two items share a title once lowercased.
    #[error("duplicate title '{title}' at rows {first} and {second}")]
    DuplicateTitle {
        title: String,
        first: usize,
        second: usize,
    },
}

/// Failure while answering a single recommendation query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// No item title matches the query (case-insensitive exact match).
    #[error("Book '{title}' not found in dataset.")]
    NotFound { title: String },
}
