//! # Shelfwise Core
//!
//! Pure, in-memory logic for Shelfwise: item models, stop words, TF-IDF
//! vectorization, the pairwise similarity matrix, popularity normalization,
//! and the hybrid ranker that blends them.
//!
//! This crate performs no filesystem I/O and parses no configuration. The
//! application crate loads a dataset, builds a [`recommend::Recommender`]
//! once, and then serves any number of read-only queries against it.
//!
//! ```rust
//! use shelfwise_core::models::Item;
//! use shelfwise_core::recommend::{BuildOptions, RecommendRequest, Recommender};
//!
//! let items = vec![
//!     Item::new("Dune", "Frank Herbert", "Fiction", 4.8, 1000),
//!     Item::new("Dune Messiah", "Frank Herbert", "Fiction", 4.5, 200),
//!     Item::new("Salt Fat Acid Heat", "Samin Nosrat", "Non Fiction", 4.7, 600),
//! ];
//! let recommender = Recommender::build(items, &BuildOptions::default()).unwrap();
//! let results = recommender.recommend(&RecommendRequest::new("dune")).unwrap();
//! assert_eq!(results[0].item.title, "Dune Messiah");
//! ```

pub mod corpus;
pub mod error;
pub mod models;
pub mod popularity;
pub mod recommend;
pub mod similarity;
pub mod stopwords;
pub mod vectorize;
