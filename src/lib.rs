//! # Shelfwise
//!
//! A hybrid book recommender: TF-IDF content similarity blended with a
//! normalized popularity signal.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────────┐   ┌──────────┐
//! │ CSV dataset │──▶│ Recommender (core crate)  │──▶│   CLI    │
//! │  (loader)   │   │ TF-IDF + cosine + min-max │   │ (shelf)  │
//! └─────────────┘   └──────────────────────────┘   └──────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. The **loader** ([`dataset`]) reads a CSV into typed items.
//! 2. The **engine** ([`engine`]) builds an immutable
//!    [`Recommender`](shelfwise_core::recommend::Recommender) once.
//! 3. The **CLI** answers queries ([`recommend`]) and renders them as text,
//!    JSON, or a bar chart ([`chart`]).
//!
//! ## Quick Start
//!
//! ```bash
//! shelf stats
//! shelf recommend "A Gentleman in Moscow: A Novel" --top-n 5 --format chart
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`dataset`] | CSV loading into items |
//! | [`engine`] | Construction of the recommender |
//! | [`recommend`] | The `recommend` command and text output |
//! | [`chart`] | Terminal bar chart of scores |
//! | [`stats`] | Corpus statistics |

pub mod chart;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod recommend;
pub mod stats;
