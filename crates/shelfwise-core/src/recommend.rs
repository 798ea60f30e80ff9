//! Hybrid ranker blending content similarity with popularity.
//!
//! A [`Recommender`] is built once from the full dataset and is read-only
//! afterwards, so it can be shared across threads without locking.
//!
//! # Scoring Algorithm
//!
//! For a query item `q` and every candidate `i`:
//!
//! 1. `popularity(i) = w_rating × norm_rating(i) + w_reviews × norm_reviews(i)`.
//! 2. `score(i) = weight_content × similarity(q, i) + weight_popularity × popularity(i)`.
//! 3. Stable sort by score (desc), so ties keep dataset order.
//! 4. Drop `q` itself and truncate to `top_n`.
//!
//! The weights are not required to sum to `1.0`; keeping the combined score
//! interpretable is the caller's responsibility.

use serde::Serialize;

use crate::corpus::Corpus;
use crate::error::{BuildError, RecommendError};
use crate::models::{round_score, Item, Recommendation, ScoreBreakdown};
use crate::popularity::{NormalizedPopularity, PopularityWeights};
use crate::similarity::SimilarityMatrix;
use crate::stopwords::StopWords;
use crate::vectorize::{SparseVector, TfIdfVectorizer, Vocabulary};

/// Options that shape construction.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub stop_words: StopWords,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            stop_words: StopWords::english(),
        }
    }
}

/// Ranking tuning parameters, decoupled from application config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankingParams {
    /// Maximum results to return.
    pub top_n: usize,
    /// Weight of content similarity in the combined score.
    pub weight_content: f64,
    /// Weight of popularity in the combined score.
    pub weight_popularity: f64,
    /// How rating and review count form the popularity score.
    pub popularity: PopularityWeights,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            top_n: 10,
            weight_content: 0.7,
            weight_popularity: 0.3,
            popularity: PopularityWeights::default(),
        }
    }
}

/// Bundles all inputs for a single recommendation query.
#[derive(Debug, Clone)]
pub struct RecommendRequest<'a> {
    /// Title of the item to find neighbours for (case-insensitive).
    pub query_title: &'a str,
    pub params: RankingParams,
    /// If true, populate [`ScoreBreakdown`] on each result.
    pub explain: bool,
}

impl<'a> RecommendRequest<'a> {
    /// Request with default parameters and no explanation.
    pub fn new(query_title: &'a str) -> Self {
        Self {
            query_title,
            params: RankingParams::default(),
            explain: false,
        }
    }

    pub fn with_params(mut self, params: RankingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }
}

/// Immutable state built once from the dataset.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Corpus,
    vocabulary: Vocabulary,
    vectors: Vec<SparseVector>,
    similarity: SimilarityMatrix,
    popularity: NormalizedPopularity,
}

impl Recommender {
    /// Run the construction phase: index titles, vectorize, compute the
    /// similarity matrix, and normalize popularity.
    pub fn build(items: Vec<Item>, options: &BuildOptions) -> Result<Self, BuildError> {
        let corpus = Corpus::new(items)?;

        let texts: Vec<String> = corpus.items().iter().map(Item::combined_text).collect();
        let model = TfIdfVectorizer::new(options.stop_words.clone()).fit_transform(&texts);
        let similarity = SimilarityMatrix::build(&model.vectors);
        let popularity = NormalizedPopularity::from_items(corpus.items());

        let zero_vectors = model.vectors.iter().filter(|v| v.is_zero()).count();
        tracing::info!(
            items = corpus.len(),
            terms = model.vocabulary.len(),
            zero_vectors,
            "recommender built"
        );

        Ok(Self {
            corpus,
            vocabulary: model.vocabulary,
            vectors: model.vectors,
            similarity,
            popularity,
        })
    }

    /// Rank every other item against the query title.
    pub fn recommend(
        &self,
        req: &RecommendRequest<'_>,
    ) -> Result<Vec<Recommendation<'_>>, RecommendError> {
        let query = self
            .corpus
            .position(req.query_title)
            .ok_or_else(|| RecommendError::NotFound {
                title: req.query_title.to_string(),
            })?;

        let params = &req.params;
        let sims = self.similarity.row(query);

        let mut scored: Vec<(usize, f64)> = (0..self.corpus.len())
            .map(|i| {
                let pop = self.popularity.score(i, &params.popularity);
                (
                    i,
                    params.weight_content * sims[i] + params.weight_popularity * pop,
                )
            })
            .collect();

        // `sort_by` is stable, so equal scores keep dataset order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let results = scored
            .into_iter()
            .filter(|&(i, _)| i != query)
            .take(params.top_n)
            .map(|(i, raw)| Recommendation {
                item: &self.corpus.items()[i],
                score: round_score(raw),
                explain: req.explain.then(|| self.breakdown(query, i, raw, params)),
            })
            .collect();

        Ok(results)
    }

    fn breakdown(
        &self,
        query: usize,
        i: usize,
        raw: f64,
        params: &RankingParams,
    ) -> ScoreBreakdown {
        let shared_terms = self.vectors[query]
            .shared_columns(&self.vectors[i])
            .into_iter()
            .filter_map(|col| self.vocabulary.term(col).map(str::to_string))
            .collect();

        ScoreBreakdown {
            raw_score: raw,
            similarity: self.similarity.get(query, i),
            popularity: self.popularity.score(i, &params.popularity),
            norm_rating: self.popularity.rating[i],
            norm_reviews: self.popularity.reviews[i],
            weight_content: params.weight_content,
            weight_popularity: params.weight_popularity,
            shared_terms,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn popularity(&self) -> &NormalizedPopularity {
        &self.popularity
    }
}
