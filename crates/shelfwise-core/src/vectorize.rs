//! TF-IDF vectorization over a fixed corpus.
//!
//! # Weighting
//!
//! For term `t` in document `d` over a corpus of `N` documents:
//!
//! 1. `tf(t, d)` = raw count of `t` in `d`.
//! 2. `idf(t) = ln((1 + N) / (1 + df(t))) + 1`, where `df(t)` is the number
//!    of documents containing `t`. Always positive.
//! 3. `weight = tf × idf`, then each vector is L2-normalized.
//!
//! A document with no surviving tokens yields a zero vector.

use std::collections::{BTreeMap, HashMap};

use crate::stopwords::StopWords;

/// Split text into lowercase tokens of two or more word characters,
/// dropping stop words.
pub fn tokenize<'a>(text: &'a str, stop_words: &'a StopWords) -> impl Iterator<Item = String> + 'a {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|tok| tok.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(move |tok| !stop_words.contains(tok))
}

/// Term → column mapping, sorted lexicographically.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Sparse vector stored as `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from pairs; they are sorted and zero weights are dropped.
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(col, _)| col);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit length. Zero vectors are left unchanged.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ci, wi) = self.entries[i];
            let (cj, wj) = other.entries[j];
            match ci.cmp(&cj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Columns present (non-zero) in both vectors, ascending.
    pub fn shared_columns(&self, other: &SparseVector) -> Vec<usize> {
        let (mut i, mut j) = (0, 0);
        let mut shared = Vec::new();
        while i < self.entries.len() && j < other.entries.len() {
            let ci = self.entries[i].0;
            let cj = other.entries[j].0;
            match ci.cmp(&cj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared.push(ci);
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }
}

/// Output of [`TfIdfVectorizer::fit_transform`].
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    pub vocabulary: Vocabulary,
    /// IDF per vocabulary column.
    pub idf: Vec<f64>,
    /// One L2-normalized vector per input document, in input order.
    pub vectors: Vec<SparseVector>,
}

/// Learns a vocabulary and IDF weights from a corpus in a single pass.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    stop_words: StopWords,
}

impl TfIdfVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfIdfModel {
        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = BTreeMap::new();
                for tok in tokenize(doc.as_ref(), &self.stop_words) {
                    *tf.entry(tok).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let vocabulary =
            Vocabulary::from_sorted(doc_freq.keys().map(|t| t.to_string()).collect());

        let vectors = counts
            .iter()
            .map(|tf| {
                let entries = tf
                    .iter()
                    .filter_map(|(term, &count)| {
                        vocabulary
                            .get(term)
                            .map(|col| (col, count as f64 * idf[col]))
                    })
                    .collect();
                let mut v = SparseVector::new(entries);
                v.l2_normalize();
                v
            })
            .collect();

        tracing::debug!(
            documents = documents.len(),
            terms = vocabulary.len(),
            "fitted tf-idf vocabulary"
        );

        TfIdfModel {
            vocabulary,
            idf,
            vectors,
        }
    }
}
