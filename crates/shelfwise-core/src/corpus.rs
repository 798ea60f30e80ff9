//! Ordered item collection with a case-insensitive title index.

use std::collections::HashMap;

use crate::error::BuildError;
use crate::models::Item;

/// Items in dataset order plus a lowercase title → position map.
///
/// Positions are only meaningful inside the [`Corpus`] that assigned them.
#[derive(Debug, Clone)]
pub struct Corpus {
    items: Vec<Item>,
    titles: HashMap<String, usize>,
}

impl Corpus {
    /// Index the items by lowercase title.
    ///
    /// Fails on an empty dataset or on two titles that collide once
    /// lowercased.
    pub fn new(items: Vec<Item>) -> Result<Self, BuildError> {
        if items.is_empty() {
            return Err(BuildError::DatasetEmpty);
        }

        let mut titles = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if let Some(&first) = titles.get(&item.title.to_lowercase()) {
                return Err(BuildError::DuplicateTitle {
                    title: item.title.clone(),
                    first,
                    second: i,
                });
            }
            titles.insert(item.title.to_lowercase(), i);
        }

        Ok(Self { items, titles })
    }

    /// Exact, case-insensitive title lookup.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.titles.get(&title.to_lowercase()).copied()
    }

    pub fn get(&self, i: usize) -> Option<&Item> {
        self.items.get(i)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
