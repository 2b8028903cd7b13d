//! Phenomenon accumulation and filtering.
//!
//! Handlers feed `{name, value}` pairs into a [`PhenomenonBuilder`] keyed by
//! phenomenon identifier; the builder keeps first-seen order and converts to
//! immutable [`Phenomenon`] records at the end of a parse.

use std::collections::{HashMap, HashSet};

use catalog_common::{Phenomenon, PhenomenonAttribute, RecordResult};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ASCII: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").expect("Invalid non-ASCII regex"));

/// Replace each run of non-ASCII characters with a single space.
pub fn sanitize(value: &str) -> String {
    NON_ASCII.replace_all(value, " ").into_owned()
}

/// Ordered mapping from phenomenon identifier to its growing attribute list.
#[derive(Debug, Default)]
pub struct PhenomenonBuilder {
    order: Vec<(String, Vec<PhenomenonAttribute>)>,
    index: HashMap<String, usize>,
}

impl PhenomenonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, id: &str) -> &mut Vec<PhenomenonAttribute> {
        let position = match self.index.get(id) {
            Some(&position) => position,
            None => {
                self.order.push((id.to_string(), Vec::new()));
                self.index.insert(id.to_string(), self.order.len() - 1);
                self.order.len() - 1
            }
        };
        &mut self.order[position].1
    }

    /// Append one attribute to phenomenon `id`, creating it on first use.
    pub fn push(&mut self, id: &str, name: impl Into<String>, value: impl Into<String>) {
        self.slot(id).push(PhenomenonAttribute::new(name, value));
    }

    /// Replace every attribute of `id`, keeping its original position.
    pub fn replace(&mut self, id: &str, attributes: Vec<PhenomenonAttribute>) {
        *self.slot(id) = attributes;
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn build(self) -> RecordResult<Vec<Phenomenon>> {
        self.order
            .into_iter()
            .map(|(id, attributes)| Phenomenon::new(id, attributes))
            .collect()
    }
}

/// Keeps only the first of several identical ordered attribute lists.
#[derive(Debug, Default)]
pub struct AttributeDedup {
    seen: HashSet<Vec<(String, String)>>,
}

impl AttributeDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time this exact ordered list is offered.
    pub fn insert(&mut self, attributes: &[PhenomenonAttribute]) -> bool {
        let key = attributes
            .iter()
            .map(|a| (a.name.clone(), a.value.clone()))
            .collect();
        self.seen.insert(key)
    }
}

/// Drop attributes whose value is longer than `max_len` characters.
pub fn filter_long_attributes(
    attributes: Vec<PhenomenonAttribute>,
    max_len: usize,
) -> Vec<PhenomenonAttribute> {
    attributes
        .into_iter()
        .filter(|a| a.value.chars().count() <= max_len)
        .collect()
}
