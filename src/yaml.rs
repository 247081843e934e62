//! Hand-rolled reader for a restricted YAML subset.
//!
//! Supported grammar: flat `key: value` lines plus exactly one level of
//! nested `parent:` blocks whose children are indented `key: value` lines.
//! Lists, multi-line scalars, anchors, and deeper nesting are unsupported
//! and yield undefined results, not a graceful error. Value types are
//! inferred per scalar via [`coerce`](crate::coerce::coerce); no schema.

use crate::bind::Resolver;
use crate::coerce::{Scalar, coerce};
use crate::error::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// One entry of the intermediate mapping: a scalar or a one-level sub-map.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Map(BTreeMap<String, Scalar>),
}

/// The two-level intermediate mapping produced by one parse. Keys are
/// normalized (separator-stripped) on insert; lookups normalize the same
/// way, so annotation keys like `DB_HOST` match parsed keys like `DBHOST`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: BTreeMap<String, Node>,
}

/// Strip `_` separators from a key. Applied identically to parsed keys and
/// to the keys the binder resolves, otherwise bound fields never match.
pub fn normalize_key(key: &str) -> String {
    key.trim().replace('_', "")
}

impl Mapping {
    /// Look up an entry by (unnormalized) key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(&normalize_key(key))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into a JSON value for generic consumption.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (key, node) in &self.entries {
            let value = match node {
                Node::Scalar(s) => s.to_value(),
                Node::Map(children) => Value::Object(
                    children
                        .iter()
                        .map(|(k, v)| (k.clone(), v.to_value()))
                        .collect(),
                ),
            };
            map.insert(key.clone(), value);
        }
        Value::Object(map)
    }

    /// Decode the mapping into any deserializable target by key + shape.
    ///
    /// Interop path kept alongside the binder: keys seen by the target are
    /// the normalized ones, so serde targets need matching (renamed) fields.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.to_value())
    }
}

/// Parse YAML-subset content into a [`Mapping`].
///
/// One line-oriented pass; the only state is the current parent key. A value
/// part that is empty after the first colon always starts a nested block
/// (the empty-scalar reading loses). A line without any colon is a
/// [`ConfigError::Format`].
pub fn parse_str(content: &str) -> Result<Mapping> {
    let mut entries: BTreeMap<String, Node> = BTreeMap::new();
    let mut parent: Option<String> = None;

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key_part, value_part)) = line.split_once(':') else {
            return Err(ConfigError::format(
                idx + 1,
                format!("expected `key: value`, got {:?}", line.trim()),
            ));
        };
        let value = value_part.trim();

        if value.is_empty() {
            // Start of a nested block. Insert the placeholder now so the
            // parent key exists even if the block has no children.
            let key = normalize_key(key_part);
            entries.insert(key.clone(), Node::Map(BTreeMap::new()));
            parent = Some(key);
            continue;
        }

        let indented = line.starts_with(|c: char| c == ' ' || c == '\t');
        if indented && let Some(parent_key) = &parent {
            if let Some(Node::Map(children)) = entries.get_mut(parent_key) {
                children.insert(normalize_key(key_part), coerce(value));
            }
            continue;
        }

        // Top-level scalar. Reset the parent so a later indented line can
        // never bleed into a previous block.
        entries.insert(normalize_key(key_part), Node::Scalar(coerce(value)));
        parent = None;
    }

    Ok(Mapping { entries })
}

/// Read and parse a YAML-subset file.
pub fn parse_file(path: &Path) -> Result<Mapping> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::io("read", path, e))?;
    parse_str(&content)
}

/// Adapts a [`Mapping`] to the binder's [`Resolver`], so the YAML path runs
/// through the same assignment engine as the `.env` path. Scalars are handed
/// over in their literal form; sub-maps are exposed as scoped resolvers.
pub struct MappingResolver<'m> {
    mapping: &'m Mapping,
}

impl<'m> MappingResolver<'m> {
    pub fn new(mapping: &'m Mapping) -> Self {
        Self { mapping }
    }
}

impl Resolver for MappingResolver<'_> {
    fn get(&self, key: &str) -> Option<String> {
        match self.mapping.get(key) {
            Some(Node::Scalar(s)) => Some(s.to_string()),
            _ => None,
        }
    }

    fn scope(&self, key: &str) -> Option<Box<dyn Resolver + '_>> {
        match self.mapping.get(key) {
            Some(Node::Map(children)) => Some(Box::new(SubMapResolver { children })),
            _ => None,
        }
    }
}

struct SubMapResolver<'m> {
    children: &'m BTreeMap<String, Scalar>,
}

impl Resolver for SubMapResolver<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.children.get(&normalize_key(key)).map(Scalar::to_string)
    }
}
