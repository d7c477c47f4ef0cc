use std::collections::HashMap;

use bson::{Bson, Document};

use crate::error::LoaderError;
use crate::options::FetchOptions;
use crate::source::DocumentSource;

/// Named collections of documents held in memory.
///
/// Answers the subset of MongoDB find semantics the loaders rely on:
/// - `{ "field": value }` and dotted `{ "a.b": value }` equality, ANDed
/// - a dotted path walks into arrays of documents, so `{ "cells.id": 1 }`
///   matches `{ "cells": [{ "id": 1 }] }`; numeric index segments are not
///   supported
/// - an array field matches when any element equals the value
/// - `null` matches a missing field
/// - numbers compare by value across Int32/Int64/Double
/// - inclusion or exclusion projections, `_id` included unless excluded
///
/// Operator documents (`$gt`, `$or`, ...) are rejected as query errors.
/// A collection that was never populated reads as empty.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: HashMap<String, Vec<Document>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(
        mut self,
        name: &str,
        docs: impl IntoIterator<Item = Document>,
    ) -> Self {
        self.insert_many(name, docs);
        self
    }

    pub fn insert_many(&mut self, collection: &str, docs: impl IntoIterator<Item = Document>) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .extend(docs);
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, Vec::len)
    }
}

impl DocumentSource for MemorySource {
    fn find(
        &self,
        collection: &str,
        options: &FetchOptions,
    ) -> Result<Vec<Document>, LoaderError> {
        let filter = options.filter_or_empty();
        validate_filter(&filter)?;
        let projection = match &options.projection {
            Some(p) => Projection::parse(p)?,
            None => Projection::All,
        };

        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|doc| matches_filter(doc, &filter))
            .map(|doc| projection.apply(doc))
            .collect())
    }
}

fn validate_filter(filter: &Document) -> Result<(), LoaderError> {
    for (key, value) in filter {
        if key.starts_with('$') {
            return Err(LoaderError::Query(format!(
                "unsupported top-level operator: {key}"
            )));
        }
        if let Bson::Document(sub) = value {
            if let Some(op) = sub.keys().find(|k| k.starts_with('$')) {
                return Err(LoaderError::Query(format!(
                    "unsupported operator {op} on field {key}"
                )));
            }
        }
    }
    Ok(())
}

fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(path, expected)| {
        let actual = lookup_values(doc, path);
        if actual.is_empty() {
            matches!(expected, Bson::Null)
        } else {
            actual.iter().any(|value| values_match(value, expected))
        }
    })
}

fn values_match(actual: &Bson, expected: &Bson) -> bool {
    if values_equal(actual, expected) {
        return true;
    }
    match (actual, expected) {
        (Bson::Array(items), e) if !matches!(e, Bson::Array(_)) => {
            items.iter().any(|item| values_equal(item, e))
        }
        _ => false,
    }
}

fn values_equal(a: &Bson, b: &Bson) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Every value a dotted path reaches, descending into arrays of documents.
fn lookup_values<'a>(doc: &'a Document, path: &str) -> Vec<&'a Bson> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut out = Vec::new();
    if let Some((head, rest)) = segments.split_first() {
        if let Some(value) = doc.get(*head) {
            collect_path(value, rest, &mut out);
        }
    }
    out
}

fn collect_path<'a>(value: &'a Bson, segments: &[&str], out: &mut Vec<&'a Bson>) {
    let Some((head, rest)) = segments.split_first() else {
        out.push(value);
        return;
    };
    match value {
        Bson::Document(sub) => {
            if let Some(next) = sub.get(*head) {
                collect_path(next, rest, out);
            }
        }
        Bson::Array(items) => {
            for item in items.iter().filter(|i| matches!(i, Bson::Document(_))) {
                collect_path(item, segments, out);
            }
        }
        _ => {}
    }
}

/// Walk a dotted path through nested documents.
fn lookup_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        match current {
            Bson::Document(sub) => current = sub.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

fn insert_path(doc: &mut Document, path: &str, value: Bson) {
    match path.split_once('.') {
        None => {
            doc.insert(path, value);
        }
        Some((head, rest)) => {
            if !matches!(doc.get(head), Some(Bson::Document(_))) {
                doc.insert(head, Document::new());
            }
            if let Some(Bson::Document(sub)) = doc.get_mut(head) {
                insert_path(sub, rest, value);
            }
        }
    }
}

fn remove_path(doc: &mut Document, path: &str) {
    match path.split_once('.') {
        None => {
            doc.remove(path);
        }
        Some((head, rest)) => {
            if let Some(Bson::Document(sub)) = doc.get_mut(head) {
                remove_path(sub, rest);
            }
        }
    }
}

const ID_FIELD: &str = "_id";

#[derive(Debug)]
enum Projection {
    All,
    Include { fields: Vec<String>, with_id: bool },
    Exclude(Vec<String>),
}

impl Projection {
    fn parse(spec: &Document) -> Result<Self, LoaderError> {
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        let mut with_id = true;
        let mut id_listed = false;

        for (field, value) in spec {
            let keep = match value {
                Bson::Boolean(b) => *b,
                Bson::Int32(n) => *n != 0,
                Bson::Int64(n) => *n != 0,
                Bson::Double(n) => *n != 0.0,
                other => {
                    return Err(LoaderError::Query(format!(
                        "unsupported projection value for {field}: {other}"
                    )));
                }
            };
            if field == ID_FIELD {
                with_id = keep;
                id_listed = true;
            } else if keep {
                include.push(field.clone());
            } else {
                exclude.push(field.clone());
            }
        }

        match (include.is_empty(), exclude.is_empty()) {
            (false, false) => Err(LoaderError::Query(
                "cannot mix inclusion and exclusion in a projection".into(),
            )),
            (false, true) => Ok(Projection::Include {
                fields: include,
                with_id,
            }),
            (true, true) if id_listed && with_id => Ok(Projection::Include {
                fields: Vec::new(),
                with_id,
            }),
            (true, _) => {
                if !with_id {
                    exclude.push(ID_FIELD.to_string());
                }
                if exclude.is_empty() {
                    Ok(Projection::All)
                } else {
                    Ok(Projection::Exclude(exclude))
                }
            }
        }
    }

    fn apply(&self, doc: &Document) -> Document {
        match self {
            Projection::All => doc.clone(),
            Projection::Include { fields, with_id } => {
                let mut out = Document::new();
                if *with_id {
                    if let Some(id) = doc.get(ID_FIELD) {
                        out.insert(ID_FIELD, id.clone());
                    }
                }
                for field in fields {
                    if let Some(value) = lookup_path(doc, field) {
                        insert_path(&mut out, field, value.clone());
                    }
                }
                out
            }
            Projection::Exclude(fields) => {
                let mut out = doc.clone();
                for field in fields {
                    remove_path(&mut out, field);
                }
                out
            }
        }
    }
}
