use bson::{Bson, Document};

/// Joins nested field names into a column name.
pub const SEPARATOR: char = '_';

/// Flatten a document into `(column, value)` pairs in document order.
///
/// Nested documents are walked recursively and their keys joined with
/// [`SEPARATOR`]:
/// - `{ "a": { "b": 1 } }` → `a_b = 1`
/// - arrays are leaves and are kept whole
/// - an empty nested document contributes no column
pub fn flatten_document(doc: &Document) -> Vec<(String, Bson)> {
    let mut out = Vec::with_capacity(doc.len());
    flatten_into(doc, None, &mut out);
    out
}

fn flatten_into(doc: &Document, prefix: Option<&str>, out: &mut Vec<(String, Bson)>) {
    for (key, value) in doc {
        let path = match prefix {
            Some(p) => format!("{p}{SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Bson::Document(sub) => flatten_into(sub, Some(&path), out),
            other => out.push((path, other.clone())),
        }
    }
}

/// Split a column name back into field path segments.
///
/// A separator that would produce an empty segment (leading, or doubled) is
/// kept as part of the following key, so `_id` stays `["_id"]` and
/// `meta__v` becomes `["meta", "_v"]`.
pub fn split_column(column: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut pending = String::new();
    for part in column.split(SEPARATOR) {
        if part.is_empty() {
            pending.push(SEPARATOR);
            continue;
        }
        pending.push_str(part);
        segments.push(std::mem::take(&mut pending));
    }
    if !pending.is_empty() {
        // Trailing separators belong to the last key.
        match segments.last_mut() {
            Some(last) => last.push_str(&pending),
            None => segments.push(pending),
        }
    }
    segments
}

/// Rebuild a nested document from flattened cells.
///
/// Inverse of [`flatten_document`] for documents whose own keys contain no
/// [`SEPARATOR`]. When a path runs into a non-document value already placed
/// at that level, the rest of the path is stored as a single joined key.
pub fn unflatten_row<'a, I>(cells: I) -> Document
where
    I: IntoIterator<Item = (&'a str, &'a Bson)>,
{
    let mut doc = Document::new();
    for (column, value) in cells {
        let segments = split_column(column);
        insert_path(&mut doc, &segments, value.clone());
    }
    doc
}

fn insert_path(doc: &mut Document, segments: &[String], value: Bson) {
    match segments {
        [] => {}
        [last] => {
            doc.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            if !doc.contains_key(head) {
                doc.insert(head.clone(), Document::new());
            }
            match doc.get_mut(head) {
                Some(Bson::Document(sub)) => insert_path(sub, rest, value),
                _ => {
                    let sep = SEPARATOR.to_string();
                    doc.insert(segments.join(sep.as_str()), value);
                }
            }
        }
    }
}
