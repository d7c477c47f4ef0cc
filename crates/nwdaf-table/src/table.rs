use std::collections::HashMap;
use std::fmt;

use bson::{Bson, Document};

use crate::flatten::{flatten_document, unflatten_row};
use crate::text::{MISSING, MISSING_TEXT, bson_to_text};

/// Column holding the document identifier.
pub const ID_COLUMN: &str = "_id";

/// Flattened documents laid out as rows over a shared set of columns.
///
/// Columns are the union of every row's flattened paths, in the order they
/// were first seen. A cell is `None` when its row has no value for that
/// column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<Bson>>>,
}

impl Table {
    /// Flatten each document into a row and union the columns.
    pub fn from_documents(docs: &[Document]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut rows = Vec::with_capacity(docs.len());

        for doc in docs {
            let mut row: Vec<Option<Bson>> = Vec::new();
            for (path, value) in flatten_document(doc) {
                let slot = match index.get(&path) {
                    Some(&i) => i,
                    None => {
                        let i = columns.len();
                        index.insert(path.clone(), i);
                        columns.push(path);
                        i
                    }
                };
                if row.len() <= slot {
                    row.resize(slot + 1, None);
                }
                row[slot] = Some(value);
            }
            rows.push(row);
        }

        let width = columns.len();
        for row in &mut rows {
            row.resize(width, None);
        }

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<Bson>>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&Bson>>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[i].as_ref()).collect())
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Bson> {
        let i = self.column_index(column)?;
        self.rows.get(row)?[i].as_ref()
    }

    /// The first `n` rows. Columns are kept even if none of those rows use them.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Replace every cell in `name` with its text form, so the column holds
    /// only strings. Missing cells become `nan`.
    ///
    /// Returns `false` when the column does not exist.
    pub fn stringify_column(&mut self, name: &str) -> bool {
        let Some(i) = self.column_index(name) else {
            return false;
        };
        for row in &mut self.rows {
            let text = match row[i].take() {
                Some(Bson::String(s)) => s,
                Some(other) => bson_to_text(&other),
                None => MISSING_TEXT.to_string(),
            };
            row[i] = Some(Bson::String(text));
        }
        true
    }

    /// Rebuild the nested document for one row, skipping missing cells.
    pub fn unflatten_row(&self, row: usize) -> Option<Document> {
        let cells = self.rows.get(row)?;
        Some(unflatten_row(
            self.columns
                .iter()
                .zip(cells)
                .filter_map(|(c, v)| v.as_ref().map(|v| (c.as_str(), v))),
        ))
    }
}

impl fmt::Display for Table {
    /// Header line followed by one line per row, cells right-aligned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "Empty table ({} rows)", self.rows.len());
        }

        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(v) => bson_to_text(v),
                        None => MISSING.to_string(),
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                rendered
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write_line(f, self.columns.iter().map(String::as_str), &widths)?;
        for row in &rendered {
            writeln!(f)?;
            write_line(f, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> fmt::Result {
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{cell:>width$}")?;
    }
    Ok(())
}
