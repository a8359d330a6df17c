//! Column-union observation collector.
//!
//! Source files do not share a schema: sensor columns come and go between
//! days. The collector reconciles them into one canonical header (column
//! names in first-seen order) and keeps each record's cells aligned to it.
//! A cell a record never had is absent, held as `None` and exported as `NA`
//! rather than zero or an empty string.

use std::collections::HashMap;

pub const STATION_CODE: &str = "STATION_CODE";
pub const STATION_NAME: &str = "STATION_NAME";
pub const DATE_TIME: &str = "DATE_TIME";

/// Observation records under one reconciled header, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Canonical column names, first-seen order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Appends one record given as (column, value) pairs.
    pub fn push_record(&mut self, fields: Vec<(String, String)>) {
        let mut row: Vec<Option<String>> = Vec::new();

        for (name, value) in fields {
            let i = self.column_index(&name);
            if i >= row.len() {
                row.resize(i + 1, None);
            }
            row[i] = Some(value);
        }

        self.rows.push(row);
    }

    /// Moves every record of `other` onto the end of `self`, matching
    /// columns by name rather than position.
    pub fn merge(&mut self, other: Dataset) {
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .map(|name| self.column_index(name))
            .collect();

        for row in other.rows {
            let mut merged: Vec<Option<String>> = Vec::new();
            for (j, cell) in row.into_iter().enumerate() {
                if let Some(value) = cell {
                    let i = mapping[j];
                    if i >= merged.len() {
                        merged.resize(i + 1, None);
                    }
                    merged[i] = Some(value);
                }
            }
            self.rows.push(merged);
        }
    }

    /// Cell of record `row` under `column`; absent cells are `None`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let i = *self.index.get(column)?;
        self.rows.get(row)?.get(i)?.as_deref()
    }

    /// Cells of record `row` aligned to the full header.
    pub fn row(&self, row: usize) -> Vec<Option<&str>> {
        let cells = &self.rows[row];
        (0..self.columns.len())
            .map(|i| cells.get(i).and_then(|c| c.as_deref()))
            .collect()
    }

    /// Rewrites every present cell of `column` with `f`.
    pub fn rewrite_column<F>(&mut self, column: &str, f: F)
    where
        F: Fn(&str) -> String,
    {
        let Some(&i) = self.index.get(column) else {
            return;
        };

        for row in &mut self.rows {
            if let Some(Some(cell)) = row.get_mut(i) {
                let rewritten = f(cell);
                *cell = rewritten;
            }
        }
    }

    /// Keeps only records whose `column` cell satisfies `pred`. Records
    /// without the cell never satisfy it.
    pub fn retain_where<F>(&mut self, column: &str, pred: F)
    where
        F: Fn(&str) -> bool,
    {
        let Some(&i) = self.index.get(column) else {
            self.rows.clear();
            return;
        };

        self.rows.retain(|row| match row.get(i) {
            Some(Some(cell)) => pred(cell),
            _ => false,
        });
    }

    /// Distinct present values of `column`, in record order.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let Some(&i) = self.index.get(column) else {
            return Vec::new();
        };

        let mut seen: Vec<String> = Vec::new();
        for row in &self.rows {
            if let Some(Some(cell)) = row.get(i) {
                if !seen.iter().any(|value| value == cell) {
                    seen.push(cell.clone());
                }
            }
        }

        seen
    }

    fn column_index(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }

        let i = self.columns.len();
        self.columns.push(name.to_string());
        self.index.insert(name.to_string(), i);
        i
    }
}

// -- Tests -------------------------------------------------------------------
