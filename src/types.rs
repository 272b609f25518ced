//! Core data model types.
//!
//! Uploads are ingested into an in-memory [`FoodTable`]: one row per logged food
//! entry, one column per field of the uploaded spreadsheet. The schema is not
//! declared by the caller; column roles are discovered at ingestion time (see
//! [`crate::ingest`]), which preserves the "arbitrary nutrient columns" shape of
//! real food logs without a fixed record type.

use chrono::NaiveDate;

/// Role a column plays in a [`FoodTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// The date column. Exactly one per table.
    Date,
    /// Free-text column (food description, meal label, notes).
    Text,
    /// Numeric nutrient column (calories, protein, sodium, ...).
    Nutrient,
}

/// A single named column in a [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column header as it appeared in the upload.
    pub name: String,
    /// Discovered role.
    pub role: ColumnRole,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, role: ColumnRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Ordered column list describing the shape of a [`FoodTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Columns in upload order.
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Create a schema from columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Index of the date column.
    pub fn date_index(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.role == ColumnRole::Date)
    }

    /// Index of the first text column (the food description, by convention).
    pub fn food_index(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.role == ColumnRole::Text)
    }

    /// Indexes of all nutrient columns, in upload order.
    pub fn nutrient_indexes(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.role == ColumnRole::Nutrient)
            .map(|(i, _)| i)
            .collect()
    }

    /// Names of all nutrient columns, in upload order.
    pub fn nutrient_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.role == ColumnRole::Nutrient)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// A single typed cell in a [`FoodTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing/empty value, or a value the row policy coerced away.
    Null,
    /// Calendar date.
    Date(NaiveDate),
    /// UTF-8 text.
    Text(String),
    /// Numeric nutrient quantity.
    Number(f64),
}

impl Cell {
    /// Numeric view of the cell, if it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Date view of the cell, if it holds a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// In-memory food-log table.
///
/// This doubles as the *report*: filtering methods return new tables with the
/// same schema shape, and the export layer serializes whatever table it is
/// handed. Nothing here persists past the session that built it.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodTable {
    /// Schema describing row shape.
    pub schema: TableSchema,
    /// Row-major cell storage.
    pub rows: Vec<Vec<Cell>>,
}

impl FoodTable {
    /// Create a table from schema and rows.
    pub fn new(schema: TableSchema, rows: Vec<Vec<Cell>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Borrowed view of one row as a [`FoodEntry`].
    pub fn entry(&self, index: usize) -> Option<FoodEntry<'_>> {
        (index < self.rows.len()).then_some(FoodEntry { table: self, index })
    }

    /// Iterate all rows as [`FoodEntry`] views.
    pub fn entries(&self) -> impl Iterator<Item = FoodEntry<'_>> {
        (0..self.rows.len()).map(|index| FoodEntry { table: self, index })
    }

    /// New table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Cell]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// New table containing only rows whose date falls in `[from, to]`.
    ///
    /// An open bound is skipped; rows with a null date never match a bounded
    /// filter.
    pub fn filter_by_date_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let date_idx = self.schema.date_index();
        self.filter_rows(|row| {
            let Some(idx) = date_idx else { return true };
            match row.get(idx).and_then(Cell::as_date) {
                Some(d) => from.is_none_or(|f| d >= f) && to.is_none_or(|t| d <= t),
                None => from.is_none() && to.is_none(),
            }
        })
    }

    /// New table keeping the date and text columns plus only the named nutrient
    /// columns. Nutrient names not present in the schema are ignored.
    pub fn select_nutrients(&self, nutrients: &[&str]) -> Self {
        let keep: Vec<usize> = self
            .schema
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| match c.role {
                ColumnRole::Date | ColumnRole::Text => true,
                ColumnRole::Nutrient => nutrients.contains(&c.name.as_str()),
            })
            .map(|(i, _)| i)
            .collect();

        let columns = keep
            .iter()
            .map(|&i| self.schema.columns[i].clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Self {
            schema: TableSchema::new(columns),
            rows,
        }
    }

    /// New table containing only rows whose food description contains `query`
    /// (case-insensitive). Queries shorter than two characters match nothing.
    pub fn search_food(&self, query: &str) -> Self {
        let query = query.trim().to_lowercase();
        let food_idx = self.schema.food_index();
        self.filter_rows(|row| {
            if query.len() < 2 {
                return false;
            }
            let Some(idx) = food_idx else { return false };
            match row.get(idx) {
                Some(Cell::Text(s)) => s.to_lowercase().contains(&query),
                _ => false,
            }
        })
    }
}

/// Borrowed view of one [`FoodTable`] row.
///
/// Resolves column names to typed accessors, so callers can read nutrients by
/// name without knowing the upload's column order.
#[derive(Debug, Clone, Copy)]
pub struct FoodEntry<'a> {
    table: &'a FoodTable,
    index: usize,
}

impl<'a> FoodEntry<'a> {
    /// Row index within the table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Entry date, if the date cell is non-null.
    pub fn date(&self) -> Option<NaiveDate> {
        let idx = self.table.schema.date_index()?;
        self.table.rows[self.index].get(idx)?.as_date()
    }

    /// Food description, if a text column exists and the cell is non-null.
    pub fn food(&self) -> Option<&'a str> {
        let idx = self.table.schema.food_index()?;
        match self.table.rows[self.index].get(idx)? {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Value of the named nutrient column, if present and non-null.
    pub fn nutrient(&self, name: &str) -> Option<f64> {
        let idx = self.table.schema.index_of(name)?;
        if self.table.schema.columns[idx].role != ColumnRole::Nutrient {
            return None;
        }
        self.table.rows[self.index].get(idx)?.as_number()
    }

    /// Iterate `(nutrient name, value)` pairs for every non-null nutrient cell.
    pub fn nutrients(&self) -> impl Iterator<Item = (&'a str, f64)> {
        let row = &self.table.rows[self.index];
        self.table
            .schema
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.role == ColumnRole::Nutrient)
            .filter_map(|(i, c)| row.get(i)?.as_number().map(|v| (c.name.as_str(), v)))
    }
}
