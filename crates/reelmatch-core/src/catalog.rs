//! Catalog of recommendable items and the raw table it is built from.
//!
//! Row order is the identity used everywhere downstream: feature-matrix rows,
//! similarity-matrix rows and columns, and neighbor-index entries all refer
//! to the same row index.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Title column name.
pub const TITLE_COLUMN: &str = "title";
/// Category column names, in order of preference.
pub const CATEGORY_COLUMNS: [&str; 2] = ["listed_in", "categories"];
/// Optional description column name.
pub const DESCRIPTION_COLUMN: &str = "description";

/// Loader contract: named columns of nullable string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Creates an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Short rows are padded with nulls, long rows truncated.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Builder-style [`RawTable::push_row`].
    #[must_use]
    pub fn with_row(mut self, row: Vec<Option<String>>) -> Self {
        self.push_row(row);
        self
    }

    /// Column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, each as long as [`RawTable::columns`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched exactly after trimming whitespace.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == name)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    title: String,
    categories: String,
    description: String,
    combined_text: String,
}

impl Item {
    /// Creates an item, deriving its combined text.
    pub fn new(
        title: impl Into<String>,
        categories: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut item = Self {
            title: title.into(),
            categories: categories.into(),
            description: description.into(),
            combined_text: String::new(),
        };
        item.refresh_combined_text();
        item
    }

    /// Lookup key.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Category string, possibly empty.
    #[must_use]
    pub fn categories(&self) -> &str {
        &self.categories
    }

    /// Description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// `title + " " + categories + " " + description`.
    #[must_use]
    pub fn combined_text(&self) -> &str {
        &self.combined_text
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.refresh_combined_text();
    }

    /// Replaces the categories.
    pub fn set_categories(&mut self, categories: impl Into<String>) {
        self.categories = categories.into();
        self.refresh_combined_text();
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.refresh_combined_text();
    }

    fn refresh_combined_text(&mut self) {
        self.combined_text = format!("{} {} {}", self.title, self.categories, self.description);
    }
}

/// Ordered, immutable sequence of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
    // title -> first row carrying it
    by_title: FxHashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from items in the given order.
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        let mut by_title = FxHashMap::default();
        for (row, item) in items.iter().enumerate() {
            by_title.entry(item.title.clone()).or_insert(row);
        }
        Ok(Self { items, by_title })
    }

    /// Builds a catalog from a loader table.
    ///
    /// Requires `title` and one of `listed_in` / `categories`; `description`
    /// is optional. Null cells become empty strings.
    pub fn from_table(table: &RawTable) -> Result<Self> {
        let title_col = table
            .column_index(TITLE_COLUMN)
            .ok_or_else(|| Error::MissingColumn(TITLE_COLUMN.to_string()))?;
        let category_col = CATEGORY_COLUMNS
            .iter()
            .find_map(|name| table.column_index(name))
            .ok_or_else(|| Error::MissingColumn(CATEGORY_COLUMNS.join(" | ")))?;
        let description_col = table.column_index(DESCRIPTION_COLUMN);

        let cell = |row: &[Option<String>], col: usize| -> String {
            row.get(col).cloned().flatten().unwrap_or_default()
        };

        let items = table
            .rows()
            .iter()
            .map(|row| {
                Item::new(
                    cell(row, title_col),
                    cell(row, category_col),
                    description_col.map(|c| cell(row, c)).unwrap_or_default(),
                )
            })
            .collect();
        Self::from_items(items)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: construction rejects empty catalogs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `row`.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Item> {
        self.items.get(row)
    }

    /// All items in row order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// First row whose title equals `title` exactly.
    #[must_use]
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    /// Combined texts in row order.
    pub fn combined_texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Item::combined_text)
    }
}
