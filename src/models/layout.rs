//! Key layouts and the set of layouts the keyboard can switch between.

use crate::models::KeyLabel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Embedded built-in layouts
const BUILTIN_LAYOUTS_TOML: &str = include_str!("../data/layouts.toml");

/// Name of the layout the keyboard starts on.
pub const DEFAULT_LAYOUT: &str = "standard";

/// One row of keys, left to right.
pub type KeyRow = Vec<KeyLabel>;

/// Position of a key in the displayed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index (0 = top row)
    pub row: usize,
    /// Key index within the row
    pub col: usize,
}

impl Position {
    /// Creates a new Position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A named set of key rows.
///
/// # Validation
///
/// - name must be non-empty
/// - the default row-set must have at least one non-empty row
/// - a shift row-set, when present, has the same number of rows and the
///   same number of keys per row as the default row-set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Identifier used by `switch_layout` (e.g., "standard")
    pub name: String,
    /// Display title for the layout switcher
    #[serde(default)]
    pub title: Option<String>,
    /// Unshifted rows
    #[serde(rename = "default")]
    pub default_rows: Vec<KeyRow>,
    /// Shifted rows, position-for-position with `default_rows`
    #[serde(rename = "shift", default, skip_serializing_if = "Option::is_none")]
    pub shift_rows: Option<Vec<KeyRow>>,
}

impl Layout {
    /// Creates a layout with only a default row-set.
    pub fn new(name: impl Into<String>, default_rows: Vec<KeyRow>) -> Self {
        Self {
            name: name.into(),
            title: None,
            default_rows,
            shift_rows: None,
        }
    }

    /// Adds a shift row-set.
    #[must_use]
    pub fn with_shift(mut self, shift_rows: Vec<KeyRow>) -> Self {
        self.shift_rows = Some(shift_rows);
        self
    }

    /// Builds a layout from label text, mostly for tests and fixtures.
    pub fn from_text(name: &str, rows: &[&[&str]]) -> Self {
        Self::new(name, Self::rows_from_text(rows))
    }

    /// Parses label text rows.
    #[must_use]
    pub fn rows_from_text(rows: &[&[&str]]) -> Vec<KeyRow> {
        rows.iter()
            .map(|row| row.iter().map(|text| KeyLabel::parse(text)).collect())
            .collect()
    }

    /// Title shown in the switcher, falling back to the name.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Whether the layout has a shift row-set.
    #[must_use]
    pub const fn has_shift(&self) -> bool {
        self.shift_rows.is_some()
    }

    /// Rows to display: the shift row-set when `shift` is set and one exists.
    #[must_use]
    pub fn rows(&self, shift: bool) -> &[KeyRow] {
        match (&self.shift_rows, shift) {
            (Some(rows), true) => rows,
            _ => &self.default_rows,
        }
    }

    /// Label at a grid position of the displayed row-set.
    #[must_use]
    pub fn label_at(&self, position: Position, shift: bool) -> Option<&KeyLabel> {
        self.rows(shift).get(position.row)?.get(position.col)
    }

    /// Total number of keys in the default row-set.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.default_rows.iter().map(Vec::len).sum()
    }

    /// Validates the layout.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Layout name cannot be empty");
        }

        if self.default_rows.iter().all(Vec::is_empty) {
            anyhow::bail!("Layout '{}' has no keys", self.name);
        }

        if let Some(shift_rows) = &self.shift_rows {
            if shift_rows.len() != self.default_rows.len() {
                anyhow::bail!(
                    "Layout '{}': shift row-set has {} rows, default has {}",
                    self.name,
                    shift_rows.len(),
                    self.default_rows.len()
                );
            }

            for (index, (default_row, shift_row)) in
                self.default_rows.iter().zip(shift_rows).enumerate()
            {
                if default_row.len() != shift_row.len() {
                    anyhow::bail!(
                        "Layout '{}': shift row {} has {} keys, default row has {}",
                        self.name,
                        index,
                        shift_row.len(),
                        default_row.len()
                    );
                }
            }
        }

        Ok(())
    }
}

/// File schema for a layouts TOML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutsFile {
    layouts: Vec<Layout>,
}

/// Ordered collection of layouts with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSet {
    layouts: Vec<Layout>,
}

impl LayoutSet {
    /// Creates a validated set from a list of layouts.
    pub fn new(layouts: Vec<Layout>) -> Result<Self> {
        if layouts.is_empty() {
            anyhow::bail!("At least one layout is required");
        }

        for (index, layout) in layouts.iter().enumerate() {
            layout.validate()?;
            if layouts[..index].iter().any(|other| other.name == layout.name) {
                anyhow::bail!("Duplicate layout name '{}'", layout.name);
            }
        }

        Ok(Self { layouts })
    }

    /// Loads the layouts embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_LAYOUTS_TOML).context("Failed to parse built-in layouts")
    }

    /// Parses a layouts TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LayoutsFile = toml::from_str(content).context("Invalid layouts TOML")?;
        Self::new(file.layouts)
    }

    /// Loads a layouts file from disk.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read layouts file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .context(format!("Failed to load layouts file: {}", path.display()))
    }

    /// Built-in layouts with the layouts of `path` merged in.
    ///
    /// A user layout with the same name as a built-in one replaces it in
    /// place; new names are appended.
    pub fn builtin_with_file(path: Option<&Path>) -> Result<Self> {
        let mut set = Self::builtin()?;
        if let Some(path) = path {
            let extra = Self::load_file(path)?;
            for layout in extra.layouts {
                set.upsert(layout);
            }
            tracing::debug!(path = %path.display(), count = set.len(), "merged user layouts");
        }
        Ok(set)
    }

    fn upsert(&mut self, layout: Layout) {
        if let Some(existing) = self.layouts.iter_mut().find(|l| l.name == layout.name) {
            *existing = layout;
        } else {
            self.layouts.push(layout);
        }
    }

    /// Looks up a layout by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|layout| layout.name == name)
    }

    /// Index of a layout in declaration order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.layouts.iter().position(|layout| layout.name == name)
    }

    /// Whether a layout with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All layouts in declaration order.
    #[must_use]
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// The first declared layout.
    #[must_use]
    pub fn first(&self) -> &Layout {
        &self.layouts[0]
    }

    /// Layout names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.iter().map(|layout| layout.name.as_str())
    }

    /// Name of the layout after `name`, wrapping around.
    #[must_use]
    pub fn next_after(&self, name: &str) -> &str {
        let next = self.position(name).map_or(0, |index| (index + 1) % self.layouts.len());
        &self.layouts[next].name
    }

    /// Number of layouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Always false for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
