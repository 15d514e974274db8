use super::Selection;
use crate::error::Result;
use indexmap::IndexSet;

/// Why a selector was not added to a [`SelectionList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended at this index
    Added(usize),
    /// Already in the list
    Duplicate,
    /// Rooted at the document, too brittle to keep
    Absolute,
}

/// `true` for selectors anchored at the document root: a single leading `/`
/// or `//html`.
pub fn is_absolute_xpath(selector: &str) -> bool {
    (selector.starts_with('/') && !selector.starts_with("//")) || selector.starts_with("//html")
}

/// Picked selectors in the order they were picked.
///
/// Entries are the rendered `"{expression} → {action}"` strings, so the list
/// can be restored from its own JSON export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionList {
    selectors: IndexSet<String>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a list from saved selectors, dropping duplicates and absolute
    /// paths.
    pub fn from_selectors<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for selector in selectors {
            list.add_selector(selector);
        }
        list
    }

    /// Add a resolved selection
    pub fn add(&mut self, selection: &Selection) -> AddOutcome {
        self.add_selector(selection.selector())
    }

    /// Add a rendered selector string
    pub fn add_selector(&mut self, selector: impl Into<String>) -> AddOutcome {
        let selector = selector.into();
        if is_absolute_xpath(&selector) {
            log::debug!("Skipping absolute selector '{}'", selector);
            return AddOutcome::Absolute;
        }
        match self.selectors.insert_full(selector) {
            (index, true) => AddOutcome::Added(index),
            (_, false) => AddOutcome::Duplicate,
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.selectors.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.selectors.contains(selector)
    }

    /// Remove by position, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Option<String> {
        self.selectors.shift_remove_index(index)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn clear(&mut self) {
        self.selectors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(String::as_str)
    }

    /// Export as a JSON array of selector strings
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.selectors)?)
    }

    /// Restore from a JSON array, applying the same filtering as
    /// [`SelectionList::from_selectors`].
    pub fn from_json(json: &str) -> Result<Self> {
        let selectors: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::from_selectors(selectors))
    }
}
