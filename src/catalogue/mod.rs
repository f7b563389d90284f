//! The drag source: built-in data sources plus the prompt library.

mod builtin;
pub mod item;

pub use item::*;

use itertools::Itertools;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Searchable collection of items that can be dropped on the canvas.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    data_sources: Vec<CatalogueItem>,
    prompts: Vec<CatalogueItem>,
}

impl Catalogue {
    /// A catalogue holding the stock data sources and no prompts.
    pub fn new() -> Self {
        Self {
            data_sources: Self::builtin_data_sources(),
            prompts: Vec::new(),
        }
    }

    pub fn builtin_data_sources() -> Vec<CatalogueItem> {
        builtin::data_sources()
    }

    /// Fallback prompts used when no prompt list is available.
    pub fn fallback_prompts() -> Vec<CatalogueItem> {
        builtin::fallback_prompts()
    }

    pub fn with_prompts(mut self, prompts: Vec<CatalogueItem>) -> Self {
        self.prompts = prompts;
        self
    }

    /// Loads prompts from `(title, content)` rows.
    pub fn with_prompt_rows<'a, I>(self, rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let prompts = rows
            .into_iter()
            .enumerate()
            .map(|(index, (title, content))| prompt_from_row(index, title, content))
            .collect();
        self.with_prompts(prompts)
    }

    pub fn data_sources(&self) -> &[CatalogueItem] {
        &self.data_sources
    }

    pub fn prompts(&self) -> &[CatalogueItem] {
        &self.prompts
    }

    /// Finds an item of either kind by id.
    pub fn get(&self, id: &str) -> Option<&CatalogueItem> {
        self.prompts
            .iter()
            .chain(&self.data_sources)
            .find(|item| item.id == id)
    }

    /// Prompts matching a case-insensitive search term and a category.
    ///
    /// An empty term matches everything; [`ALL_CATEGORIES`] matches any category.
    pub fn search(&self, term: &str, category: &str) -> Vec<&CatalogueItem> {
        self.prompts
            .iter()
            .filter(|item| term.is_empty() || item.matches(term))
            .filter(|item| category == ALL_CATEGORIES || item.category == category)
            .collect()
    }

    /// `"all"` followed by the distinct prompt categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        std::iter::once(ALL_CATEGORIES)
            .chain(self.prompts.iter().map(|item| item.category.as_str()))
            .unique()
            .collect()
    }
}
