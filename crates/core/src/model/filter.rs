use thiserror::Error;

use crate::model::story::DifficultyLevel;

/// Page size used when a listing request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

//
// ─── FILTER ERRORS ─────────────────────────────────────────────────────────────
//

/// Errors from building a [`StoryFilter`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("language must not be empty")]
    EmptyLanguage,

    #[error("page size must be at least 1")]
    ZeroPageSize,
}

//
// ─── STORY FILTER ──────────────────────────────────────────────────────────────
//

/// Query criteria for story listings.
///
/// Fields are normalized at construction time: the language is trimmed and
/// lowercased, a blank keyword collapses to no keyword. Two filters that
/// describe the same query therefore compare equal, which the listing cache
/// relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryFilter {
    language: Option<String>,
    difficulty: Option<DifficultyLevel>,
    tags: Vec<String>,
    keyword: Option<String>,
    page: u32,
    size: u32,
}

impl Default for StoryFilter {
    fn default() -> Self {
        Self {
            language: None,
            difficulty: None,
            tags: Vec::new(),
            keyword: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StoryFilter {
    /// Creates an unrestricted filter for the first page of results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one language (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyLanguage` if the language is blank.
    pub fn with_language(mut self, language: impl Into<String>) -> Result<Self, FilterError> {
        let normalized = language.into().trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(FilterError::EmptyLanguage);
        }
        self.language = Some(normalized);
        Ok(self)
    }

    /// Restricts results to one difficulty level.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Restricts results to stories carrying all of the given tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Full-text keyword to search for. A blank keyword clears the search.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let trimmed = keyword.into().trim().to_owned();
        self.keyword = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        };
        self
    }

    /// Selects a zero-based result page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the number of results per page.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::ZeroPageSize` if `size` is zero.
    pub fn with_size(mut self, size: u32) -> Result<Self, FilterError> {
        if size == 0 {
            return Err(FilterError::ZeroPageSize);
        }
        self.size = size;
        Ok(self)
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<DifficultyLevel> {
        self.difficulty
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
