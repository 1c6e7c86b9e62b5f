//! Export options and configuration.

use std::ops::RangeInclusive;

/// Separator placed between pages of a document export.
pub const DEFAULT_PAGE_SEPARATOR: &str = "\u{c}\n";

/// Options for exporting region text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Join lines ending in a space with the following line
    pub concat_paragraphs: bool,

    /// Apply Unicode NFKC normalization (expands ligatures)
    pub normalize: bool,

    /// String placed between pages
    pub page_separator: String,

    /// Page selection
    pub page_selection: PageSelection,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable paragraph concatenation.
    pub fn with_concat_paragraphs(mut self, concat: bool) -> Self {
        self.concat_paragraphs = concat;
        self
    }

    /// Enable or disable NFKC normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the page separator.
    pub fn with_page_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = separator.into();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            concat_paragraphs: false,
            normalize: false,
            page_separator: DEFAULT_PAGE_SEPARATOR.to_string(),
            page_selection: PageSelection::All,
        }
    }
}

/// Page selection for export and detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number (1-indexed) is included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// 0-based indices of the selected pages of a document.
    pub fn indices(&self, page_count: usize) -> Vec<usize> {
        (0..page_count)
            .filter(|&i| u32::try_from(i + 1).is_ok_and(|n| self.includes(n)))
            .collect()
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid start page")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid end page")?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        // Comma-separated list with possible ranges
        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid page number")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid page number")?;
                pages.extend(start..=end);
            } else {
                let p: u32 = part.parse().map_err(|_| "Invalid page number")?;
                pages.push(p);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
