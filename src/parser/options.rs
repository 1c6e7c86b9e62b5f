//! Column detection options.

use serde::{Deserialize, Serialize};

/// Options controlling column detection.
///
/// Margins are given in page units and are cut from the page before any text
/// is considered. They are persisted with a region set, so they serialize in
/// the same shape the regions file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetectOptions {
    /// Left margin to ignore
    #[serde(default)]
    pub left: u32,

    /// Top (header) margin to ignore
    #[serde(default)]
    pub top: u32,

    /// Right margin to ignore
    #[serde(default)]
    pub right: u32,

    /// Bottom (footer) margin to ignore
    #[serde(default)]
    pub bottom: u32,

    /// Skip text drawn on top of images
    #[serde(default)]
    pub ignore_images: bool,
}

impl DetectOptions {
    /// Create new detection options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top margin.
    pub fn with_top_margin(mut self, top: u32) -> Self {
        self.top = top;
        self
    }

    /// Set the bottom margin.
    pub fn with_bottom_margin(mut self, bottom: u32) -> Self {
        self.bottom = bottom;
        self
    }

    /// Set the left margin.
    pub fn with_left_margin(mut self, left: u32) -> Self {
        self.left = left;
        self
    }

    /// Set the right margin.
    pub fn with_right_margin(mut self, right: u32) -> Self {
        self.right = right;
        self
    }

    /// Set all four margins at once.
    pub fn with_margins(mut self, left: u32, top: u32, right: u32, bottom: u32) -> Self {
        self.left = left;
        self.top = top;
        self.right = right;
        self.bottom = bottom;
        self
    }

    /// Enable or disable skipping of text on images.
    pub fn with_ignore_images(mut self, ignore: bool) -> Self {
        self.ignore_images = ignore;
        self
    }

    /// Whether any margin is set.
    pub fn has_margins(&self) -> bool {
        self.left > 0 || self.top > 0 || self.right > 0 || self.bottom > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_options_builder() {
        let options = DetectOptions::new()
            .with_top_margin(50)
            .with_bottom_margin(40)
            .with_ignore_images(true);

        assert_eq!(options.top, 50);
        assert_eq!(options.bottom, 40);
        assert_eq!(options.left, 0);
        assert!(options.ignore_images);
        assert!(options.has_margins());
    }

    #[test]
    fn test_default_has_no_margins() {
        let options = DetectOptions::default();
        assert!(!options.has_margins());
        assert!(!options.ignore_images);
    }

    #[test]
    fn test_missing_fields_default() {
        let options: DetectOptions = serde_json::from_str(r#"{"top": 12}"#).unwrap();
        assert_eq!(options, DetectOptions::new().with_top_margin(12));
    }
}
