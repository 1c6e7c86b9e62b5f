//! Default output file names, placed next to the PDF.

use std::path::{Path, PathBuf};

/// `paper.pdf` → `paper.regions.json`
pub fn regions_path(pdf: &Path) -> PathBuf {
    pdf.with_extension("regions.json")
}

/// `paper.pdf` → `paper.txt`
pub fn text_path(pdf: &Path) -> PathBuf {
    pdf.with_extension("txt")
}

/// `paper.pdf`, page 3 → `paper-page3.png`
pub fn preview_path(pdf: &Path, page: u32) -> PathBuf {
    let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
    pdf.with_file_name(format!("{}-page{}.png", stem, page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_names() {
        let pdf = Path::new("papers/paper.pdf");
        assert_eq!(regions_path(pdf), Path::new("papers/paper.regions.json"));
        assert_eq!(text_path(pdf), Path::new("papers/paper.txt"));
        assert_eq!(preview_path(pdf, 3), Path::new("papers/paper-page3.png"));
    }

    #[test]
    fn test_name_without_extension() {
        let pdf = Path::new("scan");
        assert_eq!(regions_path(pdf), Path::new("scan.regions.json"));
        assert_eq!(preview_path(pdf, 1), Path::new("scan-page1.png"));
    }
}
