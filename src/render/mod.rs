//! Output: text export, page previews and JSON encoding.

mod json;
mod options;
mod raster;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::{ExportOptions, PageSelection, DEFAULT_PAGE_SEPARATOR};
pub use raster::{render_preview, save_png, MAX_PREVIEW_EDGE};
pub use text::{concat_paragraphs, join_pages, page_text, region_text};
