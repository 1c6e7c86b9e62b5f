//! PDF parsing module.

mod backend;
mod columns;
mod content;
mod layout;
mod options;

pub use backend::{
    decode_text_simple, ContentOp, FontMetrics, LopdfBackend, PageId, PdfBackend, PdfValue,
    XObject,
};
pub use columns::{column_boxes, text_blocks, LINE_GAP_EM};
pub use content::{interpret_page, ContentInterpreter, Glyph, PageContent, TextSpan};
pub use layout::{
    group_lines_into_blocks, group_spans_into_lines, sort_reading_order, TextBlock, TextLine,
};
pub use options::DetectOptions;
