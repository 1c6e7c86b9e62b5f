//! Grouping of text spans into lines and blocks.
//!
//! Lines are spans sharing a baseline; blocks are vertically adjacent,
//! horizontally overlapping lines. Column detection works on blocks, text
//! export on lines.

use std::cmp::Ordering;

use crate::geometry::Rect;

use super::content::{is_spaceless_script_char, TextSpan};

/// Spans within this fraction of the font size share a baseline.
const BASELINE_TOLERANCE: f32 = 0.3;

/// A text line composed of spans on the same baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Union of the span boxes
    pub bbox: Rect,
    /// Dominant font size in this line
    pub font_size: f32,
    /// Whether the line runs left-to-right horizontally
    pub horizontal: bool,
}

impl TextLine {
    /// Create a new text line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal));

        let bbox = spans
            .iter()
            .fold(Rect::default(), |acc, s| acc.union(&s.bbox));

        // Dominant font size, weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted / total_chars as f32
        } else {
            spans.first().map(|s| s.font_size).unwrap_or(0.0)
        };

        let horizontal = spans.first().map(|s| s.horizontal).unwrap_or(true);

        Self {
            spans,
            bbox,
            font_size,
            horizontal,
        }
    }

    /// Get the combined text of all spans with appropriate spacing.
    ///
    /// Inserts spaces between spans based on their X coordinate gaps.
    /// For CJK characters, no space is inserted between adjacent characters.
    pub fn text(&self) -> String {
        let mut result = String::new();

        for (i, span) in self.spans.iter().enumerate() {
            if i == 0 {
                result.push_str(&span.text);
                continue;
            }

            let prev = &self.spans[i - 1];
            let gap = span.bbox.x0 - prev.bbox.x1;

            let char_count = span.text.chars().count();
            let avg_char_width = if char_count > 0 && span.bbox.width() > 0.0 {
                span.bbox.width() / char_count as f32
            } else {
                span.font_size * 0.5
            };

            let prev_last = prev.text.chars().last();
            let curr_first = span.text.chars().next();
            let both_cjk = prev_last.is_some_and(is_spaceless_script_char)
                && curr_first.is_some_and(is_spaceless_script_char);
            let has_space = prev_last.is_some_and(char::is_whitespace)
                || curr_first.is_some_and(char::is_whitespace);

            if gap > avg_char_width * 0.2 && !both_cjk && !has_space {
                result.push(' ');
            }

            result.push_str(&span.text);
        }

        result
    }

    /// Number of non-whitespace characters after trimming each span.
    pub fn visible_chars(&self) -> usize {
        self.spans
            .iter()
            .map(|s| s.text.trim().chars().count())
            .sum()
    }
}

/// A block of lines, the unit column detection starts from.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    pub bbox: Rect,
}

impl TextBlock {
    fn new(line: TextLine) -> Self {
        Self {
            bbox: line.bbox,
            lines: vec![line],
        }
    }

    fn push(&mut self, line: TextLine) {
        self.bbox = self.bbox.union(&line.bbox);
        self.lines.push(line);
    }

    /// Get the combined text of all lines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Group spans into lines.
///
/// With `max_gap_em`, spans on one baseline separated by more than that many
/// font sizes start a new line, which keeps lines from bridging a column
/// gutter. Lines are returned top-to-bottom, then left-to-right.
pub fn group_spans_into_lines(spans: Vec<TextSpan>, max_gap_em: Option<f32>) -> Vec<TextLine> {
    let (mut horizontal, vertical): (Vec<TextSpan>, Vec<TextSpan>) =
        spans.into_iter().partition(|s| s.horizontal);

    horizontal.sort_by(|a, b| {
        a.baseline()
            .partial_cmp(&b.baseline())
            .unwrap_or(Ordering::Equal)
            .then(a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal))
    });

    // First pass: spans sharing a baseline
    let mut rows: Vec<Vec<TextSpan>> = Vec::new();
    for span in horizontal {
        let same_row = rows.last().is_some_and(|row: &Vec<TextSpan>| {
            let first = &row[0];
            let tolerance = first.font_size.max(span.font_size) * BASELINE_TOLERANCE;
            (span.baseline() - first.baseline()).abs() <= tolerance
        });
        match rows.last_mut() {
            Some(row) if same_row => row.push(span),
            _ => rows.push(vec![span]),
        }
    }

    // Second pass: split rows at wide horizontal gaps
    let mut lines: Vec<TextLine> = Vec::new();
    for mut row in rows {
        row.sort_by(|a, b| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal));
        let mut current: Vec<TextSpan> = Vec::new();
        for span in row {
            let wide_gap = match (current.last(), max_gap_em) {
                (Some(prev), Some(em)) => {
                    span.bbox.x0 - prev.bbox.x1 > em * prev.font_size.max(span.font_size)
                }
                _ => false,
            };
            if wide_gap {
                lines.push(TextLine::from_spans(std::mem::take(&mut current)));
            }
            current.push(span);
        }
        if !current.is_empty() {
            lines.push(TextLine::from_spans(current));
        }
    }

    lines.extend(vertical.into_iter().map(|s| TextLine::from_spans(vec![s])));
    sort_reading_order(&mut lines);
    lines
}

/// Group lines into blocks (paragraphs) based on spacing and overlap.
pub fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = Vec::new();

    for line in lines {
        let target = blocks
            .iter()
            .rposition(|block| continues_block(block, &line));
        match target {
            Some(idx) => blocks[idx].push(line),
            None => blocks.push(TextBlock::new(line)),
        }
    }

    blocks
}

/// Whether `line` reads as the next line of `block`.
fn continues_block(block: &TextBlock, line: &TextLine) -> bool {
    let Some(last) = block.lines.last() else {
        return false;
    };
    if !last.horizontal || !line.horizontal {
        return false;
    }

    let overlaps = line.bbox.x0 < last.bbox.x1 && last.bbox.x0 < line.bbox.x1;
    let below = line.bbox.y0 >= last.bbox.y0;
    let gap = line.bbox.y0 - last.bbox.y1;
    let close = gap <= last.bbox.height().max(line.bbox.height()) * 0.8;
    let similar_size = (last.font_size - line.font_size).abs() <= 1.0;

    overlaps && below && close && similar_size
}

/// Sort lines top-to-bottom, then left-to-right.
pub fn sort_reading_order(lines: &mut [TextLine]) {
    lines.sort_by(|a, b| {
        a.bbox
            .y0
            .partial_cmp(&b.bbox.y0)
            .unwrap_or(Ordering::Equal)
            .then(a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::content::Glyph;

    /// A horizontal span with 6pt wide glyphs and 10pt font.
    fn span(text: &str, x: f32, top: f32) -> TextSpan {
        let glyphs = text
            .chars()
            .enumerate()
            .map(|(i, ch)| Glyph {
                ch,
                bbox: Rect::new(x + 6.0 * i as f32, top, x + 6.0 * (i + 1) as f32, top + 10.0),
            })
            .collect();
        TextSpan::from_glyphs(glyphs, 10.0, "Courier".to_string(), true).unwrap()
    }

    #[test]
    fn test_spans_on_same_baseline_form_line() {
        let spans = vec![span("world", 140.0, 100.0), span("hello", 100.0, 101.0)];
        let lines = group_spans_into_lines(spans, None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "hello world");
    }

    #[test]
    fn test_gap_splits_lines_across_gutter() {
        let spans = vec![span("left", 50.0, 100.0), span("right", 300.0, 100.0)];
        let lines = group_spans_into_lines(spans.clone(), Some(1.5));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "left");

        let lines = group_spans_into_lines(spans, None);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_adjacent_spans_without_gap_join_directly() {
        let spans = vec![span("foo", 100.0, 100.0), span("bar", 118.0, 100.0)];
        let lines = group_spans_into_lines(spans, None);
        assert_eq!(lines[0].text(), "foobar");
    }

    #[test]
    fn test_lines_sorted_top_to_bottom() {
        let spans = vec![span("second", 50.0, 120.0), span("first", 50.0, 100.0)];
        let lines = group_spans_into_lines(spans, None);
        assert_eq!(lines[0].text(), "first");
        assert_eq!(lines[1].text(), "second");
    }

    #[test]
    fn test_blocks_follow_columns() {
        let spans = vec![
            span("left one", 50.0, 100.0),
            span("right one", 300.0, 100.0),
            span("left two", 50.0, 112.0),
            span("right two", 300.0, 112.0),
            span("far below", 50.0, 300.0),
        ];
        let lines = group_spans_into_lines(spans, Some(1.5));
        let blocks = group_lines_into_blocks(lines);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text(), "left one\nleft two");
        assert_eq!(blocks[1].text(), "right one\nright two");
        assert_eq!(blocks[2].text(), "far below");
    }

    #[test]
    fn test_visible_chars() {
        let line = TextLine::from_spans(vec![span(" a ", 0.0, 0.0)]);
        assert_eq!(line.visible_chars(), 1);
    }
}
