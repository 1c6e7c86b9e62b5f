//! Multi-column detection.
//!
//! Text blocks are turned into boxes, widened towards the right page border
//! where nothing is in the way, and then joined top-down into column boxes.
//! Painted paths act as background colours: text on different backgrounds is
//! never joined, and no box may cut through a path, an image or vertical text.

use crate::geometry::{IRect, Rect};

use super::content::PageContent;
use super::layout::{group_lines_into_blocks, group_spans_into_lines, TextBlock};
use super::options::DetectOptions;

/// Horizontal gap, in font sizes, that ends a line.
pub const LINE_GAP_EM: f32 = 1.0;

/// Boxes whose bottoms differ by at most this much are ordered left to right.
const BOTTOM_TOLERANCE: i32 = 10;

/// Determine the boxes that wrap the text columns of a page.
///
/// The result is in reading order: top to bottom, and left to right for
/// boxes ending at about the same height.
pub fn column_boxes(content: &PageContent, options: &DetectOptions) -> Vec<IRect> {
    let page = content.page_rect;
    let clip = Rect::new(
        page.x0 + options.left as f32,
        page.y0 + options.top as f32,
        page.x1 - options.right as f32,
        page.y1 - options.bottom as f32,
    );

    let mut path_boxes: Vec<IRect> = content.paths.iter().map(Rect::round_out).collect();
    path_boxes.sort_by_key(|b| (b.y0, b.x0));
    let image_boxes: Vec<IRect> = content.images.iter().map(Rect::round_out).collect();

    let mut vert_boxes: Vec<IRect> = Vec::new();
    let mut boxes: Vec<IRect> = Vec::new();

    for block in text_blocks(content, &clip) {
        let bbox = block.bbox.round_out();

        if options.ignore_images && in_bbox(&bbox, &image_boxes) > 0 {
            continue;
        }

        if !block.lines.first().is_some_and(|l| l.horizontal) {
            vert_boxes.push(bbox);
            continue;
        }

        // Lines with a single visible character do not shape a column
        let srect = block
            .lines
            .iter()
            .filter(|line| line.visible_chars() > 1)
            .fold(IRect::default(), |acc, line| acc | line.bbox.round_out());

        if !srect.is_empty() {
            boxes.push(srect);
        }
    }

    boxes.sort_by_key(|b| (in_bbox(b, &path_boxes), b.y0, b.x0));

    extend_right(
        &mut boxes,
        page.width() as i32,
        &path_boxes,
        &vert_boxes,
        &image_boxes,
    );

    if boxes.is_empty() {
        log::debug!("No horizontal text found");
        return Vec::new();
    }

    let joined = join_boxes(boxes, &path_boxes, &vert_boxes);
    let columns = clean_blocks(joined);
    log::debug!("Detected {} column boxes", columns.len());
    columns
}

/// Text blocks made from the glyphs whose centres lie inside `clip`.
pub fn text_blocks(content: &PageContent, clip: &Rect) -> Vec<TextBlock> {
    let spans = content
        .spans
        .iter()
        .filter_map(|span| span.clipped(clip))
        .collect();
    group_lines_into_blocks(group_spans_into_lines(spans, Some(LINE_GAP_EM)))
}

/// 1-based index of the first box containing `bb`, or 0.
fn in_bbox(bb: &IRect, boxes: &[IRect]) -> usize {
    boxes
        .iter()
        .position(|b| b.contains(bb))
        .map_or(0, |i| i + 1)
}

fn intersects_any(bb: &IRect, boxes: &[IRect]) -> bool {
    boxes.iter().any(|b| bb.intersects(b))
}

/// Whether `temp`, grown from `bb`, stays clear of every other box.
///
/// `None` entries have already been consumed.
fn can_extend<I>(temp: IRect, bb: IRect, others: I, vert_boxes: &[IRect]) -> bool
where
    I: IntoIterator<Item = Option<IRect>>,
{
    let crosses_vertical = intersects_any(&temp, vert_boxes);
    others.into_iter().all(|b| {
        !crosses_vertical
            && match b {
                None => true,
                Some(b) => b == bb || !temp.intersects(&b),
            }
    })
}

/// Widen boxes to the right page border when no other content is in the way.
fn extend_right(
    boxes: &mut [IRect],
    width: i32,
    path_boxes: &[IRect],
    vert_boxes: &[IRect],
    image_boxes: &[IRect],
) {
    for i in 0..boxes.len() {
        let bb = boxes[i];

        // Text on a coloured background or an image stays as is
        if in_bbox(&bb, path_boxes) > 0 || in_bbox(&bb, image_boxes) > 0 {
            continue;
        }

        let temp = IRect { x1: width, ..bb };

        if intersects_any(&temp, path_boxes)
            || intersects_any(&temp, vert_boxes)
            || intersects_any(&temp, image_boxes)
        {
            continue;
        }

        if can_extend(temp, bb, boxes.iter().copied().map(Some), vert_boxes) {
            boxes[i] = temp;
        }
    }
}

/// Join sorted text boxes into column blocks.
fn join_boxes(boxes: Vec<IRect>, path_boxes: &[IRect], vert_boxes: &[IRect]) -> Vec<IRect> {
    let Some((&first, rest)) = boxes.split_first() else {
        return Vec::new();
    };
    let mut blocks = vec![first];
    let mut remaining: Vec<Option<IRect>> = rest.iter().copied().map(Some).collect();

    for i in 0..remaining.len() {
        let Some(bb) = remaining[i] else {
            continue;
        };

        let mut joined = false;
        let mut target = 0;
        let mut temp = bb;

        for (j, nbb) in blocks.iter().enumerate() {
            // never join across columns
            if nbb.x1 < bb.x0 || bb.x1 < nbb.x0 {
                continue;
            }
            // never join across different backgrounds
            if in_bbox(nbb, path_boxes) != in_bbox(&bb, path_boxes) {
                continue;
            }

            temp = bb | *nbb;
            joined = can_extend(temp, *nbb, blocks.iter().copied().map(Some), vert_boxes);
            if joined {
                target = j;
                break;
            }
        }

        if !joined {
            blocks.push(bb);
            target = blocks.len() - 1;
            temp = bb;
        }

        // The grown block must not swallow a box that is still to come
        if can_extend(temp, bb, remaining.iter().copied(), vert_boxes) {
            blocks[target] = temp;
        } else {
            blocks.push(bb);
        }
        remaining[i] = None;
    }

    blocks
}

/// Drop repeated blocks and order blocks with a common bottom by x.
fn clean_blocks(mut blocks: Vec<IRect>) -> Vec<IRect> {
    blocks.dedup();
    if blocks.len() < 2 {
        return blocks;
    }

    let mut bottom = blocks[0].y1;
    let mut start = 0;
    for i in 1..blocks.len() {
        if (blocks[i].y1 - bottom).abs() > BOTTOM_TOLERANCE {
            blocks[start..i].sort_by_key(|b| b.x0);
            bottom = blocks[i].y1;
            start = i;
        }
    }
    blocks[start..].sort_by_key(|b| b.x0);

    blocks
}
