use crate::field::{BACKGROUND, Thread};
use crate::render::canvas::Rgb;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Height of the legend band in terminal rows.
pub(crate) const LEGEND_ROWS: u16 = 3;

/// Legend entries are laid out in a fixed five-column grid.
pub(crate) const LEGEND_COLUMNS: u16 = 5;

const LEGEND_PADDING: u16 = 2;
const SWATCH: char = '■';
const LABEL_COLOR: Rgb = Rgb::new(255, 255, 255);
const TOOLTIP_FILL: Rgb = Rgb::new(0, 0, 0);

/// A positioned colored text run in terminal cell space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) col: u16,
    pub(crate) row: u16,
    pub(crate) fg: Rgb,
    pub(crate) bg: Rgb,
    pub(crate) text: String,
}

/// Lay out the bottom legend: an opaque band below the animation rows with a
/// swatch/label pair per thread in creation order, five columns wide. Pure;
/// identical input produces identical spans.
pub(crate) fn legend_spans(threads: &[Thread], cols: u16, band_rows: u16) -> Vec<Span> {
    let mut spans = Vec::new();

    for row in 0..LEGEND_ROWS {
        spans.push(Span {
            col: 0,
            row: band_rows + row,
            fg: LABEL_COLOR,
            bg: BACKGROUND,
            text: " ".repeat(cols as usize),
        });
    }

    let column_width = cols / LEGEND_COLUMNS;
    for (i, thread) in threads.iter().enumerate() {
        let col = LEGEND_PADDING + (i as u16 % LEGEND_COLUMNS) * column_width;
        let row = band_rows + 1 + i as u16 / LEGEND_COLUMNS;
        if col + 2 >= cols {
            continue;
        }
        spans.push(Span {
            col,
            row,
            fg: thread.color,
            bg: BACKGROUND,
            text: SWATCH.to_string(),
        });
        let max_width = (column_width.saturating_sub(3)) as usize;
        spans.push(Span {
            col: col + 2,
            row,
            fg: LABEL_COLOR,
            bg: BACKGROUND,
            text: truncate_to_width(&thread.metric.to_string(), max_width),
        });
    }

    spans
}

/// Lay out a floating label box above the pointer showing the hovered metric.
/// The box keeps the original's two-line layout: width is sized to the longer
/// of two content lines even though the second line is always empty.
pub(crate) fn tooltip_spans(label: &str, pointer: (u16, u16), cols: u16) -> Vec<Span> {
    let lines = [label, ""];
    let content = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let inner = content + 2;
    let box_width = (inner + 2) as u16;

    let top = pointer.1.saturating_sub(2 + lines.len() as u16 + 1);
    let left = pointer
        .0
        .saturating_sub(box_width / 2)
        .min(cols.saturating_sub(box_width));

    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(format!("┌{}┐", "─".repeat(inner)));
    for line in lines {
        rows.push(format!("│ {:content$} │", line));
    }
    rows.push(format!("└{}┘", "─".repeat(inner)));

    rows.into_iter()
        .enumerate()
        .map(|(i, text)| Span {
            col: left,
            row: top + i as u16,
            fg: LABEL_COLOR,
            bg: TOOLTIP_FILL,
            text,
        })
        .collect()
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        width += ch.width().unwrap_or(0);
        if width > max_width {
            break;
        }
        out.push(ch);
    }
    out
}
