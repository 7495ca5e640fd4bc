use crate::length::px_opt;
use css::ComputedStyle;

// `line-height: normal` resolves to this multiple of the font size.
const NORMAL_LINE_HEIGHT: f32 = 1.2;

pub const DEFAULT_TEXTAREA_ROWS: u32 = 2;

/// How the auto content height of a box is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxKind {
    /// Single-line text control: one line box.
    SingleLine,
    /// `<textarea>`: `rows` line boxes.
    MultiLine { rows: u32 },
    /// Anything else we size from one line of text.
    Inline,
}

/// Border-box measurement of a single element, in CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSize {
    pub content_height: f32,
    pub outer_height: f32,
    pub border_top: f32,
    pub border_right: f32,
    pub border_bottom: f32,
}

impl BoxSize {
    /// Height inside the borders (content plus padding).
    pub fn interior_height(&self) -> f32 {
        (self.outer_height - self.border_top - self.border_bottom).max(0.0)
    }
}

pub fn line_height_px(style: &ComputedStyle) -> f32 {
    px_opt(style.line_height).unwrap_or_else(|| style.font_size.px() * NORMAL_LINE_HEIGHT)
}

/// Parse a `rows` attribute the way `<textarea>` does: positive integers only.
pub fn textarea_rows(attr: Option<&str>) -> u32 {
    attr.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|rows| *rows > 0)
        .unwrap_or(DEFAULT_TEXTAREA_ROWS)
}

/// Outer (border-box) size for a box with `content-box` sizing.
///
/// An explicit `height` sets the content height; otherwise it is derived from
/// the line height and `kind`.
pub fn measure_box(style: &ComputedStyle, kind: BoxKind) -> BoxSize {
    let m = &style.box_metrics;
    let content_height = px_opt(style.height).unwrap_or_else(|| {
        let line = line_height_px(style);
        match kind {
            BoxKind::SingleLine | BoxKind::Inline => line,
            BoxKind::MultiLine { rows } => line * rows as f32,
        }
    });
    let outer_height =
        content_height + m.padding_top + m.padding_bottom + m.border_top + m.border_bottom;
    BoxSize {
        content_height,
        outer_height,
        border_top: m.border_top,
        border_right: m.border_right,
        border_bottom: m.border_bottom,
    }
}
