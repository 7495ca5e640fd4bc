use crate::values::{
    Display, Length, Position, VerticalAlign, Visibility, parse_display, parse_length, parse_position,
    parse_px, parse_vertical_align, parse_visibility,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMetrics {
    // Margins in CSS px
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,

    // Padding in CSS px
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,

    // Border widths in CSS px
    pub border_top: f32,
    pub border_right: f32,
    pub border_bottom: f32,
    pub border_left: f32,
}

impl BoxMetrics {
    pub fn zero() -> Self {
        BoxMetrics {
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            padding_top: 0.0,
            padding_right: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
            border_top: 0.0,
            border_right: 0.0,
            border_bottom: 0.0,
            border_left: 0.0,
        }
    }
}

#[derive(Clone, Debug, Copy, PartialEq)]
pub struct ComputedStyle {
    /// Inherited. We'll treat this as `px` only for now.
    /// Initial: 16px.
    pub font_size: Length,

    /// Inherited. `None` means `normal`.
    pub line_height: Option<Length>,

    pub box_metrics: BoxMetrics,

    /// CSS `display` value. Not inherited; per-element defaults are applied by
    /// [`compute_element_style`].
    pub display: Display,

    pub position: Position,

    pub vertical_align: VerticalAlign,

    /// Inherited. Initial: visible.
    pub visibility: Visibility,

    pub width: Option<Length>,
    pub height: Option<Length>,

    // Offsets for positioned boxes.
    pub top: Option<Length>,
    pub right: Option<Length>,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            font_size: Length::Px(16.0),         // "16px" default
            line_height: None,                   // normal
            box_metrics: BoxMetrics::zero(),     // zero margins/padding/borders
            display: Display::Inline,            // CSS initial value
            position: Position::Static,
            vertical_align: VerticalAlign::Baseline,
            visibility: Visibility::Visible,
            width: None,                         // auto
            height: None,                        // auto
            top: None,                           // auto
            right: None,                         // auto
        }
    }
}

/// Compute the final, inherited style for an element, given:
/// - its specified declarations (already cascaded)
/// - an optional parent computed style.
///
/// Assumptions:
/// - property names are already lowercase (from `parse_declarations`).
/// - box shorthands were expanded by the cascade.
pub fn compute_style(
    specified: &[(String, String)],
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    // 1. Start from initial values
    let mut result = ComputedStyle::initial();

    // 2. Apply inheritance (per property)
    if let Some(p) = parent {
        result.font_size = p.font_size;
        result.line_height = p.line_height;
        result.visibility = p.visibility;
    }

    // 3. Apply specified declarations (override inherited/initial)
    for (name, value) in specified {
        let value = value.as_str();
        let metrics = &mut result.box_metrics;

        let px_slot: Option<&mut f32> = match name.as_str() {
            "margin-top" => Some(&mut metrics.margin_top),
            "margin-right" => Some(&mut metrics.margin_right),
            "margin-bottom" => Some(&mut metrics.margin_bottom),
            "margin-left" => Some(&mut metrics.margin_left),
            "padding-top" => Some(&mut metrics.padding_top),
            "padding-right" => Some(&mut metrics.padding_right),
            "padding-bottom" => Some(&mut metrics.padding_bottom),
            "padding-left" => Some(&mut metrics.padding_left),
            "border-top-width" => Some(&mut metrics.border_top),
            "border-right-width" => Some(&mut metrics.border_right),
            "border-bottom-width" => Some(&mut metrics.border_bottom),
            "border-left-width" => Some(&mut metrics.border_left),
            _ => None,
        };
        if let Some(slot) = px_slot {
            if let Some(px) = parse_px(value) {
                *slot = px;
            }
            continue;
        }

        match name.as_str() {
            "font-size" => {
                if let Some(len) = parse_length(value) {
                    result.font_size = len;
                }
            }
            "line-height" => {
                if value.trim().eq_ignore_ascii_case("normal") {
                    result.line_height = None;
                } else if let Some(len) = parse_length(value) {
                    result.line_height = Some(len);
                }
            }
            "display" => {
                if let Some(d) = parse_display(value) {
                    result.display = d;
                }
                // unknown values: parse_display returns None -> silently ignored
            }
            "position" => {
                if let Some(p) = parse_position(value) {
                    result.position = p;
                }
            }
            "vertical-align" => {
                if let Some(v) = parse_vertical_align(value) {
                    result.vertical_align = v;
                }
            }
            "visibility" => {
                if let Some(v) = parse_visibility(value) {
                    result.visibility = v;
                }
            }
            "width" => result.width = parse_auto_or_px(value, result.width),
            "height" => result.height = parse_auto_or_px(value, result.height),
            "top" => result.top = parse_auto_or_px(value, result.top),
            "right" => result.right = parse_auto_or_px(value, result.right),
            _ => {
                // unsupported property -> ignored
            }
        }
    }

    result
}

fn parse_auto_or_px(value: &str, current: Option<Length>) -> Option<Length> {
    if value.trim().eq_ignore_ascii_case("auto") {
        return None;
    }
    // negative or unparseable -> ignore gracefully (leave as-is)
    parse_px(value).map(Length::Px).or(current)
}

pub fn default_display_for(tag: &str) -> Display {
    // Roughly follows HTML default display types.
    if tag.eq_ignore_ascii_case("input")
        || tag.eq_ignore_ascii_case("textarea")
        || tag.eq_ignore_ascii_case("select")
        || tag.eq_ignore_ascii_case("button")
        || tag.eq_ignore_ascii_case("img")
    {
        return Display::InlineBlock;
    }

    if tag.eq_ignore_ascii_case("span")
        || tag.eq_ignore_ascii_case("a")
        || tag.eq_ignore_ascii_case("em")
        || tag.eq_ignore_ascii_case("strong")
        || tag.eq_ignore_ascii_case("b")
        || tag.eq_ignore_ascii_case("i")
        || tag.eq_ignore_ascii_case("label")
        || tag.eq_ignore_ascii_case("small")
        || tag.eq_ignore_ascii_case("code")
    {
        return Display::Inline;
    }

    // List items are special: they default to list-item
    if tag.eq_ignore_ascii_case("li") {
        return Display::ListItem;
    }

    if tag.eq_ignore_ascii_case("head")
        || tag.eq_ignore_ascii_case("script")
        || tag.eq_ignore_ascii_case("style")
    {
        return Display::None;
    }

    // Everything else we treat as block for now
    Display::Block
}

/// Style of one element: computed declarations plus the per-element display
/// default when no `display` declaration applied.
pub fn compute_element_style(
    tag: &str,
    specified: &[(String, String)],
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let has_display_decl = specified
        .iter()
        .any(|(prop, value)| prop == "display" && parse_display(value).is_some());

    let mut computed = compute_style(specified, parent);
    if !has_display_decl {
        computed.display = default_display_for(tag);
    }
    computed
}
