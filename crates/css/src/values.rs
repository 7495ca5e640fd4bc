/// CSS Length value, currently only supports `px`,
/// but keep this extensible for `em`, `%`, etc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
}

impl Length {
    pub fn px(self) -> f32 {
        match self {
            Length::Px(px) => px,
        }
    }
}

/// CSS `display` value. This will be expanded over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    ListItem,
    Flex,
    InlineFlex,
    None,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::ListItem => "list-item",
            Display::Flex => "flex",
            Display::InlineFlex => "inline-flex",
            Display::None => "none",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    pub fn as_css(self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
            Position::Fixed => "fixed",
            Position::Sticky => "sticky",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalAlign {
    Baseline,
    Sub,
    Super,
    Top,
    TextTop,
    Middle,
    Bottom,
    TextBottom,
    Length(Length),
}

impl VerticalAlign {
    pub fn as_css(self) -> String {
        match self {
            VerticalAlign::Baseline => "baseline".to_string(),
            VerticalAlign::Sub => "sub".to_string(),
            VerticalAlign::Super => "super".to_string(),
            VerticalAlign::Top => "top".to_string(),
            VerticalAlign::TextTop => "text-top".to_string(),
            VerticalAlign::Middle => "middle".to_string(),
            VerticalAlign::Bottom => "bottom".to_string(),
            VerticalAlign::TextBottom => "text-bottom".to_string(),
            VerticalAlign::Length(len) => format_px(len.px()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Format a px amount the way it gets written back into inline style.
pub fn format_px(px: f32) -> String {
    if px.fract() == 0.0 {
        format!("{}px", px as i64)
    } else {
        format!("{}px", (px * 100.0).round() / 100.0)
    }
}

/// Parse a `font-size` value into a Length.
/// For now we only support `NNpx` (e.g., "16px", "12.5px").
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim();

    // Only support `<number>px` for now.
    if let Some(px_str) = v.strip_suffix("px") {
        let num = px_str.trim().parse::<f32>().ok()?;
        if num.is_finite() && num > 0.0 {
            return Some(Length::Px(num));
        }
    }
    // Future: em/rem/%/pt/etc
    None
}

/// Parse a non-negative px amount. A bare `0` is accepted as well.
pub fn parse_px(value: &str) -> Option<f32> {
    let v = value.trim();
    if v == "0" {
        return Some(0.0);
    }
    let num = v.strip_suffix("px")?.trim().parse::<f32>().ok()?;
    (num.is_finite() && num >= 0.0).then_some(num)
}

/// Parse a `display` value into a Display enum.
/// We keep this strict and only support a small subset for now.
pub fn parse_display(value: &str) -> Option<Display> {
    let v = value.trim().to_ascii_lowercase();

    match v.as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "list-item" => Some(Display::ListItem),
        "flex" => Some(Display::Flex),
        "inline-flex" => Some(Display::InlineFlex),
        "none" => Some(Display::None),
        _ => None, // unknown / unsupported -> ignored
    }
}

pub fn parse_position(value: &str) -> Option<Position> {
    match value.trim().to_ascii_lowercase().as_str() {
        "static" => Some(Position::Static),
        "relative" => Some(Position::Relative),
        "absolute" => Some(Position::Absolute),
        "fixed" => Some(Position::Fixed),
        "sticky" => Some(Position::Sticky),
        _ => None,
    }
}

pub fn parse_vertical_align(value: &str) -> Option<VerticalAlign> {
    let v = value.trim().to_ascii_lowercase();
    let keyword = match v.as_str() {
        "baseline" => VerticalAlign::Baseline,
        "sub" => VerticalAlign::Sub,
        "super" => VerticalAlign::Super,
        "top" => VerticalAlign::Top,
        "text-top" => VerticalAlign::TextTop,
        "middle" => VerticalAlign::Middle,
        "bottom" => VerticalAlign::Bottom,
        "text-bottom" => VerticalAlign::TextBottom,
        _ => return parse_px(&v).map(|px| VerticalAlign::Length(Length::Px(px))),
    };
    Some(keyword)
}

pub fn parse_visibility(value: &str) -> Option<Visibility> {
    match value.trim().to_ascii_lowercase().as_str() {
        "visible" => Some(Visibility::Visible),
        "hidden" | "collapse" => Some(Visibility::Hidden),
        _ => None,
    }
}

/// Expand box shorthands (`padding`, `margin`, `border-width`) into longhands.
///
/// Returns `None` for anything that is not one of those shorthands.
pub fn expand_shorthand(name: &str, value: &str) -> Option<Vec<(String, String)>> {
    let (prefix, suffix) = match name {
        "padding" => ("padding-", ""),
        "margin" => ("margin-", ""),
        "border-width" => ("border-", "-width"),
        _ => return None,
    };
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [top, right, bottom, left] = match parts.as_slice() {
        [a] => [*a, *a, *a, *a],
        [a, b] => [*a, *b, *a, *b],
        [a, b, c] => [*a, *b, *c, *b],
        [a, b, c, d] => [*a, *b, *c, *d],
        _ => return Some(Vec::new()),
    };
    Some(
        [("top", top), ("right", right), ("bottom", bottom), ("left", left)]
            .into_iter()
            .map(|(side, v)| (format!("{prefix}{side}{suffix}"), v.to_string()))
            .collect(),
    )
}
