pub mod cascade;
pub mod computed;
pub mod syntax;
pub mod user_agent;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use cascade::{cascaded_declarations, matches_element, matches_selector, query_all};
pub use computed::{BoxMetrics, ComputedStyle, compute_element_style, compute_style};
pub use syntax::{
    Declaration, Rule, Selector, SelectorError, SelectorList, Stylesheet, parse_selector,
    parse_selector_list, parse_stylesheet,
};
pub use user_agent::USER_AGENT_CSS;
pub use values::{Display, Length, Position, VerticalAlign, Visibility, format_px, parse_length, parse_px};
