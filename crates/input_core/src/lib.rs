//! # input_core
//!
//! UI-agnostic value store for text controls.
//!
//! - [`InputId`]: opaque identifier for an input element
//! - [`InputValueStore`]: current value and caret per input
//!
//! The store knows nothing about the DOM or about focus; the page host decides
//! which control receives edits and converts its node ids at the boundary:
//! ```ignore
//! let id = InputId::from_raw(dom_id.0 as u64);
//! ```

mod id;
mod state;
mod store;
mod text;

pub use id::InputId;
pub use store::InputValueStore;

pub use text::{
    clamp_to_char_boundary, filter_single_line, next_cursor_boundary, normalize_newlines,
    prev_cursor_boundary,
};
