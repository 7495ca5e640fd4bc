//! # clear_input
//!
//! Adds a small "clear" button to text inputs and textareas on a [`page::Page`].
//! The button shows while the field holds a value. Clicking it empties the
//! field and focuses it again.
//!
//! ```
//! use clear_input::{Controller, DEFAULT_STYLESHEET, Options, Targets};
//! use page::Page;
//!
//! let mut page = Page::new();
//! page.add_stylesheet(DEFAULT_STYLESHEET);
//! let input = page.dom_mut().create_element("input");
//! let root = page.dom().root();
//! page.dom_mut().append_child(root, input).unwrap();
//!
//! let targets = Targets::query("input").unwrap();
//! let mut controller = Controller::new(&mut page, targets, Options::default());
//! assert!(controller.is_bound(input));
//!
//! controller.destroy(&mut page);
//! assert_eq!(page.dom().parent(input), Some(root));
//! ```

mod bindings;
mod controller;
pub mod geometry;
pub mod options;
mod stylesheet;
mod targets;

pub use controller::Controller;
pub use geometry::{BUTTON_SPACING, ButtonPlacement, place_button};
pub use options::{Options, Settings};
pub use stylesheet::DEFAULT_STYLESHEET;
pub use targets::Targets;
