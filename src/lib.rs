//! Clear buttons for text inputs, together with the small page host they run on.
//!
//! Most callers only need [`Page`], [`Controller`], [`Targets`] and [`Options`].

pub use clear_input::{
    BUTTON_SPACING, ButtonPlacement, Controller, DEFAULT_STYLESHEET, Options, Settings, Targets,
};
pub use core_types::{EventKind, Namespace};
pub use css::SelectorError;
pub use dom::{Document, DomError, Id};
pub use page::{ControlType, Page, PageState};
