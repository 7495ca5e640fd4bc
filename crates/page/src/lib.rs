//! Minimal page host: a document, its stylesheets, text-control values and the
//! focus/hover state, driven by user gestures that turn into DOM events.

pub mod form_controls;
pub mod interactions;
pub mod listeners;
mod page;

pub use form_controls::{ControlType, control_type};
pub use listeners::{Delegate, DelegatedEvent, DomEvent, Handler, ListenerRegistry};
pub use page::{Page, PageCx, PageState};
