mod document;
pub mod dom_utils;
mod types;

pub use crate::document::{Ancestors, Document, DomError};
pub use crate::types::{Id, Node, NodeId};
