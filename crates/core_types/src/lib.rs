use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Token scoping a set of document-level listeners so they can be released together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(u64);

impl Namespace {
    /// Allocate a namespace that has never been handed out before in this process.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clearinput.{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Focus,
    Blur,
    KeyUp,
    MouseEnter,
    MouseLeave,
    Click,
}

impl EventKind {
    /// Bubbling events are delegated to the closest matching ancestor;
    /// the others only ever match their own target.
    pub fn bubbles(self) -> bool {
        matches!(self, EventKind::KeyUp | EventKind::Click)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::KeyUp => "keyup",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Click => "click",
        }
    }
}
