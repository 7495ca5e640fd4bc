//! Document-level delegated listeners, grouped by [`Namespace`].
//!
//! Every listener belongs to exactly one namespace. Releasing a namespace drops
//! all of its listeners and nothing else, so independent owners can share the
//! document without stepping on each other.

use crate::page::PageCx;
use core_types::{EventKind, Namespace};
use css::{SelectorList, matches_element};
use dom::Id;
use std::collections::BTreeMap;

/// An event as dispatched by the page, before delegation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: Id,
}

impl DomEvent {
    pub fn new(kind: EventKind, target: Id) -> Self {
        Self { kind, target }
    }
}

/// What a handler sees: the original target plus the element its delegate matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelegatedEvent {
    pub kind: EventKind,
    pub target: Id,
    pub current: Id,
}

#[derive(Clone, Debug)]
pub enum Delegate {
    /// Every event of the listened kinds; `current` is the target.
    Any,
    /// Only events whose target (or, for bubbling kinds, an ancestor of it) matches.
    Matches(SelectorList),
}

pub type Handler = Box<dyn FnMut(&mut PageCx<'_>, &DelegatedEvent)>;

struct Listener {
    kinds: Vec<EventKind>,
    delegate: Delegate,
    handler: Handler,
}

#[derive(Default)]
pub struct ListenerRegistry {
    sets: BTreeMap<Namespace, Vec<Listener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a namespace. Returns `false` if it was already acquired.
    pub fn acquire(&mut self, ns: Namespace) -> bool {
        if self.sets.contains_key(&ns) {
            return false;
        }
        self.sets.insert(ns, Vec::new());
        log::debug!(target: "page.listeners", "acquired {ns}");
        true
    }

    /// Register a handler for `kinds` under `ns`, acquiring `ns` if needed.
    pub fn listen<F>(&mut self, ns: Namespace, kinds: &[EventKind], delegate: Delegate, handler: F)
    where
        F: FnMut(&mut PageCx<'_>, &DelegatedEvent) + 'static,
    {
        self.sets.entry(ns).or_default().push(Listener {
            kinds: kinds.to_vec(),
            delegate,
            handler: Box::new(handler),
        });
    }

    /// Drop every listener of `ns`. Returns how many were removed.
    pub fn release(&mut self, ns: Namespace) -> usize {
        let removed = self.sets.remove(&ns).map(|set| set.len()).unwrap_or(0);
        log::debug!(target: "page.listeners", "released {ns} ({removed} listeners)");
        removed
    }

    pub fn is_acquired(&self, ns: Namespace) -> bool {
        self.sets.contains_key(&ns)
    }

    pub fn listener_count(&self, ns: Namespace) -> usize {
        self.sets.get(&ns).map(Vec::len).unwrap_or(0)
    }

    /// Number of namespaces currently acquired.
    pub fn namespace_count(&self) -> usize {
        self.sets.len()
    }

    /// Run every matching listener. Namespaces run in allocation order,
    /// listeners within a namespace in registration order.
    pub(crate) fn dispatch(&mut self, cx: &mut PageCx<'_>, event: DomEvent) {
        for (ns, listeners) in self.sets.iter_mut() {
            for listener in listeners.iter_mut() {
                if !listener.kinds.contains(&event.kind) {
                    continue;
                }
                let Some(current) = delegate_target(cx, &listener.delegate, event) else {
                    continue;
                };
                log::trace!(
                    target: "page.dispatch",
                    "{} on {} -> {ns} (current {})",
                    event.kind.as_str(),
                    event.target.0,
                    current.0
                );
                (listener.handler)(
                    cx,
                    &DelegatedEvent {
                        kind: event.kind,
                        target: event.target,
                        current,
                    },
                );
            }
        }
    }
}

fn delegate_target(cx: &PageCx<'_>, delegate: &Delegate, event: DomEvent) -> Option<Id> {
    let dom = cx.dom();
    if !dom.contains(event.target) {
        return None;
    }
    match delegate {
        Delegate::Any => Some(event.target),
        Delegate::Matches(list) if event.kind.bubbles() => dom
            .ancestors(event.target)
            .find(|id| matches_element(dom, *id, list)),
        Delegate::Matches(list) => {
            matches_element(dom, event.target, list).then_some(event.target)
        }
    }
}
