use crate::form_controls::{ControlType, control_type};
use crate::interactions::InteractionState;
use crate::listeners::{DomEvent, ListenerRegistry};
use core_types::EventKind;
use css::{
    ComputedStyle, Display, SelectorList, Stylesheet, cascaded_declarations,
    compute_element_style, parse_stylesheet, query_all, USER_AGENT_CSS,
};
use dom::{Document, Id, dom_utils::outline_from_dom};
use input_core::{InputId, InputValueStore};
use layout::{BoxKind, BoxSize, measure_box, textarea_rows};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

fn to_input_id(id: Id) -> InputId {
    InputId::from(id.0)
}

/// Everything a handler may read or change: document, styles, values, focus.
pub struct PageState {
    dom: Document,
    values: InputValueStore,
    interaction: InteractionState,
    sheets: Vec<Stylesheet>,
}

impl PageState {
    fn new() -> Self {
        Self {
            dom: Document::new(),
            values: InputValueStore::new(),
            interaction: InteractionState::default(),
            sheets: vec![parse_stylesheet(USER_AGENT_CSS)],
        }
    }

    pub fn dom(&self) -> &Document {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Document {
        &mut self.dom
    }

    // --- CSS ---

    pub fn add_stylesheet(&mut self, css: &str) {
        self.sheets.push(parse_stylesheet(css));
    }

    /// Matching elements in document order.
    pub fn query_all(&self, list: &SelectorList) -> Vec<Id> {
        query_all(&self.dom, self.dom.root(), list)
    }

    /// Cascaded and inherited style of an element. `None` for anything that is
    /// not an element in this document.
    pub fn computed_style(&self, id: Id) -> Option<ComputedStyle> {
        self.dom.tag_name(id)?;
        let mut chain: Vec<Id> = self
            .dom
            .ancestors(id)
            .filter(|a| self.dom.is_element(*a))
            .collect();
        chain.reverse();

        let mut parent: Option<ComputedStyle> = None;
        for element in chain {
            let tag = self.dom.tag_name(element).unwrap_or_default();
            let specified = cascaded_declarations(
                &self.sheets,
                tag,
                self.dom.attributes(element),
                self.dom.inline_style(element),
            );
            parent = Some(compute_element_style(tag, &specified, parent.as_ref()));
        }
        parent
    }

    pub fn box_size(&self, id: Id) -> Option<BoxSize> {
        let style = self.computed_style(id)?;
        let kind = match control_type(&self.dom, id) {
            ControlType::Text | ControlType::Password => BoxKind::SingleLine,
            ControlType::Textarea => BoxKind::MultiLine {
                rows: textarea_rows(self.dom.attr(id, "rows")),
            },
            ControlType::Other => BoxKind::Inline,
        };
        Some(measure_box(&style, kind))
    }

    /// Connected, and no inclusive ancestor computes to `display: none`.
    pub fn is_rendered(&self, id: Id) -> bool {
        if !self.dom.is_connected(id) {
            return false;
        }
        self.dom
            .ancestors(id)
            .filter(|a| self.dom.is_element(*a))
            .all(|a| {
                self.computed_style(a)
                    .is_some_and(|s| s.display != Display::None)
            })
    }

    // --- values ---

    /// Current value of a text control. Untouched controls report their
    /// `value` attribute, or their text for `<textarea>`.
    pub fn value(&self, id: Id) -> Cow<'_, str> {
        if let Some(v) = self.values.get(to_input_id(id)) {
            return Cow::Borrowed(v);
        }
        self.initial_value(id)
    }

    fn initial_value(&self, id: Id) -> Cow<'_, str> {
        match control_type(&self.dom, id) {
            ControlType::Textarea => Cow::Owned(self.dom.text_content(id)),
            _ => Cow::Borrowed(self.dom.attr(id, "value").unwrap_or("")),
        }
    }

    /// Programmatic assignment; dispatches nothing.
    pub fn set_value(&mut self, id: Id, value: &str) {
        self.values.set(to_input_id(id), value.to_string());
    }

    fn seed_value(&mut self, id: Id) -> InputId {
        let key = to_input_id(id);
        if !self.values.has(key) {
            let initial = self.initial_value(id).into_owned();
            self.values.ensure_initial(key, initial);
        }
        key
    }

    // --- interaction ---

    pub fn focused(&self) -> Option<Id> {
        self.interaction.focused_node_id
    }

    pub fn is_focused(&self, id: Id) -> bool {
        self.focused() == Some(id)
    }

    /// Change focus and return the events it produces, blur first.
    fn move_focus(&mut self, target: Option<Id>) -> Vec<DomEvent> {
        let target = target.filter(|id| self.dom.is_element(*id));
        let previous = self.interaction.focused_node_id;
        if previous == target {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(prev) = previous {
            self.interaction.clear_focus();
            if self.dom.contains(prev) {
                events.push(DomEvent::new(EventKind::Blur, prev));
            }
        }
        if let Some(next) = target {
            self.interaction.set_focus(next);
            if control_type(&self.dom, next).is_text_control() {
                let key = self.seed_value(next);
                self.values.focus(key);
            }
            events.push(DomEvent::new(EventKind::Focus, next));
        }
        events
    }

    pub fn outline(&self, cap: usize) -> Vec<String> {
        match self.dom.materialize(self.dom.root()) {
            Ok(root) => outline_from_dom(&root, cap),
            Err(_) => Vec::new(),
        }
    }
}

/// Handler-side view of the page. Focus changes made here are applied at once
/// but their events are queued until the running dispatch returns.
pub struct PageCx<'a> {
    state: &'a mut PageState,
    pending: &'a mut VecDeque<DomEvent>,
}

impl PageCx<'_> {
    pub fn focus(&mut self, id: Id) {
        let events = self.state.move_focus(Some(id));
        self.pending.extend(events);
    }

    pub fn blur(&mut self) {
        let events = self.state.move_focus(None);
        self.pending.extend(events);
    }
}

impl Deref for PageCx<'_> {
    type Target = PageState;

    fn deref(&self) -> &PageState {
        self.state
    }
}

impl DerefMut for PageCx<'_> {
    fn deref_mut(&mut self) -> &mut PageState {
        self.state
    }
}

/// A document plus the user-facing gestures that drive it.
pub struct Page {
    state: PageState,
    listeners: ListenerRegistry,
    pending: VecDeque<DomEvent>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            state: PageState::new(),
            listeners: ListenerRegistry::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    // --- gestures ---

    pub fn focus(&mut self, id: Id) {
        let events = self.state.move_focus(Some(id));
        self.dispatch_all(events);
    }

    pub fn blur(&mut self) {
        let events = self.state.move_focus(None);
        self.dispatch_all(events);
    }

    /// Type into the focused control, then fire `keyup` on it.
    pub fn type_text(&mut self, text: &str) {
        let Some(focused) = self.state.focused() else {
            return;
        };
        match control_type(&self.state.dom, focused) {
            ControlType::Text | ControlType::Password => {
                let key = self.state.seed_value(focused);
                self.state.values.insert_text(key, text);
            }
            ControlType::Textarea => {
                let key = self.state.seed_value(focused);
                self.state.values.insert_text_multiline(key, text);
            }
            ControlType::Other => {}
        }
        self.dispatch(DomEvent::new(EventKind::KeyUp, focused));
    }

    pub fn backspace(&mut self) {
        self.edit_focused(InputValueStore::backspace);
    }

    /// Forward delete at the caret.
    pub fn delete(&mut self) {
        self.edit_focused(InputValueStore::delete);
    }

    fn edit_focused(&mut self, edit: fn(&mut InputValueStore, InputId)) {
        let Some(focused) = self.state.focused() else {
            return;
        };
        if control_type(&self.state.dom, focused).is_text_control() {
            let key = self.state.seed_value(focused);
            edit(&mut self.state.values, key);
        }
        self.dispatch(DomEvent::new(EventKind::KeyUp, focused));
    }

    /// Move the pointer onto `target` (or off the document).
    ///
    /// Elements that are no longer under the pointer get `mouseleave`, deepest
    /// first; newly entered ones get `mouseenter`, outermost first.
    pub fn pointer_move(&mut self, target: Option<Id>) {
        let target = target.filter(|id| self.state.dom.contains(*id));
        let before = self.hover_path(self.state.interaction.hover);
        let after = self.hover_path(target);
        self.state.interaction.hover = target;

        let mut events: Vec<DomEvent> = before
            .iter()
            .filter(|id| !after.contains(id))
            .map(|id| DomEvent::new(EventKind::MouseLeave, *id))
            .collect();
        events.extend(
            after
                .iter()
                .rev()
                .filter(|id| !before.contains(id))
                .map(|id| DomEvent::new(EventKind::MouseEnter, *id)),
        );
        self.dispatch_all(events);
    }

    fn hover_path(&self, target: Option<Id>) -> Vec<Id> {
        let dom = &self.state.dom;
        target
            .map(|t| dom.ancestors(t).filter(|a| dom.is_element(*a)).collect())
            .unwrap_or_default()
    }

    /// Press and release on `id`. Text controls take focus before `click` fires.
    pub fn click(&mut self, id: Id) {
        if !self.state.dom.contains(id) {
            return;
        }
        if control_type(&self.state.dom, id).is_text_control() {
            self.focus(id);
        }
        self.dispatch(DomEvent::new(EventKind::Click, id));
    }

    // --- dispatch ---

    pub fn dispatch(&mut self, event: DomEvent) {
        self.pending.push_back(event);
        self.flush();
    }

    fn dispatch_all(&mut self, events: Vec<DomEvent>) {
        self.pending.extend(events);
        self.flush();
    }

    fn flush(&mut self) {
        while let Some(event) = self.pending.pop_front() {
            let mut cx = PageCx {
                state: &mut self.state,
                pending: &mut self.pending,
            };
            self.listeners.dispatch(&mut cx, event);
        }
    }
}

impl Deref for Page {
    type Target = PageState;

    fn deref(&self) -> &PageState {
        &self.state
    }
}

impl DerefMut for Page {
    fn deref_mut(&mut self) -> &mut PageState {
        &mut self.state
    }
}
