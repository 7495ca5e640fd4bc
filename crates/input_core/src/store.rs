//! Value store for text controls.
//!
//! The store does not track focus; callers route edits to the focused control.

use crate::id::InputId;
use crate::state::InputState;
use crate::text::{
    clamp_to_char_boundary, filter_single_line, next_cursor_boundary, normalize_newlines,
    prev_cursor_boundary,
};
use std::collections::HashMap;

/// Current value and caret of every text control that has been touched.
///
/// ```
/// use input_core::{InputId, InputValueStore};
///
/// let mut store = InputValueStore::new();
/// let id = InputId::from_raw(1);
///
/// store.ensure_initial(id, "Hello".to_string());
/// store.insert_text(id, " World");
///
/// assert_eq!(store.get(id), Some("Hello World"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InputValueStore {
    values: HashMap<InputId, InputState>,
}

impl InputValueStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Returns `true` if an entry exists for this input.
    pub fn has(&self, id: InputId) -> bool {
        self.values.contains_key(&id)
    }

    /// Returns the stored value for this input, if any.
    pub fn get(&self, id: InputId) -> Option<&str> {
        self.values.get(&id).map(|s| s.value.as_str())
    }

    pub fn caret(&self, id: InputId) -> Option<usize> {
        self.values.get(&id).map(|s| s.caret)
    }

    /// Set/overwrite the value for this input and move the caret to the end.
    pub fn set(&mut self, id: InputId, value: String) {
        let st = self.values.entry(id).or_default();
        st.caret = value.len();
        st.value = value;
    }

    /// Ensure an entry exists; if missing, inserts the provided initial value.
    pub fn ensure_initial(&mut self, id: InputId, initial: String) {
        self.values.entry(id).or_insert_with(|| InputState {
            caret: initial.len(),
            value: initial,
        });
    }

    /// Called when an input gains focus: the caret is clamped to a valid boundary.
    pub fn focus(&mut self, id: InputId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
        }
    }

    /// Insert text at the caret (single-line mode). Newlines are stripped.
    pub fn insert_text(&mut self, id: InputId, s: &str) {
        let s = filter_single_line(s);
        self.insert_at_caret(id, &s);
    }

    /// Insert text at the caret (multi-line mode). Newlines are normalized to LF.
    pub fn insert_text_multiline(&mut self, id: InputId, s: &str) {
        let s = normalize_newlines(s);
        self.insert_at_caret(id, &s);
    }

    fn insert_at_caret(&mut self, id: InputId, s: &str) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        if s.is_empty() {
            return;
        }
        st.value.insert_str(st.caret, s);
        st.caret += s.len();
    }

    /// Delete the character before the caret.
    pub fn backspace(&mut self, id: InputId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
            if st.caret == 0 {
                return;
            }
            let prev = prev_cursor_boundary(&st.value, st.caret);
            st.value.drain(prev..st.caret);
            st.caret = prev;
        }
    }

    /// Delete the character after the caret.
    pub fn delete(&mut self, id: InputId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
            if st.caret >= st.value.len() {
                return;
            }
            let next = next_cursor_boundary(&st.value, st.caret);
            st.value.drain(st.caret..next);
        }
    }
}

fn clamp_state(st: &mut InputState) {
    st.caret = clamp_to_char_boundary(&st.value, st.caret);
}
