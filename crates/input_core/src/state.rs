//! Per-input state kept by the [`InputValueStore`](crate::InputValueStore).

#[derive(Clone, Debug, Default)]
pub(crate) struct InputState {
    /// The current text value.
    pub value: String,

    /// Caret position as a byte index into `value` (always on a UTF-8 char boundary).
    pub caret: usize,
}
