use dom::Id;

#[derive(Default, Debug)]
pub struct InteractionState {
    /// Deepest element under the pointer.
    pub hover: Option<Id>,
    pub focused_node_id: Option<Id>,
}

impl InteractionState {
    pub fn clear_focus(&mut self) {
        self.focused_node_id = None;
    }

    pub fn set_focus(&mut self, id: Id) {
        self.focused_node_id = Some(id);
    }
}
