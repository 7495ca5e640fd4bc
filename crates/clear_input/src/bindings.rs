use dom::Id;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Binding {
    pub container: Id,
    pub button: Id,
    /// Pointer is over the container (the button counts, it sits inside).
    pub hovered: bool,
}

/// Input ⇄ container ⇄ button association for one controller.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
    order: Vec<Id>,
    by_input: HashMap<Id, Binding>,
    by_button: HashMap<Id, Id>,
    by_container: HashMap<Id, Id>,
}

impl Bindings {
    pub fn insert(&mut self, input: Id, container: Id, button: Id) -> bool {
        if self.by_input.contains_key(&input) {
            return false;
        }
        self.order.push(input);
        self.by_input.insert(
            input,
            Binding {
                container,
                button,
                hovered: false,
            },
        );
        self.by_button.insert(button, input);
        self.by_container.insert(container, input);
        true
    }

    pub fn contains(&self, input: Id) -> bool {
        self.by_input.contains_key(&input)
    }

    pub fn get(&self, input: Id) -> Option<&Binding> {
        self.by_input.get(&input)
    }

    pub fn input_for_button(&self, button: Id) -> Option<Id> {
        self.by_button.get(&button).copied()
    }

    pub fn input_for_container(&self, container: Id) -> Option<Id> {
        self.by_container.get(&container).copied()
    }

    pub fn set_hovered(&mut self, input: Id, hovered: bool) {
        if let Some(binding) = self.by_input.get_mut(&input) {
            binding.hovered = hovered;
        }
    }

    pub fn inputs(&self) -> &[Id] {
        &self.order
    }

    /// Empty the table, returning every binding in bind order.
    pub fn drain(&mut self) -> Vec<(Id, Binding)> {
        self.by_button.clear();
        self.by_container.clear();
        let mut by_input = std::mem::take(&mut self.by_input);
        std::mem::take(&mut self.order)
            .into_iter()
            .filter_map(|input| by_input.remove(&input).map(|b| (input, b)))
            .collect()
    }
}
