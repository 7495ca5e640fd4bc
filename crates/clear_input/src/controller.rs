use crate::bindings::{Binding, Bindings};
use crate::geometry::place_button;
use crate::options::{Options, Settings};
use crate::targets::Targets;
use core_types::{EventKind, Namespace};
use css::{Position, SelectorList, format_px};
use dom::{Document, DomError, Id};
use page::{ControlType, Delegate, Page, PageState, control_type};
use std::cell::RefCell;
use std::rc::Rc;

const BUTTON_HREF: &str = "javascript: void(0)";

/// Attaches a clear button to every eligible input its [`Targets`] resolve to.
///
/// All document listeners live under one fresh [`Namespace`], so destroying a
/// controller never disturbs another one on the same page.
pub struct Controller {
    namespace: Namespace,
    settings: Settings,
    targets: Targets,
    bindings: Rc<RefCell<Bindings>>,
    destroyed: bool,
}

impl Controller {
    pub fn new(page: &mut Page, targets: Targets, options: Options) -> Self {
        let controller = Self {
            namespace: Namespace::fresh(),
            settings: Settings::merged(options),
            targets,
            bindings: Rc::default(),
            destroyed: false,
        };
        page.listeners_mut().acquire(controller.namespace);
        controller.install_listeners(page);
        let bound = controller.bind_matches(page);
        log::debug!(
            target: "clear_input.lifecycle",
            "{} created for {:?}, bound {bound}",
            controller.namespace,
            controller.targets
        );
        controller
    }

    /// Bind inputs that started matching since the last scan. Returns how many
    /// were added.
    pub fn update(&mut self, page: &mut Page) -> usize {
        if self.destroyed {
            log::debug!(target: "clear_input.lifecycle", "{} update after destroy", self.namespace);
            return 0;
        }
        let bound = self.bind_matches(page);
        log::debug!(target: "clear_input.lifecycle", "{} update bound {bound}", self.namespace);
        bound
    }

    /// Remove every button and container and drop the listeners. Safe to call twice.
    pub fn destroy(&mut self, page: &mut Page) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        page.listeners_mut().release(self.namespace);

        let drained = self.bindings.borrow_mut().drain();
        let count = drained.len();
        for (input, binding) in drained {
            if let Err(err) = restore(page.dom_mut(), input, binding) {
                log::warn!(
                    target: "clear_input.lifecycle",
                    "{}: input {} not fully restored: {err}",
                    self.namespace,
                    input.0
                );
            }
        }
        log::debug!(target: "clear_input.lifecycle", "{} destroyed, released {count}", self.namespace);
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Bound inputs in the order they were bound.
    pub fn bound_inputs(&self) -> Vec<Id> {
        self.bindings.borrow().inputs().to_vec()
    }

    pub fn is_bound(&self, input: Id) -> bool {
        self.bindings.borrow().contains(input)
    }

    pub fn button_for(&self, input: Id) -> Option<Id> {
        self.bindings.borrow().get(input).map(|b| b.button)
    }

    pub fn container_for(&self, input: Id) -> Option<Id> {
        self.bindings.borrow().get(input).map(|b| b.container)
    }

    pub fn is_hovered(&self, input: Id) -> bool {
        self.bindings.borrow().get(input).is_some_and(|b| b.hovered)
    }

    /// `Some(true)` while the input's button is displayed.
    pub fn is_button_visible(&self, page: &PageState, input: Id) -> Option<bool> {
        self.button_for(input).map(|button| page.is_rendered(button))
    }

    fn bind_matches(&self, page: &mut Page) -> usize {
        let mut bound = 0;
        for input in self.targets.resolve(page) {
            if self.bind_one(page, input) {
                bound += 1;
            }
        }
        bound
    }

    fn bind_one(&self, page: &mut Page, input: Id) -> bool {
        if self.bindings.borrow().contains(input) {
            return false;
        }
        match control_type(page.dom(), input) {
            ControlType::Text | ControlType::Textarea => {}
            ControlType::Password if self.settings.enable_on_password => {}
            ControlType::Password => {
                log::trace!(target: "clear_input.bind", "skip {}: password fields disabled", input.0);
                return false;
            }
            ControlType::Other => {
                log::trace!(target: "clear_input.bind", "skip {}: not a text control", input.0);
                return false;
            }
        }

        match attach(page, input, &self.settings) {
            Ok((container, button)) => {
                self.bindings.borrow_mut().insert(input, container, button);
                log::debug!(
                    target: "clear_input.bind",
                    "{} bound input {} (container {}, button {})",
                    self.namespace,
                    input.0,
                    container.0,
                    button.0
                );
                true
            }
            Err(err) => {
                log::warn!(target: "clear_input.bind", "{} cannot bind {}: {err}", self.namespace, input.0);
                false
            }
        }
    }

    fn install_listeners(&self, page: &mut Page) {
        let ns = self.namespace;
        let containers = SelectorList::class(&self.settings.container_class_name);
        let buttons = SelectorList::class(&self.settings.button_class_name);
        let listeners = page.listeners_mut();

        let bindings = Rc::clone(&self.bindings);
        listeners.listen(
            ns,
            &[EventKind::Focus, EventKind::KeyUp],
            Delegate::Any,
            move |cx, ev| show(cx, &bindings.borrow(), ev.target),
        );

        let bindings = Rc::clone(&self.bindings);
        listeners.listen(ns, &[EventKind::Blur], Delegate::Any, move |cx, ev| {
            hide(cx, &bindings.borrow(), ev.target, false)
        });

        let bindings = Rc::clone(&self.bindings);
        listeners.listen(
            ns,
            &[EventKind::MouseEnter, EventKind::MouseLeave],
            Delegate::Matches(containers),
            move |cx, ev| {
                let mut bindings = bindings.borrow_mut();
                let Some(input) = bindings.input_for_container(ev.current) else {
                    return;
                };
                let entered = ev.kind == EventKind::MouseEnter;
                bindings.set_hovered(input, entered);
                if entered {
                    show(cx, &bindings, input);
                } else {
                    hide(cx, &bindings, input, false);
                }
            },
        );

        let bindings = Rc::clone(&self.bindings);
        listeners.listen(
            ns,
            &[EventKind::Click],
            Delegate::Matches(buttons),
            move |cx, ev| {
                let bindings = bindings.borrow();
                let Some(input) = bindings.input_for_button(ev.current) else {
                    return;
                };
                cx.set_value(input, "");
                cx.focus(input);
                hide(cx, &bindings, input, true);
            },
        );
    }
}

/// Visible iff the input has a value.
fn show(page: &mut PageState, bindings: &Bindings, input: Id) {
    let Some(binding) = bindings.get(input) else {
        return;
    };
    let has_value = !page.value(input).is_empty();
    set_button_shown(page.dom_mut(), binding.button, has_value);
}

/// Hidden unless hovered or focused; `force` hides regardless.
fn hide(page: &mut PageState, bindings: &Bindings, input: Id, force: bool) {
    let Some(binding) = bindings.get(input) else {
        return;
    };
    if force || (!binding.hovered && !page.is_focused(input)) {
        set_button_shown(page.dom_mut(), binding.button, false);
    }
}

fn set_button_shown(dom: &mut Document, button: Id, shown: bool) {
    let result = if shown {
        dom.remove_style(button, "display").map(|_| ())
    } else {
        dom.set_style(button, "display", "none")
    };
    if let Err(err) = result {
        log::trace!(target: "clear_input.bind", "button {} unavailable: {err}", button.0);
    }
}

/// Wrap `input` and add its hidden button. Leaves the tree as it was on error.
fn attach(page: &mut PageState, input: Id, settings: &Settings) -> Result<(Id, Id), DomError> {
    let style = page
        .computed_style(input)
        .ok_or(DomError::WrongNodeKind(input))?;
    let position = match style.position {
        Position::Static => Position::Relative,
        other => other,
    };

    let dom = page.dom_mut();
    let container = dom.create_element_with(
        "div",
        [("class", settings.container_class_name.as_str())],
    );
    dom.set_style(container, "position", position.as_css())?;
    dom.set_style(container, "display", style.display.as_css())?;
    dom.set_style(container, "vertical-align", &style.vertical_align.as_css())?;
    dom.wrap(input, container)?;

    match insert_button(page, input, settings) {
        Ok(button) => Ok((container, button)),
        Err(err) => {
            rollback(page.dom_mut(), input, container);
            Err(err)
        }
    }
}

fn insert_button(page: &mut PageState, input: Id, settings: &Settings) -> Result<Id, DomError> {
    let dom = page.dom_mut();
    let button = dom.create_element_with(
        "a",
        [
            ("href", BUTTON_HREF),
            ("tabindex", "-1"),
            ("class", settings.button_class_name.as_str()),
        ],
    );
    let label = dom.create_text(settings.button_content.clone());
    dom.append_child(button, label)?;
    dom.insert_after(input, button)?;
    // laid out but not shown while it is measured
    dom.set_style(button, "visibility", "hidden")?;

    let input_box = page.box_size(input).ok_or(DomError::WrongNodeKind(input))?;
    let button_box = page.box_size(button).ok_or(DomError::WrongNodeKind(button))?;
    let placement = place_button(&input_box, &button_box);

    let dom = page.dom_mut();
    dom.set_style(button, "top", &format_px(placement.top))?;
    dom.set_style(button, "right", &format_px(placement.right))?;
    if let Some(height) = placement.capped_height {
        dom.set_style(button, "height", &format_px(height))?;
        dom.set_style(button, "line-height", &format_px(height))?;
    }
    dom.remove_style(button, "visibility")?;
    dom.set_style(button, "display", "none")?;
    Ok(button)
}

fn rollback(dom: &mut Document, input: Id, container: Id) {
    let extra: Vec<Id> = dom
        .children(container)
        .iter()
        .copied()
        .filter(|child| *child != input)
        .collect();
    let result = extra
        .into_iter()
        .try_for_each(|child| dom.remove(child))
        .and_then(|()| dom.unwrap(input).map(|_| ()));
    if let Err(err) = result {
        log::warn!(target: "clear_input.bind", "rollback around {} failed: {err}", input.0);
    }
}

/// Undo [`attach`]: drop the button, then lift the input out of its container.
fn restore(dom: &mut Document, input: Id, binding: Binding) -> Result<(), DomError> {
    if dom.contains(binding.button) {
        dom.remove(binding.button)?;
    }
    if dom.parent(input) == Some(binding.container) {
        dom.unwrap(input)?;
    } else if dom.contains(binding.container) && dom.parent(binding.container).is_some() {
        // the input was moved out by someone else; drop the container only if empty
        if dom.children(binding.container).is_empty() {
            dom.remove(binding.container)?;
        }
    }
    Ok(())
}
