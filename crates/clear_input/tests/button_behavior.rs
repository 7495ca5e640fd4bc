mod common;

use clear_input::{Controller, Options, Targets};
use common::{bind_fixture, count_class, fixture, styled_page, visible};
use dom::Id;
use page::Page;

fn search_box() -> (Page, Controller, Id) {
    let fx = fixture("search_box.toml");
    let mut built = styled_page(&fx);
    let q = built.id("q");
    let controller = bind_fixture(&fx, &mut built.page, Options::default());
    (built.page, controller, q)
}

#[test]
fn every_bound_input_starts_hidden_with_one_button() {
    let fx = fixture("mixed_form.toml");
    let mut built = styled_page(&fx);
    let controller = bind_fixture(&fx, &mut built.page, Options::default());
    for input in controller.bound_inputs() {
        let button = controller.button_for(input).unwrap();
        let container = controller.container_for(input).unwrap();
        assert_eq!(built.page.dom().parent(button), Some(container));
        assert!(!visible(&controller, &built.page, input));
        assert!(!controller.is_hovered(input));
    }
}

#[test]
fn focus_and_keystrokes_follow_the_value() {
    let (mut page, controller, q) = search_box();

    // value attribute already holds text
    page.focus(q);
    assert!(visible(&controller, &page, q));

    page.set_value(q, "");
    page.type_text("");
    assert!(!visible(&controller, &page, q));

    page.type_text("a");
    assert!(visible(&controller, &page, q));
    page.backspace();
    assert!(!visible(&controller, &page, q));
}

#[test]
fn blur_hides_unless_hovered() {
    let (mut page, controller, q) = search_box();
    let container = controller.container_for(q).unwrap();

    page.focus(q);
    page.blur();
    assert!(!visible(&controller, &page, q));

    page.focus(q);
    page.pointer_move(Some(q));
    assert!(controller.is_hovered(q));
    page.blur();
    assert!(visible(&controller, &page, q));

    let form = page.dom().parent(container).unwrap();
    page.pointer_move(Some(form));
    assert!(!controller.is_hovered(q));
    assert!(!visible(&controller, &page, q));
}

#[test]
fn hover_shows_and_leave_keeps_focused_button() {
    let (mut page, controller, q) = search_box();
    let button = controller.button_for(q).unwrap();

    page.pointer_move(Some(q));
    assert!(visible(&controller, &page, q));
    // moving onto the button stays inside the container
    page.pointer_move(Some(button));
    assert!(controller.is_hovered(q));
    page.pointer_move(None);
    assert!(!visible(&controller, &page, q));

    page.focus(q);
    page.pointer_move(Some(q));
    page.pointer_move(None);
    assert!(visible(&controller, &page, q));
}

#[test]
fn hover_over_empty_input_shows_nothing() {
    let (mut page, controller, q) = search_box();
    page.set_value(q, "");
    page.pointer_move(Some(q));
    assert!(!visible(&controller, &page, q));
}

#[test]
fn clicking_button_clears_focuses_and_force_hides() {
    let (mut page, controller, q) = search_box();
    let button = controller.button_for(q).unwrap();

    page.pointer_move(Some(button));
    assert!(visible(&controller, &page, q));
    page.click(button);

    assert_eq!(page.value(q), "");
    assert!(page.is_focused(q));
    assert!(controller.is_hovered(q));
    assert!(!visible(&controller, &page, q));

    page.type_text("new");
    assert!(visible(&controller, &page, q));
}

#[test]
fn clicking_button_label_bubbles_to_button() {
    let (mut page, controller, q) = search_box();
    let button = controller.button_for(q).unwrap();
    let label = page.dom().children(button)[0];
    page.click(label);
    assert_eq!(page.value(q), "");
    assert!(page.is_focused(q));
}

#[test]
fn destroy_unwraps_and_silences_handlers() {
    let fx = fixture("mixed_form.toml");
    let mut built = styled_page(&fx);
    let form = built.id("form");
    let mut controller = bind_fixture(&fx, &mut built.page, Options::default());
    let inputs = controller.bound_inputs();
    let page = &mut built.page;

    page.focus(inputs[0]);
    page.type_text("x");
    page.pointer_move(Some(inputs[1]));
    controller.destroy(page);

    assert!(controller.bound_inputs().is_empty());
    assert_eq!(count_class(page, "clear-input"), 0);
    assert_eq!(count_class(page, "clear-input-container"), 0);
    for input in &inputs {
        assert_eq!(page.dom().parent(*input), Some(form));
        assert!(controller.button_for(*input).is_none());
        assert!(!controller.is_hovered(*input));
    }
    assert_eq!(page.dom().children(form).len(), 5);

    // events after teardown find nothing to act on
    page.type_text("y");
    page.pointer_move(None);
    assert_eq!(page.value(inputs[0]), "xy");
}

#[test]
fn missing_button_is_a_silent_no_op() {
    let fx = fixture("search_box.toml");
    let mut built = styled_page(&fx);
    let form = built.id("form");
    let q = built.id("q");
    let mut controller = bind_fixture(&fx, &mut built.page, Options::default());
    let page = &mut built.page;
    let button = controller.button_for(q).unwrap();
    let container = controller.container_for(q).unwrap();

    page.dom_mut().remove(button).unwrap();

    page.focus(q);
    page.type_text("!");
    page.pointer_move(Some(q));
    assert!(controller.is_hovered(q));
    page.pointer_move(Some(form));
    page.blur();
    page.pointer_move(None);

    assert_eq!(page.value(q), "rust!");
    assert!(!controller.is_hovered(q));
    assert_eq!(controller.is_button_visible(page, q), Some(false));
    assert_eq!(page.dom().children(container), &[q]);

    controller.destroy(page);
    assert_eq!(page.dom().parent(q), Some(form));
    assert_eq!(page.dom().children(form), &[q]);
    assert!(!page.dom().contains(container));
}

#[test]
fn update_binds_only_new_matches() {
    let (mut page, mut controller, q) = search_box();
    let mut controller_b = Controller::new(
        &mut page,
        Targets::query("input.late").unwrap(),
        Options::default(),
    );
    assert!(controller_b.bound_inputs().is_empty());

    let form = page.dom().parent(controller.container_for(q).unwrap()).unwrap();
    let late = page
        .dom_mut()
        .create_element_with("input", [("class", "late"), ("id", "q")]);
    page.dom_mut().append_child(form, late).unwrap();

    // `#q` now matches the new field as well
    assert_eq!(controller.update(&mut page), 1);
    assert_eq!(controller.bound_inputs(), vec![q, late]);
    assert_eq!(controller.update(&mut page), 0);

    // the same element under a second controller is left to the caller
    assert_eq!(controller_b.update(&mut page), 1);
    controller_b.destroy(&mut page);
    assert!(controller.is_bound(q));
}

#[test]
fn controllers_tear_down_independently() {
    let mut page = Page::new();
    let root = page.dom().root();
    let a = page.dom_mut().create_element_with("input", [("class", "a")]);
    let b = page.dom_mut().create_element_with("textarea", [("class", "b")]);
    page.dom_mut().append_child(root, a).unwrap();
    page.dom_mut().append_child(root, b).unwrap();

    let mut first = Controller::new(&mut page, Targets::query(".a").unwrap(), Options::default());
    let second = Controller::new(
        &mut page,
        Targets::resolver(move |_| vec![b]),
        Options::new()
            .with_button_class_name("wipe")
            .with_container_class_name("wipe-box")
            .with_button_content("clear"),
    );
    assert_ne!(first.namespace(), second.namespace());

    first.destroy(&mut page);
    assert!(!page.listeners().is_acquired(first.namespace()));
    assert!(page.listeners().is_acquired(second.namespace()));

    let button = second.button_for(b).unwrap();
    assert_eq!(page.dom().text_content(button), "clear");
    assert!(page.dom().has_class(button, "wipe"));

    page.focus(b);
    page.type_text("line one\nline two");
    assert_eq!(page.value(b), "line one\nline two");
    assert!(visible(&second, &page, b));
    page.click(button);
    assert_eq!(page.value(b), "");
    assert!(!visible(&second, &page, b));
}

#[test]
fn bad_query_is_reported() {
    assert!(Targets::query("form input").is_err());
    assert!(Targets::query("").is_err());
}
