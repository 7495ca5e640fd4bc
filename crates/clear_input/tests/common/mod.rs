#![allow(dead_code)]

use clear_input::{Controller, DEFAULT_STYLESHEET, Options, Targets};
use dom::Id;
use page::Page;
use page_test_support::{BuiltPage, PageFixture, build_page, load_fixture};
use std::path::Path;

pub fn fixture(name: &str) -> PageFixture {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    load_fixture(&path)
}

/// Build the fixture page with the default button styles loaded last.
pub fn styled_page(fixture: &PageFixture) -> BuiltPage {
    let mut built = build_page(fixture);
    built.page.add_stylesheet(DEFAULT_STYLESHEET);
    built
}

pub fn bind_fixture(fixture: &PageFixture, page: &mut Page, options: Options) -> Controller {
    let selector = fixture
        .selector
        .as_deref()
        .expect("fixture without selector");
    let targets = Targets::query(selector).expect("fixture selector parses");
    Controller::new(page, targets, options)
}

pub fn visible(controller: &Controller, page: &Page, input: Id) -> bool {
    controller.is_button_visible(page, input) == Some(true)
}

/// Elements carrying `class` anywhere in the document.
pub fn count_class(page: &Page, class: &str) -> usize {
    let dom = page.dom();
    dom.descendants(dom.root())
        .into_iter()
        .filter(|id| dom.has_class(*id, class))
        .count()
}
