use dom::Id;
use page::Page;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const PAGE_FIXTURE_FORMAT_V1: &str = "page-fixture-v1";

/// A page described as a flat list of elements, parents first.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PageFixture {
    pub format: String,
    #[serde(default)]
    pub description: String,
    /// Selector the test binds, when the fixture is about one.
    pub selector: Option<String>,
    #[serde(default)]
    pub stylesheets: Vec<String>,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub expect: Expectations,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NodeSpec {
    pub key: String,
    pub tag: String,
    /// Key of an earlier node; the document root when absent.
    pub parent: Option<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Expectations {
    pub bound: Option<usize>,
    pub bound_with_password: Option<usize>,
    #[serde(default)]
    pub outline: Vec<String>,
}

pub struct BuiltPage {
    pub page: Page,
    pub ids: BTreeMap<String, Id>,
}

impl BuiltPage {
    pub fn id(&self, key: &str) -> Id {
        *self
            .ids
            .get(key)
            .unwrap_or_else(|| panic!("fixture has no node '{key}'"))
    }
}

pub fn parse_fixture(content: &str) -> PageFixture {
    let fixture: PageFixture =
        toml::from_str(content).unwrap_or_else(|err| panic!("failed to parse page fixture: {err}"));
    assert_eq!(
        fixture.format, PAGE_FIXTURE_FORMAT_V1,
        "unsupported page fixture format"
    );
    fixture
}

pub fn load_fixture(path: &Path) -> PageFixture {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read page fixture {path:?}: {err}"));
    parse_fixture(&content)
}

/// Build a fresh page: user-agent styles, the fixture's sheets, then the nodes.
pub fn build_page(fixture: &PageFixture) -> BuiltPage {
    let mut page = Page::new();
    for css in &fixture.stylesheets {
        page.add_stylesheet(css);
    }

    let mut ids = BTreeMap::new();
    let dom = page.dom_mut();
    for node in &fixture.nodes {
        let parent = match &node.parent {
            Some(key) => *ids
                .get(key)
                .unwrap_or_else(|| panic!("node '{}' names unknown parent '{key}'", node.key)),
            None => dom.root(),
        };
        let id = dom.create_element_with(&node.tag, node.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        dom.append_child(parent, id)
            .unwrap_or_else(|err| panic!("cannot attach '{}': {err}", node.key));
        if let Some(text) = &node.text {
            let text_id = dom.create_text(text.as_str());
            dom.append_child(id, text_id)
                .unwrap_or_else(|err| panic!("cannot add text to '{}': {err}", node.key));
        }
        assert!(
            ids.insert(node.key.clone(), id).is_none(),
            "duplicate node key '{}'",
            node.key
        );
    }
    BuiltPage { page, ids }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
format = "page-fixture-v1"
stylesheets = ["input { border-width: 1px; }"]

[[node]]
key = "form"
tag = "form"

[[node]]
key = "name"
tag = "input"
parent = "form"
attrs = { type = "text", value = "Ada" }

[[node]]
key = "notes"
tag = "textarea"
parent = "form"
text = "hello"

[expect]
bound = 2
"#;

    #[test]
    fn builds_nodes_in_order() {
        let fixture = parse_fixture(SAMPLE);
        assert_eq!(fixture.expect.bound, Some(2));
        let built = build_page(&fixture);
        let form = built.id("form");
        let page = &built.page;
        assert_eq!(page.dom().children(form), &[built.id("name"), built.id("notes")]);
        assert_eq!(page.value(built.id("name")), "Ada");
        assert_eq!(page.value(built.id("notes")), "hello");
        let style = page.computed_style(built.id("name")).unwrap();
        assert_eq!(style.box_metrics.border_top, 1.0);
    }

    #[test]
    #[should_panic(expected = "unsupported page fixture format")]
    fn rejects_unknown_format() {
        parse_fixture("format = \"v0\"");
    }
}
