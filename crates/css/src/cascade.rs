use crate::syntax::{Selector, SelectorList, Stylesheet};
use crate::values::expand_shorthand;
use dom::{Document, Id};
use std::cmp::Ordering::Equal;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
struct Specificity(u16, u16, u16); // (id, class, type)

struct Candidate {
    property: String,
    value: String,
    specificity: Specificity,
    order: u32,
}

fn specificity_of(selector: &Selector) -> Specificity {
    match selector {
        Selector::Universal => Specificity(0, 0, 0),
        Selector::Type(_) => Specificity(0, 0, 1),
        Selector::Class(_) | Selector::Attribute { .. } => Specificity(0, 1, 0),
        Selector::Id(_) => Specificity(1, 0, 0),
        Selector::Compound(parts) => parts.iter().map(specificity_of).fold(
            Specificity::default(),
            |acc, s| Specificity(acc.0 + s.0, acc.1 + s.1, acc.2 + s.2),
        ),
    }
}

fn get_attributes<'a>(attributes: &'a [(String, Option<String>)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| v.as_deref())
}

// Check if an element matches a selector
pub fn matches_selector(
    name: &str,
    attributes: &[(String, Option<String>)],
    selector: &Selector,
) -> bool {
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => name.eq_ignore_ascii_case(t),
        Selector::Id(want) => get_attributes(attributes, "id").is_some_and(|v| v == want),
        Selector::Class(want) => get_attributes(attributes, "class")
            .is_some_and(|classlist| classlist.split_whitespace().any(|c| c == want)),
        Selector::Attribute { name: key, value } => {
            match attributes.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
                None => false,
                Some((_, actual)) => match value {
                    None => true,
                    Some(want) => actual.as_deref().unwrap_or("") == want,
                },
            }
        }
        Selector::Compound(parts) => parts
            .iter()
            .all(|part| matches_selector(name, attributes, part)),
    }
}

/// Returns `true` if the element `id` matches any selector of `list`.
/// Non-element nodes never match.
pub fn matches_element(doc: &Document, id: Id, list: &SelectorList) -> bool {
    let Some(name) = doc.tag_name(id) else {
        return false;
    };
    let attributes = doc.attributes(id);
    list.selectors()
        .iter()
        .any(|s| matches_selector(name, attributes, s))
}

/// All elements under `scope` that match `list`, in document order.
pub fn query_all(doc: &Document, scope: Id, list: &SelectorList) -> Vec<Id> {
    doc.descendants(scope)
        .into_iter()
        .filter(|id| matches_element(doc, *id, list))
        .collect()
}

fn push_expanded(candidates: &mut Vec<Candidate>, name: &str, value: &str, specificity: Specificity, order: u32) {
    match expand_shorthand(name, value) {
        Some(longhands) => candidates.extend(longhands.into_iter().map(|(property, value)| Candidate {
            property,
            value,
            specificity,
            order,
        })),
        None => candidates.push(Candidate {
            property: name.to_string(),
            value: value.to_string(),
            specificity,
            order,
        }),
    }
}

/// Resolve the winning declaration per property for one element.
///
/// Sheets are applied in the order given (user-agent first), rules within a
/// sheet in source order, and inline declarations win over everything.
pub fn cascaded_declarations(
    sheets: &[Stylesheet],
    name: &str,
    attributes: &[(String, Option<String>)],
    inline: &[(String, String)],
) -> Vec<(String, String)> {
    let mut candidates: Vec<Candidate> = Vec::new();

    let inline_spec = Specificity(u16::MAX, 0, 0);
    for (property, value) in inline {
        push_expanded(&mut candidates, property, value, inline_spec, u32::MAX);
    }

    let mut order = 0u32;
    for sheet in sheets {
        for rule in &sheet.rules {
            let mut matched_specificity: Option<Specificity> = None;
            for selector in &rule.selectors {
                if matches_selector(name, attributes, selector) {
                    let specificity = specificity_of(selector);
                    matched_specificity =
                        Some(matched_specificity.map_or(specificity, |cur| cur.max(specificity)));
                }
            }
            if let Some(specificity) = matched_specificity {
                for declaration in &rule.declarations {
                    push_expanded(
                        &mut candidates,
                        &declaration.name,
                        &declaration.value,
                        specificity,
                        order,
                    );
                }
            }
            order += 1;
        }
    }

    // resolve winners per property
    candidates.sort_by(|a, b| match a.property.cmp(&b.property) {
        Equal => match a.specificity.cmp(&b.specificity) {
            Equal => a.order.cmp(&b.order),
            other => other,
        },
        other => other,
    });

    let mut out = Vec::new();
    let mut i = 0;
    while i < candidates.len() {
        let candidate_property = &candidates[i].property;
        let mut j = i;
        while j + 1 < candidates.len() && candidates[j + 1].property == *candidate_property {
            j += 1;
        }
        let winner = &candidates[j];
        out.push((winner.property.clone(), winner.value.clone()));
        i = j + 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse_selector, parse_stylesheet};

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, Option<String>)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }

    fn lookup<'a>(decls: &'a [(String, String)], name: &str) -> Option<&'a str> {
        decls
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn attribute_selectors_match_value_or_presence() {
        let a = attrs(&[("type", "password"), ("class", "x y")]);
        let sel = parse_selector(r#"input[type="password"]"#).unwrap();
        assert!(matches_selector("input", &a, &sel));
        assert!(!matches_selector("textarea", &a, &sel));
        let presence = parse_selector("[type]").unwrap();
        assert!(matches_selector("input", &a, &presence));
        let other = parse_selector("[type=text]").unwrap();
        assert!(!matches_selector("input", &a, &other));
        assert!(matches_selector("input", &a, &parse_selector(".y.x").unwrap()));
    }

    #[test]
    fn higher_specificity_wins_over_source_order() {
        let sheet = parse_stylesheet(".c { position: absolute; } a { position: static; }");
        let decls = cascaded_declarations(&[sheet], "a", &attrs(&[("class", "c")]), &[]);
        assert_eq!(lookup(&decls, "position"), Some("absolute"));
    }

    #[test]
    fn later_sheet_wins_on_equal_specificity() {
        let ua = parse_stylesheet("input { padding: 1px; }");
        let author = parse_stylesheet("input { padding-top: 5px; }");
        let decls = cascaded_declarations(&[ua, author], "input", &[], &[]);
        assert_eq!(lookup(&decls, "padding-top"), Some("5px"));
        assert_eq!(lookup(&decls, "padding-bottom"), Some("1px"));
    }

    #[test]
    fn inline_declarations_win() {
        let sheet = parse_stylesheet("#q { display: block; }");
        let inline = vec![("display".to_string(), "none".to_string())];
        let decls = cascaded_declarations(&[sheet], "input", &attrs(&[("id", "q")]), &inline);
        assert_eq!(lookup(&decls, "display"), Some("none"));
    }

    #[test]
    fn query_all_walks_document_order() {
        let mut doc = Document::new();
        let a = doc.create_element_with("input", [("type", "text")]);
        let b = doc.create_element("div");
        let c = doc.create_element("textarea");
        doc.append_child(doc.root(), a).unwrap();
        doc.append_child(doc.root(), b).unwrap();
        doc.append_child(b, c).unwrap();

        let list = SelectorList::parse("textarea, input").unwrap();
        assert_eq!(query_all(&doc, doc.root(), &list), vec![a, c]);
    }
}
