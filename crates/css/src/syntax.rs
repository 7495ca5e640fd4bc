use std::fmt;

// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// Set of selectors and declarations
#[derive(Clone, Debug)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
    Attribute {
        name: String,
        value: Option<String>,
    }, // [name] / [name="value"]
    Compound(Vec<Selector>), // input.search[type="text"]
}

/// Comma separated selectors; an element matches if any of them does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        parse_selector_list(input)
    }

    pub fn class(name: &str) -> Self {
        SelectorList(vec![Selector::Class(name.to_string())])
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    /// Combinators, pseudo-classes and anything else outside the supported subset.
    Unsupported(String),
    Unterminated(String),
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "empty selector"),
            SelectorError::Unsupported(s) => write!(f, "unsupported selector `{s}`"),
            SelectorError::Unterminated(s) => write!(f, "unterminated attribute selector `{s}`"),
        }
    }
}

impl std::error::Error for SelectorError {}

// A full stylesheet: multiple rules
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

// input: "div, #id { color: red; } .class { font-size: 12px; }"
// output: Stylesheet { rules: vec![Rule{ selectors: ..., declarations: ...}, ...] }
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let input = strip_comments(input);
    let mut rules = Vec::new();
    for block in input.split('}') {
        if let Some((selector_str, declaration_str)) = block.split_once('{') {
            let selectors = selector_str
                .split(',')
                .filter_map(|s| parse_selector(s).ok())
                .collect::<Vec<_>>();
            if selectors.is_empty() {
                continue;
            }
            let declarations = parse_declarations(declaration_str);
            if declarations.is_empty() {
                continue;
            }
            rules.push(Rule {
                selectors,
                declarations,
            });
        }
    }
    Stylesheet { rules }
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

// input: "input, textarea.big"
// output: SelectorList(vec![Type("input"), Compound([Type("textarea"), Class("big")])])
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let selectors = split_top_level_commas(input)
        .into_iter()
        .map(parse_selector)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SelectorList(selectors))
}

// Commas inside `[...]` or quotes belong to an attribute value.
fn split_top_level_commas(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    let mut quote: Option<char> = None;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') if in_brackets => quote = Some(c),
            (None, '[') => in_brackets = true,
            (None, ']') => in_brackets = false,
            (None, ',') if !in_brackets => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

// Byte offset of the `]` closing an attribute selector, skipping quoted text.
fn attribute_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ']') => return Some(i),
            _ => {}
        }
    }
    None
}

// input: "#id", ".class", "div", "*", "input[type=\"text\"].wide"
// output: Ok(Selector::Id("id")), ...
pub fn parse_selector(s: &str) -> Result<Selector, SelectorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut parts = Vec::new();
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        match c {
            '*' if parts.is_empty() => {
                parts.push(Selector::Universal);
                rest = &rest[1..];
            }
            '#' | '.' => {
                let (ident, tail) = take_ident(&rest[1..]);
                if ident.is_empty() {
                    return Err(SelectorError::Unsupported(s.to_string()));
                }
                parts.push(if c == '#' {
                    Selector::Id(ident.to_string())
                } else {
                    Selector::Class(ident.to_string())
                });
                rest = tail;
            }
            '[' => {
                let end = attribute_end(rest)
                    .ok_or_else(|| SelectorError::Unterminated(s.to_string()))?;
                parts.push(parse_attribute(&rest[1..end], s)?);
                rest = &rest[end + 1..];
            }
            c if parts.is_empty() && c.is_ascii_alphabetic() => {
                let (ident, tail) = take_ident(rest);
                parts.push(Selector::Type(ident.to_ascii_lowercase()));
                rest = tail;
            }
            _ => return Err(SelectorError::Unsupported(s.to_string())),
        }
    }

    if parts.len() == 1 {
        Ok(parts.remove(0))
    } else {
        Ok(Selector::Compound(parts))
    }
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len());
    s.split_at(end)
}

fn parse_attribute(inner: &str, whole: &str) -> Result<Selector, SelectorError> {
    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (inner.trim(), None),
    };
    let (ident, tail) = take_ident(name);
    if ident.is_empty() || !tail.is_empty() {
        return Err(SelectorError::Unsupported(whole.to_string()));
    }
    Ok(Selector::Attribute {
        name: ident.to_ascii_lowercase(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_selectors() {
        assert_eq!(parse_selector("*"), Ok(Selector::Universal));
        assert_eq!(parse_selector("INPUT"), Ok(Selector::Type("input".into())));
        assert_eq!(parse_selector("#q"), Ok(Selector::Id("q".into())));
        assert_eq!(parse_selector(".wide"), Ok(Selector::Class("wide".into())));
    }

    #[test]
    fn parses_compound_with_attribute() {
        assert_eq!(
            parse_selector(r#"input[type="text"].wide"#),
            Ok(Selector::Compound(vec![
                Selector::Type("input".into()),
                Selector::Attribute {
                    name: "type".into(),
                    value: Some("text".into()),
                },
                Selector::Class("wide".into()),
            ]))
        );
        assert_eq!(
            parse_selector("[data-clear]"),
            Ok(Selector::Attribute {
                name: "data-clear".into(),
                value: None,
            })
        );
    }

    #[test]
    fn rejects_combinators_and_garbage() {
        assert!(matches!(
            parse_selector("form input"),
            Err(SelectorError::Unsupported(_))
        ));
        assert!(matches!(
            parse_selector("a > b"),
            Err(SelectorError::Unsupported(_))
        ));
        assert!(matches!(
            parse_selector("input:focus"),
            Err(SelectorError::Unsupported(_))
        ));
        assert!(matches!(
            parse_selector("[type"),
            Err(SelectorError::Unterminated(_))
        ));
        assert_eq!(parse_selector("  "), Err(SelectorError::Empty));
        assert_eq!(parse_selector_list("input,"), Err(SelectorError::Empty));
    }

    #[test]
    fn parses_lists() {
        let list = parse_selector_list("input, textarea").unwrap();
        assert_eq!(list.selectors().len(), 2);
    }

    #[test]
    fn commas_inside_attribute_values_do_not_split() {
        let list = parse_selector_list(r#"input[placeholder="a, b"], textarea"#).unwrap();
        assert_eq!(
            list.selectors(),
            &[
                Selector::Compound(vec![
                    Selector::Type("input".into()),
                    Selector::Attribute {
                        name: "placeholder".into(),
                        value: Some("a, b".into()),
                    },
                ]),
                Selector::Type("textarea".into()),
            ]
        );
        assert_eq!(
            parse_selector("[title='x]y']"),
            Ok(Selector::Attribute {
                name: "title".into(),
                value: Some("x]y".into()),
            })
        );
    }

    #[test]
    fn stylesheet_skips_comments_and_bad_rules() {
        let sheet = parse_stylesheet(
            "/* defaults */ .box { position: relative; } a b { color: red; } .empty { }",
        );
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selectors, vec![Selector::Class("box".into())]);
        assert_eq!(
            sheet.rules[0].declarations,
            vec![Declaration {
                name: "position".into(),
                value: "relative".into(),
            }]
        );
    }
}
