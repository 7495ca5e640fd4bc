use crate::Node;

pub fn first_styles(style: &[(String, String)]) -> String {
    style
        .iter()
        .map(|(k, v)| format!(r#"{k}: {v};"#))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per node, indented by depth. Element lines carry id/class and the
/// inline style, which is what the clear-input overlay writes to.
pub fn outline_from_dom(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        match node {
            Node::Document { children, .. } => {
                out.push(format!("{indent}#document"));
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Element {
                name,
                attributes,
                children,
                style,
                ..
            } => {
                let attr = |key: &str| {
                    attributes
                        .iter()
                        .find(|(k, _)| k == key)
                        .and_then(|(_, v)| v.as_deref())
                        .unwrap_or("")
                };
                let id = attr("id");
                let class = attr("class");
                let ty = attr("type");
                let styl = first_styles(style);
                let mut line = format!("{indent}<{name}");
                if !id.is_empty() {
                    line.push_str(&format!(r#" id="{id}""#));
                }
                if !class.is_empty() {
                    line.push_str(&format!(r#" class="{class}""#));
                }
                if !ty.is_empty() {
                    line.push_str(&format!(r#" type="{ty}""#));
                }
                line.push('>');
                if !styl.is_empty() {
                    line.push_str(&format!("  /* {styl} */"));
                }
                out.push(line);
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Text { text, .. } => {
                let t = text.replace('\n', " ").trim().to_string();
                if !t.is_empty() {
                    let show = if t.chars().count() > 40 {
                        format!("{}…", t.chars().take(40).collect::<String>())
                    } else {
                        t
                    };
                    out.push(format!("{indent}\"{show}\""));
                }
            }
        }
    }
    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}
