use dom::{Document, Id};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlType {
    /// `<input>` with a missing or text-like `type`.
    Text,
    Password,
    Textarea,
    Other,
}

impl ControlType {
    pub fn is_text_control(self) -> bool {
        !matches!(self, ControlType::Other)
    }
}

pub fn control_type(doc: &Document, id: Id) -> ControlType {
    let Some(name) = doc.tag_name(id) else {
        return ControlType::Other;
    };

    if name == "textarea" {
        return ControlType::Textarea;
    }
    if name != "input" {
        return ControlType::Other;
    }

    let ty = doc
        .attr(id, "type")
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match ty {
        None => ControlType::Text, // missing type defaults to text
        Some(t) if t.eq_ignore_ascii_case("password") => ControlType::Password,
        Some(t)
            if ["text", "search", "email", "url", "tel", "number"]
                .iter()
                .any(|k| t.eq_ignore_ascii_case(k)) =>
        {
            ControlType::Text
        }
        _ => ControlType::Other,
    }
}
