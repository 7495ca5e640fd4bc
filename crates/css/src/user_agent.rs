/// Built-in defaults for form controls, applied before any author sheet.
pub const USER_AGENT_CSS: &str = "
input, textarea {
    padding: 1px 2px;
    border-width: 2px;
    font-size: 13px;
}
textarea {
    padding: 2px;
}
";
