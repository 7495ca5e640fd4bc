/// Appearance for the default class names. Load it with
/// `Page::add_stylesheet`; the controller itself only writes inline overrides.
pub const DEFAULT_STYLESHEET: &str = "
.clear-input-container {
    display: inline-block;
}
.clear-input {
    position: absolute;
    display: block;
    width: 16px;
    font-size: 16px;
    line-height: 16px;
    padding: 0;
    color: #999;
    cursor: pointer;
    text-align: center;
    text-decoration: none;
}
";
