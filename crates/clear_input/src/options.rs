//! Caller options and the settings they resolve to.

pub const DEFAULT_CONTAINER_CLASS: &str = "clear-input-container";
pub const DEFAULT_BUTTON_CLASS: &str = "clear-input";
pub const DEFAULT_BUTTON_CONTENT: &str = "×";

/// Overrides for [`Settings`]. Unset fields keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub container_class_name: Option<String>,
    pub button_class_name: Option<String>,
    /// Rendered as text, never parsed as markup.
    pub button_content: Option<String>,
    pub enable_on_password: Option<bool>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container_class_name(mut self, name: impl Into<String>) -> Self {
        self.container_class_name = Some(name.into());
        self
    }

    pub fn with_button_class_name(mut self, name: impl Into<String>) -> Self {
        self.button_class_name = Some(name.into());
        self
    }

    pub fn with_button_content(mut self, content: impl Into<String>) -> Self {
        self.button_content = Some(content.into());
        self
    }

    pub fn with_enable_on_password(mut self, enable: bool) -> Self {
        self.enable_on_password = Some(enable);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub container_class_name: String,
    pub button_class_name: String,
    pub button_content: String,
    pub enable_on_password: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container_class_name: DEFAULT_CONTAINER_CLASS.to_string(),
            button_class_name: DEFAULT_BUTTON_CLASS.to_string(),
            button_content: DEFAULT_BUTTON_CONTENT.to_string(),
            enable_on_password: false,
        }
    }
}

impl Settings {
    /// Merge `options` over the defaults.
    ///
    /// Class names must be a single CSS identifier; anything else keeps the
    /// default so the delegated handlers can still find the elements.
    pub fn merged(options: Options) -> Self {
        let defaults = Self::default();
        Self {
            container_class_name: class_name(
                options.container_class_name,
                defaults.container_class_name,
            ),
            button_class_name: class_name(options.button_class_name, defaults.button_class_name),
            button_content: options.button_content.unwrap_or(defaults.button_content),
            enable_on_password: options
                .enable_on_password
                .unwrap_or(defaults.enable_on_password),
        }
    }
}

impl From<Options> for Settings {
    fn from(options: Options) -> Self {
        Self::merged(options)
    }
}

fn class_name(requested: Option<String>, default: String) -> String {
    let Some(requested) = requested else {
        return default;
    };
    let trimmed = requested.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        trimmed.to_string()
    } else {
        log::warn!(
            target: "clear_input.bind",
            "ignoring class name {requested:?}, using {default:?}"
        );
        default
    }
}
