use serde::Deserialize;

/// One candidate in the mention catalog. Owned by the host; the engine only
/// reads it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MentionOption {
    /// Identifier, unique within the catalog. This is what ends up in the
    /// selected list.
    pub value: String,
    #[serde(default)]
    pub label: String,
    /// Opaque icon key (a glyph, an emoji, an image id); renderers decide.
    #[serde(default)]
    pub icon: Option<String>,
}

impl MentionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The label, or the id when the label is empty.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.value
        } else {
            &self.label
        }
    }
}
