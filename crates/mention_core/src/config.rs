use layout::{PlacementConfig, Size};
use serde::Deserialize;

use crate::error::ConfigError;

/// What happens to the field text when a mention is committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitMode {
    /// The whole field is emptied; the caret goes to 0.
    #[default]
    ClearField,
    /// Only `trigger..cursor` is removed; the caret lands where it was.
    StripMention,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub gap: f32,
    pub min_height: f32,
    /// Frames to wait after a measurement request before measuring.
    pub defer_frames: u32,
    pub search_box: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            width: 280.0,
            height: 300.0,
            margin: 8.0,
            gap: 4.0,
            min_height: 100.0,
            defer_frames: 2,
            search_box: true,
        }
    }
}

impl MenuConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn placement(&self) -> PlacementConfig {
        PlacementConfig {
            margin: self.margin,
            gap: self.gap,
            min_height: self.min_height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MentionConfig {
    pub trigger: char,
    pub placeholder: String,
    pub show_suggestions: bool,
    /// Cap on inline suggestions; `None` shows every unselected option.
    pub suggestion_limit: Option<usize>,
    /// Arrow keys wrap around the list ends instead of stopping.
    pub wrap_navigation: bool,
    pub commit_mode: CommitMode,
    pub menu: MenuConfig,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            trigger: '@',
            placeholder: "Type @ to mention...".to_string(),
            show_suggestions: true,
            suggestion_limit: Some(5),
            wrap_navigation: false,
            commit_mode: CommitMode::ClearField,
            menu: MenuConfig::default(),
        }
    }
}

impl MentionConfig {
    /// Parse and validate. Missing keys take their defaults.
    ///
    /// ```
    /// use mention_core::{CommitMode, MentionConfig};
    ///
    /// let cfg = MentionConfig::from_toml_str(r##"
    ///     trigger = "#"
    ///     commit_mode = "strip-mention"
    ///     [menu]
    ///     width = 320
    /// "##).unwrap();
    /// assert_eq!(cfg.trigger, '#');
    /// assert_eq!(cfg.commit_mode, CommitMode::StripMention);
    /// assert_eq!(cfg.menu.width, 320.0);
    /// assert_eq!(cfg.menu.height, 300.0);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: MentionConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger.is_whitespace() {
            return Err(ConfigError::Invalid {
                field: "trigger",
                reason: format!("{:?} is whitespace", self.trigger),
            });
        }
        if self.menu.defer_frames == 0 {
            return Err(ConfigError::Invalid {
                field: "menu.defer_frames",
                reason: "must be at least 1".to_string(),
            });
        }
        let lengths = [
            ("menu.width", self.menu.width),
            ("menu.height", self.menu.height),
            ("menu.margin", self.menu.margin),
            ("menu.gap", self.menu.gap),
            ("menu.min_height", self.menu.min_height),
        ];
        for (field, v) in lengths {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{v} is not a non-negative length"),
                });
            }
        }
        Ok(())
    }
}
