//! Presentation hooks: class names and the badge / suggestion / row
//! renderers a host can swap out.

use egui::{Button, Response, Ui};
use mention_core::MentionOption;
use serde::Deserialize;

/// Per-slot class hooks.
///
/// Each slot resolves to the built-in `mention-input-*` name followed by the
/// host's own addition, if any. Renderers receive the resolved string and are
/// free to key their styling off it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassNames {
    pub container: Option<String>,
    pub selected_container: Option<String>,
    pub selected_badge: Option<String>,
    pub selected_badge_icon: Option<String>,
    pub selected_badge_label: Option<String>,
    pub selected_badge_remove: Option<String>,
    pub suggestion: Option<String>,
    pub suggestion_icon: Option<String>,
    pub suggestion_label: Option<String>,
    pub input: Option<String>,
    pub dropdown: Option<String>,
    pub dropdown_search: Option<String>,
    pub dropdown_list: Option<String>,
    pub dropdown_empty: Option<String>,
    pub dropdown_item: Option<String>,
    pub dropdown_item_active: Option<String>,
    pub dropdown_item_icon: Option<String>,
    pub dropdown_item_label: Option<String>,
}

impl ClassNames {
    pub fn container(&self) -> String {
        join_classes(&[Some("mention-input-container"), self.container.as_deref()])
    }

    pub fn selected_container(&self) -> String {
        join_classes(&[
            Some("mention-input-selected-container"),
            self.selected_container.as_deref(),
        ])
    }

    pub fn badge(&self) -> String {
        join_classes(&[
            Some("mention-input-selected-badge"),
            self.selected_badge.as_deref(),
        ])
    }

    pub fn suggestion(&self) -> String {
        join_classes(&[Some("mention-input-suggestion"), self.suggestion.as_deref()])
    }

    pub fn input(&self) -> String {
        join_classes(&[Some("mention-input-input"), self.input.as_deref()])
    }

    pub fn dropdown(&self) -> String {
        join_classes(&[Some("mention-input-dropdown"), self.dropdown.as_deref()])
    }

    pub fn dropdown_search(&self) -> String {
        join_classes(&[
            Some("mention-input-dropdown-search"),
            self.dropdown_search.as_deref(),
        ])
    }

    pub fn dropdown_list(&self) -> String {
        join_classes(&[
            Some("mention-input-dropdown-list"),
            self.dropdown_list.as_deref(),
        ])
    }

    pub fn dropdown_empty(&self) -> String {
        join_classes(&[
            Some("mention-input-dropdown-empty"),
            self.dropdown_empty.as_deref(),
        ])
    }

    /// Row class; the active row also carries the active hooks.
    pub fn dropdown_item(&self, active: bool) -> String {
        join_classes(&[
            Some("mention-input-dropdown-item"),
            active.then_some("mention-input-dropdown-item-active"),
            self.dropdown_item.as_deref(),
            self.dropdown_item_active.as_deref().filter(|_| active),
        ])
    }
}

/// Join the present, non-blank parts with single spaces.
pub fn join_classes(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draws the option-bearing pieces of the widget.
///
/// Implementations only draw: the returned [`Response`] is what the widget
/// reads clicks and hovers from, and all state changes go through the
/// controller.
pub trait MentionRenderer {
    /// A selected option. Returns the response of its remove control.
    fn badge(&self, ui: &mut Ui, option: &MentionOption, class: &str) -> Response;

    /// An inline quick-add candidate. A click commits it.
    fn suggestion(&self, ui: &mut Ui, option: &MentionOption, class: &str) -> Response;

    /// One menu row. Hover highlights it, a click commits it.
    fn dropdown_row(
        &self,
        ui: &mut Ui,
        option: &MentionOption,
        active: bool,
        class: &str,
    ) -> Response;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderer;

impl MentionRenderer for DefaultRenderer {
    fn badge(&self, ui: &mut Ui, option: &MentionOption, class: &str) -> Response {
        let label = option.display_label();
        ui.push_id(class, |ui| {
            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::symmetric(6, 2))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if let Some(icon) = &option.icon {
                            ui.label(icon);
                        }
                        ui.label(label);
                        ui.add(Button::new("✕").small().frame(false))
                            .on_hover_text(format!("Remove {label}"))
                    })
                    .inner
                })
                .inner
        })
        .inner
    }

    fn suggestion(&self, ui: &mut Ui, option: &MentionOption, class: &str) -> Response {
        ui.push_id(class, |ui| {
            ui.add(Button::new(format!("+ {}", option.display_label())).small())
        })
        .inner
    }

    fn dropdown_row(
        &self,
        ui: &mut Ui,
        option: &MentionOption,
        active: bool,
        class: &str,
    ) -> Response {
        ui.push_id(class, |ui| {
            let text = match &option.icon {
                Some(icon) => format!("{icon}  {}", option.display_label()),
                None => option.display_label().to_owned(),
            };
            ui.selectable_label(active, text)
        })
        .inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_missing_and_blank_parts() {
        assert_eq!(join_classes(&[Some("a"), None, Some("b"), Some("  "), Some("c")]), "a b c");
        assert_eq!(join_classes(&[None, None]), "");
    }

    #[test]
    fn active_row_carries_both_hooks() {
        let classes = ClassNames {
            dropdown_item: Some("row".into()),
            dropdown_item_active: Some("row-on".into()),
            ..ClassNames::default()
        };
        assert_eq!(
            classes.dropdown_item(false),
            "mention-input-dropdown-item row"
        );
        assert_eq!(
            classes.dropdown_item(true),
            "mention-input-dropdown-item mention-input-dropdown-item-active row row-on"
        );
    }

    #[test]
    fn deserializes_camel_case_hooks() {
        let classes: ClassNames =
            toml::from_str("selectedBadge = \"pill\"\ndropdownEmpty = \"muted\"").unwrap();
        assert_eq!(classes.badge(), "mention-input-selected-badge pill");
        assert_eq!(classes.dropdown_empty(), "mention-input-dropdown-empty muted");
        assert_eq!(classes.container(), "mention-input-container");
    }
}
