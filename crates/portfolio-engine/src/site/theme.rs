//! Presentation palette selected by the mode flag.
//!
//! Class names follow the site's stylesheet. Nothing here has behavior
//! beyond reading the boolean.

/// Button look for the mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Secondary,
    Destructive,
}

impl ButtonVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Destructive => "destructive",
        }
    }
}

/// Label and style of the toggle control.
/// Shows the mode you would switch *to*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleLabel {
    pub text: &'static str,
    pub variant: ButtonVariant,
    pub class: &'static str,
}

impl ToggleLabel {
    pub fn for_mode(active: bool) -> Self {
        if active {
            Self {
                text: "NORMAL",
                variant: ButtonVariant::Destructive,
                class: "font-bold gothic-text",
            }
        } else {
            Self {
                text: "EMO",
                variant: ButtonVariant::Secondary,
                class: "",
            }
        }
    }
}

/// Named places in the page that change with the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSlot {
    Wrapper,
    Container,
    Card,
    Button,
    TechSection,
    TechHeading,
    TechIcon,
    TechLabel,
}

impl ThemeSlot {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "wrapper" => ThemeSlot::Wrapper,
            "container" => ThemeSlot::Container,
            "card" => ThemeSlot::Card,
            "button" => ThemeSlot::Button,
            "techSection" => ThemeSlot::TechSection,
            "techHeading" => ThemeSlot::TechHeading,
            "techIcon" => ThemeSlot::TechIcon,
            "techLabel" => ThemeSlot::TechLabel,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    emo: bool,
}

impl Theme {
    pub fn for_mode(active: bool) -> Self {
        Self { emo: active }
    }

    pub fn is_emo(&self) -> bool {
        self.emo
    }

    /// CSS classes for a slot.
    pub fn class(&self, slot: ThemeSlot) -> &'static str {
        match (slot, self.emo) {
            (ThemeSlot::Wrapper, true) => "emo-mode-active",
            (ThemeSlot::Wrapper, false) => "",
            (ThemeSlot::Container, true) => "mx-auto py-10 emo-mode-active border-black",
            (ThemeSlot::Container, false) => "mx-auto py-10",
            (ThemeSlot::Card, true) => "emo-mode-active border-black",
            (ThemeSlot::Card, false) => "",
            (ThemeSlot::Button, true) => "emo-mode-active",
            (ThemeSlot::Button, false) => "",
            (ThemeSlot::TechSection, true) => "py-4 bg-black border-black border-2",
            (ThemeSlot::TechSection, false) => "py-4 bg-background",
            (ThemeSlot::TechHeading, true) => "text-red-500 gothic-text",
            (ThemeSlot::TechHeading, false) => "",
            (ThemeSlot::TechIcon, true) => "emo-icon-filter",
            (ThemeSlot::TechIcon, false) => "",
            (ThemeSlot::TechLabel, true) => "text-red-500 gothic-text",
            (ThemeSlot::TechLabel, false) => "text-muted-foreground",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_names_the_other_mode() {
        assert_eq!(ToggleLabel::for_mode(false).text, "EMO");
        assert_eq!(ToggleLabel::for_mode(true).text, "NORMAL");
        assert_eq!(ToggleLabel::for_mode(true).variant.as_str(), "destructive");
    }

    #[test]
    fn emo_theme_adds_active_class() {
        let theme = Theme::for_mode(true);
        assert!(theme.class(ThemeSlot::Container).contains("emo-mode-active"));
        assert_eq!(theme.class(ThemeSlot::Wrapper), "emo-mode-active");
    }

    #[test]
    fn normal_theme_is_plain() {
        let theme = Theme::for_mode(false);
        assert_eq!(theme.class(ThemeSlot::Wrapper), "");
        assert_eq!(theme.class(ThemeSlot::TechSection), "py-4 bg-background");
    }

    #[test]
    fn slot_names_parse() {
        assert_eq!(ThemeSlot::parse("techIcon"), Some(ThemeSlot::TechIcon));
        assert_eq!(ThemeSlot::parse("nope"), None);
    }
}
