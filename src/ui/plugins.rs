//! UI plugins installed once at startup and handed to every screen.

use crate::config::Config;
use crate::ui::components::notification::Toaster;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Add,
    Edit,
    Delete,
    Phone,
    Archived,
    Client,
}

#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    ascii: bool,
}

impl IconSet {
    pub fn new(ascii: bool) -> Self {
        Self { ascii }
    }

    pub fn glyph(&self, icon: Icon) -> &'static str {
        match (icon, self.ascii) {
            (Icon::Add, false) => "✚",
            (Icon::Add, true) => "+",
            (Icon::Edit, false) => "✎",
            (Icon::Edit, true) => "e",
            (Icon::Delete, false) => "✖",
            (Icon::Delete, true) => "x",
            (Icon::Phone, false) => "☎",
            (Icon::Phone, true) => "#",
            (Icon::Archived, false) => "▣",
            (Icon::Archived, true) => "[A]",
            (Icon::Client, false) => "●",
            (Icon::Client, true) => "*",
        }
    }
}

/// Where the user currently is, for picking key hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintContext {
    ClientList { has_selection: bool },
    ClientForm { editing: bool, on_phones: bool },
    PhoneEntry,
    PhoneDemo,
    NotFound,
    Loading,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tooltips;

impl Tooltips {
    pub fn hint(&self, context: HintContext) -> &'static str {
        match context {
            HintContext::ClientList { has_selection: true } => {
                "<N> New | <E> Edit | <D> Delete | <A> Toggle archived | <R> Refresh | <:> Go to | <Q> Quit"
            }
            HintContext::ClientList { has_selection: false } => {
                "<N> New | <A> Toggle archived | <R> Refresh | <:> Go to | <Q> Quit"
            }
            HintContext::ClientForm { editing: true, .. } => "Enter - Save field | Esc - Stop editing",
            HintContext::ClientForm { on_phones: true, .. } => {
                "Left/Right - Select phone | A - Add | Enter - Edit | X - Remove | S - Save client | Esc - Cancel"
            }
            HintContext::ClientForm { .. } => {
                "Enter - Edit field | Up/Down - Navigate fields | S - Save client | Esc - Cancel"
            }
            HintContext::PhoneEntry => "Type number | Tab - Change type | Enter - Keep | Esc - Discard",
            HintContext::PhoneDemo => "Type number | Tab - Change type | Enter - Check | Esc - Back",
            HintContext::NotFound => "<Enter> Client list | <B> Back | <:> Go to | <Q> Quit",
            HintContext::Loading => "Loading...",
        }
    }
}

/// Everything the screens share: icons, toasts and key hints.
pub struct UiPlugins {
    pub icons: IconSet,
    pub toaster: Toaster,
    pub tooltips: Tooltips,
}

impl UiPlugins {
    pub fn from_config(config: &Config) -> Self {
        Self {
            icons: IconSet::new(config.ascii_icons),
            toaster: Toaster::new(config.toast_lifetime()),
            tooltips: Tooltips,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_icons_stay_ascii() {
        let icons = IconSet::new(true);
        for icon in [Icon::Add, Icon::Edit, Icon::Delete, Icon::Phone, Icon::Archived, Icon::Client] {
            assert!(icons.glyph(icon).is_ascii(), "{icon:?}");
        }
    }

    #[test]
    fn editing_hint_wins_over_phone_hint() {
        let hint = Tooltips.hint(HintContext::ClientForm {
            editing: true,
            on_phones: true,
        });
        assert!(hint.starts_with("Enter - Save field"));
    }
}
