//! Two-state affordances that never touch form state. Each reads the current
//! state back from the surface, so nothing survives a reload and flipping twice
//! restores what was there.

use super::{
    field::FieldId,
    surface::{Chrome, Surface},
};

/// Scroll offset past which the scroll-to-top button appears.
pub const SCROLL_BUTTON_THRESHOLD: f64 = 300.0;

#[derive(Debug, Clone, Copy)]
pub struct PasswordVisibility;

impl PasswordVisibility {
    /// Switches a password input between masked and plain text. Returns the
    /// new masked state.
    pub fn toggle<S: Surface + ?Sized>(surface: &mut S, field: &FieldId) -> bool {
        let masked = !surface.is_masked(field);
        surface.set_masked(field, masked);
        masked
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MobileMenu;

impl MobileMenu {
    pub fn toggle<C: Chrome + ?Sized>(chrome: &mut C) -> bool {
        let open = !chrome.is_menu_open();
        chrome.set_menu_open(open);
        open
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScrollToTop;

impl ScrollToTop {
    /// Shows the button once the page is scrolled past the threshold.
    pub fn on_scroll<C: Chrome + ?Sized>(chrome: &mut C) {
        let visible = chrome.scroll_offset() > SCROLL_BUTTON_THRESHOLD;
        chrome.set_scroll_button_visible(visible);
    }

    pub fn activate<C: Chrome + ?Sized>(chrome: &mut C) {
        chrome.scroll_to_top();
        Self::on_scroll(chrome);
    }
}
