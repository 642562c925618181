//! Modal Dialogs
//!
//! A modal is an element with class `custom-modal`; the element itself is
//! the backdrop and its first child holds the content.

use crate::dom::Dom;
use crate::error::UiError;

pub const MODAL_CLASS: &str = "custom-modal";
pub const OPEN_CLASS: &str = "is-open";

pub struct ModalController<'a, D> {
    dom: &'a D,
}

impl<'a, D: Dom> ModalController<'a, D> {
    pub fn new(dom: &'a D) -> Self {
        Self { dom }
    }

    pub fn open(&self, id: &str) -> Result<(), UiError> {
        self.dom.add_class(id, OPEN_CLASS)?;
        self.dom.set_attribute(id, "aria-hidden", "false")?;
        self.dom.set_scroll_locked(true);
        Ok(())
    }

    /// Close `id`; scrolling resumes once no modal is left open
    pub fn close(&self, id: &str) -> Result<(), UiError> {
        self.dom.remove_class(id, OPEN_CLASS)?;
        self.dom.set_attribute(id, "aria-hidden", "true")?;
        self.dom.set_scroll_locked(!self.open_modals().is_empty());
        Ok(())
    }

    pub fn open_modals(&self) -> Vec<String> {
        self.dom
            .ids_with_class(OPEN_CLASS)
            .into_iter()
            .filter(|id| self.dom.has_class(id, MODAL_CLASS))
            .collect()
    }

    /// Close every open modal, returning how many were closed
    pub fn close_open(&self) -> usize {
        let mut closed = 0;
        for id in self.open_modals() {
            match self.close(&id) {
                Ok(()) => closed += 1,
                Err(e) => log::warn!("[Modal] close {}: {}", id, e),
            }
        }
        closed
    }

    /// Escape closes whatever is open
    pub fn on_key(&self, key: &str) -> bool {
        matches!(key, "Escape" | "Esc") && self.close_open() > 0
    }

    /// A click landing on the backdrop itself (not inside the content) dismisses
    pub fn on_click(&self, target_id: &str) -> bool {
        if target_id.is_empty()
            || !self.dom.has_class(target_id, MODAL_CLASS)
            || !self.dom.has_class(target_id, OPEN_CLASS)
        {
            return false;
        }
        match self.close(target_id) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[Modal] close {}: {}", target_id, e);
                false
            }
        }
    }
}
