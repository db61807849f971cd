//! Per-widget editing state machine.
//!
//! Each field-editing widget moves through
//! `Viewing -> Editing -> (Saving -> Viewing) | (cancel -> Viewing)`.
//! While `Editing`, user input mutates the buffer only; cancel discards
//! the buffer and restores the prior displayed value. A failed save drops
//! the widget back into `Editing` with the buffer intact.

use serde_json::Value;
use sitewright_content::FieldPath;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldState {
    Viewing,
    Editing { buffer: Value },
    Saving,
}

#[derive(Debug, Clone)]
pub struct FieldEditor {
    path: FieldPath,
    displayed: Value,
    state: FieldState,
}

impl FieldEditor {
    pub fn new(path: FieldPath, current: Value) -> Self {
        Self {
            path,
            displayed: current,
            state: FieldState::Viewing,
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Last-known value, shown while `Viewing`.
    pub fn displayed(&self) -> &Value {
        &self.displayed
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn buffer(&self) -> Option<&Value> {
        match &self.state {
            FieldState::Editing { buffer } => Some(buffer),
            _ => None,
        }
    }

    /// Viewing -> Editing, seeding the buffer from the displayed value.
    pub fn begin_edit(&mut self) {
        if self.state == FieldState::Viewing {
            self.state = FieldState::Editing {
                buffer: self.displayed.clone(),
            };
        }
    }

    /// Replace the buffer. Ignored outside `Editing`.
    pub fn input(&mut self, value: Value) {
        if let FieldState::Editing { buffer } = &mut self.state {
            *buffer = value;
        }
    }

    /// Editing -> Viewing, discarding the buffer.
    pub fn cancel(&mut self) {
        if matches!(self.state, FieldState::Editing { .. }) {
            self.state = FieldState::Viewing;
        }
    }

    /// Editing -> Saving. Returns the buffer to persist, or `None` when
    /// there is nothing being edited.
    pub(crate) fn begin_save(&mut self) -> Option<Value> {
        match std::mem::replace(&mut self.state, FieldState::Saving) {
            FieldState::Editing { buffer } => Some(buffer),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Saving -> Viewing after a successful persist.
    pub(crate) fn complete_save(&mut self, value: Value) {
        self.displayed = value;
        self.state = FieldState::Viewing;
    }

    /// Saving -> Editing after a failed persist; the buffer survives.
    pub(crate) fn fail_save(&mut self, buffer: Value) {
        self.state = FieldState::Editing { buffer };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn editor() -> FieldEditor {
        FieldEditor::new(FieldPath::of("businessName", &[]), json!("Acme"))
    }

    #[test]
    fn test_starts_viewing() {
        let editor = editor();
        assert_eq!(*editor.state(), FieldState::Viewing);
        assert_eq!(editor.displayed(), &json!("Acme"));
    }

    #[test]
    fn test_edit_buffers_input() {
        let mut editor = editor();
        editor.begin_edit();
        editor.input(json!("Acme & Sons"));

        assert_eq!(editor.buffer(), Some(&json!("Acme & Sons")));
        // Displayed value is untouched until a save lands
        assert_eq!(editor.displayed(), &json!("Acme"));
    }

    #[test]
    fn test_cancel_restores_prior_value() {
        let mut editor = editor();
        editor.begin_edit();
        editor.input(json!("typo"));
        editor.cancel();

        assert_eq!(*editor.state(), FieldState::Viewing);
        assert_eq!(editor.displayed(), &json!("Acme"));
        assert!(editor.buffer().is_none());
    }

    #[test]
    fn test_input_outside_editing_is_ignored() {
        let mut editor = editor();
        editor.input(json!("dropped"));
        assert_eq!(*editor.state(), FieldState::Viewing);
        assert_eq!(editor.displayed(), &json!("Acme"));
    }

    #[test]
    fn test_save_transitions() {
        let mut editor = editor();
        editor.begin_edit();
        editor.input(json!("Acme & Sons"));

        let buffer = editor.begin_save().unwrap();
        assert_eq!(*editor.state(), FieldState::Saving);

        editor.complete_save(buffer);
        assert_eq!(*editor.state(), FieldState::Viewing);
        assert_eq!(editor.displayed(), &json!("Acme & Sons"));
    }

    #[test]
    fn test_failed_save_preserves_buffer() {
        let mut editor = editor();
        editor.begin_edit();
        editor.input(json!("Acme & Sons"));

        let buffer = editor.begin_save().unwrap();
        editor.fail_save(buffer);

        assert_eq!(editor.buffer(), Some(&json!("Acme & Sons")));
        assert_eq!(editor.displayed(), &json!("Acme"));
    }

    #[test]
    fn test_begin_save_without_edit_is_none() {
        let mut editor = editor();
        assert!(editor.begin_save().is_none());
        assert_eq!(*editor.state(), FieldState::Viewing);
    }
}
