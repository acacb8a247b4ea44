//! Text form shown inside the new project dialog

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

use crate::core::{Action, Module};
use crate::domain::ProjectPayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// Form content; field names become payload keys
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub template: String,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl ProjectForm {
    pub fn new(template: impl Into<String>, field_names: &[String]) -> Self {
        Self {
            template: template.into(),
            fields: field_names
                .iter()
                .map(|name| FormField {
                    name: name.clone(),
                    value: String::new(),
                })
                .collect(),
            focused: 0,
        }
    }

    /// Non-empty fields as a JSON object, in field order
    pub fn payload(&self) -> ProjectPayload {
        self.fields
            .iter()
            .filter(|field| !field.value.trim().is_empty())
            .map(|field| (field.name.clone(), Value::String(field.value.trim().to_string())))
            .collect()
    }

    fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn on_last_field(&self) -> bool {
        self.focused + 1 >= self.fields.len()
    }
}

impl Module for ProjectForm {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Action::CancelDialog,
            (KeyCode::Char('s'), mods) if mods.contains(KeyModifiers::CONTROL) => {
                Action::SubmitDialog(self.payload())
            }
            (KeyCode::Enter, _) => {
                if self.on_last_field() {
                    Action::SubmitDialog(self.payload())
                } else {
                    self.focus_next();
                    Action::None
                }
            }
            (KeyCode::Tab | KeyCode::Down, _) => {
                self.focus_next();
                Action::None
            }
            (KeyCode::BackTab | KeyCode::Up, _) => {
                self.focus_prev();
                Action::None
            }
            (KeyCode::Backspace, _) => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    field.value.pop();
                }
                Action::None
            }
            (KeyCode::Char(c), mods) if !mods.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    field.value.push(c);
                }
                Action::None
            }
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut ProjectForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn form() -> ProjectForm {
        ProjectForm::new(
            "/static/html/id2/project.new.html",
            &["name".to_string(), "description".to_string()],
        )
    }

    #[test]
    fn test_enter_walks_fields_then_submits() {
        let mut form = form();
        type_text(&mut form, "Beta");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), Action::None);
        assert_eq!(form.focused, 1);
        type_text(&mut form, "second try");
        let expected = json!({"name": "Beta", "description": "second try"});
        assert_eq!(
            form.handle_key(key(KeyCode::Enter)),
            Action::SubmitDialog(expected.as_object().cloned().unwrap())
        );
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let mut form = form();
        type_text(&mut form, "Betx");
        form.handle_key(key(KeyCode::Backspace));
        type_text(&mut form, "a");
        let submit = form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        let expected = json!({"name": "Beta"});
        assert_eq!(submit, Action::SubmitDialog(expected.as_object().cloned().unwrap()));
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = form();
        type_text(&mut form, "ignored");
        assert_eq!(form.handle_key(key(KeyCode::Esc)), Action::CancelDialog);
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = form();
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused, 1);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focused, 0);
    }
}
