//! Form Schemas
//!
//! Client-side checks run before anything is sent. A form that fails here
//! never reaches the network.

use std::collections::BTreeMap;

use validator::{Validate, ValidationErrors};

use crate::board::DialogKind;
use crate::models::{timestamp, Todo, TodoCreate, TodoState, TodoUpdate};

/// First message per failing field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        let mut errors = FormErrors::default();
        if let Err(report) = result {
            for (field, list) in report.field_errors() {
                let message = list
                    .iter()
                    .find_map(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                errors.0.insert(static_field(&field), message);
            }
        }
        errors
    }

    /// Presence wins over shape: a blank field reports only that it is required
    fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.0.insert(field, message.to_string());
        }
    }

    fn add(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

// Field names come back from validator as owned strings; map them onto the
// fixed set our forms use so FormErrors keys stay 'static.
fn static_field(field: &str) -> &'static str {
    match field {
        "username" => "username",
        "email" => "email",
        "password" => "password",
        "title" => "title",
        "deadline" => "deadline",
        _ => "form",
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("username", &self.username, "Username is required");
        errors.require("password", &self.password, "Password is required");
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RegisterForm {
    pub username: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl RegisterForm {
    pub fn check(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("username", &self.username, "Username is required");
        errors.require("email", &self.email, "Email is required");
        errors.require("password", &self.password, "Password is required");
        errors.into_result()
    }
}

/// What the todo dialog submits
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(TodoCreate),
    Update(u32, TodoUpdate),
}

/// Editable copy of a todo inside the dialog
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TodoDraft {
    pub id: Option<u32>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    /// Raw `datetime-local` value, empty when unset
    pub deadline: String,
    pub state: TodoState,
}

impl TodoDraft {
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            id: Some(todo.id),
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            deadline: todo.deadline.as_ref().map(timestamp::to_input).unwrap_or_default(),
            state: todo.state,
        }
    }

    fn optional(value: &str) -> Option<String> {
        Some(value.to_string()).filter(|v| !v.is_empty())
    }

    /// Turn the draft into the call the dialog should make.
    /// Archive ignores the edited state and always sends `ARCHIVED`.
    pub fn submission(&self, kind: DialogKind) -> Result<Submission, FormErrors> {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("title", &self.title, "Title is required");

        let deadline = if self.deadline.is_empty() {
            None
        } else {
            let parsed = timestamp::parse(&self.deadline);
            if parsed.is_none() {
                errors.add("deadline", "Invalid deadline");
            }
            parsed
        };
        errors.into_result()?;

        let description = Self::optional(&self.description);
        match (kind, self.id) {
            (DialogKind::Create, _) => Ok(Submission::Create(TodoCreate {
                title: self.title.clone(),
                description,
                deadline,
            })),
            (DialogKind::Update, Some(id)) | (DialogKind::Archive, Some(id)) => {
                let state = if kind == DialogKind::Archive { TodoState::Archived } else { self.state };
                Ok(Submission::Update(id, TodoUpdate {
                    title: Some(self.title.clone()),
                    description,
                    deadline,
                    state: Some(state),
                }))
            }
            (_, None) => {
                let mut errors = FormErrors::default();
                errors.add("form", "No task selected");
                Err(errors)
            }
        }
    }
}
