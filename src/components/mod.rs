//! UI Components
//!
//! Leptos views for the auth page and the board.

mod auth_form;
mod board_column;
mod board_page;
mod field_error;
mod spinner;
mod todo_card;
mod todo_dialog;

pub use auth_form::AuthPage;
pub use board_column::BoardColumn;
pub use board_page::BoardPage;
pub use field_error::FieldError;
pub use spinner::LoadingSpinner;
pub use todo_card::TodoCard;
pub use todo_dialog::TodoDialog;
