//! Board Model
//!
//! Column layout, drag-drop outcome and dialog modes, independent of the DOM.

use crate::models::{Todo, TodoState, TodoUpdate};

/// One visible board lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub state: TodoState,
    /// CSS modifier for heading and card hover colours
    pub class: &'static str,
}

impl Column {
    pub fn title(&self) -> &'static str {
        self.state.label()
    }
}

/// Drag payload format carrying a todo id
pub const DRAG_FORMAT: &str = "todoId";

/// The three visible columns, left to right. Archived has no column.
pub const COLUMNS: [Column; 3] = [
    Column { state: TodoState::Todo, class: "column-todo" },
    Column { state: TodoState::Doing, class: "column-doing" },
    Column { state: TodoState::Done, class: "column-done" },
];

/// Todos belonging to `state`, in backend order
pub fn todos_in(todos: &[Todo], state: TodoState) -> Vec<Todo> {
    if !state.is_visible() {
        return Vec::new();
    }
    todos.iter().filter(|t| t.state == state).cloned().collect()
}

/// Update issued when todo `id` is dropped on the `target` column: title and
/// description carried over unchanged, only the state moves.
/// None when the id is not in the collection.
pub fn drop_update(todos: &[Todo], id: u32, target: TodoState) -> Option<TodoUpdate> {
    let todo = todos.iter().find(|t| t.id == id)?;
    Some(TodoUpdate {
        title: Some(todo.title.clone()),
        description: todo.description.clone(),
        deadline: None,
        state: Some(target),
    })
}

/// Mode of the shared todo dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Create,
    Update,
    Archive,
}

impl DialogKind {
    pub fn heading(&self) -> &'static str {
        match self {
            DialogKind::Create => "Create New Task",
            DialogKind::Update => "Update Task",
            DialogKind::Archive => "Archive Task",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            DialogKind::Create => "Create",
            DialogKind::Update => "Update",
            DialogKind::Archive => "Archive",
        }
    }

    /// Create and Update edit fields; Archive only confirms
    pub fn has_form(&self) -> bool {
        !matches!(self, DialogKind::Archive)
    }
}

/// Dialog currently open on the board
#[derive(Debug, Clone, PartialEq)]
pub struct DialogTarget {
    pub kind: DialogKind,
    pub todo: Option<Todo>,
}

impl DialogTarget {
    pub fn create() -> Self {
        Self { kind: DialogKind::Create, todo: None }
    }

    pub fn update(todo: Todo) -> Self {
        Self { kind: DialogKind::Update, todo: Some(todo) }
    }

    pub fn archive(todo: Todo) -> Self {
        Self { kind: DialogKind::Archive, todo: Some(todo) }
    }
}
