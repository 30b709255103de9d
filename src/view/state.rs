//! Pure view state. No I/O here: each transition mutates the state and
//! returns the HTTP request the driver must issue, if any.

use crate::storage::TaskRow;

/// A request emitted by a state transition, to be performed by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    Create { text: String },
    Toggle { id: String, completed: bool },
    Edit { id: String, text: String },
    Delete { id: String },
}

/// The one item currently being edited, plus its draft text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub text: String,
}

/// Component-local state of the task-list view.
///
/// `editing == None` is the viewing state; `Some(draft)` means exactly one
/// item is in edit mode.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub items: Vec<TaskRow>,
    pub editing: Option<EditDraft>,
    pub input_value: String,
}

impl ViewState {
    /// Replace the whole list, as after the mount fetch or any re-fetch.
    pub fn load(&mut self, items: Vec<TaskRow>) {
        self.items = items;
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
    }

    /// Submit the add form. Blank or whitespace-only input issues no request
    /// and leaves everything unchanged.
    pub fn submit_input(&self) -> Option<ViewRequest> {
        if self.input_value.trim().is_empty() {
            return None;
        }
        Some(ViewRequest::Create {
            text: self.input_value.clone(),
        })
    }

    /// Apply a successful create: prepend the saved record and clear the input.
    pub fn created(&mut self, item: TaskRow) {
        self.items.insert(0, item);
        self.input_value.clear();
    }

    /// Checkbox click: request the negation of the item's current flag.
    pub fn toggle(&self, id: &str) -> Option<ViewRequest> {
        let item = self.items.iter().find(|t| t.id == id)?;
        Some(ViewRequest::Toggle {
            id: item.id.clone(),
            completed: !item.completed,
        })
    }

    /// Enter edit mode on an item, seeding the draft with its current text.
    pub fn begin_edit(&mut self, id: &str) {
        if let Some(item) = self.items.iter().find(|t| t.id == id) {
            self.editing = Some(EditDraft {
                id: item.id.clone(),
                text: item.text.clone(),
            });
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.text = text.into();
        }
    }

    /// Blur or Enter while editing: leave edit mode, and emit an edit request
    /// only when the draft is non-blank and differs from the original text.
    pub fn commit_edit(&mut self) -> Option<ViewRequest> {
        let draft = self.editing.take()?;
        let original = self.items.iter().find(|t| t.id == draft.id)?;
        if draft.text.trim().is_empty() || draft.text == original.text {
            return None;
        }
        Some(ViewRequest::Edit {
            id: draft.id,
            text: draft.text,
        })
    }

    /// Escape while editing: discard the draft without any request.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn delete(&self, id: &str) -> ViewRequest {
        ViewRequest::Delete { id: id.to_string() }
    }

    /// Remove an item locally by id filter (after a delete request settles).
    pub fn deleted(&mut self, id: &str) {
        self.items.retain(|t| t.id != id);
    }
}
