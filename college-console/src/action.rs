//! Actions
//!
//! Naming follows `<Category><Verb>` for intents and `<Category>Did<Result>`
//! for async results, so `DataFetch` and `DataDidLoad` share the `data`
//! category in logs.

use crate::entity::{Course, EntityKind, Record, RecordId, Student};
use crate::state::{FormField, View};

/// Which mutation a `RecordDidError` reports on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Save,
    Delete,
}

#[derive(college_console_macros::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Data =====
    /// Reload both collections
    DataFetch,
    DataDidLoad {
        students: Vec<Student>,
        courses: Vec<Course>,
    },
    DataDidError(String),

    // ===== Navigation =====
    NavSelect(View),
    ListSelect {
        kind: EntityKind,
        index: usize,
    },

    // ===== Record lifecycle =====
    /// Open the add form with a fresh business key
    RecordAdd(EntityKind),
    /// Open the form on an existing record
    RecordEdit(Record),
    /// Ask for confirmation before deleting
    RecordDelete {
        kind: EntityKind,
        id: RecordId,
    },
    RecordDidSave(EntityKind),
    RecordDidDelete(EntityKind),
    RecordDidError {
        kind: EntityKind,
        op: Mutation,
        message: String,
    },

    // ===== Delete confirmation =====
    PromptConfirm,
    PromptCancel,

    // ===== Form =====
    FormFieldSet(FormField, String),
    FormFocusNext,
    FormFocusPrev,
    FormSubmit,
    FormCancel,

    // ===== Notice =====
    NoticeDismiss,

    // ===== UI =====
    UiFocusToggle,
    #[action(category = "ui")]
    UiTerminalResize(u16, u16),

    // ===== Global =====
    /// Spinner animation frame
    Tick,
    Quit,
}
