//! Reducer - pure function: (state, action) -> (changed, effects)
//!
//! All state mutations happen here. I/O is only ever requested, as an
//! [`Effect`], and its outcome comes back as a `*Did*` action.

use crate::action::{Action, Mutation};
use crate::dispatch::DispatchResult;
use crate::effect::Effect;
use crate::entity::EntityKind;
use crate::state::{AppState, Focus, FormDraft, PendingDelete, View};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Data =====
        Action::DataFetch => {
            state.loading = true;
            DispatchResult::changed_with(Effect::LoadAll)
        }

        Action::DataDidLoad { students, courses } => {
            state.students = students;
            state.courses = courses;
            state.loading = false;
            for kind in EntityKind::ALL {
                let index = state.selected(kind);
                state.select(kind, index);
            }
            DispatchResult::changed()
        }

        Action::DataDidError(message) => {
            // Collections stay as they were
            state.loading = false;
            state.notice = Some(format!("Failed to load data: {message}"));
            DispatchResult::changed()
        }

        // ===== Navigation =====
        Action::NavSelect(view) => {
            state.active_view = view;
            state.edit_target = None;
            state.form = view
                .kind()
                .filter(|_| view.is_form())
                .map(FormDraft::blank);
            DispatchResult::changed()
        }

        Action::ListSelect { kind, index } => {
            if state.select(kind, index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Record lifecycle =====
        Action::RecordAdd(kind) => {
            state.edit_target = None;
            state.active_view = View::form(kind);
            state.form = Some(FormDraft::blank(kind));
            state.focus = Focus::Content;
            DispatchResult::changed()
        }

        Action::RecordEdit(record) => {
            if record.id().is_none() {
                tracing::warn!(kind = %record.kind(), "cannot edit a record without an id");
                return DispatchResult::unchanged();
            }
            state.active_view = View::list(record.kind());
            state.form = Some(FormDraft::from_record(&record));
            state.edit_target = Some(record);
            state.focus = Focus::Content;
            DispatchResult::changed()
        }

        Action::RecordDelete { kind, id } => {
            if state.in_flight.deleting {
                tracing::warn!(%kind, %id, "delete already in progress");
                state.notice = Some("A delete is already in progress".into());
                return DispatchResult::changed();
            }
            let label = state
                .name_of(kind, &id)
                .map(str::to_string)
                .unwrap_or_else(|| id.to_string());
            state.pending_delete = Some(PendingDelete { kind, id, label });
            DispatchResult::changed()
        }

        Action::PromptConfirm => {
            let Some(pending) = state.pending_delete.take() else {
                return DispatchResult::unchanged();
            };
            if state.in_flight.deleting {
                tracing::warn!(kind = %pending.kind, id = %pending.id, "delete already in progress");
                return DispatchResult::changed();
            }
            state.in_flight.deleting = true;
            DispatchResult::changed_with(Effect::Delete {
                kind: pending.kind,
                id: pending.id,
            })
        }

        Action::PromptCancel => {
            if state.pending_delete.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::RecordDidSave(kind) => {
            state.in_flight.saving = false;
            state.edit_target = None;
            state.form = None;
            state.active_view = View::list(kind);
            state.notice = None;
            state.loading = true;
            DispatchResult::changed_with(Effect::LoadAll)
        }

        Action::RecordDidDelete(_kind) => {
            state.in_flight.deleting = false;
            state.notice = None;
            state.loading = true;
            DispatchResult::changed_with(Effect::LoadAll)
        }

        Action::RecordDidError { kind, op, message } => {
            // Form, draft and edit target are left alone so the user can retry
            let verb = match op {
                Mutation::Save => {
                    state.in_flight.saving = false;
                    "save"
                }
                Mutation::Delete => {
                    state.in_flight.deleting = false;
                    "delete"
                }
            };
            state.notice = Some(format!(
                "Could not {verb} {}: {message}",
                kind.label().to_lowercase()
            ));
            DispatchResult::changed()
        }

        // ===== Form =====
        Action::FormFieldSet(field, value) => match state.form.as_mut() {
            Some(draft) => {
                draft.set_value(field, value);
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        },

        Action::FormFocusNext | Action::FormFocusPrev => match state.form.as_mut() {
            Some(draft) => {
                draft.focus = draft.focus.toggle();
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        },

        Action::FormSubmit => {
            let Some(draft) = state.form.as_ref() else {
                return DispatchResult::unchanged();
            };
            if state.in_flight.saving {
                tracing::warn!(kind = %draft.kind, "save already in progress");
                state.notice = Some("A save is already in progress".into());
                return DispatchResult::changed();
            }
            if let Some(field) = draft.missing_field() {
                state.notice = Some(format!("{} is required", field.label(draft.kind)));
                return DispatchResult::changed();
            }

            let id = state
                .edit_target
                .as_ref()
                .filter(|record| record.kind() == draft.kind)
                .and_then(|record| record.id())
                .cloned();
            let fields = draft.to_fields();
            state.in_flight.saving = true;
            state.notice = None;
            DispatchResult::changed_with(Effect::Save { id, fields })
        }

        Action::FormCancel => {
            let Some(kind) = state
                .form
                .as_ref()
                .map(|draft| draft.kind)
                .or_else(|| state.active_view.kind())
            else {
                return DispatchResult::unchanged();
            };
            state.edit_target = None;
            state.form = None;
            state.active_view = View::list(kind);
            DispatchResult::changed()
        }

        // ===== Notice =====
        Action::NoticeDismiss => {
            if state.notice.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI =====
        Action::UiFocusToggle => {
            state.focus = match state.focus {
                Focus::Sidebar => Focus::Content,
                Focus::Content => Focus::Sidebar,
            };
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // only re-render while the spinner is visible
            if state.is_busy() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}
