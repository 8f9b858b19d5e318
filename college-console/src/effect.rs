//! Effects - side effects declared by the reducer
//!
//! The reducer returns these as data; the runtime hands them to
//! [`perform`] on a task, and the resulting action flows back into the
//! reducer.

use crate::action::{Action, Mutation};
use crate::api::ApiClient;
use crate::entity::{Course, EntityKind, RecordFields, RecordId, Student};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch both collections; either failing fails the whole load
    LoadAll,
    /// Create (`id: None`) or update a record
    Save {
        id: Option<RecordId>,
        fields: RecordFields,
    },
    Delete {
        kind: EntityKind,
        id: RecordId,
    },
}

impl Effect {
    /// Task slot the effect runs under
    pub fn task_key(&self) -> &'static str {
        match self {
            Effect::LoadAll => "load",
            Effect::Save { .. } => "save",
            Effect::Delete { .. } => "delete",
        }
    }
}

/// Run one effect against the API and describe the outcome as an action.
pub async fn perform(effect: Effect, client: &ApiClient) -> Action {
    match effect {
        Effect::LoadAll => {
            match tokio::try_join!(client.list::<Student>(), client.list::<Course>()) {
                Ok((students, courses)) => {
                    tracing::debug!(
                        students = students.len(),
                        courses = courses.len(),
                        "collections loaded"
                    );
                    Action::DataDidLoad { students, courses }
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load data");
                    Action::DataDidError(e.to_string())
                }
            }
        }

        Effect::Save { id, fields } => {
            let kind = fields.kind();
            let creating = id.is_none();
            match save(client, id.as_ref(), &fields).await {
                Ok(()) => {
                    tracing::info!(%kind, creating, "record saved");
                    Action::RecordDidSave(kind)
                }
                Err(e) => {
                    tracing::error!(%kind, creating, error = %e, "error saving record");
                    Action::RecordDidError {
                        kind,
                        op: Mutation::Save,
                        message: e.to_string(),
                    }
                }
            }
        }

        Effect::Delete { kind, id } => {
            let result = match kind {
                EntityKind::Student => client.delete::<Student>(&id).await,
                EntityKind::Course => client.delete::<Course>(&id).await,
            };
            match result {
                Ok(()) => {
                    tracing::info!(%kind, %id, "record deleted");
                    Action::RecordDidDelete(kind)
                }
                Err(e) => {
                    tracing::error!(%kind, %id, error = %e, "error deleting record");
                    Action::RecordDidError {
                        kind,
                        op: Mutation::Delete,
                        message: e.to_string(),
                    }
                }
            }
        }
    }
}

// The response body is not used: a full reload follows every save.
async fn save(
    client: &ApiClient,
    id: Option<&RecordId>,
    fields: &RecordFields,
) -> Result<(), ApiError> {
    match (fields, id) {
        (RecordFields::Student(f), None) => client.create::<Student>(f).await.map(drop),
        (RecordFields::Student(f), Some(id)) => client.update::<Student>(id, f).await.map(drop),
        (RecordFields::Course(f), None) => client.create::<Course>(f).await.map(drop),
        (RecordFields::Course(f), Some(id)) => client.update::<Course>(id, f).await.map(drop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_keys() {
        assert_eq!(Effect::LoadAll.task_key(), "load");
        assert_eq!(
            Effect::Delete {
                kind: EntityKind::Course,
                id: RecordId::from(1),
            }
            .task_key(),
            "delete"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_load_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{addr}/api"));
        let action = perform(Effect::LoadAll, &client).await;
        assert!(matches!(action, Action::DataDidError(msg) if msg.starts_with("transport error")));
    }
}
