//! Terminal admin console for the students and courses of a college REST API
//!
//! The console is a small Redux-style application on top of [`dispatch`]:
//!
//! - [`api`]: generic CRUD client over `{base}/{students,courses}`
//! - [`state`], [`action`], [`reducer`], [`effect`]: the view-state controller
//! - [`components`] and [`ui`]: ratatui rendering and key handling
//!
//! ```ignore
//! let mut store = EffectStore::new(AppState::default(), reducer);
//! let result = store.dispatch(Action::RecordAdd(EntityKind::Student));
//! assert_eq!(store.state().screen(), Screen::Form(EntityKind::Student));
//! ```

// Lets `#[derive(Action)]` expand to `::college_console::...` inside this crate
extern crate self as college_console;

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod effect;
pub mod entity;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod ui;

pub use action::Action;
pub use api::ApiClient;
pub use effect::{perform, Effect};
pub use entity::{Course, Entity, EntityKind, Record, RecordFields, RecordId, Student};
pub use error::{ApiError, ConsoleError};
pub use reducer::reducer;
pub use state::{AppState, Screen, View};
