//! Redux-style dispatch runtime the console is built on
//!
//! - **Action**: describes an intent (`RecordAdd`) or an async result (`RecordDidSave`)
//! - **EffectStore**: owns the state; its reducer mutates state and declares effects
//! - **TaskManager**: runs effects as keyed tokio tasks that send result actions back
//! - **Component**: renders from props and maps terminal events to actions
//! - **EffectRuntime**: the event -> action -> reducer -> effect -> render loop
//!
//! The reducer never performs I/O. Anything asynchronous is an effect, and its
//! outcome re-enters the loop as another action, so state is only ever mutated
//! on the runtime's single thread of control.

pub mod action;
pub mod component;
pub mod effect;
pub mod runtime;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionCategory};
pub use component::{Component, EventKind};
pub use effect::{
    DispatchResult, EffectReducer, EffectStore, Middleware, NoopMiddleware, TracingMiddleware,
};
pub use runtime::{EffectContext, EffectRuntime, EventOutcome};
pub use tasks::{TaskKey, TaskManager};
