//! Effect-aware store
//!
//! The reducer returns a [`DispatchResult`]: whether state changed (so the
//! runtime knows to re-render) and the effects to run. Effects are plain data
//! describing work, such as "fetch both collections"; the runtime hands them
//! to an effect handler that spawns the actual tasks.
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::DataFetch => {
//!             state.loading = true;
//!             DispatchResult::changed_with(Effect::LoadAll)
//!         }
//!         Action::Quit => DispatchResult::unchanged(),
//!         // ...
//!     }
//! }
//! ```

use std::marker::PhantomData;

use crate::dispatch::action::{Action, ActionCategory};

/// Outcome of dispatching one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified
    pub changed: bool,
    /// Effects to run after dispatch, in order
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed and one effect to run.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are any effects to run.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer that can declare effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Hooks around every dispatch
///
/// Middleware sees each action before the reducer runs and learns afterwards
/// whether state changed. It never sees effects.
pub trait Middleware<A: Action> {
    /// Called before the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Logs every processed action through `tracing`
///
/// Result actions (`*Did*`) are interesting at debug level; everything else,
/// keystroke-driven field edits included, goes to trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl<A: ActionCategory> Middleware<A> for TracingMiddleware {
    fn before(&mut self, action: &A) {
        tracing::trace!(action = %action.name(), "dispatching");
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        let category = action.category().unwrap_or("global");
        if action.name().contains("Did") {
            tracing::debug!(
                action = %action.name(),
                category,
                state_changed,
                "action processed"
            );
        } else {
            tracing::trace!(
                action = %action.name(),
                category,
                state_changed,
                "action processed"
            );
        }
    }
}

/// Store holding the state, its reducer and a middleware
///
/// # Example
///
/// ```ignore
/// let mut store = EffectStore::new(AppState::default(), reducer)
///     .with_middleware(TracingMiddleware);
///
/// let result = store.dispatch(Action::DataFetch);
/// assert!(result.changed);
/// assert_eq!(result.effects, vec![Effect::LoadAll]);
/// ```
pub struct EffectStore<S, A, E, M = NoopMiddleware> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    middleware: M,
    _marker: PhantomData<(A, E)>,
}

impl<S, A: Action, E> EffectStore<S, A, E, NoopMiddleware> {
    /// Create a store with no middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            middleware: NoopMiddleware,
            _marker: PhantomData,
        }
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStore<S, A, E, M> {
    /// Replace the middleware.
    pub fn with_middleware<M2: Middleware<A>>(self, middleware: M2) -> EffectStore<S, A, E, M2> {
        EffectStore {
            state: self.state,
            reducer: self.reducer,
            middleware,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a reference to the middleware.
    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Run an action through middleware and reducer.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Bump,
        BumpAndSave,
        NoOp,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Bump => "Bump",
                TestAction::BumpAndSave => "BumpAndSave",
                TestAction::NoOp => "NoOp",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Save(u32),
    }

    fn test_reducer(state: &mut u32, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Bump => {
                *state += 1;
                DispatchResult::changed()
            }
            TestAction::BumpAndSave => {
                *state += 1;
                DispatchResult::changed_with(TestEffect::Save(*state))
            }
            TestAction::NoOp => DispatchResult::unchanged(),
        }
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before: usize,
        changed: usize,
    }

    impl Middleware<TestAction> for CountingMiddleware {
        fn before(&mut self, _action: &TestAction) {
            self.before += 1;
        }

        fn after(&mut self, _action: &TestAction, state_changed: bool) {
            if state_changed {
                self.changed += 1;
            }
        }
    }

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::changed_with(TestEffect::Save(1)).with(TestEffect::Save(2));
        assert!(r.changed);
        assert_eq!(r.effects, vec![TestEffect::Save(1), TestEffect::Save(2)]);
    }

    #[test]
    fn test_store_dispatch_returns_effects() {
        let mut store = EffectStore::new(0u32, test_reducer);

        let result = store.dispatch(TestAction::Bump);
        assert!(result.changed);
        assert!(result.effects.is_empty());

        let result = store.dispatch(TestAction::BumpAndSave);
        assert_eq!(result.effects, vec![TestEffect::Save(2)]);
        assert_eq!(*store.state(), 2);

        let result = store.dispatch(TestAction::NoOp);
        assert!(!result.changed);
    }

    #[test]
    fn test_store_runs_middleware_around_reducer() {
        let mut store =
            EffectStore::new(0u32, test_reducer).with_middleware(CountingMiddleware::default());

        store.dispatch(TestAction::Bump);
        store.dispatch(TestAction::NoOp);

        assert_eq!(store.middleware().before, 2);
        assert_eq!(store.middleware().changed, 1);
    }
}
