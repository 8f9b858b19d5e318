//! Action traits

use std::fmt::Debug;

/// Something that can be dispatched to the store
///
/// Actions are `Clone` so middleware can log them after the reducer consumed
/// the original, and `Send + 'static` so tasks can send them back across the
/// action channel.
///
/// Use `#[derive(Action)]` from `college-console-macros` to implement this.
pub trait Action: Clone + Debug + Send + 'static {
    /// Variant name, for logging
    fn name(&self) -> &'static str;
}

/// Actions grouped by a category inferred from their name
///
/// Implemented by `#[derive(Action)]` with `#[action(infer_categories)]`.
pub trait ActionCategory: Action {
    /// Category of this action, `None` for global actions like `Quit`
    fn category(&self) -> Option<&'static str>;
}
