//! Component trait and the events components receive

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Terminal event delivered to components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// A pure UI element that renders from props and emits actions
///
/// Props carry every piece of read-only data the component needs. Components
/// may keep view-only state in `&mut self` (a cursor position, a scroll
/// offset) but data changes always go out as actions.
///
/// # Example
///
/// ```ignore
/// struct Counter;
///
/// struct CounterProps {
///     count: usize,
///     is_focused: bool,
/// }
///
/// impl Component<Action> for Counter {
///     type Props<'a> = CounterProps;
///
///     fn handle_event(
///         &mut self,
///         event: &EventKind,
///         props: Self::Props<'_>,
///     ) -> impl IntoIterator<Item = Action> {
///         match event {
///             EventKind::Key(key) if props.is_focused && key.code == KeyCode::Char('r') => {
///                 Some(Action::DataFetch)
///             }
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(format!("Count: {}", props.count)), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Map an event to actions
    ///
    /// Returns anything iterable: `None`, `Some(action)` or a `Vec`.
    /// Render-only components keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
