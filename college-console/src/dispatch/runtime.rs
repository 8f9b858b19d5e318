//! The event / action / render loop

use std::io;
use std::time::Duration;

use crossterm::event;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::dispatch::action::Action;
use crate::dispatch::component::EventKind;
use crate::dispatch::effect::{EffectStore, Middleware};
use crate::dispatch::tasks::TaskManager;

/// Timeout passed to each `crossterm::event::poll` call
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Sleep between poll cycles
const POLL_LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Actions produced by one event, plus a render hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Collect the result of `Component::handle_event`.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

/// What an effect handler can reach
pub struct EffectContext<'a, A: Action> {
    tasks: &'a mut TaskManager<A>,
}

impl<A: Action> EffectContext<'_, A> {
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Drives an [`EffectStore`] from terminal events
pub struct EffectRuntime<S, A: Action, E, M> {
    store: EffectStore<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    tasks: TaskManager<A>,
    tick: Option<(Duration, fn() -> A)>,
    should_render: bool,
}

impl<S, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    pub fn new(store: EffectStore<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        Self {
            store,
            action_tx,
            action_rx,
            tasks,
            tick: None,
            should_render: true,
        }
    }

    /// Emit `make()` every `interval` while the loop runs.
    pub fn with_tick(mut self, interval: Duration, make: fn() -> A) -> Self {
        self.tick = Some((interval, make));
        self
    }

    /// Queue an action to run once the loop starts.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Run until `should_quit` accepts an action or every sender is gone.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> EventOutcome<A>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EventKind>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, cancel_token.clone());
        if let Some((interval, make)) = self.tick {
            spawn_ticker(self.action_tx.clone(), interval, make, cancel_token.clone());
        }

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    let outcome = map_event(&event, self.store.state());
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext {
                            tasks: &mut self.tasks,
                        };
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    self.should_render |= result.changed;
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.tasks.cancel_all();
        Ok(())
    }
}

/// Poll crossterm on a background task until cancelled.
fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::debug!("event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(POLL_LOOP_SLEEP) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(POLL_TIMEOUT).unwrap_or(false)
                    {
                        processed += 1;
                        let kind = match event::read() {
                            Ok(event::Event::Key(key)) if key.kind == event::KeyEventKind::Press => {
                                EventKind::Key(key)
                            }
                            Ok(event::Event::Resize(w, h)) => EventKind::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(kind).is_err() {
                            tracing::debug!("event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

fn spawn_ticker<A: Action>(
    tx: mpsc::UnboundedSender<A>,
    interval: Duration,
    make: fn() -> A,
    cancel_token: CancellationToken,
) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                _ = ticker.tick() => {
                    if tx.send(make()).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_outcome_builders() {
        let outcome: EventOutcome<u8> = EventOutcome::ignored();
        assert!(outcome.actions.is_empty());
        assert!(!outcome.needs_render);

        let outcome = EventOutcome::from_actions(Some(7u8)).with_render();
        assert_eq!(outcome.actions, vec![7]);
        assert!(outcome.needs_render);

        assert_eq!(EventOutcome::action(1u8).actions, vec![1]);
    }
}
