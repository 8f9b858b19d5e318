//! Screen composition and event routing

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::action::Action;
use crate::components::{
    Component, ConfirmPrompt, ConfirmPromptProps, Dashboard, DashboardProps, EntityForm,
    EntityFormProps, EntityList, EntityListProps, LoadingPanel, LoadingPanelProps, Sidebar,
    SidebarProps, StatusBar, StatusBarProps,
};
use crate::dispatch::{EventKind, EventOutcome};
use crate::state::{AppState, Focus, Screen, View};

const SIDEBAR_WIDTH: u16 = 18;

/// Owns the components and routes state and events through them
#[derive(Default)]
pub struct ConsoleUi {
    form: EntityForm,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [main, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(area);
        let [nav_area, content] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                .areas(main);

        let screen = state.screen();
        let in_form = matches!(screen, Screen::Form(_));

        Sidebar.render(
            frame,
            nav_area,
            SidebarProps {
                active: state.active_view,
                is_focused: state.focus == Focus::Sidebar && !in_form,
            },
        );

        if state.loading {
            self.form.close();
            LoadingPanel.render(
                frame,
                content,
                LoadingPanelProps {
                    tick_count: state.tick_count,
                },
            );
        } else {
            self.render_content(frame, content, state, screen);
        }

        StatusBar.render(
            frame,
            status_area,
            StatusBarProps {
                notice: state.notice.as_deref(),
                screen,
                focus: state.focus,
                prompt_open: state.pending_delete.is_some(),
                busy: state.is_busy(),
                tick_count: state.tick_count,
            },
        );

        if let Some(pending) = &state.pending_delete {
            ConfirmPrompt.render(frame, area, ConfirmPromptProps { pending });
        }
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect, state: &AppState, screen: Screen) {
        match (screen, &state.form) {
            (Screen::Form(_), Some(draft)) => self.form.render(
                frame,
                area,
                EntityFormProps {
                    draft,
                    editing: state.edit_target.is_some(),
                    saving: state.in_flight.saving,
                },
            ),
            (Screen::Form(kind), None) | (Screen::List(kind), _) => {
                self.form.close();
                let records = state.records(kind);
                EntityList.render(
                    frame,
                    area,
                    EntityListProps {
                        kind,
                        records: &records,
                        selected: state.selected(kind),
                        is_focused: state.focus == Focus::Content,
                    },
                );
            }
            (Screen::Dashboard, _) => {
                self.form.close();
                Dashboard.render(frame, area, DashboardProps { state });
            }
        }
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        let key = match event {
            EventKind::Resize(width, height) => {
                return EventOutcome::action(Action::UiTerminalResize(*width, *height))
                    .with_render();
            }
            EventKind::Key(key) => key,
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return EventOutcome::action(Action::Quit);
        }

        if let Some(pending) = &state.pending_delete {
            return EventOutcome::from_actions(
                ConfirmPrompt.handle_event(event, ConfirmPromptProps { pending }),
            );
        }

        let screen = state.screen();
        if !state.loading {
            if let (Screen::Form(_), Some(draft)) = (screen, &state.form) {
                let props = EntityFormProps {
                    draft,
                    editing: state.edit_target.is_some(),
                    saving: state.in_flight.saving,
                };
                return EventOutcome::from_actions(self.form.handle_event(event, props));
            }
        }
        self.form.close();

        if let Some(action) = Self::global_key(key.code, key.modifiers, state) {
            return EventOutcome::action(action);
        }

        // Only global keys while the loading panel is up
        if state.loading {
            return EventOutcome::ignored();
        }

        if state.focus == Focus::Sidebar {
            let props = SidebarProps {
                active: state.active_view,
                is_focused: true,
            };
            return EventOutcome::from_actions(Sidebar.handle_event(event, props));
        }

        match screen {
            Screen::List(kind) | Screen::Form(kind) => {
                let records = state.records(kind);
                let props = EntityListProps {
                    kind,
                    records: &records,
                    selected: state.selected(kind),
                    is_focused: true,
                };
                EventOutcome::from_actions(EntityList.handle_event(event, props))
            }
            Screen::Dashboard => EventOutcome::ignored(),
        }
    }

    /// Keys that work everywhere outside the form and the prompt, loading included
    fn global_key(code: KeyCode, modifiers: KeyModifiers, state: &AppState) -> Option<Action> {
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match code {
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                Some(Action::NavSelect(View::NAV[index]))
            }
            KeyCode::Tab | KeyCode::BackTab => Some(Action::UiFocusToggle),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::DataFetch),
            KeyCode::Char('x') if state.notice.is_some() => Some(Action::NoticeDismiss),
            _ => None,
        }
    }
}
