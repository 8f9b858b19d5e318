//! Navigation between dashboard, students and courses

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::dispatch::EventKind;
use crate::state::View;

pub struct SidebarProps {
    pub active: View,
    pub is_focused: bool,
}

pub struct Sidebar;

impl Sidebar {
    /// Index into [`View::NAV`] of the entry `view` belongs to
    fn position(view: View) -> usize {
        View::NAV
            .iter()
            .position(|nav| nav.title() == view.title())
            .unwrap_or(0)
    }
}

impl Component<Action> for Sidebar {
    type Props<'a> = SidebarProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        if !props.is_focused {
            return None;
        }
        let current = Self::position(props.active);
        let target = match key.code {
            KeyCode::Char('j') | KeyCode::Down => (current + 1).min(View::NAV.len() - 1),
            KeyCode::Char('k') | KeyCode::Up => current.saturating_sub(1),
            KeyCode::Enter => return Some(Action::UiFocusToggle),
            _ => return None,
        };
        (target != current).then(|| Action::NavSelect(View::NAV[target]))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let active = Self::position(props.active);
        let lines: Vec<Line> = View::NAV
            .iter()
            .enumerate()
            .map(|(i, view)| {
                let number = Span::styled(
                    format!(" {} ", i + 1),
                    Style::default().fg(Color::DarkGray),
                );
                let title = if i == active {
                    Span::styled(view.title(), Style::default().fg(Color::Cyan).bold())
                } else {
                    Span::raw(view.title())
                };
                let marker = if i == active { "▸" } else { " " };
                Line::from(vec![Span::raw(marker), number, title])
            })
            .collect();

        let border = if props.is_focused {
            Color::Cyan
        } else {
            Color::Rgb(80, 80, 100)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" CMS Pro ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
