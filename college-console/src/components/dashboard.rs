//! Summary counts and the most recent record of each kind

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::entity::EntityKind;
use crate::state::AppState;

pub struct DashboardProps<'a> {
    pub state: &'a AppState,
}

pub struct Dashboard;

impl Dashboard {
    fn latest(state: &AppState, kind: EntityKind) -> &str {
        state.first_name(kind).unwrap_or("N/A")
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White).bold();

        let lines = vec![
            Line::from("Welcome to the College Management System."),
            Line::from(""),
            Line::from(vec![
                Span::styled("Total Students: ", label),
                Span::styled(state.count(EntityKind::Student).to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Total Courses: ", label),
                Span::styled(state.count(EntityKind::Course).to_string(), value),
            ]),
            Line::from(""),
            Line::from("Recent Activity Summary").fg(Color::Cyan).bold(),
            Line::from(vec![
                Span::styled("Latest registered student: ", label),
                Span::raw(Self::latest(state, EntityKind::Student)),
            ]),
            Line::from(vec![
                Span::styled("Last added course: ", label),
                Span::raw(Self::latest(state, EntityKind::Course)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" CMS Dashboard ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
