//! Placeholder shown while a reload is in flight

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::status_bar::SPINNERS;
use super::Component;
use crate::action::Action;

pub struct LoadingPanelProps {
    pub tick_count: u32,
}

pub struct LoadingPanel;

impl Component<Action> for LoadingPanel {
    type Props<'a> = LoadingPanelProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let spinner = SPINNERS[(props.tick_count as usize) % SPINNERS.len()];
        frame.render_widget(
            Paragraph::new(format!("{spinner} Loading..."))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            middle,
        );
    }
}
