//! Yes/no modal shown before a delete is sent

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::dispatch::EventKind;
use crate::state::PendingDelete;

pub struct ConfirmPromptProps<'a> {
    pub pending: &'a PendingDelete,
}

pub struct ConfirmPrompt;

impl Component<Action> for ConfirmPrompt {
    type Props<'a> = ConfirmPromptProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(Action::PromptConfirm)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::PromptCancel),
            _ => None,
        }
    }

    /// Render over whatever is already in the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(Dim, area);

        let pending = props.pending;
        let modal = centered_rect(44, 7, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" Delete {}? ", pending.kind.label().to_lowercase()))
            .title_style(Style::default().fg(Color::Red).bold())
            .style(Style::default().bg(Color::Rgb(30, 30, 40)));

        let lines = vec![
            Line::from(pending.label.as_str()).bold(),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", Style::default().fg(Color::Cyan).bold()),
                Span::raw(" delete   "),
                Span::styled("n", Style::default().fg(Color::Cyan).bold()),
                Span::raw(" keep"),
            ]),
        ];

        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            modal,
        );
    }
}

/// Greys out everything drawn so far
struct Dim;

impl Widget for Dim {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                buf[(x, y)].set_fg(Color::DarkGray);
            }
        }
    }
}

/// Calculate a centered rectangle within an area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::{key, ActionAssertions, RenderHarness};
    use crate::entity::{EntityKind, RecordId};

    fn pending() -> PendingDelete {
        PendingDelete {
            kind: EntityKind::Course,
            id: RecordId::from(7),
            label: "Intro to Rust".into(),
        }
    }

    fn send(k: &str) -> Vec<Action> {
        let pending = pending();
        ConfirmPrompt
            .handle_event(
                &EventKind::Key(key(k)),
                ConfirmPromptProps { pending: &pending },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_answers() {
        send("y").assert_first(Action::PromptConfirm);
        send("enter").assert_first(Action::PromptConfirm);
        send("n").assert_first(Action::PromptCancel);
        send("esc").assert_first(Action::PromptCancel);
        send("d").assert_empty();
    }

    #[test]
    fn test_render_names_record() {
        let pending = pending();
        let mut render = RenderHarness::new(60, 15);
        let output = render.render_to_string_plain(|frame| {
            ConfirmPrompt.render(
                frame,
                frame.area(),
                ConfirmPromptProps { pending: &pending },
            )
        });
        assert!(output.contains("Delete course?"));
        assert!(output.contains("Intro to Rust"));
    }

    #[test]
    fn test_centered_rect() {
        let centered = centered_rect(40, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(centered, Rect::new(20, 7, 40, 10));

        let clamped = centered_rect(100, 50, Rect::new(0, 0, 30, 10));
        assert!(clamped.width <= 28 && clamped.height <= 8);
    }
}
