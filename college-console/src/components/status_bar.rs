//! Bottom line: the current notice, or key help for the screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::{Focus, Screen};

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct StatusBarProps<'a> {
    pub notice: Option<&'a str>,
    pub screen: Screen,
    pub focus: Focus,
    pub prompt_open: bool,
    pub busy: bool,
    pub tick_count: u32,
}

pub struct StatusBar;

impl StatusBar {
    fn help(props: &StatusBarProps<'_>) -> &'static [(&'static str, &'static str)] {
        if props.prompt_open {
            return &[("y", "confirm"), ("n", "cancel")];
        }
        if props.focus == Focus::Sidebar && !matches!(props.screen, Screen::Form(_)) {
            return &[("j/k", "navigate"), ("tab", "content"), ("q", "quit")];
        }
        match props.screen {
            Screen::Dashboard => &[
                ("1-3", "views"),
                ("tab", "sidebar"),
                ("r", "reload"),
                ("q", "quit"),
            ],
            Screen::List(_) => &[
                ("j/k", "move"),
                ("a", "add"),
                ("e", "edit"),
                ("d", "delete"),
                ("r", "reload"),
                ("q", "quit"),
            ],
            Screen::Form(_) => &[
                ("tab", "next field"),
                ("enter", "save"),
                ("esc", "cancel"),
            ],
        }
    }
}

impl Component<Action> for StatusBar {
    type Props<'a> = StatusBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = Vec::new();

        if props.busy {
            let spinner = SPINNERS[(props.tick_count as usize) % SPINNERS.len()];
            spans.push(Span::styled(
                format!(" {spinner} "),
                Style::default().fg(Color::Yellow),
            ));
        }

        match props.notice {
            Some(notice) => {
                spans.push(Span::styled(
                    format!(" ⚠ {notice} "),
                    Style::default().fg(Color::Red).bold(),
                ));
                spans.push(Span::styled(" x", Style::default().fg(Color::Cyan).bold()));
                spans.push(Span::styled(" dismiss", Style::default().fg(Color::DarkGray)));
            }
            None => {
                for (key, label) in Self::help(&props) {
                    spans.push(Span::styled(
                        format!(" {key}"),
                        Style::default().fg(Color::Cyan).bold(),
                    ));
                    spans.push(Span::styled(
                        format!(" {label} "),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)));
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::RenderHarness;
    use crate::entity::EntityKind;

    fn render(props: StatusBarProps<'_>) -> String {
        let mut render = RenderHarness::new(80, 2);
        render.render_to_string_plain(|frame| StatusBar.render(frame, frame.area(), props))
    }

    fn props(screen: Screen) -> StatusBarProps<'static> {
        StatusBarProps {
            notice: None,
            screen,
            focus: Focus::Content,
            prompt_open: false,
            busy: false,
            tick_count: 0,
        }
    }

    #[test]
    fn test_notice_replaces_help() {
        let output = render(StatusBarProps {
            notice: Some("Could not save student: API 500 boom"),
            ..props(Screen::Form(EntityKind::Student))
        });
        assert!(output.contains("Could not save student: API 500 boom"));
        assert!(output.contains("x dismiss"));
        assert!(!output.contains("next field"));
    }

    #[test]
    fn test_help_follows_screen() {
        assert!(render(props(Screen::List(EntityKind::Course))).contains("d delete"));
        assert!(render(props(Screen::Form(EntityKind::Course))).contains("esc cancel"));
        assert!(render(StatusBarProps {
            prompt_open: true,
            ..props(Screen::List(EntityKind::Course))
        })
        .contains("y confirm"));
    }

    #[test]
    fn test_spinner_when_busy() {
        let output = render(StatusBarProps {
            busy: true,
            tick_count: 1,
            ..props(Screen::Dashboard)
        });
        assert!(output.contains("◓"));
    }
}
