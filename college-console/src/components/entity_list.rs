//! Table of students or courses with add / edit / delete keys

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::dispatch::EventKind;
use crate::entity::{EntityKind, Record};

pub struct EntityListProps<'a> {
    pub kind: EntityKind,
    pub records: &'a [Record],
    pub selected: usize,
    pub is_focused: bool,
}

pub struct EntityList;

impl EntityList {
    fn selected_record<'a>(props: &EntityListProps<'a>) -> Option<&'a Record> {
        props.records.get(props.selected)
    }
}

impl Component<Action> for EntityList {
    type Props<'a> = EntityListProps<'a>;

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
        let kind = props.kind;

        match key.code {
            KeyCode::Char('j') | KeyCode::Down if !props.records.is_empty() => {
                Some(Action::ListSelect {
                    kind,
                    index: (props.selected + 1).min(props.records.len() - 1),
                })
            }
            KeyCode::Char('k') | KeyCode::Up if !props.records.is_empty() => {
                Some(Action::ListSelect {
                    kind,
                    index: props.selected.saturating_sub(1),
                })
            }
            KeyCode::Char('a') => Some(Action::RecordAdd(kind)),
            KeyCode::Char('e') | KeyCode::Enter => {
                Self::selected_record(&props).map(|record| Action::RecordEdit(record.clone()))
            }
            KeyCode::Char('d') | KeyCode::Delete => Self::selected_record(&props)
                .and_then(Record::id)
                .map(|id| Action::RecordDelete {
                    kind,
                    id: id.clone(),
                }),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let kind = props.kind;
        let border = if props.is_focused {
            Color::Cyan
        } else {
            Color::Rgb(80, 80, 100)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {}s ({}) ", kind.label(), props.records.len()))
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [toolbar, body] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);

        let add_hint = Line::from(vec![
            Span::styled(" a", Style::default().fg(Color::Cyan).bold()),
            Span::styled(
                format!(" Add New {}", kind.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(add_hint), toolbar);

        if props.records.is_empty() {
            let empty = Paragraph::new(format!(" No {} found.", kind.collection()))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, body);
            return;
        }

        let header = Row::new([kind.key_column(), "Name", kind.secondary_label()])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        let rows = props.records.iter().map(|record| {
            Row::new([
                Cell::from(record.business_key()),
                Cell::from(record.name()),
                Cell::from(record.secondary()),
            ])
        });
        let widths = [
            Constraint::Length(12),
            Constraint::Percentage(45),
            Constraint::Fill(1),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)).bold())
            .highlight_symbol("> ");

        let mut table_state = TableState::default().with_selected(Some(props.selected));
        frame.render_stateful_widget(table, body, &mut table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::{key, ActionAssertions, RenderHarness};
    use crate::entity::{RecordId, Student};

    fn students() -> Vec<Record> {
        vec![
            Record::from(Student {
                id: Some(RecordId::from(1)),
                student_id: "S-ab12cd34".into(),
                name: "Jane Doe".into(),
                major: "CS".into(),
            }),
            Record::from(Student {
                id: None,
                student_id: "S-00000002".into(),
                name: "Unsaved".into(),
                major: "Art".into(),
            }),
        ]
    }

    fn send(records: &[Record], selected: usize, k: &str) -> Vec<Action> {
        let props = EntityListProps {
            kind: EntityKind::Student,
            records,
            selected,
            is_focused: true,
        };
        EntityList
            .handle_event(&EventKind::Key(key(k)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_navigation_clamps() {
        let records = students();
        send(&records, 0, "j").assert_first(Action::ListSelect {
            kind: EntityKind::Student,
            index: 1,
        });
        send(&records, 1, "down").assert_first(Action::ListSelect {
            kind: EntityKind::Student,
            index: 1,
        });
        send(&records, 0, "k").assert_first(Action::ListSelect {
            kind: EntityKind::Student,
            index: 0,
        });
        send(&[], 0, "j").assert_empty();
    }

    #[test]
    fn test_add_edit_delete_keys() {
        let records = students();
        send(&records, 0, "a").assert_first(Action::RecordAdd(EntityKind::Student));
        send(&records, 0, "enter").assert_first(Action::RecordEdit(records[0].clone()));
        send(&records, 0, "d").assert_first(Action::RecordDelete {
            kind: EntityKind::Student,
            id: RecordId::from(1),
        });
        // No id, nothing to delete
        send(&records, 1, "d").assert_empty();
        send(&[], 0, "e").assert_empty();
    }

    #[test]
    fn test_render_rows() {
        let records = students();
        let mut render = RenderHarness::new(70, 10);
        let output = render.render_to_string_plain(|frame| {
            EntityList.render(
                frame,
                frame.area(),
                EntityListProps {
                    kind: EntityKind::Student,
                    records: &records,
                    selected: 0,
                    is_focused: true,
                },
            )
        });
        assert!(output.contains("Students (2)"));
        assert!(output.contains("Add New Student"));
        assert!(output.contains("Major"));
        assert!(output.contains("S-ab12cd34"));
        assert!(output.contains("Jane Doe"));
        assert!(output.contains("CS"));
    }

    #[test]
    fn test_render_empty_message() {
        let mut render = RenderHarness::new(50, 8);
        let output = render.render_to_string_plain(|frame| {
            EntityList.render(
                frame,
                frame.area(),
                EntityListProps {
                    kind: EntityKind::Course,
                    records: &[],
                    selected: 0,
                    is_focused: false,
                },
            )
        });
        assert!(output.contains("No courses found."));
    }
}
