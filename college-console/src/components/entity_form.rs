//! Add / edit form for a student or course
//!
//! The business key is shown but never editable. Only name and the
//! secondary field (major / instructor) take input.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::text_input::{TextInput, TextInputProps};
use super::Component;
use crate::action::Action;
use crate::dispatch::EventKind;
use crate::state::{FormDraft, FormField};

pub struct EntityFormProps<'a> {
    pub draft: &'a FormDraft,
    /// Editing an existing record rather than adding one
    pub editing: bool,
    pub saving: bool,
}

#[derive(Default)]
pub struct EntityForm {
    name: TextInput,
    secondary: TextInput,
    /// Business key of the draft the inputs' cursors belong to
    draft_key: Option<String>,
}

impl EntityForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cursors. The next draft shown starts with them at the end.
    pub fn close(&mut self) {
        self.name.reset();
        self.secondary.reset();
        self.draft_key = None;
    }

    /// Reset cursors when a different draft is shown.
    fn sync(&mut self, draft: &FormDraft) {
        if self.draft_key.as_deref() != Some(draft.business_key.as_str()) {
            self.name.reset();
            self.secondary.reset();
            self.draft_key = Some(draft.business_key.clone());
        }
    }

    fn input_props<'a>(draft: &'a FormDraft, field: FormField) -> TextInputProps<'a, Action> {
        TextInputProps {
            value: draft.value(field),
            placeholder: "",
            label: field.label(draft.kind),
            is_focused: draft.focus == field,
            on_change: match field {
                FormField::Name => set_name as fn(String) -> Action,
                FormField::Secondary => set_secondary,
            },
            on_submit: submit,
        }
    }

    fn title(props: &EntityFormProps<'_>) -> String {
        let label = props.draft.kind.label();
        if props.editing {
            format!(" Edit {label} ")
        } else {
            format!(" Add New {label} ")
        }
    }
}

fn set_name(value: String) -> Action {
    Action::FormFieldSet(FormField::Name, value)
}

fn set_secondary(value: String) -> Action {
    Action::FormFieldSet(FormField::Secondary, value)
}

fn submit(_value: String) -> Action {
    Action::FormSubmit
}

impl Component<Action> for EntityForm {
    type Props<'a> = EntityFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        let draft = props.draft;
        self.sync(draft);

        match key.code {
            KeyCode::Esc => {
                self.close();
                vec![Action::FormCancel]
            }
            KeyCode::Tab | KeyCode::Down => vec![Action::FormFocusNext],
            KeyCode::BackTab | KeyCode::Up => vec![Action::FormFocusPrev],
            _ => {
                let input = match draft.focus {
                    FormField::Name => &mut self.name,
                    FormField::Secondary => &mut self.secondary,
                };
                input
                    .handle_event(event, Self::input_props(draft, draft.focus))
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let draft = props.draft;
        self.sync(draft);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Self::title(&props))
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [name_area, key_area, secondary_area, _, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.name
            .render(frame, name_area, Self::input_props(draft, FormField::Name));

        let key_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(draft.kind.key_label());
        frame.render_widget(
            Paragraph::new(draft.business_key.as_str())
                .style(Style::default().fg(Color::Gray))
                .block(key_block),
            key_area,
        );

        self.secondary.render(
            frame,
            secondary_area,
            Self::input_props(draft, FormField::Secondary),
        );

        let key_style = Style::default().fg(Color::Cyan).bold();
        let text_style = Style::default().fg(Color::DarkGray);
        let mut hint = vec![
            Span::styled(" enter", key_style),
            Span::styled(format!(" Save {}  ", draft.kind.label()), text_style),
            Span::styled("tab", key_style),
            Span::styled(" next field  ", text_style),
            Span::styled("esc", key_style),
            Span::styled(" Cancel", text_style),
        ];
        if props.saving {
            hint.push(Span::styled("  Saving...", Style::default().fg(Color::Yellow)));
        }
        frame.render_widget(Paragraph::new(Line::from(hint)), hint_area);
    }
}
