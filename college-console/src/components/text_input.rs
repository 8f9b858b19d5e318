//! Single-line text input with cursor

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dispatch::{Component, EventKind};

pub struct TextInputProps<'a, A> {
    pub value: &'a str,
    /// Shown dimmed while the value is empty
    pub placeholder: &'a str,
    /// Border title
    pub label: &'a str,
    pub is_focused: bool,
    pub on_change: fn(String) -> A,
    pub on_submit: fn(String) -> A,
}

/// Emits `on_change` with the whole new value for every edit and
/// `on_submit` on Enter. The value itself lives in app state.
#[derive(Default)]
pub struct TextInput {
    /// Byte index into the value; `None` means "at the end"
    cursor: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the cursor back at the end of whatever value comes next.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Cursor clamped into `value` and onto a char boundary. The value can
    /// change underneath a remembered cursor.
    fn cursor(&self, value: &str) -> usize {
        let mut cursor = self.cursor.map_or(value.len(), |c| c.min(value.len()));
        while !value.is_char_boundary(cursor) {
            cursor -= 1;
        }
        cursor
    }

    fn move_left(&mut self, value: &str) {
        let cursor = self.cursor(value);
        let prev = value[..cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        self.cursor = Some(prev);
    }

    fn move_right(&mut self, value: &str) {
        let cursor = self.cursor(value);
        let next = value[cursor..]
            .chars()
            .next()
            .map_or(cursor, |c| cursor + c.len_utf8());
        self.cursor = Some(next);
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let cursor = self.cursor(value);
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..cursor]);
        new_value.push(c);
        new_value.push_str(&value[cursor..]);
        self.cursor = Some(cursor + c.len_utf8());
        new_value
    }

    /// Backspace
    fn delete_before(&mut self, value: &str) -> Option<String> {
        let cursor = self.cursor(value);
        let (start, _) = value[..cursor].char_indices().next_back()?;
        self.cursor = Some(start);
        Some(format!("{}{}", &value[..start], &value[cursor..]))
    }

    /// Delete
    fn delete_at(&self, value: &str) -> Option<String> {
        let cursor = self.cursor(value);
        let c = value[cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..cursor],
            &value[cursor + c.len_utf8()..]
        ))
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let EventKind::Key(key) = event else {
            return None;
        };
        if !props.is_focused {
            return None;
        }
        let value = props.value;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = Some(0);
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = None;
                    None
                }
                // Ctrl+U: clear line
                KeyCode::Char('u') => {
                    self.cursor = None;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some((props.on_change)(self.insert_char(value, c))),
            KeyCode::Backspace => self.delete_before(value).map(props.on_change),
            KeyCode::Delete => self.delete_at(value).map(props.on_change),
            KeyCode::Left => {
                self.move_left(value);
                None
            }
            KeyCode::Right => {
                self.move_right(value);
                None
            }
            KeyCode::Home => {
                self.cursor = Some(0);
                None
            }
            KeyCode::End => {
                self.cursor = None;
                None
            }
            KeyCode::Enter => Some((props.on_submit)(value.to_string())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };
        let border_style = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(props.label);
        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        if props.is_focused && area.width > 2 && area.height > 2 {
            let cursor = self.cursor(props.value);
            let column = props.value[..cursor].chars().count() as u16;
            let x = area.x + 1 + column;
            // Only show the cursor inside the border
            if x < area.x + area.width - 1 {
                frame.set_cursor_position((x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::{key, ActionAssertions, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
        Submit(String),
    }

    fn props(value: &str) -> TextInputProps<'_, TestAction> {
        TextInputProps {
            value,
            placeholder: "type here",
            label: "Name",
            is_focused: true,
            on_change: TestAction::Change,
            on_submit: TestAction::Submit,
        }
    }

    fn send(input: &mut TextInput, k: &str, value: &str) -> Vec<TestAction> {
        input
            .handle_event(&EventKind::Key(key(k)), props(value))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_appends_at_end() {
        let mut input = TextInput::new();
        send(&mut input, "!", "hello").assert_first(TestAction::Change("hello!".into()));
    }

    #[test]
    fn test_insert_after_moving_left() {
        let mut input = TextInput::new();
        send(&mut input, "left", "ac");
        send(&mut input, "b", "ac").assert_first(TestAction::Change("abc".into()));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInput::new();
        send(&mut input, "backspace", "héllo").assert_first(TestAction::Change("héll".into()));

        send(&mut input, "home", "héll");
        send(&mut input, "backspace", "héll").assert_empty();
        send(&mut input, "delete", "héll").assert_first(TestAction::Change("éll".into()));
    }

    #[test]
    fn test_stale_cursor_snaps_to_char_boundary() {
        let mut input = TextInput::new();
        // Cursor lands at byte 3 of "aéé"
        send(&mut input, "home", "aéé");
        send(&mut input, "right", "aéé");
        send(&mut input, "right", "aéé");

        // Same byte offset is mid-char in the new value
        send(&mut input, "x", "éé").assert_first(TestAction::Change("éxé".into()));

        let mut render = RenderHarness::new(20, 3);
        let output = render.render_to_string_plain(|frame| {
            Component::<TestAction>::render(&mut input, frame, frame.area(), props("éé"))
        });
        assert!(output.contains("éé"));
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::new();
        send(&mut input, "ctrl+u", "hello").assert_first(TestAction::Change(String::new()));
    }

    #[test]
    fn test_submit() {
        let mut input = TextInput::new();
        send(&mut input, "enter", "hello").assert_first(TestAction::Submit("hello".into()));
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = TextInput::new();
        let mut p = props("hello");
        p.is_focused = false;
        let actions: Vec<_> = input
            .handle_event(&EventKind::Key(key("x")), p)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_shows_value_or_placeholder() {
        let mut input = TextInput::new();
        let mut render = RenderHarness::new(20, 3);

        let output = render.render_to_string_plain(|frame| {
            Component::<TestAction>::render(&mut input, frame, frame.area(), props("Jane"))
        });
        assert!(output.contains("Name"));
        assert!(output.contains("Jane"));

        let output = render.render_to_string_plain(|frame| {
            Component::<TestAction>::render(&mut input, frame, frame.area(), props(""))
        });
        assert!(output.contains("type here"));
    }
}
