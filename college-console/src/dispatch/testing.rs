//! Test helpers
//!
//! - [`key`]: build a `KeyEvent` from a string such as `"ctrl+c"` or `"shift+tab"`
//! - [`RenderHarness`]: render into an in-memory terminal and read it back as text
//! - [`ActionAssertions`]: assertions on the actions a component emitted
//!
//! ```ignore
//! use college_console::dispatch::testing::*;
//!
//! let actions: Vec<Action> = list.handle_event(&EventKind::Key(key("a")), props).into_iter().collect();
//! actions.assert_first(Action::RecordAdd(EntityKind::Student));
//!
//! let mut render = RenderHarness::new(80, 24);
//! let output = render.render_to_string_plain(|frame| dashboard.render(frame, frame.area(), props));
//! assert!(output.contains("Total Students: 0"));
//! ```

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

/// Parse a key string like "q", "esc", "ctrl+u", "shift+tab".
pub fn parse_key(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    let (mods, key_part) = match key_str.rsplit_once('+') {
        // "+" on its own is a key, not a separator
        Some(("", "")) | None => ("", key_str.as_str()),
        Some((mods, "")) => (mods, "+"),
        Some((mods, part)) => (mods, part),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in mods.split('+').filter(|p| !p.is_empty()) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

/// Build a key event, panicking on an invalid key string.
///
/// Key strings are lowercased, so use [`char_key`] for uppercase letters.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Key event for a single character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::empty())
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Render components into a `TestBackend`
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("TestBackend terminal creation cannot fail");
        Self { terminal }
    }

    /// Render one frame and return its text, one line per row, styles dropped.
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let completed = self
            .terminal
            .draw(render)
            .expect("drawing to TestBackend cannot fail");
        buffer_to_string_plain(completed.buffer)
    }
}

/// Text content of a buffer, trailing spaces trimmed per row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Assertions on emitted actions
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: A);
    fn assert_contains(&self, expected: A);
}

impl<A: PartialEq + Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "Expected {} actions, got {:?}", n, self);
    }

    fn assert_first(&self, expected: A) {
        assert_eq!(
            self.first(),
            Some(&expected),
            "Expected first action {:?}, got {:?}",
            expected,
            self
        );
    }

    fn assert_contains(&self, expected: A) {
        assert!(
            self.contains(&expected),
            "Expected {:?} among {:?}",
            expected,
            self
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_simple_and_special() {
        assert_eq!(key("q").code, KeyCode::Char('q'));
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("shift+tab").code, KeyCode::BackTab);
        assert_eq!(key("+").code, KeyCode::Char('+'));
    }

    #[test]
    fn test_key_with_modifiers() {
        let k = key("ctrl+u");
        assert_eq!(k.code, KeyCode::Char('u'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
        assert!(parse_key("hyper+x").is_none());
    }

    #[test]
    fn test_render_harness_reads_back_text() {
        let mut render = RenderHarness::new(12, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });
        assert_eq!(output, "hello\n\n");
    }

    #[test]
    fn test_action_assertions() {
        let actions = vec![1, 2];
        actions.assert_count(2);
        actions.assert_first(1);
        actions.assert_contains(2);
        Vec::<u8>::new().assert_empty();
    }
}
