use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A front/back pair as produced by the generation service.
///
/// Missing or null fields decode to empty text, and scalars to their string
/// form, rather than failing the whole deck.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default, deserialize_with = "lenient_text")]
    pub front: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub back: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Multi-line notes buffer with a byte cursor that always sits on a char boundary.
#[derive(Debug, Default, Clone)]
pub struct NotesInput {
    pub input_buffer: String,
    pub cursor_position: usize,
    pub input_scroll_y: u16,
}

impl NotesInput {
    pub fn text(&self) -> &str {
        &self.input_buffer
    }

    pub fn trimmed(&self) -> &str {
        self.input_buffer.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.input_buffer.is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        // Terminals deliver pasted newlines as \r or \r\n.
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.input_buffer
            .insert_str(self.cursor_position, &normalized);
        self.cursor_position += normalized.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input_buffer.replace_range(prev..self.cursor_position, "");
            self.cursor_position = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.input_buffer.replace_range(self.cursor_position..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor_position = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor_position = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_position = self.input_buffer[..self.cursor_position]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    pub fn move_end(&mut self) {
        self.cursor_position = self.input_buffer[self.cursor_position..]
            .find('\n')
            .map(|i| self.cursor_position + i)
            .unwrap_or(self.input_buffer.len());
    }

    pub fn clear(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
        self.input_scroll_y = 0;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input_buffer[..self.cursor_position]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.input_buffer[self.cursor_position..]
            .chars()
            .next()
            .map(|c| self.cursor_position + c.len_utf8())
    }
}

/// A trigger that can be disabled while its request is in flight.
#[derive(Debug, Clone)]
pub struct ActionButton {
    pub label: &'static str,
    pub busy_label: &'static str,
    pub busy: bool,
}

impl ActionButton {
    pub const fn new(label: &'static str, busy_label: &'static str) -> Self {
        Self {
            label,
            busy_label,
            busy: false,
        }
    }

    /// A button whose action completes synchronously and never shows a busy label.
    pub const fn instant(label: &'static str) -> Self {
        Self::new(label, label)
    }

    pub fn text(&self) -> &'static str {
        if self.busy { self.busy_label } else { self.label }
    }
}

/// What the card list area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    Empty,
    Cards,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Modal message that blocks input until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.level {
            NotificationLevel::Info => "Info",
            NotificationLevel::Warning => "Warning",
            NotificationLevel::Error => "Error",
        }
    }
}
