use crate::controller::FlashcardController;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: usize = 5;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Generate,
    Submit,
    Download,
    Quit,
}

pub fn handle_key(controller: &mut FlashcardController, key: KeyEvent) -> Command {
    // A notification is modal: it swallows every key until dismissed.
    if controller.notification().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            controller.dismiss_notification();
        }
        return Command::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('g') => Command::Generate,
            KeyCode::Char('s') => Command::Submit,
            KeyCode::Char('d') => Command::Download,
            KeyCode::Char('c') | KeyCode::Char('q') => Command::Quit,
            KeyCode::Char('l') => {
                controller.notes.clear();
                Command::None
            }
            _ => Command::None,
        };
    }

    match key.code {
        KeyCode::Esc => return Command::Quit,
        KeyCode::Char(c) => controller.notes.insert_char(c),
        KeyCode::Enter => controller.notes.insert_char('\n'),
        KeyCode::Backspace => controller.notes.backspace(),
        KeyCode::Delete => controller.notes.delete(),
        KeyCode::Left => controller.notes.move_left(),
        KeyCode::Right => controller.notes.move_right(),
        KeyCode::Home => controller.notes.move_home(),
        KeyCode::End => controller.notes.move_end(),
        KeyCode::PageUp => controller.scroll_cards_up(PAGE),
        KeyCode::PageDown => controller.scroll_cards_down(PAGE),
        KeyCode::Up => controller.scroll_cards_up(1),
        KeyCode::Down => controller.scroll_cards_down(1),
        _ => {}
    }
    Command::None
}

pub fn handle_paste(controller: &mut FlashcardController, text: &str) {
    if controller.notification().is_none() {
        controller.notes.insert_str(text);
    }
}
