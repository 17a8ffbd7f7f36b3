pub mod layout;
mod main_screen;
mod popup;

use crate::controller::FlashcardController;
use ratatui::Frame;

pub use layout::{calculate_main_chunks, centered_rect};
pub use main_screen::{card_items, draw_main};
pub use popup::draw_notification;

pub fn draw_app(f: &mut Frame, controller: &mut FlashcardController) {
    draw_main(f, controller);
    if let Some(notification) = controller.notification() {
        draw_notification(f, notification);
    }
}
