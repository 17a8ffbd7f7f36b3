use crate::controller::FlashcardController;
use crate::models::{ActionButton, CardView, Flashcard};
use crate::ui::layout::calculate_main_chunks;
use crate::utils::{cursor_line_col, scroll_to_line, wrap_lines};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Wrap one card side into display lines; explicit newlines are kept.
fn wrapped_side(text: &str, width: usize) -> Vec<String> {
    wrap_lines(text, width)
        .into_iter()
        .map(|(start, end)| text[start..end].to_string())
        .collect()
}

/// One list item per card: numbered front, indented back, blank spacer.
///
/// `width` is the outer width of the list area; both sides wrap inside it.
pub fn card_items(cards: &[Flashcard], width: usize) -> Vec<ListItem<'static>> {
    const INDENT: &str = "     ";
    let text_width = width.saturating_sub(2 + INDENT.len()).max(8);
    let front_style = Style::default().add_modifier(Modifier::BOLD);
    let back_style = Style::default().fg(Color::Green);

    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let mut text = Text::default();
            for (n, segment) in wrapped_side(&card.front, text_width).into_iter().enumerate() {
                let lead = if n == 0 {
                    Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(Color::DarkGray))
                } else {
                    Span::from(INDENT)
                };
                text.push_line(Line::from(vec![lead, Span::styled(segment, front_style)]));
            }
            for segment in wrapped_side(&card.back, text_width) {
                text.push_line(Line::from(vec![
                    Span::from(INDENT),
                    Span::styled(segment, back_style),
                ]));
            }
            text.push_line(Line::from(""));
            ListItem::new(text)
        })
        .collect()
}

fn draw_notes(f: &mut Frame, area: Rect, controller: &mut FlashcardController, show_cursor: bool) {
    let block = Block::default().borders(Borders::ALL).title("Notes");
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    let notes = &mut controller.notes;
    if notes.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "[Paste or type your notes here...]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        f.render_widget(placeholder, area);
        notes.input_scroll_y = 0;
        if show_cursor {
            f.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let text = notes.text();
    let lines: Vec<Line> = wrap_lines(text, width)
        .into_iter()
        .map(|(start, end)| Line::from(text[start..end].to_string()))
        .collect();

    let (line, col) = cursor_line_col(text, notes.cursor_position, width);
    notes.input_scroll_y = scroll_to_line(notes.input_scroll_y, line, inner.height);

    let paragraph = Paragraph::new(lines)
        .scroll((notes.input_scroll_y, 0))
        .block(block);
    f.render_widget(paragraph, area);

    if show_cursor {
        let row = (line as u16).saturating_sub(notes.input_scroll_y);
        f.set_cursor_position((inner.x + col as u16, inner.y + row));
    }
}

fn draw_cards(f: &mut Frame, area: Rect, controller: &FlashcardController) {
    match controller.view() {
        CardView::Empty => {
            let placeholder = Paragraph::new(Span::styled(
                "Generated flashcards will appear here",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Flashcards"));
            f.render_widget(placeholder, area);
        }
        CardView::Error(message) => {
            let error = Paragraph::new(format!("Error: {}", message))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Flashcards"));
            f.render_widget(error, area);
        }
        CardView::Cards => {
            let cards = controller.cards();
            let title = format!("Flashcards ({})", cards.len());
            let list = List::new(card_items(cards, area.width as usize))
                .block(Block::default().borders(Borders::ALL).title(title));
            let mut state = ListState::default().with_offset(controller.card_scroll);
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn action_spans(key: &'static str, button: &ActionButton) -> Vec<Span<'static>> {
    let label_style = if button.busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    vec![
        Span::styled(key, key_style()),
        Span::styled(format!(" {}  ", button.text()), label_style),
    ]
}

fn draw_help(f: &mut Frame, area: Rect, controller: &FlashcardController) {
    let mut spans = action_spans("Ctrl+G", controller.generate_button());
    if controller.actions_revealed() {
        spans.extend(action_spans("Ctrl+S", controller.submit_button()));
        spans.extend(action_spans("Ctrl+D", controller.download_button()));
    }
    spans.push(Span::styled("PgUp/PgDn", key_style()));
    spans.push(Span::from(" Scroll  "));
    spans.push(Span::styled("Esc", key_style()));
    spans.push(Span::from(" Quit"));

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub fn draw_main(f: &mut Frame, controller: &mut FlashcardController) {
    let layout = calculate_main_chunks(f.area());

    let title = format!(
        "Flashcard Generator - {} -> \"{}\"",
        controller.generator_name(),
        controller.deck_name()
    );
    let header = Paragraph::new(title)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let show_cursor = controller.notification().is_none();
    draw_notes(f, layout.notes_area, controller, show_cursor);
    draw_cards(f, layout.cards_area, controller);
    draw_help(f, layout.help_area, controller);
}
