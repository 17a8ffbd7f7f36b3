use crate::models::{Notification, NotificationLevel};
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_notification(f: &mut Frame, notification: &Notification) {
    let area = centered_rect(60, 30, f.area());

    let color = match notification.level {
        NotificationLevel::Info => Color::Green,
        NotificationLevel::Warning => Color::Yellow,
        NotificationLevel::Error => Color::Red,
    };

    let mut text = Text::default();
    text.push_line(Line::from(""));
    for line in notification.message.lines() {
        text.push_line(Line::from(line.to_string()));
    }
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Press Enter to dismiss",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    notification.title(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
        );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
