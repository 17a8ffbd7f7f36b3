use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub header_area: Rect,
    pub notes_area: Rect,
    pub cards_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_main_chunks(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        notes_area: chunks[1],
        cards_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout() {
        let area = Rect::new(0, 0, 100, 100);
        let layout = calculate_main_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.notes_area.height > 0);
        assert!(layout.cards_area.height >= 5);
        assert!(layout.notes_area.y < layout.cards_area.y);
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 30, area);
        assert_eq!(popup.width, 60);
        assert!((14..=16).contains(&popup.height));
        assert_eq!(popup.x, 20);
        assert!(popup.y > 0 && popup.bottom() < area.bottom());
    }
}
