use unicode_width::UnicodeWidthChar;

/// Hard-wrap `text` at `max_width` display columns.
///
/// Returns the byte range of each visual line. Explicit newlines always break
/// and are not part of any range. The editor renders exactly these ranges, so
/// cursor placement and what is drawn cannot disagree.
pub fn wrap_lines(text: &str, max_width: usize) -> Vec<(usize, usize)> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut start = 0;
    let mut width = 0;

    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            lines.push((start, idx));
            start = idx + 1;
            width = 0;
            continue;
        }
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width && width > 0 {
            lines.push((start, idx));
            start = idx;
            width = 0;
        }
        width += ch_width;
    }
    lines.push((start, text.len()));
    lines
}

/// Visual (line, column) of a byte cursor inside text wrapped by [`wrap_lines`].
pub fn cursor_line_col(text: &str, cursor: usize, max_width: usize) -> (usize, usize) {
    let cursor = cursor.min(text.len());
    let lines = wrap_lines(text, max_width);

    // A cursor sitting exactly on a soft break belongs to the following line.
    let line_idx = lines
        .iter()
        .rposition(|&(start, _)| start <= cursor)
        .unwrap_or(0);
    let (start, _) = lines[line_idx];
    let col: usize = text[start..cursor]
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum();
    if col >= max_width.max(1) {
        (line_idx + 1, 0)
    } else {
        (line_idx, col)
    }
}

/// Smallest scroll offset change that keeps `line` inside a viewport of `height` rows.
pub fn scroll_to_line(scroll: u16, line: usize, height: u16) -> u16 {
    let line = line.min(u16::MAX as usize) as u16;
    if height == 0 {
        return line;
    }
    if line < scroll {
        line
    } else if line >= scroll.saturating_add(height) {
        line + 1 - height
    } else {
        scroll
    }
}
