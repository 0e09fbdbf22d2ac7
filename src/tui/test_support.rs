//! Helpers for asserting on rendered output.

use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

/// Text content of each buffer row, right-trimmed.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Draw one frame into a `width` x `height` test terminal and return its rows.
pub fn render_frame(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    buffer_lines(terminal.backend().buffer())
}
