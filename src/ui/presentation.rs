use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::render::{rows, RowKind};
use crate::ui::create_titled_block;

/// One song: title, author, then chords over lyrics in monospace columns.
pub fn draw_presentation(f: &mut Frame, app: &App, area: Rect) {
    let Some(song) = &app.current_song else {
        let empty = Paragraph::new("No song selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(create_titled_block("Song", true));
        f.render_widget(empty, area);
        return;
    };

    let block = create_titled_block(&song.title, true);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let header = vec![
        Line::from(Span::styled(
            song.title.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(song.author.as_str(), Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    // No wrapping: chords only line up with their syllables on unbroken rows
    let body: Vec<Line> = rows(&song.lines)
        .into_iter()
        .map(|row| match row.kind {
            RowKind::Chords => Line::from(Span::styled(
                row.text,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            RowKind::Lyrics => Line::from(Span::raw(row.text)),
        })
        .collect();

    f.render_widget(Paragraph::new(body).scroll((app.scroll, 0)), chunks[1]);
}
