use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::create_titled_block;

/// The song list, sorted by title, with the `/` filter applied.
pub fn draw_history(f: &mut Frame, app: &mut App, area: Rect) {
    let selected = app.song_list_state.selected();
    let items: Vec<ListItem> = app
        .visible_songs()
        .into_iter()
        .enumerate()
        .map(|(i, song)| {
            let is_selected = Some(i) == selected;
            let (prefix, text_style) = if is_selected {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(song.title.clone(), text_style),
                Span::styled(format!("  {}", song.author), Style::default().fg(Color::Gray)),
                Span::styled(format!("  #{}", song.id), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let heading = if app.show_mine { "My Songs" } else { "Saved Songs" };
    let title = if app.filter_query.is_empty() {
        heading.to_string()
    } else {
        format!("{heading} (filter: {})", app.filter_query)
    };

    if items.is_empty() {
        let message = if app.songs.is_empty() { "No songs saved yet" } else { "No matching songs" };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(create_titled_block(&title, true));
        f.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(create_titled_block(&title, true))
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD))
        .highlight_symbol("");

    f.render_stateful_widget(list, area, &mut app.song_list_state);
}
