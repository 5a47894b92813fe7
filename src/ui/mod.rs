//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod forms;
mod history;
mod presentation;

pub use forms::{draw_login, draw_upload};
pub use history::draw_history;
pub use presentation::draw_presentation;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppMode};

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    match app.mode {
        AppMode::Login => draw_login(f, app, chunks[0]),
        AppMode::Upload => draw_upload(f, app, chunks[0]),
        AppMode::History => draw_history(f, app, chunks[0]),
        AppMode::Presentation => draw_presentation(f, app, chunks[0]),
    }

    draw_command_bar(f, app, chunks[1]);

    if app.is_loading {
        draw_loading_indicator(f);
    }

    // Status and error modals block everything else
    if let Some(status) = &app.status_message {
        draw_status_message(f, status);
        return;
    }
    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f, app);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let searching = app.mode == AppMode::History && app.filter_active;
    let title = if app.is_global_command_mode {
        "Command"
    } else if searching {
        "Filter Songs"
    } else {
        "Commands/Status"
    };

    let border_color = if searching { Color::Cyan } else { Color::Yellow };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    if app.is_global_command_mode {
        let command = Paragraph::new(format!(" :{}", app.global_command_buffer))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(command, inner_area);
        let offset = app.global_command_buffer.chars().count() as u16 + 2;
        f.set_cursor(inner_area.left() + offset, inner_area.top());
    } else if searching {
        let search = Paragraph::new(format!(" /{}", app.filter_query))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(search, inner_area);
    } else {
        let help_text = match app.mode {
            AppMode::Login => create_help_text(&[
                ("Tab", "Switch field"),
                ("Enter", "Log in"),
                ("ESC", "Quit"),
            ]),
            AppMode::Upload => create_help_text(&[
                ("Enter", "Upload"),
                ("Tab", "History"),
                ("ESC", "Clear"),
                ("F1", "Help"),
            ]),
            AppMode::History => {
                let mut text = create_help_text(&[
                    ("Enter", "Open"),
                    ("/", "Filter"),
                    ("r", "Reload"),
                    ("Tab", "Upload"),
                    (":q", "Quit"),
                ]);
                text.push(Span::styled(
                    format!(" | {} songs", app.songs.len()),
                    Style::default().fg(Color::Gray),
                ));
                text
            }
            AppMode::Presentation => create_help_text(&[
                ("ESC", "Back"),
                ("j/k", "Scroll"),
                ("Tab", "History"),
                (":q", "Quit"),
            ]),
        };

        let status_bar = Paragraph::new(Line::from(help_text))
            .style(Style::default().fg(Color::Gray));

        f.render_widget(status_bar, inner_area);
    }
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")];

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let title_style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// A `width` x `height` rectangle centered in `outer`.
pub(crate) fn centered_rect(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width.saturating_sub(width)) / 2,
        y: outer.y + (outer.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

// Draw a loading indicator overlay
fn draw_loading_indicator(f: &mut Frame) {
    let area = centered_rect(f.size(), 22, 3);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new("Loading...")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    f.render_widget(text, inner_area);
}

// Draw an error message overlay
fn draw_error_message(f: &mut Frame, message: &str) {
    let size = f.size();
    let area = centered_rect(size, 40.min(size.width.saturating_sub(4)), 6);

    let block = Block::default()
        .title(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1), // "Press Esc to dismiss"
        ])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[1]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[2]);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_status_message(f: &mut Frame, message: &str) {
    use unicode_width::UnicodeWidthStr;
    let size = f.size();

    // Max 80% of screen, min 50
    let max_width = (size.width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(50) as u16;

    let inner_width = (width.saturating_sub(4) as usize).max(1);
    let msg_lines = message.width().div_ceil(inner_width);
    let height = (msg_lines as u16 + 4).min(size.height.saturating_sub(4));

    let area = centered_rect(size, width, height);

    let block = Block::default()
        .title(Span::styled("Info", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[1]);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();
    let area = centered_rect(
        size,
        60.min(size.width.saturating_sub(4)),
        22.min(size.height.saturating_sub(4)),
    );

    let block = Block::default()
        .title(Span::styled(" Help - Keybindings ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let help_text: Vec<Line> = build_help_content(app.mode)
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(vec![
                    Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                ])
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>14}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

// Help rows as (key, description, is_header)
fn build_help_content(mode: AppMode) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        (":", "Enter command mode", false),
        (":q / :quit", "Quit application", false),
        (":history", "Saved songs", false),
        (":mine", "Songs you uploaded", false),
        (":upload", "Upload a chord sheet", false),
        (":song <id>", "Open a song by id", false),
        (":title <name>", "Open a song by title", false),
        (":logout", "End the session", false),
        (":/<path>", "Open a route, e.g. :/history/mine", false),
        ("", "", false),
    ];

    match mode {
        AppMode::Login => lines.extend([
            ("── Login ──", "", true),
            ("Tab", "Switch field", false),
            ("Enter", "Log in", false),
        ]),
        AppMode::Upload => lines.extend([
            ("── Upload ──", "", true),
            ("Enter", "Upload the PDF at the typed path", false),
            ("Tab", "Go to history", false),
        ]),
        AppMode::History => lines.extend([
            ("── History ──", "", true),
            ("↑/↓ or j/k", "Navigate songs", false),
            ("Enter", "Open song", false),
            ("/", "Filter by title or author", false),
            ("r", "Reload", false),
        ]),
        AppMode::Presentation => lines.extend([
            ("── Song ──", "", true),
            ("↑/↓ or j/k", "Scroll", false),
            ("PgUp/PgDn", "Scroll a page", false),
            ("Esc", "Go back", false),
            (":export <path>", "Save as plain text", false),
        ]),
    }

    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let outer = Rect { x: 0, y: 0, width: 100, height: 40 };
        assert_eq!(centered_rect(outer, 20, 10), Rect { x: 40, y: 15, width: 20, height: 10 });
        assert_eq!(centered_rect(outer, 200, 50), outer);
    }

    #[test]
    fn test_help_text_spans() {
        let spans = create_help_text(&[("a", "one"), ("b", "two")]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " a: one | b: two");
    }

    #[test]
    fn test_help_has_mode_section() {
        let rows = build_help_content(AppMode::History);
        assert!(rows.iter().any(|(k, _, header)| *header && k.contains("History")));
    }
}
