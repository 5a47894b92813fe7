use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, LoginField};
use crate::ui::{centered_rect, create_titled_block};

/// Access code prompt.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_login(f: &mut Frame, app: &App, area: Rect) {
    let form = centered_rect(area, 50, 10);
    f.render_widget(create_titled_block("Log in", true), form);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1), // user
            Constraint::Length(1),
            Constraint::Length(1), // code
            Constraint::Min(1),
        ])
        .margin(1)
        .split(form);

    let masked = "*".repeat(app.login_code.chars().count());
    let fields = [
        (LoginField::User, "User: ", app.login_user.as_str(), rows[1]),
        (LoginField::Code, "Code: ", masked.as_str(), rows[3]),
    ];

    for (field, label, value, row) in fields {
        let focused = app.login_field == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let line = Line::from(vec![
            Span::styled(format!(" {label}"), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ]);
        f.render_widget(Paragraph::new(line), row);

        if focused && !app.is_global_command_mode {
            let offset = (label.len() + value.chars().count()) as u16 + 1;
            f.set_cursor(row.left() + offset, row.top());
        }
    }

    let hint = Paragraph::new("Leave the user empty to sign in locally")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hint, rows[4]);
}

/// Document path entry.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_upload(f: &mut Frame, app: &App, area: Rect) {
    let form = centered_rect(area, 70, 8);
    f.render_widget(create_titled_block("Upload chord sheet", true), form);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1), // path
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .margin(1)
        .split(form);

    let line = Line::from(vec![
        Span::styled(" PDF: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled(app.path_input.as_str(), Style::default().fg(Color::White)),
    ]);
    f.render_widget(Paragraph::new(line), rows[1]);

    if !app.is_global_command_mode && !app.is_loading {
        let offset = app.path_input.chars().count() as u16 + 6;
        f.set_cursor(rows[1].left() + offset, rows[1].top());
    }

    let who = app
        .session
        .user
        .as_ref()
        .map_or_else(|| "anonymous".to_string(), ToString::to_string);
    let hint = Paragraph::new(format!("Signed in as {who}. Type a path and press Enter."))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hint, rows[3]);
}
