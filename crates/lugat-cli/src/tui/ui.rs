//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputMode, ListView};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    // Tabs on top, status bar at the bottom
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer_chunks[1]);

    draw_tabs(frame, app, outer_chunks[0]);
    draw_list_pane(frame, app, pane_chunks[0]);
    draw_detail_pane(frame, app, pane_chunks[1]);

    match app.input_mode {
        InputMode::Normal => draw_status_bar(frame, app, outer_chunks[2]),
        InputMode::Lookup => draw_lookup_input(frame, app, outer_chunks[2]),
        InputMode::ConfirmDelete => draw_delete_prompt(frame, app, outer_chunks[2]),
    }

    if app.show_help {
        draw_help_overlay(frame);
    }

    if let Some(message) = &app.error_message {
        draw_error_modal(frame, message);
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = vec![
        format!(" History ({}) ", app.history_len),
        format!(" ★ Favorites ({}) ", app.favorites_len),
    ];
    let selected = match app.view {
        ListView::History => 0,
        ListView::Favorites => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .divider("│");

    frame.render_widget(tabs, area);
}

/// Draw the entry list (left)
fn draw_list_pane(frame: &mut Frame, app: &App, area: Rect) {
    let max_len = area.width.saturating_sub(8) as usize;

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::raw(format!("{} ", entry.favorite_icon())),
                Span::raw(truncate(&entry.word, max_len)),
            ];
            if entry.has_note() {
                spans.push(Span::styled(" ✎", Style::default().add_modifier(Modifier::DIM)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = match app.view {
        ListView::History => " History ",
        ListView::Favorites => " Favorites ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    if items.is_empty() {
        let hint = match app.view {
            ListView::History => "No lookups yet. Press / to look up a word.",
            ListView::Favorites => "No favorites yet. Press f on an entry.",
        };
        let paragraph = Paragraph::new(Span::styled(
            hint,
            Style::default().add_modifier(Modifier::DIM),
        ))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the detail pane (right)
fn draw_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL);

    let Some(entry) = app.current_entry() else {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select an entry to view details",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", entry.favorite_icon()), Style::default().fg(Color::Yellow)),
            Span::styled(entry.word.as_str(), bold),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("URL: ", bold), Span::raw(entry.url.as_str())]),
        Line::from(vec![
            Span::styled("Looked up: ", bold),
            Span::raw(entry.timestamp.format("%Y-%m-%d %H:%M").to_string()),
        ]),
    ];

    // Note panel only when there is a note
    if entry.has_note() {
        lines.push(Line::from(""));
        let header = "── Note ";
        let remaining = area.width.saturating_sub(header.chars().count() as u16 + 2) as usize;
        lines.push(Line::from(Span::styled(
            format!("{}{}", header, "─".repeat(remaining)),
            Style::default().add_modifier(Modifier::DIM),
        )));
        for note_line in entry.notes.lines() {
            lines.push(Line::from(format!("  {}", note_line)));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        "/:lookup  enter:open  f:fav  n:note  d:del  r:home  tab:list  ?:help  q:quit".to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Draw lookup input at the bottom
fn draw_lookup_input(frame: &mut Frame, app: &App, area: Rect) {
    let prefix = "Look up: ";

    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Cyan)),
        Span::raw(app.input.as_str()),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    // Position cursor
    let cursor_x = area.x + prefix.len() as u16 + app.cursor as u16;
    frame.set_cursor_position((cursor_x, area.y));
}

fn draw_delete_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let word = app.current_entry().map(|e| e.word.as_str()).unwrap_or("");
    let line = Line::from(vec![
        Span::styled(format!("Delete '{}'? ", word), Style::default().fg(Color::Red)),
        Span::raw("[y/N]"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Centered popup area, clamped to the frame
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = popup_area(frame.area(), 48, 19);
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  gg / G      First / last entry"),
        Line::from("  Tab         History / Favorites"),
        Line::from(""),
        Line::from("Commands:"),
        Line::from("  /           Look up a word"),
        Line::from("  Enter       Open entry in browser"),
        Line::from("  f           Toggle favorite"),
        Line::from("  n           Edit note"),
        Line::from("  d           Delete entry"),
        Line::from("  r           Open dictionary home page"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn draw_error_modal(frame: &mut Frame, message: &str) {
    let area = popup_area(frame.area(), 60, 8);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .block(block)
    .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Truncate to `max_len` characters with a trailing ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
