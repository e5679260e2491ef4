//! Overlay rendering (error notification, copy-link menu, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{ContentState, CopyMenu, UiState};
use super::content::entry_height;

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count = ((error_msg.chars().count() as f32) / (inner_width.max(1) as f32)).ceil() as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));

        let popup_x = area.width.saturating_sub(popup_width) / 2;
        let popup_y = area.height.saturating_sub(popup_height) / 2;

        let popup_area = Rect {
            x: popup_x,
            y: popup_y,
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

/// Where the copy menu lands: just below the anchored entry, kept inside `list_area`
pub fn copy_menu_area(list_area: Rect, menu: &CopyMenu, content_state: &ContentState) -> Rect {
    let width = (menu.link.chars().count() as u16 + 4)
        .max(30)
        .min(list_area.width.saturating_sub(2));
    let height = 4;

    let rows_above: u16 = content_state
        .entries
        .iter()
        .take(menu.anchor + 1)
        .map(entry_height)
        .sum();
    let max_y = (list_area.y + list_area.height).saturating_sub(height);
    let y = (list_area.y + 1 + rows_above).min(max_y).max(list_area.y);

    Rect {
        x: list_area.x + 2,
        y,
        width,
        height: height.min(list_area.height),
    }
}

pub fn render_copy_menu(frame: &mut Frame, list_area: Rect, menu: &CopyMenu, content_state: &ContentState) {
    let popup_area = copy_menu_area(list_area, menu, content_state);

    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::styled(menu.link.clone(), Style::default().fg(Color::Cyan)),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" copy link   "),
            Span::styled("Esc", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" close"),
        ]),
    ];

    let menu_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Share ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(menu_widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab", "Switch feed / publish"),
        ("↑ / ↓  j / k", "Move selection"),
        ("Enter", "Open entry"),
        ("PgUp / PgDn  [ / ]", "Previous / next page"),
        ("Backspace / Esc", "Go back"),
        ("", ""),
        ("", "── Entries ──"),
        ("M", "Share link menu"),
        ("S", "Subscribe / Unsubscribe"),
        ("R", "Refresh entry"),
        ("E", "Edit your upload"),
        ("V", "Cycle display mode"),
        ("N", "Show / hide mature content"),
        ("", ""),
        ("", "── Publish ──"),
        ("P", "Focus publish card"),
        ("↑ / ↓", "Switch field"),
        ("Enter", "Choose typed file"),
        ("Ctrl+X", "Clear form"),
        ("", ""),
        ("", "── General ──"),
        ("H / ?", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_width = 62.min(area.width);
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_x = area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.height.saturating_sub(popup_height) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
