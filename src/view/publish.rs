//! Publish card rendering (file selection step)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, PublishDraft, PublishField, UiState};

pub fn render_publish_card(frame: &mut Frame, area: Rect, ui_state: &UiState, draft: &PublishDraft) {
    let is_focused = ui_state.active_section == ActiveSection::Publish;
    let disabled = draft.is_disabled();

    let border_style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let field_style = |field: PublishField| {
        if disabled {
            Style::default().fg(Color::DarkGray)
        } else if is_focused && ui_state.publish_field == field {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let label = Style::default().fg(Color::DarkGray);

    let path_text = if draft.path_input.is_empty() {
        "Type a file path, Enter to choose".to_string()
    } else {
        draft.path_input.clone()
    };

    let mut lines = Vec::new();
    if let Some(subtitle) = draft.editing_subtitle() {
        lines.push(Line::styled(subtitle, Style::default().fg(Color::Yellow)));
        lines.push(Line::raw(""));
    }
    lines.extend([
        Line::styled("File", label),
        Line::styled(path_text, field_style(PublishField::FilePath)),
        Line::from(vec![
            Span::styled("Chosen: ", label),
            Span::raw(draft.file_path.clone().unwrap_or_else(|| "none".to_string())),
        ]),
        Line::raw(""),
        Line::styled("Name", label),
        Line::styled(
            draft.name.clone().unwrap_or_default(),
            field_style(PublishField::Name),
        ),
    ]);

    if let Some(notice) = draft.editing_notice() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(notice, Style::default().fg(Color::Yellow)));
    }
    if disabled {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "You need credits to publish.",
            Style::default().fg(Color::Red),
        ));
    }

    let title = if draft.is_still_editing { " Edit " } else { " Publish " };
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(format!(" balance {:.2} · ^X clear ", draft.balance))
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
    frame.render_widget(card, area);
}
