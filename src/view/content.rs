//! Main content area rendering (feed entries and entry pages)

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    normalize_uri, ActiveSection, ContentState, ContentView, DisplayMode, EntryRender, PageDetail,
    RenderState, UiState,
};
use super::utils::{format_time_ago, render_scrollable_list, truncate_string};

const SKELETON: &str = "░░░░░░░░░░░░░░░░░░░░░░░░";
const SKELETON_SHORT: &str = "░░░░░░░░░░░░";

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    subscriptions: &HashSet<String>,
    now: DateTime<Utc>,
) {
    let is_focused = ui_state.active_section == ActiveSection::Feed;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match &content_state.view {
        ContentView::Feed => {
            if content_state.entries.is_empty() {
                let empty = Paragraph::new("Nothing to show yet")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Feed ")
                            .padding(Padding::horizontal(1))
                            .border_style(border_style),
                    );
                frame.render_widget(empty, area);
                return;
            }

            let content_width = area.width.saturating_sub(4) as usize;
            let items: Vec<ListItem> = content_state
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let selected = i == content_state.selected_index && is_focused;
                    entry_item(entry, selected, subscriptions, now, content_width)
                })
                .collect();

            let block = Block::default()
                .borders(Borders::ALL)
                .title(feed_title(content_state))
                .padding(Padding::horizontal(1))
                .border_style(border_style);
            render_scrollable_list(frame, area, items, content_state.selected_index, block);
        }
        ContentView::Page(page) => render_page(frame, area, page, subscriptions, now, border_style),
    }
}

fn feed_title(content_state: &ContentState) -> String {
    match content_state.feed_page {
        (current, total) if total > 1 => {
            format!(" Feed ({}) · page {}/{} ", content_state.entries.len(), current, total)
        }
        _ => format!(" Feed ({}) ", content_state.entries.len()),
    }
}

/// Line count an entry occupies in a display mode
pub(super) fn entry_height(entry: &EntryRender) -> u16 {
    match (&entry.state, entry.display_mode) {
        (_, DisplayMode::Compact) => 2,
        (RenderState::Placeholder { .. }, _) => 2,
        (_, DisplayMode::Normal) => 3,
        (_, DisplayMode::Large) => 4,
    }
}

fn entry_item(
    entry: &EntryRender,
    selected: bool,
    subscriptions: &HashSet<String>,
    now: DateTime<Utc>,
    width: usize,
) -> ListItem<'static> {
    let title_style = match (selected, entry.clickable) {
        (true, _) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::White),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let subtle = Style::default().fg(Color::DarkGray);
    let compact = entry.display_mode == DisplayMode::Compact;

    let mut lines: Vec<Line> = Vec::new();
    match &entry.state {
        RenderState::Hidden => {}
        RenderState::Placeholder { .. } => {
            lines.push(Line::styled(truncate_string(SKELETON, width), subtle));
            lines.push(Line::styled(truncate_string(SKELETON_SHORT, width), subtle));
        }
        RenderState::Channel { claim, child_count } => {
            lines.push(Line::styled(
                truncate_string(&format!("◉ {}", entry.state.title()), width),
                title_style,
            ));
            if !compact {
                let subscribed = subscriptions.contains(&normalize_uri(&entry.identifier));
                lines.push(Line::from(vec![Span::styled(
                    if subscribed { "[Subscribed]" } else { "[Subscribe]" },
                    Style::default().fg(if subscribed { Color::Cyan } else { Color::Yellow }),
                )]));
            }
            let mut subtitle = vec![
                Span::styled(claim.name.clone(), Style::default().fg(Color::Cyan)),
                Span::styled(format!("  {} publishes", child_count), subtle),
            ];
            if entry.pending {
                subtitle.push(Span::styled("  Pending...", Style::default().fg(Color::Yellow)));
            }
            lines.push(Line::from(subtitle));
        }
        RenderState::File { claim, .. } => {
            lines.push(Line::styled(
                truncate_string(&format!("▶ {}", entry.state.title()), width),
                title_style,
            ));
            if entry.display_mode == DisplayMode::Large {
                let thumb = entry.state.thumbnail().unwrap_or("no thumbnail");
                lines.push(Line::styled(truncate_string(&format!("  [{}]", thumb), width), subtle));
            }

            let channel = claim
                .as_ref()
                .and_then(|c| c.signing_channel.clone())
                .unwrap_or_else(|| "Anonymous".to_string());
            let mut subtitle = vec![Span::styled(channel, Style::default().fg(Color::Cyan))];
            if entry.pending {
                subtitle.push(Span::styled("  Pending...", Style::default().fg(Color::Yellow)));
            }
            if let Some(released) = claim.as_ref().and_then(|c| c.released_at()) {
                subtitle.push(Span::styled(format!("  {}", format_time_ago(released, now)), subtle));
            }
            lines.push(Line::from(subtitle));

            if !compact {
                let tags = claim
                    .as_ref()
                    .map(|c| c.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "))
                    .unwrap_or_default();
                if !tags.is_empty() {
                    lines.push(Line::styled(truncate_string(&tags, width), Style::default().fg(Color::Magenta)));
                }
            }
        }
    }

    while lines.len() < entry_height(entry) as usize {
        lines.push(Line::raw(""));
    }
    ListItem::new(lines)
}

fn render_page(
    frame: &mut Frame,
    area: Rect,
    page: &PageDetail,
    subscriptions: &HashSet<String>,
    now: DateTime<Utc>,
    border_style: Style,
) {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::styled(
            page.entry.state.title().to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];

    match &page.entry.state {
        RenderState::Channel { claim, child_count } => {
            let subscribed = subscriptions.contains(&normalize_uri(&page.entry.identifier));
            lines.push(Line::from(vec![
                Span::styled("Channel   ", label),
                Span::raw(claim.name.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Publishes ", label),
                Span::raw(child_count.to_string()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Status    ", label),
                Span::raw(if subscribed { "Subscribed" } else { "Not subscribed" }),
            ]));
        }
        RenderState::File { claim, .. } => {
            if let Some(claim) = claim {
                lines.push(Line::from(vec![
                    Span::styled("Name      ", label),
                    Span::raw(claim.name.clone()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Channel   ", label),
                    Span::raw(claim.signing_channel.clone().unwrap_or_else(|| "Anonymous".to_string())),
                ]));
                if let Some(released) = claim.released_at() {
                    lines.push(Line::from(vec![
                        Span::styled("Released  ", label),
                        Span::raw(format!(
                            "{} ({})",
                            released.format("%Y-%m-%d"),
                            format_time_ago(released, now)
                        )),
                    ]));
                }
                if !claim.tags.is_empty() {
                    lines.push(Line::from(vec![
                        Span::styled("Tags      ", label),
                        Span::raw(claim.tags.join(", ")),
                    ]));
                }
                if !claim.claim_id.is_empty() {
                    lines.push(Line::from(vec![
                        Span::styled("Claim ID  ", label),
                        Span::raw(claim.claim_id.clone()),
                    ]));
                }
                lines.push(Line::from(vec![
                    Span::styled("URL       ", label),
                    Span::raw(claim.permanent_url.clone()),
                ]));
            }
        }
        RenderState::Hidden | RenderState::Placeholder { .. } => {}
    }

    let page_widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} (Esc to go back) ", page.path))
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
    frame.render_widget(page_widget, area);
}
