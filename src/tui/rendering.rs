use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::{AppLayout, centered_rect};
use crate::controller::ConfirmPrompt;
use crate::models::{Highlighted, ROW_PREVIEW_CHARS, ViewItem};
use crate::utils::strip_ansi_codes;
use crate::utils::terminal::single_line;

const TEXT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const DANGER: Color = Color::Rgb(239, 68, 68);
const WARNING: Color = Color::Rgb(245, 158, 11);
const BAR_BG: Color = Color::Rgb(24, 24, 27);
const MATCH_BG: Color = Color::Rgb(250, 204, 21);

/// Characters of the value shown on a collapsed row
/// Lines of the value shown on an expanded row
const EXPANDED_ROW_LINES: usize = 8;
/// Skeleton rows drawn before the first store read completes
const INITIAL_SKELETON_ROWS: usize = 5;

/// Everything the renderer needs for one frame
pub struct RenderState<'a> {
    pub items: &'a [ViewItem],
    pub selected_idx: usize,
    pub search_query: &'a str,
    pub loaded_count: usize,
    pub total_count: usize,
    pub initializing: bool,
    pub loading_more: bool,
    pub can_load_more: bool,
    pub status_message: Option<&'a StatusMessage>,
    pub modal: Option<&'a ConfirmPrompt>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    let layout = AppLayout::new(area);

    render_search_box(frame, layout.search_area, state.search_query);
    render_list(frame, layout.list_area, state);
    render_preview(frame, layout.preview_area, state.items.get(state.selected_idx));
    render_status_bar(frame, layout.status_area, state);

    if let Some(prompt) = state.modal {
        render_modal(frame, area, prompt);
    }
}

/// Spans for one line of highlighted text; matches get a marker background
fn highlighted_spans(text: &Highlighted, base: Style) -> Vec<Span<'static>> {
    text.segments()
        .into_iter()
        .map(|segment| {
            let style = if segment.highlighted {
                base.fg(BAR_BG).bg(MATCH_BG).add_modifier(Modifier::BOLD)
            } else {
                base
            };
            Span::styled(single_line(segment.text), style)
        })
        .collect()
}

/// Like [`highlighted_spans`] but keeps line breaks, one `Line` per text line
fn highlighted_lines(text: &Highlighted, base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for segment in text.segments() {
        let style = if segment.highlighted {
            base.fg(BAR_BG).bg(MATCH_BG).add_modifier(Modifier::BOLD)
        } else {
            base
        };

        let mut parts = segment.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            let part = strip_ansi_codes(part);
            if !part.is_empty() {
                current.push(Span::styled(part, style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn skeleton_row() -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled("[ ] ", Style::default().fg(MUTED)),
        Span::styled("░░░░░░░░░░░░░░░░░░░░░░░░", Style::default().fg(MUTED)),
    ]))
}

fn entry_row(item: &ViewItem, selected: bool) -> ListItem<'static> {
    let base = if selected {
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };

    let initial = item.avatar_initial().map(|c| single_line(&c.to_string())).unwrap_or_default();
    let mut header = vec![Span::styled(
        format!("[{}] ", if initial.is_empty() { "?" } else { initial.as_str() }),
        base.fg(ACCENT),
    )];
    header.extend(highlighted_spans(&item.created_at, base));
    if !item.from.is_empty() {
        header.push(Span::styled(format!(" | {}", single_line(&item.from)), base));
    }

    let mut lines = vec![Line::from(header)];
    if item.expand {
        lines.extend(highlighted_lines(&item.value, base).into_iter().take(EXPANDED_ROW_LINES));
    } else {
        let mut preview = vec![Span::raw("    ")];
        preview.extend(highlighted_spans(&item.value.truncate_chars(ROW_PREVIEW_CHARS), base));
        lines.push(Line::from(preview));
    }

    let item = ListItem::new(Text::from(lines));
    if selected { item.style(Style::default().bg(Color::Rgb(39, 39, 42))) } else { item }
}

fn render_search_box(frame: &mut Frame, area: Rect, search_query: &str) {
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(ACCENT)),
        Span::styled(single_line(search_query), Style::default().fg(TEXT)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(" Search "),
    );

    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let mut items: Vec<ListItem> = if state.initializing {
        (0..INITIAL_SKELETON_ROWS).map(|_| skeleton_row()).collect()
    } else {
        state
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if item.is_placeholder() { skeleton_row() } else { entry_row(item, idx == state.selected_idx) }
            })
            .collect()
    };

    if state.can_load_more && !state.loading_more {
        items.push(ListItem::new(Line::from(Span::styled(
            "  ▼ Load more (Ctrl+L)",
            Style::default().fg(ACCENT),
        ))));
    }

    let title = if state.search_query.trim().is_empty() {
        " History ".to_string()
    } else {
        format!(" History ({} matches) ", state.items.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(title),
    );

    let mut list_state = ListState::default();
    if !state.initializing && !state.items.is_empty() {
        list_state.select(Some(state.selected_idx.min(state.items.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn field_line(label: &'static str, value: &Highlighted) -> Option<Line<'static>> {
    if value.is_empty() {
        return None;
    }
    let mut spans = vec![Span::styled(label, Style::default().fg(MUTED))];
    spans.extend(highlighted_spans(value, Style::default().fg(TEXT)));
    Some(Line::from(spans))
}

fn render_preview(frame: &mut Frame, area: Rect, item: Option<&ViewItem>) {
    let content = match item {
        Some(item) if !item.is_placeholder() => {
            let label = |name: &'static str| Span::styled(name, Style::default().fg(MUTED));
            let mut lines = vec![Line::from(vec![
                label("Id: "),
                Span::raw(single_line(item.id.as_deref().unwrap_or_default())),
            ])];
            lines.extend(field_line("Created: ", &item.created_at));
            if !item.from.is_empty() {
                lines.push(Line::from(vec![label("From: "), Span::raw(single_line(&item.from))]));
            }
            lines.extend(field_line("Link: ", &item.link));
            if !item.tags.is_empty() {
                let tags: Vec<String> = item.tags.iter().map(|t| single_line(t)).collect();
                lines.push(Line::from(vec![label("Tags: "), Span::raw(tags.join(", "))]));
            }
            lines.extend(field_line("Remark: ", &item.remark));
            lines.push(Line::from(""));
            lines.extend(highlighted_lines(&item.value, Style::default().fg(TEXT)));
            Text::from(lines)
        }
        Some(_) => Text::from("Loading..."),
        None => Text::from("No entry selected"),
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Preview "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => DANGER,
        };
        let paragraph = Paragraph::new(format!(" {} ", single_line(&message.text)))
            .style(Style::default().fg(fg).bg(BAR_BG));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut parts = vec![];

    if state.initializing {
        parts.push("[LOADING]".to_string());
    } else if state.loading_more {
        parts.push("[LOADING MORE]".to_string());
    }

    if state.total_count == 0 && !state.initializing {
        parts.push("No entries".to_string());
    } else if state.search_query.trim().is_empty() {
        parts.push(format!("{}/{} loaded", state.loaded_count, state.total_count));
    } else {
        parts.push(format!(
            "{} matches in {}/{} loaded",
            state.items.len(),
            state.loaded_count,
            state.total_count
        ));
    }

    if !state.items.is_empty() {
        parts.push(format!("entry {}/{}", state.selected_idx + 1, state.items.len()));
    }

    parts.push("Ctrl+Y: copy".to_string());
    parts.push("Ctrl+D: delete".to_string());
    if state.can_load_more {
        parts.push("Ctrl+L: more".to_string());
    }
    parts.push(if state.search_query.is_empty() { "Esc: quit" } else { "Esc: clear" }.to_string());

    let paragraph = Paragraph::new(format!(" {} ", parts.join(" | ")))
        .style(Style::default().fg(TEXT).bg(BAR_BG));

    frame.render_widget(paragraph, area);
}

fn render_modal(frame: &mut Frame, area: Rect, prompt: &ConfirmPrompt) {
    let modal_area = centered_rect(area, 44, 7);
    let accent = if prompt.danger { DANGER } else { WARNING };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("⚠ ", Style::default().fg(WARNING)),
            Span::styled(prompt.body.clone(), Style::default().fg(TEXT)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("[y/Enter] {}", prompt.confirm_label),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(format!("[n/Esc] {}", prompt.cancel_label), Style::default().fg(MUTED)),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(format!(" {} ", prompt.title)),
    );

    frame.render_widget(Clear, modal_area);
    frame.render_widget(paragraph, modal_area);
}
