//! Selector rendering

use super::SelectorState;
use super::colors;
use crate::registry;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::borrow::Cow;

// Header (2) + filter (2) + blank and help (2) + borders (2)
const CHROME_LINES: u16 = 8;

/// Rows needed to draw the selector without clipping.
///
/// Every line takes exactly one row: the description is cut to the box width
/// and nothing wraps.
#[must_use]
pub fn selector_height(state: &SelectorState) -> u16 {
    let rows = u16::try_from(state.filtered_agents().len().max(1)).unwrap_or(u16::MAX);
    rows.saturating_add(CHROME_LINES)
}

/// Draw the selector into `area`.
///
/// `current_id` comes from the selection store. When it names no registered
/// agent, the header shows no name or description and no row is checked.
pub fn render_selector(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &SelectorState,
    current_id: &str,
) {
    let current = registry::get_agent_by_id(current_id);
    let inner_width = usize::from(area.width.saturating_sub(2));
    let mut lines: Vec<Line<'_>> = Vec::new();

    let mut header = vec![Span::styled("Agent: ", Style::default().fg(colors::TEXT_DIM))];
    if let Some(agent) = current {
        header.push(Span::styled(
            agent.name,
            Style::default()
                .fg(colors::ACCENT_POSITIVE)
                .add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(header));
    lines.push(Line::from(Span::styled(
        truncate(current.map_or("", |agent| agent.description), inner_width),
        Style::default().fg(colors::TEXT_MUTED),
    )));

    lines.push(Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(colors::TEXT_DIM)),
        Span::styled(
            format!("{}_", state.filter),
            Style::default().fg(colors::TEXT_PRIMARY),
        ),
    ]));
    lines.push(Line::from(""));

    let filtered = state.filtered_agents();
    if filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "No matching agents",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    } else {
        for (idx, agent) in filtered.iter().enumerate() {
            let is_cursor = idx == state.cursor;
            let is_current = agent.id == current_id;

            let row_style = if is_cursor {
                Style::default()
                    .fg(colors::TEXT_PRIMARY)
                    .bg(colors::SURFACE_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::TEXT_PRIMARY)
            };

            let cursor = if is_cursor { "▶ " } else { "  " };
            let check = if is_current { "✓ " } else { "  " };

            lines.push(Line::from(Span::styled(
                format!("{cursor}{check}{}", agent.name),
                row_style,
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select • Enter confirm • Esc quit • Type to filter",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Agents ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER)),
        )
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Cut `text` to `width` characters, ending in an ellipsis when shortened
fn truncate(text: &str, width: usize) -> Cow<'_, str> {
    if text.chars().count() <= width {
        return Cow::Borrowed(text);
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    Cow::Owned(format!("{kept}…"))
}
