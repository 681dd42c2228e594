//! Tab-specific content rendering.
//!
//! - `profile`: Home and About, plus contact details
//! - `timeline`: Education, Experience and Organizations
//! - `showcase`: Awards, Gallery and Projects

pub mod profile;
pub mod showcase;
pub mod timeline;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::ui::styles;
use crate::utils::truncate_string;

/// Width budget for list entries, leaving room for borders.
fn entry_width(area: Rect) -> usize {
    area.width.saturating_sub(4) as usize
}

/// Render a list on the left and the selected entry's detail on the right.
pub(crate) fn render_master_detail(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    entries: Vec<String>,
    selection: usize,
    detail: Vec<Line<'static>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let width = entry_width(chunks[0]);
    let count = entries.len();
    let items: Vec<ListItem> = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(truncate_string(&entry, width))).style(style)
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ({}) ", title, count))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    if count > 0 {
        state.select(Some(selection));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let detail = if count == 0 {
        vec![Line::styled(format!("No {} yet", title.to_lowercase()), styles::muted_style())]
    } else {
        detail
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    let paragraph = Paragraph::new(detail).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[1]);
}

/// A "Label: value" line, or nothing when the value is absent.
pub(crate) fn field(label: &'static str, value: &Option<String>) -> Option<Line<'static>> {
    let value = value.as_deref().filter(|v| !v.is_empty())?;
    Some(Line::from(vec![
        Span::styled(format!("{}: ", label), styles::highlight_style()),
        Span::raw(value.to_string()),
    ]))
}

/// Bulleted lines under a heading; empty when there are no items.
pub(crate) fn bullets(heading: &'static str, items: &[String]) -> Vec<Line<'static>> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::from(""), Line::styled(heading, styles::title_style())];
    lines.extend(items.iter().map(|item| Line::from(format!("  • {}", item))));
    lines
}
