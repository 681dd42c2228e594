//! First-load screen. Replaces the tabs until the initial fetch settles and
//! the progress bar reports completion.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::app::App;

use super::render::centered_rect_fixed;
use super::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(50, 7, area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" folio ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1), // Phase label
            Constraint::Length(1),
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let label = Paragraph::new(Line::from(Span::styled(
        format!("  {}", app.progress.label()),
        styles::muted_style(),
    )));
    frame.render_widget(label, rows[1]);

    let gauge = Gauge::default()
        .gauge_style(styles::gauge_style())
        .ratio(app.progress.ratio())
        .label(format!("{}%", app.progress.percent()));
    let gauge_area = Rect {
        x: rows[3].x + 2,
        width: rows[3].width.saturating_sub(4),
        ..rows[3]
    };
    frame.render_widget(gauge, gauge_area);
}
