use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use folio_core::models::{About, Contact, Home};
use folio_core::{Section, SectionValue};

use crate::app::App;
use crate::ui::styles;
use crate::utils::join_tags;

use super::{bullets, field};

pub fn render(frame: &mut Frame, app: &App, value: &SectionValue, area: Rect) {
    match value {
        SectionValue::Home(home) => render_home(frame, app, home, area),
        SectionValue::About(about) => render_about(frame, about, area),
        _ => {}
    }
}

fn render_home(frame: &mut Frame, app: &App, home: &Home, area: Rect) {
    let contact = app
        .context
        .section(Section::Contact.key())
        .ok()
        .and_then(|s| s.data)
        .and_then(|v| match v {
            SectionValue::Contact(c) => Some(c),
            _ => None,
        });

    let chunks = if contact.is_some() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area)
    } else {
        Layout::default()
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let mut lines = vec![Line::from("")];
    if let Some(ref name) = home.name {
        lines.push(Line::styled(format!("  {}", name), styles::title_style()));
    }
    if let Some(ref title) = home.title {
        lines.push(Line::styled(format!("  {}", title), styles::highlight_style()));
    }
    if let Some(ref tagline) = home.tagline {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("  {}", tagline)));
    }
    lines.extend(bullets("Highlights", &home.highlights));
    if let Some(line) = field("Resume", &home.resume_url) {
        lines.push(Line::from(""));
        lines.push(line);
    }

    let block = Block::default()
        .title(" Home ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        chunks[0],
    );

    if let Some(contact) = contact {
        render_contact(frame, &contact, chunks[1]);
    }
}

fn render_contact(frame: &mut Frame, contact: &Contact, area: Rect) {
    let mut lines: Vec<Line> = [
        field("Email", &contact.email),
        field("Phone", &contact.phone),
        field("Location", &contact.location),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !contact.links.is_empty() {
        lines.push(Line::from(""));
        for link in &contact.links {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", link.label), styles::highlight_style()),
                Span::styled(link.url.clone(), styles::link_style()),
            ]));
        }
    }

    let block = Block::default()
        .title(" Contact ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_about(frame: &mut Frame, about: &About, area: Rect) {
    let mut lines = Vec::new();
    if let Some(ref summary) = about.summary {
        lines.push(Line::styled(summary.clone(), styles::highlight_style()));
    }
    for paragraph in &about.paragraphs {
        lines.push(Line::from(""));
        lines.push(Line::from(paragraph.clone()));
    }
    if !about.skills.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::styled("Skills", styles::title_style()));
        lines.push(Line::from(join_tags(&about.skills)));
    }
    lines.extend(bullets("Interests", &about.interests));
    if lines.is_empty() {
        lines.push(Line::styled("Nothing here yet", styles::muted_style()));
    }

    let block = Block::default()
        .title(" About ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
