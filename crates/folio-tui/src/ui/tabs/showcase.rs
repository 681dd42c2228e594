use ratatui::{layout::Rect, text::Line, Frame};

use folio_core::models::{Award, GalleryItem, Project};
use folio_core::preload::PreloadStatus;
use folio_core::SectionValue;

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_date, format_optional, join_tags};

use super::{field, render_master_detail};

pub fn render(frame: &mut Frame, app: &App, value: &SectionValue, area: Rect) {
    let (title, entries, detail): (&str, Vec<String>, Option<Vec<Line>>) = match value {
        SectionValue::Awards(items) => (
            "Awards",
            items.iter().map(award_entry).collect(),
            items.get(app.selection).map(award_detail),
        ),
        SectionValue::Gallery(items) => (
            "Gallery",
            items.iter().map(gallery_entry).collect(),
            items.get(app.selection).map(|g| gallery_detail(app, g)),
        ),
        SectionValue::Projects(items) => (
            "Projects",
            items.iter().map(|p| p.name.clone()).collect(),
            items.get(app.selection).map(|p| project_detail(app, p)),
        ),
        _ => return,
    };

    render_master_detail(frame, area, title, entries, app.selection, detail.unwrap_or_default());
}

/// One line describing whether an image has been fetched yet.
fn image_line(app: &App, url: &Option<String>) -> Option<Line<'static>> {
    let url = url.as_deref().filter(|u| !u.is_empty())?;
    let preloader = app.preloader.as_ref()?;
    let line = match preloader.status(url) {
        Some(PreloadStatus::Loaded { bytes }) => {
            Line::styled(format!("Image ready ({} KB)", bytes / 1024), styles::success_style())
        }
        Some(PreloadStatus::Failed(reason)) => {
            Line::styled(format!("Image unavailable: {}", reason), styles::error_style())
        }
        Some(PreloadStatus::Pending) => Line::styled("Image loading...", styles::muted_style()),
        None => Line::styled("Image not requested", styles::muted_style()),
    };
    Some(line)
}

fn award_entry(a: &Award) -> String {
    match a.date.as_deref() {
        Some(date) => format!("{} ({})", a.title, format_date(date)),
        None => a.title.clone(),
    }
}

fn award_detail(a: &Award) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(a.title.clone(), styles::title_style()), Line::from("")];
    lines.extend(field("Issuer", &a.issuer));
    lines.extend(field("Date", &a.date.as_deref().map(format_date)));
    if let Some(ref description) = a.description {
        lines.push(Line::from(""));
        lines.push(Line::from(description.clone()));
    }
    lines
}

fn gallery_entry(g: &GalleryItem) -> String {
    format_optional(&g.title, "Untitled")
}

fn gallery_detail(app: &App, g: &GalleryItem) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(gallery_entry(g), styles::title_style()),
        Line::from(""),
    ];
    lines.extend(field("Caption", &g.caption));
    lines.extend(field("Date", &g.date.as_deref().map(format_date)));
    lines.push(Line::styled(g.image.clone(), styles::link_style()));
    lines.extend(image_line(app, &Some(g.image.clone())));
    lines
}

fn project_detail(app: &App, p: &Project) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(p.name.clone(), styles::title_style())];
    if let Some(ref summary) = p.summary {
        lines.push(Line::styled(summary.clone(), styles::highlight_style()));
    }
    lines.push(Line::from(""));
    if let Some(ref description) = p.description {
        lines.push(Line::from(description.clone()));
        lines.push(Line::from(""));
    }
    if !p.tech.is_empty() {
        lines.push(Line::styled(join_tags(&p.tech), styles::highlight_style()));
    }
    lines.extend(field("Date", &p.date.as_deref().map(format_date)));
    lines.extend(field("Site", &p.url));
    lines.extend(field("Source", &p.repo));
    lines.extend(image_line(app, &p.image));
    lines
}
