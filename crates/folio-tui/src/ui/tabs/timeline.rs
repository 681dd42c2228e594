use ratatui::{layout::Rect, text::Line, Frame};

use folio_core::models::{Education, Experience, Organization};
use folio_core::SectionValue;

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_optional, format_period, join_tags};

use super::{bullets, field, render_master_detail};

pub fn render(frame: &mut Frame, app: &App, value: &SectionValue, area: Rect) {
    let (title, entries, detail): (&str, Vec<String>, Option<Vec<Line>>) = match value {
        SectionValue::Education(items) => (
            "Education",
            items.iter().map(education_entry).collect(),
            items.get(app.selection).map(education_detail),
        ),
        SectionValue::Experience(items) => (
            "Experience",
            items.iter().map(experience_entry).collect(),
            items.get(app.selection).map(experience_detail),
        ),
        SectionValue::Organizations(items) => (
            "Organizations",
            items.iter().map(organization_entry).collect(),
            items.get(app.selection).map(organization_detail),
        ),
        _ => return,
    };

    render_master_detail(frame, area, title, entries, app.selection, detail.unwrap_or_default());
}

fn heading(text: &str, period: Option<String>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(text.to_string(), styles::title_style())];
    if let Some(period) = period {
        lines.push(Line::styled(period, styles::muted_style()));
    }
    lines.push(Line::from(""));
    lines
}

fn education_entry(e: &Education) -> String {
    match e.qualification() {
        Some(q) => format!("{} - {}", e.institution, q),
        None => e.institution.clone(),
    }
}

fn education_detail(e: &Education) -> Vec<Line<'static>> {
    let mut lines = heading(&e.institution, format_period(&e.start_date, &e.end_date));
    lines.extend(field("Degree", &e.qualification()));
    if let Some(ref description) = e.description {
        lines.push(Line::from(""));
        lines.push(Line::from(description.clone()));
    }
    lines.extend(bullets("Courses", &e.courses));
    lines
}

fn experience_entry(e: &Experience) -> String {
    let marker = if e.is_current() { "* " } else { "" };
    format!("{}{} - {}", marker, format_optional(&e.role, "Role"), e.company)
}

fn experience_detail(e: &Experience) -> Vec<Line<'static>> {
    let mut lines = heading(
        &format!("{} at {}", format_optional(&e.role, "Role"), e.company),
        format_period(&e.start_date, &e.end_date),
    );
    lines.extend(field("Location", &e.location));
    if e.is_current() {
        lines.push(Line::styled("Current position", styles::success_style()));
    }
    if let Some(ref description) = e.description {
        lines.push(Line::from(""));
        lines.push(Line::from(description.clone()));
    }
    lines.extend(bullets("Highlights", &e.highlights));
    if !e.skills.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::styled(join_tags(&e.skills), styles::highlight_style()));
    }
    lines
}

fn organization_entry(o: &Organization) -> String {
    match o.role.as_deref().filter(|r| !r.is_empty()) {
        Some(role) => format!("{} ({})", o.name, role),
        None => o.name.clone(),
    }
}

fn organization_detail(o: &Organization) -> Vec<Line<'static>> {
    let mut lines = heading(&o.name, format_period(&o.start_date, &o.end_date));
    lines.extend(field("Role", &o.role));
    if let Some(ref description) = o.description {
        lines.push(Line::from(""));
        lines.push(Line::from(description.clone()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(json: &str) -> Experience {
        serde_json::from_str(json).expect("Failed to parse experience")
    }

    #[test]
    fn test_experience_entry_marks_current_role() {
        let current = experience(r#"{"company": "Acme", "role": "Engineer", "startDate": "2020"}"#);
        assert_eq!(experience_entry(&current), "* Engineer - Acme");

        let past = experience(r#"{"company": "Acme", "startDate": "2018", "endDate": "2019"}"#);
        assert_eq!(experience_entry(&past), "Role - Acme");
    }

    #[test]
    fn test_organization_entry() {
        let org: Organization =
            serde_json::from_str(r#"{"name": "ACM", "role": "Member"}"#).expect("parse failed");
        assert_eq!(organization_entry(&org), "ACM (Member)");
    }
}
