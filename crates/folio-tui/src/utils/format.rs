use chrono::NaiveDate;

use folio_core::models::portfolio::date_range;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or empty
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Format a portfolio date for display.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` and `YYYY-MM`; anything else
/// (plain years, "Present") is shown as-is.
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%b %Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return d.format("%b %Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d") {
        return d.format("%b %Y").to_string();
    }
    date.to_string()
}

/// Format a start/end pair with each date passed through `format_date`
pub fn format_period(start: &Option<String>, end: &Option<String>) -> Option<String> {
    date_range(&start.as_deref().map(format_date), &end.as_deref().map(format_date))
}

/// Join tags for a single line, e.g. "Rust · Tokio · SQL"
pub fn join_tags(tags: &[String]) -> String {
    tags.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Zürich Büro", 9), "Zürich...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Some("x".into()), "-"), "x");
        assert_eq!(format_optional(&Some(String::new()), "-"), "-");
        assert_eq!(format_optional(&None, "-"), "-");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2021-03-15"), "Mar 2021");
        assert_eq!(format_date("2021-03"), "Mar 2021");
        assert_eq!(format_date("2021-03-15T10:00:00Z"), "Mar 2021");
        assert_eq!(format_date("2021"), "2021");
        assert_eq!(format_date("Present"), "Present");
    }

    #[test]
    fn test_format_period() {
        assert_eq!(
            format_period(&Some("2019-06".into()), &None),
            Some("Jun 2019 - Present".to_string())
        );
        assert_eq!(
            format_period(&Some("2015".into()), &Some("2019-01-31".into())),
            Some("2015 - Jan 2019".to_string())
        );
        assert_eq!(format_period(&None, &None), None);
    }

    #[test]
    fn test_join_tags() {
        assert_eq!(join_tags(&["Rust".into(), "SQL".into()]), "Rust · SQL");
        assert_eq!(join_tags(&[]), "");
    }
}
