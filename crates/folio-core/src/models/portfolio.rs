//! Portfolio content records.
//!
//! The aggregate is fetched as one JSON document and never mutated in place;
//! a refetch replaces it wholesale.

use serde::{Deserialize, Serialize};

use super::Section;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    #[serde(default)]
    pub home: Home,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub gallery: Vec<GalleryItem>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase", default)]
pub struct Home {
    pub name: Option<String>,
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub avatar: Option<String>,
    pub resume_url: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub summary: Option<String>,
    pub paragraphs: Vec<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub title: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Education {
    /// "Degree, Field" or whichever half is present.
    pub fn qualification(&self) -> Option<String> {
        match (self.degree.as_deref(), self.field.as_deref()) {
            (Some(d), Some(f)) if !d.is_empty() && !f.is_empty() => Some(format!("{}, {}", d, f)),
            (Some(d), _) if !d.is_empty() => Some(d.to_string()),
            (_, Some(f)) if !f.is_empty() => Some(f.to_string()),
            _ => None,
        }
    }

    pub fn period(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Experience {
    pub fn period(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date)
    }

    /// A role with no end date is the current one.
    pub fn is_current(&self) -> bool {
        self.start_date.is_some() && self.end_date.as_deref().map_or(true, str::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    #[serde(default)]
    pub title: Option<String>,
    pub image: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Organization {
    pub fn period(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Format a start/end pair as "start - end", with an open end shown as "Present".
pub fn date_range(start: &Option<String>, end: &Option<String>) -> Option<String> {
    let start = start.as_deref().filter(|s| !s.is_empty());
    let end = end.as_deref().filter(|s| !s.is_empty());
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{} - {}", s, e)),
        (Some(s), None) => Some(format!("{} - Present", s)),
        (None, Some(e)) => Some(e.to_string()),
        (None, None) => None,
    }
}

impl PortfolioData {
    /// Top-level section keys present in this aggregate, in declaration order.
    /// The fixed fields are always present; `contact` only when set.
    pub fn sections(&self) -> Vec<Section> {
        Section::ALL
            .iter()
            .copied()
            .filter(|s| *s != Section::Contact || self.contact.is_some())
            .collect()
    }

    /// Image URLs referenced by one section, in document order.
    pub fn section_images(&self, section: Section) -> Vec<String> {
        let urls: Vec<&Option<String>> = match section {
            Section::Home => vec![&self.home.avatar],
            Section::About => vec![&self.about.image],
            Section::Awards => self.awards.iter().map(|a| &a.image).collect(),
            Section::Education => self.education.iter().map(|e| &e.logo).collect(),
            Section::Experience => self.experience.iter().map(|e| &e.logo).collect(),
            Section::Gallery => {
                return self
                    .gallery
                    .iter()
                    .map(|g| g.image.clone())
                    .filter(|u| !u.is_empty())
                    .collect();
            }
            Section::Organizations => self.organizations.iter().map(|o| &o.logo).collect(),
            Section::Projects => self.projects.iter().map(|p| &p.image).collect(),
            Section::Contact => vec![],
        };

        urls.into_iter()
            .filter_map(|u| u.as_deref())
            .filter(|u| !u.is_empty())
            .map(String::from)
            .collect()
    }

    /// Every image URL in the aggregate, tagged with its section.
    pub fn image_urls(&self) -> Vec<(Section, String)> {
        self.sections()
            .into_iter()
            .flat_map(|s| self.section_images(s).into_iter().map(move |u| (s, u)))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
