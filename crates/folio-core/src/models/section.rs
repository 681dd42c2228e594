//! Named slices of the portfolio aggregate.

use serde::Serialize;

use super::portfolio::{
    About, Award, Contact, Education, Experience, GalleryItem, Home, Organization, PortfolioData,
    Project,
};

/// A top-level key of `PortfolioData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    About,
    Awards,
    Education,
    Experience,
    Gallery,
    Organizations,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Home,
        Section::About,
        Section::Awards,
        Section::Education,
        Section::Experience,
        Section::Gallery,
        Section::Organizations,
        Section::Projects,
        Section::Contact,
    ];

    /// Sections never handed to the per-section image preloader.
    pub const PRELOAD_EXCLUDED: [Section; 2] = [Section::Home, Section::Contact];

    /// Parse a section key. Case-insensitive, surrounding whitespace ignored.
    /// Unknown names give `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.key().eq_ignore_ascii_case(name))
    }

    /// The JSON key for this section.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Awards => "awards",
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Gallery => "gallery",
            Section::Organizations => "organizations",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Awards => "Awards",
            Section::Education => "Education",
            Section::Experience => "Experience",
            Section::Gallery => "Gallery",
            Section::Organizations => "Organizations",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }

    pub fn preloads_images(&self) -> bool {
        !Self::PRELOAD_EXCLUDED.contains(self)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// An owned copy of one section's content.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionValue {
    Home(Home),
    About(About),
    Awards(Vec<Award>),
    Education(Vec<Education>),
    Experience(Vec<Experience>),
    Gallery(Vec<GalleryItem>),
    Organizations(Vec<Organization>),
    Projects(Vec<Project>),
    Contact(Contact),
}

impl SectionValue {
    /// Number of entries for list sections, 1 for record sections.
    pub fn len(&self) -> usize {
        match self {
            SectionValue::Home(_) | SectionValue::About(_) | SectionValue::Contact(_) => 1,
            SectionValue::Awards(v) => v.len(),
            SectionValue::Education(v) => v.len(),
            SectionValue::Experience(v) => v.len(),
            SectionValue::Gallery(v) => v.len(),
            SectionValue::Organizations(v) => v.len(),
            SectionValue::Projects(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PortfolioData {
    /// Project one section out of the aggregate. `None` only for an absent `contact`.
    pub fn section(&self, section: Section) -> Option<SectionValue> {
        let value = match section {
            Section::Home => SectionValue::Home(self.home.clone()),
            Section::About => SectionValue::About(self.about.clone()),
            Section::Awards => SectionValue::Awards(self.awards.clone()),
            Section::Education => SectionValue::Education(self.education.clone()),
            Section::Experience => SectionValue::Experience(self.experience.clone()),
            Section::Gallery => SectionValue::Gallery(self.gallery.clone()),
            Section::Organizations => SectionValue::Organizations(self.organizations.clone()),
            Section::Projects => SectionValue::Projects(self.projects.clone()),
            Section::Contact => SectionValue::Contact(self.contact.clone()?),
        };
        Some(value)
    }
}
