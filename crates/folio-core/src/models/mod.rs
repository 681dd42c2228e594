//! Data models for portfolio content.
//!
//! - `PortfolioData`: the aggregate returned by the data service
//! - Section records: `Home`, `About`, `Award`, `Education`, `Experience`,
//!   `GalleryItem`, `Organization`, `Project`, `Contact`
//! - `Section` / `SectionValue`: named slices of the aggregate

pub mod portfolio;
pub mod section;

pub use portfolio::{
    About, Award, Contact, Education, Experience, GalleryItem, Home, Link, Organization,
    PortfolioData, Project,
};
pub use section::{Section, SectionValue};
