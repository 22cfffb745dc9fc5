//! Projects section of the portfolio, built on `folio_carousel`.
//!
//! The section renders the project catalog as an infinite strip and keeps a
//! detail panel in sync with the card at the leading edge. Everything runs
//! headless on a [`folio_carousel::sim::UniformStrip`] so interactions can be
//! scripted from the command line.

pub mod panel;
pub mod projects;
pub mod scenario;
pub mod section;

pub use panel::{ProjectCard, ProjectPanel};
pub use projects::{CatalogError, Project, default_catalog, load_catalog};
pub use scenario::{ScriptError, Step, StepReport};
pub use section::ProjectsSection;
