//! Detail panel and card views for the Projects section

use std::fmt;

use serde::Serialize;

use crate::projects::Project;

/// Call-to-action link under the active project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelLink {
    pub label: &'static str,
    pub url: String,
}

/// Details of the project at the leading edge of the strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPanel {
    pub index: usize,
    pub title: String,
    pub category: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub links: Vec<PanelLink>,
}

impl ProjectPanel {
    pub fn new(index: usize, project: &Project) -> Self {
        let links = [
            ("see website >", project.website_url.as_ref()),
            ("see codebase >", project.codebase_url.as_ref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| {
            url.map(|url| PanelLink {
                label,
                url: url.clone(),
            })
        })
        .collect();

        Self {
            index,
            title: project.title.clone(),
            category: project.category.clone(),
            description: project.description.clone(),
            technologies: project.technologies.clone(),
            links,
        }
    }
}

impl fmt::Display for ProjectPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.title, self.category)?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        if !self.technologies.is_empty() {
            writeln!(f, "  tech: {}", self.technologies.join(", "))?;
        }
        for link in &self.links {
            writeln!(f, "  {} {}", link.label, link.url)?;
        }
        Ok(())
    }
}

/// One rendered card in the strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub title: String,
    pub logical_index: usize,
    pub active: bool,
}

pub fn render_card(project: &Project, logical_index: usize, active: bool) -> ProjectCard {
    ProjectCard {
        title: project.title.clone(),
        logical_index,
        active,
    }
}
