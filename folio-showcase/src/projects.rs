//! Project catalog shown in the Projects section

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use folio_carousel::CarouselItem;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, alias = "websiteUrl", skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, alias = "codebaseUrl", skip_serializing_if = "Option::is_none")]
    pub codebase_url: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: String,
}

impl CarouselItem for Project {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read project catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON project catalog {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse TOML project catalog {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unsupported catalog format for {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },
    #[error("duplicate project id '{id}'")]
    DuplicateId { id: String },
}

/// TOML catalogs hold a `[[projects]]` array.
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Load a catalog from a `.json` array or a `.toml` file with `[[projects]]`.
pub fn load_catalog(path: &Path) -> Result<Vec<Project>, CatalogError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let projects = match extension.as_deref() {
        Some("json") => parse_json(&content, path)?,
        Some("toml") => {
            toml::from_str::<TomlCatalog>(&content)
                .map_err(|source| CatalogError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?
                .projects
        }
        _ => {
            return Err(CatalogError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    ensure_unique_ids(&projects)?;
    log::info!("Loaded {} projects from {}", projects.len(), path.display());
    Ok(projects)
}

fn parse_json(content: &str, path: &Path) -> Result<Vec<Project>, CatalogError> {
    serde_json::from_str(content).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_unique_ids(projects: &[Project]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for project in projects {
        if !seen.insert(project.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: project.id.clone(),
            });
        }
    }
    Ok(())
}

fn project(
    id: &str,
    title: &str,
    category: &str,
    description: &str,
    technologies: &[&str],
    website_url: Option<&str>,
    codebase_url: Option<&str>,
) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        website_url: website_url.map(str::to_string),
        codebase_url: codebase_url.map(str::to_string),
        image_url: format!("/placeholder-project-{id}.jpg"),
    }
}

/// Built-in sample catalog.
pub fn default_catalog() -> Vec<Project> {
    vec![
        project(
            "1",
            "THRIBO WEB APP",
            "Web Application",
            "A comprehensive web application for digital marketing solutions",
            &["JavaScript", "ReactJS", "Azure"],
            Some("https://thribo-web-app.com"),
            None,
        ),
        project(
            "2",
            "E-Portfolio",
            "Portfolio",
            "Personal portfolio website showcasing projects and skills",
            &["React", "TypeScript", "Tailwind CSS"],
            None,
            Some("https://github.com/username/e-portfolio"),
        ),
        project(
            "3",
            "Task Management System",
            "Web Application",
            "Full-stack task management application with real-time updates",
            &["Node.js", "MongoDB", "Express"],
            Some("https://task-manager-demo.com"),
            Some("https://github.com/username/task-manager"),
        ),
        project(
            "4",
            "Data Analytics Dashboard",
            "Data Analytics",
            "Interactive dashboard for data visualization and analytics",
            &["Python", "Django", "PostgreSQL"],
            Some("https://analytics-dashboard.com"),
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_catalog(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_catalog_has_unique_ids() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 4);
        ensure_unique_ids(&catalog).unwrap();
        assert_eq!(catalog[0].image_url, "/placeholder-project-1.jpg");
    }

    #[test]
    fn loads_json_with_camel_case_links() {
        let file = write_catalog(
            ".json",
            r#"[{"id":"a","title":"Alpha","websiteUrl":"https://a.dev","technologies":["Rust"]}]"#,
        );
        let projects = load_catalog(file.path()).unwrap();
        assert_eq!(projects[0].website_url.as_deref(), Some("https://a.dev"));
        assert_eq!(projects[0].codebase_url, None);
    }

    #[test]
    fn loads_toml_projects_table() {
        let file = write_catalog(
            ".toml",
            r#"
[[projects]]
id = "a"
title = "Alpha"
codebase_url = "https://git.example/alpha"

[[projects]]
id = "b"
title = "Beta"
"#,
        );
        let projects = load_catalog(file.path()).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].title, "Beta");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let file = write_catalog(
            ".json",
            r#"[{"id":"a","title":"One"},{"id":"a","title":"Two"}]"#,
        );
        assert!(matches!(
            load_catalog(file.path()),
            Err(CatalogError::DuplicateId { id }) if id == "a"
        ));
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_catalog(".yaml", "projects: []");
        assert!(matches!(
            load_catalog(file.path()),
            Err(CatalogError::UnsupportedFormat { .. })
        ));
    }
}
