//! Update the registry from a template README

use std::fs;
use std::path::Path;

use crate::content::FrontMatter;
use crate::error::{RegistryError, Result};
use crate::registry::Registry;
use crate::Workspace;

/// What an update did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The template's entry was written
    Updated {
        template: String,
        /// Whether an earlier entry was replaced
        replaced: bool,
    },
    /// Private template (leading underscore), registry untouched
    SkippedPrivate { template: String },
    /// README has no front-matter, registry untouched
    NoFrontMatter,
}

/// Template identifier: the name of the folder holding the README.
///
/// Empty when the path has no named parent.
pub fn template_id_for(doc_path: &Path) -> String {
    doc_path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Templates whose folder starts with `_` never reach the registry
pub fn is_private_template(template: &str) -> bool {
    template.starts_with('_')
}

/// Merge the front-matter of `doc_path` (relative to the workspace root)
/// into the registry
pub fn run(workspace: &Workspace, doc_path: &Path) -> Result<UpdateOutcome> {
    let full_path = workspace.settings.workspace_root.join(doc_path);
    tracing::debug!("Resolved README path: {:?}", full_path);

    if !full_path.exists() {
        return Err(RegistryError::DocumentNotFound { path: full_path });
    }

    let template = template_id_for(doc_path);
    if is_private_template(&template) {
        tracing::info!("Skipping template folder: {} (starts with underscore)", template);
        return Ok(UpdateOutcome::SkippedPrivate { template });
    }

    let content = fs::read_to_string(&full_path).map_err(|source| RegistryError::ReadDocument {
        path: full_path.clone(),
        source,
    })?;

    let Some(mut fm) = FrontMatter::parse(&content) else {
        tracing::warn!("No frontmatter found in {}", doc_path.display());
        return Ok(UpdateOutcome::NoFrontMatter);
    };

    if let Some(date) = &workspace.settings.last_commit_date {
        fm.set_last_commit_date(date);
    }

    let mut registry = Registry::load(workspace.registry_path())?;
    let replaced = registry.insert(template.as_str(), fm.into_json()).is_some();
    registry.save()?;

    tracing::info!(
        "Wrote {} templates to {:?}",
        registry.len(),
        registry.path()
    );

    Ok(UpdateOutcome::Updated { template, replaced })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use serde_json::json;
    use tempfile::TempDir;

    const FOO_README: &str = "---\ntitle: Foo Template\ntags: [a, b]\n---\n\n# Foo\n";

    fn write_readme(root: &Path, template: &str, content: &str) -> std::path::PathBuf {
        let dir = root.join("templates").join(template);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("README.md"), content).unwrap();
        Path::new("templates").join(template).join("README.md")
    }

    fn read_registry(root: &Path) -> serde_json::Value {
        let content = fs::read_to_string(root.join("templates.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_template_id_for() {
        assert_eq!(template_id_for(Path::new("templates/foo/README.md")), "foo");
        assert_eq!(template_id_for(Path::new("/abs/bar/README.md")), "bar");
        assert_eq!(template_id_for(Path::new("README.md")), "");
    }

    #[test]
    fn test_is_private_template() {
        assert!(is_private_template("_internal"));
        assert!(!is_private_template("foo_bar"));
        assert!(!is_private_template(""));
    }

    #[test]
    fn test_update_new_registry() {
        let dir = TempDir::new().unwrap();
        let doc = write_readme(dir.path(), "foo", FOO_README);
        let workspace = Workspace::new(Settings::new(dir.path()));

        let outcome = run(&workspace, &doc).unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Updated {
                template: "foo".to_string(),
                replaced: false
            }
        );
        assert_eq!(
            read_registry(dir.path()),
            json!({"foo": {"title": "Foo Template", "tags": ["a", "b"]}})
        );
    }

    #[test]
    fn test_update_with_commit_date() {
        let dir = TempDir::new().unwrap();
        let doc = write_readme(dir.path(), "foo", FOO_README);
        let settings = Settings::new(dir.path()).with_last_commit_date(Some("2024-01-01"));
        let workspace = Workspace::new(settings);

        run(&workspace, &doc).unwrap();
        assert_eq!(
            read_registry(dir.path())["foo"]["last-commit-date"],
            json!("2024-01-01")
        );
    }

    #[test]
    fn test_empty_frontmatter_still_written() {
        let dir = TempDir::new().unwrap();
        let doc = write_readme(dir.path(), "bare", "---\n\n---\nbody\n");
        let settings = Settings::new(dir.path()).with_last_commit_date(Some("2024-02-02"));
        let workspace = Workspace::new(settings);

        run(&workspace, &doc).unwrap();
        assert_eq!(
            read_registry(dir.path()),
            json!({"bare": {"last-commit-date": "2024-02-02"}})
        );
    }

    #[test]
    fn test_replaces_existing_entry_and_keeps_others() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("templates.json"),
            r#"{"other": {"title": "Other", "custom": {"nested": true}}, "foo": {"title": "Old", "video": "v.mp4"}}"#,
        )
        .unwrap();
        let doc = write_readme(dir.path(), "foo", FOO_README);
        let workspace = Workspace::new(Settings::new(dir.path()));

        let outcome = run(&workspace, &doc).unwrap();
        assert!(matches!(outcome, UpdateOutcome::Updated { replaced: true, .. }));

        let registry = read_registry(dir.path());
        assert_eq!(
            registry["other"],
            json!({"title": "Other", "custom": {"nested": true}})
        );
        assert_eq!(
            registry["foo"],
            json!({"title": "Foo Template", "tags": ["a", "b"]})
        );
    }

    #[test]
    fn test_private_template_skipped() {
        let dir = TempDir::new().unwrap();
        let doc = write_readme(dir.path(), "_internal", FOO_README);
        let workspace = Workspace::new(Settings::new(dir.path()));

        let outcome = run(&workspace, &doc).unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::SkippedPrivate {
                template: "_internal".to_string()
            }
        );
        assert!(!dir.path().join("templates.json").exists());
    }

    #[test]
    fn test_no_frontmatter_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("templates.json"), "{}\n").unwrap();
        let doc = write_readme(dir.path(), "plain", "# Plain README\n");
        let workspace = Workspace::new(Settings::new(dir.path()));

        assert_eq!(run(&workspace, &doc).unwrap(), UpdateOutcome::NoFrontMatter);
        assert_eq!(
            fs::read_to_string(dir.path().join("templates.json")).unwrap(),
            "{}\n"
        );
    }

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(Settings::new(dir.path()));

        let err = run(&workspace, Path::new("templates/nope/README.md")).unwrap_err();
        assert!(matches!(err, RegistryError::DocumentNotFound { .. }));
        assert!(!dir.path().join("templates.json").exists());
    }

    #[test]
    fn test_malformed_registry_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("templates.json"), "{broken").unwrap();
        let doc = write_readme(dir.path(), "foo", FOO_README);
        let workspace = Workspace::new(Settings::new(dir.path()));

        let err = run(&workspace, &doc).unwrap_err();
        assert!(matches!(err, RegistryError::MalformedRegistry { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("templates.json")).unwrap(),
            "{broken"
        );
    }

    #[test]
    fn test_update_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let doc = write_readme(dir.path(), "foo", FOO_README);
        let workspace = Workspace::new(Settings::new(dir.path()));

        run(&workspace, &doc).unwrap();
        let first = fs::read(dir.path().join("templates.json")).unwrap();
        run(&workspace, &doc).unwrap();
        let second = fs::read(dir.path().join("templates.json")).unwrap();

        assert_eq!(first, second);
    }
}
