//! Load templates use case

use std::path::{Path, PathBuf};

use crate::ports::{FileSystem, FileSystemError};
use crate::registry::TemplateRegistry;

/// File extensions recognised as templates.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["tmpl", "template", "txt"];

/// Errors that can occur when loading a template directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadTemplatesError {
    /// Template directory not found.
    #[error("Template directory not found: {0}")]
    NotFound(PathBuf),

    /// The path exists but is not a directory.
    #[error("Not a template directory: {0}")]
    NotADirectory(PathBuf),

    /// Failed to read a template file.
    #[error("Failed to read template: {0}")]
    IoError(String),
}

impl From<FileSystemError> for LoadTemplatesError {
    fn from(error: FileSystemError) -> Self {
        match error {
            FileSystemError::NotFound(path) => Self::NotFound(path),
            FileSystemError::NotADirectory(path) => Self::NotADirectory(path),
            FileSystemError::Io(e) => Self::IoError(e.to_string()),
        }
    }
}

/// Output describing what was loaded.
#[derive(Debug, Default)]
pub struct LoadTemplatesOutput {
    /// Ids registered, in directory order.
    pub loaded: Vec<String>,
    /// Entries ignored (subdirectories, other extensions).
    pub skipped: Vec<PathBuf>,
}

/// Registers every template file of a directory under its file stem.
pub struct LoadTemplates<F> {
    file_system: F,
}

impl<F: FileSystem> LoadTemplates<F> {
    /// Creates a new `LoadTemplates` use case.
    pub const fn new(file_system: F) -> Self {
        Self { file_system }
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `dir` - Directory holding `*.tmpl`, `*.template` or `*.txt` files
    /// * `registry` - Registry the templates are added to
    ///
    /// # Errors
    /// Returns an error if the directory or one of its templates cannot be read.
    pub async fn execute(
        &self,
        dir: &Path,
        registry: &TemplateRegistry,
    ) -> Result<LoadTemplatesOutput, LoadTemplatesError> {
        if !self.file_system.exists(dir).await {
            return Err(LoadTemplatesError::NotFound(dir.to_path_buf()));
        }
        if !self.file_system.is_dir(dir).await {
            return Err(LoadTemplatesError::NotADirectory(dir.to_path_buf()));
        }

        let mut output = LoadTemplatesOutput::default();

        for path in self.file_system.read_dir(dir).await? {
            let Some(id) = template_id(&path) else {
                output.skipped.push(path);
                continue;
            };
            if self.file_system.is_dir(&path).await {
                output.skipped.push(path);
                continue;
            }

            let content = self.file_system.read_file_string(&path).await?;
            registry.register(id.clone(), strip_final_newline(&content));
            output.loaded.push(id);
        }

        tracing::info!(
            dir = %dir.display(),
            loaded = output.loaded.len(),
            skipped = output.skipped.len(),
            "loaded template directory"
        );

        Ok(output)
    }
}

/// Returns the registry id for a template file, or `None` if the extension
/// is not a template extension.
fn template_id(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    if !TEMPLATE_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
    {
        return None;
    }
    path.file_stem()?.to_str().map(ToString::to_string)
}

/// Removes one trailing `\n` or `\r\n`, the newline editors append to a
/// template file.
#[must_use]
pub fn strip_final_newline(content: &str) -> &str {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::{BTreeMap, BTreeSet};

    #[derive(Default)]
    struct MockFileSystem {
        files: BTreeMap<PathBuf, String>,
        dirs: BTreeSet<PathBuf>,
    }

    impl MockFileSystem {
        fn with_dir(mut self, path: &str) -> Self {
            self.dirs.insert(PathBuf::from(path));
            self
        }

        fn with_file(mut self, path: &str, content: &str) -> Self {
            self.files.insert(PathBuf::from(path), content.to_string());
            self
        }
    }

    impl FileSystem for MockFileSystem {
        async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
        }

        async fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path) || self.dirs.contains(path)
        }

        async fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(path)
        }

        async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
            let entries = self
                .files
                .keys()
                .chain(self.dirs.iter())
                .filter(|p| p.parent() == Some(path))
                .cloned()
                .collect::<BTreeSet<_>>();
            Ok(entries.into_iter().collect())
        }
    }

    #[tokio::test]
    async fn test_load_templates_registers_by_stem() {
        let fs = MockFileSystem::default()
            .with_dir("/templates")
            .with_file("/templates/welcome.tmpl", "Welcome, {user.name}!\n")
            .with_file("/templates/reminder.txt", "You have {count} messages")
            .with_file("/templates/notes.md", "# not a template");
        let registry = TemplateRegistry::new();

        let output = LoadTemplates::new(fs)
            .execute(Path::new("/templates"), &registry)
            .await
            .expect("Should succeed");

        assert_eq!(output.loaded, vec!["reminder", "welcome"]);
        assert_eq!(output.skipped, vec![PathBuf::from("/templates/notes.md")]);
        assert_eq!(
            registry.get_template("welcome"),
            Some("Welcome, {user.name}!".to_string())
        );
    }

    #[tokio::test]
    async fn test_load_templates_skips_subdirectories() {
        let fs = MockFileSystem::default()
            .with_dir("/templates")
            .with_dir("/templates/archive.tmpl")
            .with_file("/templates/a.template", "{x}");
        let registry = TemplateRegistry::new();

        let output = LoadTemplates::new(fs)
            .execute(Path::new("/templates"), &registry)
            .await
            .expect("Should succeed");

        assert_eq!(output.loaded, vec!["a"]);
        assert_eq!(output.skipped.len(), 1);
        assert!(!registry.has("archive"));
    }

    #[tokio::test]
    async fn test_load_templates_missing_dir() {
        let result = LoadTemplates::new(MockFileSystem::default())
            .execute(Path::new("/nowhere"), &TemplateRegistry::new())
            .await;
        assert!(matches!(result, Err(LoadTemplatesError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_templates_not_a_dir() {
        let fs = MockFileSystem::default().with_file("/file.txt", "x");
        let result = LoadTemplates::new(fs)
            .execute(Path::new("/file.txt"), &TemplateRegistry::new())
            .await;
        assert!(matches!(result, Err(LoadTemplatesError::NotADirectory(_))));
    }

    #[test]
    fn test_template_id() {
        assert_eq!(template_id(Path::new("a/welcome.tmpl")), Some("welcome".to_string()));
        assert_eq!(template_id(Path::new("a/Upper.TXT")), Some("Upper".to_string()));
        assert_eq!(template_id(Path::new("a/readme.md")), None);
        assert_eq!(template_id(Path::new("a/noext")), None);
    }

    #[test]
    fn test_strip_final_newline() {
        assert_eq!(strip_final_newline("a\n"), "a");
        assert_eq!(strip_final_newline("a\r\n"), "a");
        assert_eq!(strip_final_newline("a\n\n"), "a\n");
        assert_eq!(strip_final_newline("a"), "a");
    }
}
