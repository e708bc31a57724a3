//! Template name → source path resolution.
//!
//! Segments starting with `.` are dropped (this covers `..` and hidden
//! files). Nothing else is validated: empty segments from repeated or
//! trailing separators are kept, and no filesystem access happens.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use stencil_core::TemplateName;

use crate::error::{io_err, LoadError};

/// Maps template names to source files. Implement this for custom layouts.
pub trait Resolve: Send + Sync {
    /// Source path for `name`. Must not touch the filesystem.
    fn resolve(&self, name: &TemplateName) -> PathBuf;

    /// Every template name this resolver can serve, if enumerable.
    fn list(&self) -> Result<Vec<TemplateName>, LoadError> {
        Ok(Vec::new())
    }
}

/// Resolves names relative to a single template root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderResolver {
    root: PathBuf,
}

impl FolderResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FolderResolver { root: root.into() }
    }
}

impl Resolve for FolderResolver {
    fn resolve(&self, name: &TemplateName) -> PathBuf {
        resolve_under(&self.root, name)
    }

    fn list(&self) -> Result<Vec<TemplateName>, LoadError> {
        let mut names = Vec::new();
        if self.root.is_dir() {
            collect_template_names(&self.root, &self.root, &mut names)?;
        }
        names.sort();
        Ok(names)
    }
}

/// `<root>/<sanitized name>`, joined textually.
///
/// Textual joining keeps a leading empty segment (`"/etc/passwd"`) under the
/// root; `Path::join` would replace the root with the absolute path.
pub fn resolve_under(root: &Path, name: &TemplateName) -> PathBuf {
    let kept: Vec<&str> = name
        .segments()
        .filter(|segment| !segment.starts_with('.'))
        .collect();

    let mut path = OsString::from(root.as_os_str());
    path.push("/");
    path.push(kept.join("/"));
    PathBuf::from(path)
}

fn collect_template_names(
    root: &Path,
    dir: &Path,
    out: &mut Vec<TemplateName>,
) -> Result<(), LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        // Dot-prefixed entries can never be resolved, so never list them.
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_names(root, &path, out)?;
        } else if meta.is_file() {
            let rel = path.strip_prefix(root).unwrap_or(path.as_path());
            out.push(TemplateName::from(normalize_template_name(rel)));
        }
    }
    Ok(())
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn resolve(name: &str) -> PathBuf {
        FolderResolver::new("/srv/t").resolve(&TemplateName::from(name))
    }

    #[rstest]
    #[case("page.tpl", "/srv/t/page.tpl")]
    #[case("mail/welcome.html", "/srv/t/mail/welcome.html")]
    #[case("../../etc/passwd", "/srv/t/etc/passwd")]
    #[case("a/./b", "/srv/t/a/b")]
    #[case("a/.hidden/b", "/srv/t/a/b")]
    #[case(".env", "/srv/t/")]
    #[case("/etc/passwd", "/srv/t/etc/passwd")]
    fn resolves_under_root(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(resolve(name), PathBuf::from(expected));
    }

    #[rstest]
    #[case("../secret")]
    #[case("a/../../b")]
    #[case("x/.git/config")]
    #[case("..")]
    fn dot_segments_never_appear(#[case] name: &str) {
        let path = resolve(name);
        let text = path.to_string_lossy();
        let rel = text.strip_prefix("/srv/t/").expect("stays under root");
        assert!(
            rel.split('/').all(|segment| !segment.starts_with('.')),
            "{name} resolved to {text}"
        );
    }

    #[test]
    fn empty_segments_are_kept_verbatim() {
        assert_eq!(resolve("a//b").to_string_lossy(), "/srv/t/a//b");
        assert_eq!(resolve("a/b/").to_string_lossy(), "/srv/t/a/b/");
    }

    #[test]
    fn resolution_does_not_touch_filesystem() {
        let path = resolve("does/not/exist.tpl");
        assert!(!path.exists());
        assert_eq!(path, PathBuf::from("/srv/t/does/not/exist.tpl"));
    }

    #[test]
    fn list_walks_root_and_skips_hidden_entries() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("mail")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join("page.tpl"), "p").unwrap();
        std::fs::write(root.join("mail/welcome.html"), "w").unwrap();
        std::fs::write(root.join(".git/HEAD"), "ref").unwrap();
        std::fs::write(root.join(".draft.tpl"), "d").unwrap();

        let names = FolderResolver::new(root).list().unwrap();
        assert_eq!(
            names,
            vec![
                TemplateName::from("mail/welcome.html"),
                TemplateName::from("page.tpl"),
            ]
        );
    }

    #[test]
    fn list_of_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let names = FolderResolver::new(tmp.path().join("nope")).list().unwrap();
        assert!(names.is_empty());
    }
}
