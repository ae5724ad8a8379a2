//! Filesystem side of the generator: mirroring static assets and
//! rendering a content tree of Markdown files into pages.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::html::render_document;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Source directory does not exist: {0}")]
    MissingSource(PathBuf),
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to render {path}: {source}")]
    Render { path: PathBuf, source: Error },
    #[error("{destination} overlaps {source_dir}")]
    OverlappingPaths {
        source_dir: PathBuf,
        destination: PathBuf,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Absolute, symlink-free form of `path`. Components that do not exist yet
/// are appended to the canonical form of the deepest existing ancestor.
fn resolve(path: &Path) -> Result<PathBuf, SiteError> {
    let absolute = std::path::absolute(path).map_err(io_error(path))?;
    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return Ok(missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute.clone()),
        }
    }
}

/// Fail when one directory is, or lies inside, the other.
fn ensure_disjoint(source: &Path, destination: &Path) -> Result<(), SiteError> {
    let source_dir = resolve(source)?;
    let destination_dir = resolve(destination)?;
    if source_dir.starts_with(&destination_dir) || destination_dir.starts_with(&source_dir) {
        return Err(SiteError::OverlappingPaths {
            source_dir,
            destination: destination_dir,
        });
    }
    Ok(())
}

/// What a site build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteSummary {
    pub files_copied: usize,
    pub pages_rendered: usize,
}

/// Mirror `source` into `destination`, replacing whatever was there.
///
/// The two directories must not overlap. Returns the number of files copied.
pub fn copy_dir(source: &Path, destination: &Path) -> Result<usize, SiteError> {
    if !source.exists() {
        return Err(SiteError::MissingSource(source.to_path_buf()));
    }
    ensure_disjoint(source, destination)?;
    mirror_dir(source, destination)
}

fn mirror_dir(source: &Path, destination: &Path) -> Result<usize, SiteError> {
    if destination.exists() {
        fs::remove_dir_all(destination).map_err(io_error(destination))?;
    }
    fs::create_dir_all(destination).map_err(io_error(destination))?;

    let mut copied = 0;
    for entry in sorted_entries(source)? {
        let target = destination.join(entry.file_name().unwrap_or_default());
        if entry.is_dir() {
            log::info!("Copying dir {} to {}", entry.display(), target.display());
            copied += mirror_dir(&entry, &target)?;
        } else {
            log::info!("Copying {}", entry.display());
            fs::copy(&entry, &target).map_err(io_error(&entry))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        paths.push(entry.map_err(io_error(dir))?.path());
    }
    paths.sort();
    Ok(paths)
}

/// Collect every `.md` file under `dir`, in sorted order.
pub fn scan_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut files = Vec::new();
    scan_directory_recursive(dir, &mut files)?;
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SiteError> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Render one Markdown file to `output`, creating parent directories as needed.
pub fn render_file(input: &Path, output: &Path) -> Result<(), SiteError> {
    let markdown = fs::read_to_string(input).map_err(io_error(input))?;
    let html = render_document(&markdown).map_err(|source| SiteError::Render {
        path: input.to_path_buf(),
        source,
    })?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(output, html).map_err(io_error(output))
}

/// Copy static assets, then render every content page into the output directory.
///
/// Stops at the first file that fails to render.
pub fn generate_site(config: &Config) -> Result<SiteSummary, SiteError> {
    let paths = &config.paths;
    ensure_disjoint(&paths.content_dir, &paths.output_dir)?;
    log::info!(
        "Copying from {} to {}",
        paths.static_dir.display(),
        paths.output_dir.display()
    );
    let files_copied = copy_dir(&paths.static_dir, &paths.output_dir)?;

    if !paths.content_dir.exists() {
        log::warn!(
            "Content directory {} not found, no pages rendered",
            paths.content_dir.display()
        );
        return Ok(SiteSummary {
            files_copied,
            pages_rendered: 0,
        });
    }

    let mut pages_rendered = 0;
    for input in scan_markdown_files(&paths.content_dir)? {
        let relative = input.strip_prefix(&paths.content_dir).unwrap_or(&input);
        let output = paths
            .output_dir
            .join(relative)
            .with_extension(&config.pages.extension);
        log::info!("Rendering {} to {}", input.display(), output.display());
        render_file(&input, &output)?;
        pages_rendered += 1;
    }

    Ok(SiteSummary {
        files_copied,
        pages_rendered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site_config(root: &TempDir) -> Config {
        Config {
            paths: PathsConfig {
                static_dir: root.path().join("static"),
                content_dir: root.path().join("content"),
                output_dir: root.path().join("public"),
            },
            ..Config::default()
        }
    }

    #[test]
    fn copy_dir_mirrors_tree() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/index.css", "body {}");
        write(root.path(), "static/images/logo.png", "png");

        let copied = copy_dir(&root.path().join("static"), &root.path().join("public")).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(root.path().join("public/index.css")).unwrap(),
            "body {}"
        );
        assert!(root.path().join("public/images/logo.png").exists());
    }

    #[test]
    fn copy_dir_replaces_destination() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/a.txt", "a");
        write(root.path(), "public/stale.txt", "old");

        copy_dir(&root.path().join("static"), &root.path().join("public")).unwrap();

        assert!(!root.path().join("public/stale.txt").exists());
        assert!(root.path().join("public/a.txt").exists());
    }

    #[test]
    fn copy_dir_requires_source() {
        let root = tempfile::tempdir().unwrap();
        let result = copy_dir(&root.path().join("nope"), &root.path().join("public"));
        assert!(matches!(result, Err(SiteError::MissingSource(_))));
    }

    fn assert_overlap(result: Result<SiteSummary, SiteError>) {
        assert!(
            matches!(result, Err(SiteError::OverlappingPaths { .. })),
            "expected overlapping paths error, got {result:?}"
        );
    }

    #[test]
    fn output_equal_to_static_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/a.css", "body {}");
        let mut config = site_config(&root);
        config.paths.output_dir = root.path().join("static");

        assert_overlap(generate_site(&config));
        assert!(root.path().join("static/a.css").exists());
    }

    #[test]
    fn output_equal_to_static_through_dot_segments_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/a.css", "body {}");
        write(root.path(), "content/index.md", "hi");
        let mut config = site_config(&root);
        config.paths.output_dir = root.path().join("content/../static/.");

        assert_overlap(generate_site(&config));
        assert!(root.path().join("static/a.css").exists());
    }

    #[test]
    fn output_inside_static_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/a.css", "body {}");
        let mut config = site_config(&root);
        config.paths.output_dir = root.path().join("static/public");

        assert_overlap(generate_site(&config));
        assert!(!root.path().join("static/public").exists());
        assert!(root.path().join("static/a.css").exists());
    }

    #[test]
    fn static_inside_output_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "public/static/a.css", "body {}");
        let mut config = site_config(&root);
        config.paths.static_dir = root.path().join("public/static");

        assert_overlap(generate_site(&config));
        assert!(root.path().join("public/static/a.css").exists());
    }

    #[test]
    fn output_equal_to_content_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/a.css", "body {}");
        write(root.path(), "content/index.md", "# Home");
        let mut config = site_config(&root);
        config.paths.output_dir = root.path().join("content");

        assert_overlap(generate_site(&config));
        assert!(root.path().join("content/index.md").exists());
    }

    #[test]
    fn output_inside_content_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/a.css", "body {}");
        write(root.path(), "content/index.md", "# Home");
        let mut config = site_config(&root);
        config.paths.output_dir = root.path().join("content/public");

        assert_overlap(generate_site(&config));
        assert!(!root.path().join("content/public").exists());
    }

    #[test]
    fn copy_dir_rejects_nested_destination() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/a.css", "body {}");

        let result = copy_dir(&root.path().join("static"), &root.path().join("static/out"));
        assert!(matches!(result, Err(SiteError::OverlappingPaths { .. })));
        assert!(root.path().join("static/a.css").exists());
    }

    #[test]
    fn sibling_with_shared_prefix_is_allowed() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/a.css", "body {}");

        let copied = copy_dir(&root.path().join("static"), &root.path().join("static-out")).unwrap();
        assert_eq!(copied, 1);
    }

    #[test]
    fn generate_renders_pages() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/index.css", "body {}");
        write(root.path(), "content/index.md", "# Home\n\nWelcome **friend**");
        write(root.path(), "content/blog/post.md", "- one\n- two");
        write(root.path(), "content/notes.txt", "ignored");

        let summary = generate_site(&site_config(&root)).unwrap();

        assert_eq!(
            summary,
            SiteSummary {
                files_copied: 1,
                pages_rendered: 2
            }
        );
        assert_eq!(
            fs::read_to_string(root.path().join("public/index.html")).unwrap(),
            "<div><h1>Home</h1><p>Welcome <b>friend</b></p></div>"
        );
        assert_eq!(
            fs::read_to_string(root.path().join("public/blog/post.html")).unwrap(),
            "<div><ul><li>one</li><li>two</li></ul></div>"
        );
        assert!(!root.path().join("public/notes.html").exists());
    }

    #[test]
    fn generate_stops_on_render_error() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/index.css", "body {}");
        write(root.path(), "content/bad.md", "a `b");

        let result = generate_site(&site_config(&root));

        match result {
            Err(SiteError::Render { path, source }) => {
                assert!(path.ends_with("bad.md"));
                assert!(matches!(source, Error::UnbalancedDelimiter { .. }));
            }
            other => panic!("expected render error, got {other:?}"),
        }
        assert!(!root.path().join("public/bad.html").exists());
    }

    #[test]
    fn generate_without_content_dir() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), "static/index.css", "body {}");

        let summary = generate_site(&site_config(&root)).unwrap();
        assert_eq!(summary.pages_rendered, 0);
        assert_eq!(summary.files_copied, 1);
    }
}
