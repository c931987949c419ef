//! mdsite-site: Site-level operations for markdown to HTML generation
//!
//! This crate provides functionality for turning a directory tree of
//! markdown files into a static HTML site, including:
//! - Template substitution and base path rewriting
//! - Static asset copying
//! - Batch page generation with parallel processing
//!
//! This crate is designed to be used by various interfaces (CLI, build scripts, etc.)

pub mod static_files;
pub mod template;

pub use static_files::copy_static;
pub use template::{CONTENT_MARKER, TITLE_MARKER, Template, rewrite_base_path};

use mdsite_core::{ConvertError, markdown_to_html, title};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Errors that can occur during site operations
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conversion error in {file}: {source}")]
    Convert { file: PathBuf, source: ConvertError },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Expected a .{expected} file, got: {path}")]
    UnexpectedExtension { path: PathBuf, expected: &'static str },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;

/// Extension of markdown source files
pub const MARKDOWN_EXTENSION: &str = "md";

/// Extension of generated pages
pub const HTML_EXTENSION: &str = "html";

/// A directory tree of markdown content
#[derive(Debug, Clone)]
pub struct ContentTree {
    /// Root directory containing markdown files
    pub root: PathBuf,
    /// Markdown files found under the root, sorted by path
    pub files: Vec<PathBuf>,
}

impl ContentTree {
    /// Load a content tree by recursively scanning a directory for .md files
    pub fn from_directory(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(SiteError::DirectoryNotFound(path.to_path_buf()));
        }

        let mut files = collect_markdown_files(path)?;
        files.sort();

        Ok(Self {
            root: path.to_path_buf(),
            files,
        })
    }

    /// Output path mirroring `file`'s position under the root
    pub fn output_path(&self, file: &Path, output_dir: &Path) -> PathBuf {
        let relative = file.strip_prefix(&self.root).unwrap_or(file);
        output_dir.join(relative).with_extension(HTML_EXTENSION)
    }
}

/// Options for site generation
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Output directory for generated pages
    pub output_dir: PathBuf,
    /// Prefix substituted for root-relative `href="/` and `src="/` links
    pub base_path: String,
    /// Number of parallel jobs (None = use all CPUs)
    pub parallel_jobs: Option<usize>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs"),
            base_path: "/".to_string(),
            parallel_jobs: None,
        }
    }
}

/// Result of a site generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Number of successfully generated pages
    pub success_count: usize,
    /// Pages that failed to generate, with their errors
    pub failed_files: Vec<(PathBuf, String)>,
    /// Output files that were created
    pub output_files: Vec<PathBuf>,
}

/// Generate a single page from a markdown file
///
/// The page title comes from the document's first `# ` heading and the
/// content from its rendered node tree; both are substituted into the
/// template before base path rewriting.
pub fn generate_page(
    from: &Path,
    template: &Template,
    dest: &Path,
    base_path: &str,
) -> Result<()> {
    debug!(
        "Generating page from {} to {}",
        from.display(),
        dest.display()
    );

    if !from.is_file() {
        return Err(SiteError::FileNotFound(from.to_path_buf()));
    }
    if !has_extension(from, MARKDOWN_EXTENSION) {
        return Err(SiteError::UnexpectedExtension {
            path: from.to_path_buf(),
            expected: MARKDOWN_EXTENSION,
        });
    }

    let markdown = fs::read_to_string(from)?;
    let convert_err = |source| SiteError::Convert {
        file: from.to_path_buf(),
        source,
    };
    let content = markdown_to_html(&markdown).map_err(convert_err)?;
    let page_title = title(&markdown).map_err(convert_err)?;

    let output = template.render(&page_title, &content, base_path);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, output)?;

    Ok(())
}

/// Outcome of generating a single page
enum PageOutcome {
    /// Successfully generated, contains output path
    Success(PathBuf),
    /// Failed to generate, contains input path and error message
    Failed(PathBuf, String),
}

/// Generate every page of a content tree
///
/// Pages are generated in parallel. A page that fails is reported in the
/// result and does not stop the others.
pub fn generate_site(
    content: &ContentTree,
    template: &Template,
    options: &SiteOptions,
) -> Result<GenerateResult> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = options.parallel_jobs {
        builder = builder.num_threads(n);
    }
    let pool = builder.build()?;

    // Create output directory if needed
    fs::create_dir_all(&options.output_dir)?;

    let outcomes: Vec<_> = pool.install(|| {
        content
            .files
            .par_iter()
            .map(|file| {
                let dest = content.output_path(file, &options.output_dir);
                match generate_page(file, template, &dest, &options.base_path) {
                    Ok(()) => PageOutcome::Success(dest),
                    Err(e) => {
                        warn!("Failed to generate {}: {}", file.display(), e);
                        PageOutcome::Failed(file.clone(), e.to_string())
                    }
                }
            })
            .collect()
    });

    let mut result = GenerateResult::default();
    for outcome in outcomes {
        match outcome {
            PageOutcome::Success(path) => {
                result.success_count += 1;
                result.output_files.push(path);
            }
            PageOutcome::Failed(path, error) => {
                result.failed_files.push((path, error));
            }
        }
    }

    Ok(result)
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

/// Collect all .md files in a directory, recursively
fn collect_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if has_extension(&path, MARKDOWN_EXTENSION) {
                files.push(path);
            }
        } else if path.is_dir() {
            files.extend(collect_markdown_files(&path)?);
        }
    }

    Ok(files)
}
