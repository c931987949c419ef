//! mdsite: CLI tool to build a static HTML site from markdown pages

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::{CONFIG_FILE_NAME, Config};
use mdsite_site::{ContentTree, SiteOptions, Template, copy_static, generate_site};

#[derive(Parser, Debug)]
#[command(name = "mdsite")]
#[command(about = "Build a static HTML site from markdown pages")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "Examples:
  mdsite                            # Build content/ into docs/ with template.html
  mdsite /my-repo/                  # Prefix root-relative links with /my-repo/
  mdsite --output public -j4        # Write to public/ using 4 parallel jobs
  mdsite init                       # Write a sample _mdsite.toml")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base path prefixed to root-relative links (default: "/")
    base_path: Option<String>,

    /// Directory containing markdown pages
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory of static assets copied into the output
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// HTML page template
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to ./_mdsite.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a sample configuration file
    Init {
        /// Path of the configuration file to create
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Print the configuration JSON schema to stdout instead
        #[arg(long)]
        schema: bool,
    },
}

/// Build settings after merging CLI flags, config file and defaults
#[derive(Debug)]
struct Settings {
    base_path: String,
    content_dir: PathBuf,
    static_dir: PathBuf,
    template: PathBuf,
    output_dir: PathBuf,
    jobs: Option<usize>,
}

impl Settings {
    /// CLI flags win over the config file, which wins over the defaults
    fn resolve(cli: &Cli, config: Config) -> Self {
        let site = config.site;
        Self {
            base_path: cli
                .base_path
                .clone()
                .or(site.base_path)
                .unwrap_or_else(|| "/".to_string()),
            content_dir: cli
                .content
                .clone()
                .or(site.content_dir)
                .unwrap_or_else(|| PathBuf::from("content")),
            static_dir: cli
                .static_dir
                .clone()
                .or(site.static_dir)
                .unwrap_or_else(|| PathBuf::from("static")),
            template: cli
                .template
                .clone()
                .or(site.template)
                .unwrap_or_else(|| PathBuf::from("template.html")),
            output_dir: cli
                .output
                .clone()
                .or(site.output_dir)
                .unwrap_or_else(|| PathBuf::from("docs")),
            jobs: cli.jobs.or(config.build.jobs),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Some(Command::Init { output, schema }) => init(output, *schema),
        None => build(&cli),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

/// Write a sample config file, or print the JSON schema
fn init(output: &Path, schema: bool) -> Result<()> {
    if schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if output.exists() {
        anyhow::bail!("Config file already exists: {}", output.display());
    }

    let content = Config::sample().to_toml_with_schema()?;
    std::fs::write(output, content)
        .with_context(|| format!("Failed to write: {}", output.display()))?;
    info!("Created {}", output.display());

    Ok(())
}

/// Copy static assets and generate every page
fn build(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_dir(Path::new("."))?.unwrap_or_default(),
    };
    let settings = Settings::resolve(cli, config);
    debug!("Resolved settings: {:?}", settings);

    if settings.static_dir.is_dir() {
        let copied = copy_static(&settings.static_dir, &settings.output_dir).with_context(|| {
            format!(
                "Failed to copy static files from {}",
                settings.static_dir.display()
            )
        })?;
        info!(
            "Copied {} static files from {}",
            copied.len(),
            settings.static_dir.display()
        );
    } else {
        warn!(
            "Static directory {} not found, skipping",
            settings.static_dir.display()
        );
    }

    let template = Template::load(&settings.template)
        .with_context(|| format!("Failed to load template: {}", settings.template.display()))?;
    let content = ContentTree::from_directory(&settings.content_dir).with_context(|| {
        format!(
            "Failed to read content directory: {}",
            settings.content_dir.display()
        )
    })?;

    if content.files.is_empty() {
        warn!("No .md files found in {}", settings.content_dir.display());
    }

    let options = SiteOptions {
        output_dir: settings.output_dir.clone(),
        base_path: settings.base_path.clone(),
        parallel_jobs: settings.jobs,
    };
    let result = generate_site(&content, &template, &options)?;

    for file in &result.output_files {
        debug!("Wrote {}", file.display());
    }

    let failed_count = result.failed_files.len();
    info!(
        "Generated {} pages, {} failed",
        result.success_count, failed_count
    );

    if failed_count > 0 {
        anyhow::bail!("{} pages failed to generate", failed_count);
    }

    Ok(())
}
