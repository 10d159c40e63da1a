//! mdoc: CLI tool to convert between markdown and editor document JSON

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

use config::{CONFIG_FILE_NAME, Config};
use mdoc_core::{
    ParseOptions, ParseResult, Registry, document_to_markdown, markdown_to_document_with_options,
};

#[derive(Parser, Debug)]
#[command(name = "mdoc")]
#[command(about = "Convert markdown to editor document JSON and back")]
#[command(version)]
#[command(after_help = "Examples:
  mdoc notes.md                     # Convert to notes.json
  mdoc notes.json                   # Convert back to notes.md
  mdoc notes.md -o doc.json         # Convert to specific output file
  mdoc docs/ -o out/ -r             # Convert a directory tree
  mdoc docs/ -o out/ -j4            # Use 4 parallel jobs
  mdoc --init                       # Write a sample _mdoc.toml")]
struct Cli {
    /// Input file (.md, .markdown or .json) or directory
    #[arg(required_unless_present_any = ["init", "schema"])]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Configuration file (defaults to _mdoc.toml next to the input)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drop YAML front matter instead of carrying it through
    #[arg(long)]
    no_front_matter: bool,

    /// Pretty-print document JSON
    #[arg(long)]
    pretty: bool,

    /// Write a sample configuration file and exit
    #[arg(long, conflicts_with = "schema")]
    init: bool,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    schema: bool,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

/// Effective settings after merging the config file with CLI flags
#[derive(Debug, Clone, Copy)]
struct Settings {
    front_matter: bool,
    pretty: bool,
    fixups: bool,
    quiet: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            front_matter: !cli.no_front_matter && config.output.front_matter.unwrap_or(true),
            pretty: cli.pretty || config.output.pretty.unwrap_or(false),
            fixups: config.parse.fixups.unwrap_or(true),
            quiet: cli.quiet,
        }
    }
}

/// Which way a file is converted, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    MarkdownToJson,
    JsonToMarkdown,
}

impl Direction {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(Self::MarkdownToJson),
            "json" => Some(Self::JsonToMarkdown),
            _ => None,
        }
    }

    fn output_extension(self) -> &'static str {
        match self {
            Self::MarkdownToJson => "json",
            Self::JsonToMarkdown => "md",
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if cli.init {
        return write_sample_config(cli.input.as_deref(), cli.quiet);
    }

    let Some(input) = cli.input.as_deref() else {
        anyhow::bail!("No input given");
    };

    let config = load_config(&cli, input)?;
    let settings = Settings::resolve(&cli, &config);
    tracing::debug!(?settings, "resolved settings");

    let registry = Registry::default();

    if input.is_file() {
        convert_file(&registry, input, cli.output.as_deref(), settings)?;
    } else if input.is_dir() {
        convert_directory(
            &registry,
            input,
            cli.output.as_deref(),
            cli.recursive,
            cli.jobs,
            settings,
        )?;
    } else {
        anyhow::bail!("Input path does not exist: {}", input.display());
    }

    Ok(())
}

/// Explicit `--config`, else `_mdoc.toml` in the input directory
fn load_config(cli: &Cli, input: &Path) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load(path);
    }

    let dir = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or(Path::new("."))
    };
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    match Config::load_from_dir(dir)? {
        Some(config) => {
            tracing::debug!(dir = %dir.display(), "loaded {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Write `_mdoc.toml` into the given directory (or the current one)
fn write_sample_config(dir: Option<&Path>, quiet: bool) -> Result<()> {
    let dir = dir.unwrap_or(Path::new("."));
    let path = dir.join(CONFIG_FILE_NAME);

    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }

    let content = Config::sample().to_toml_with_schema()?;
    fs::write(&path, content).with_context(|| format!("Failed to write: {}", path.display()))?;

    if !quiet {
        println!("{}", path.display());
    }

    Ok(())
}

/// Convert a single file in the direction its extension implies
fn convert_file(
    registry: &Registry,
    input: &Path,
    output: Option<&Path>,
    settings: Settings,
) -> Result<()> {
    let direction = Direction::from_path(input)
        .with_context(|| format!("Unsupported input file: {}", input.display()))?;

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension(direction.output_extension()),
    };

    convert_file_inner(registry, input, &output_path, direction, settings)?;

    if !settings.quiet {
        println!("{}", output_path.display());
    }

    Ok(())
}

/// Convert every markdown and document JSON file in a directory
fn convert_directory(
    registry: &Registry,
    input: &Path,
    output: Option<&Path>,
    recursive: bool,
    jobs: Option<usize>,
    settings: Settings,
) -> Result<()> {
    let output_dir = output.unwrap_or(input);

    let files = collect_files(input, recursive)?;

    if files.is_empty() {
        if !settings.quiet {
            eprintln!("No markdown or JSON files found in {}", input.display());
        }
        return Ok(());
    }

    tracing::debug!("Found {} files", files.len());

    if let Some(n) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let inputs: HashSet<PathBuf> = files.iter().map(|(file, _)| file.clone()).collect();
    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let errors: Vec<_> = files
        .par_iter()
        .filter_map(|(file, direction)| {
            let relative = file.strip_prefix(input).unwrap_or(file);
            let output_file = output_dir
                .join(relative)
                .with_extension(direction.output_extension());

            // Never overwrite a file that is itself an input of this run
            if inputs.contains(&output_file) {
                tracing::warn!(
                    "Skipping {}: output {} is also an input",
                    file.display(),
                    output_file.display()
                );
                return None;
            }

            match convert_file_inner(registry, file, &output_file, *direction, settings) {
                Ok(()) => {
                    success.fetch_add(1, Ordering::Relaxed);
                    if !settings.quiet {
                        println!("{}", output_file.display());
                    }
                    None
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    Some((file.clone(), e))
                }
            }
        })
        .collect();

    for (file, e) in &errors {
        eprintln!("Error converting {}: {:#}", file.display(), e);
    }

    let success_count = success.load(Ordering::Relaxed);
    let failed_count = failed.load(Ordering::Relaxed);

    if !settings.quiet {
        eprintln!("Converted {} files, {} failed", success_count, failed_count);
    }

    if failed_count > 0 {
        anyhow::bail!("{} files failed to convert", failed_count);
    }

    Ok(())
}

/// Read, convert and write one file (for parallel use, prints nothing)
fn convert_file_inner(
    registry: &Registry,
    input: &Path,
    output: &Path,
    direction: Direction,
    settings: Settings,
) -> Result<()> {
    tracing::debug!("Converting: {} -> {}", input.display(), output.display());

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;

    let converted = match direction {
        Direction::MarkdownToJson => markdown_to_json(registry, &content, settings)?,
        Direction::JsonToMarkdown => json_to_markdown(registry, &content, settings)?,
    };

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(output, &converted)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    Ok(())
}

/// Collect convertible files in a directory, with their direction
fn collect_files(dir: &Path, recursive: bool) -> Result<Vec<(PathBuf, Direction)>> {
    let mut files = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_file() {
            if let Some(direction) = Direction::from_path(&path) {
                files.push((path, direction));
            }
        } else if path.is_dir() && recursive {
            files.extend(collect_files(&path, recursive)?);
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

fn markdown_to_json(registry: &Registry, content: &str, settings: Settings) -> Result<String> {
    let options = ParseOptions {
        fixups: settings.fixups,
    };
    let mut result = markdown_to_document_with_options(content, registry, options)
        .context("Failed to convert markdown")?;

    if !settings.front_matter {
        result.front_matter.clear();
    }

    let mut json = if settings.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    json.push('\n');
    Ok(json)
}

fn json_to_markdown(registry: &Registry, content: &str, settings: Settings) -> Result<String> {
    let result = ParseResult::from_json(content).context("Failed to read document JSON")?;

    let front_matter = settings
        .front_matter
        .then_some(result.front_matter.as_str());

    Ok(document_to_markdown(&result.document, registry, front_matter))
}
