use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use asana_guide::config::Config;
use asana_guide::content::PageContent;
use asana_guide::logging;
use asana_guide::render::{LivePage, PageRenderer, RenderOptions};
use asana_guide::selector::StepSelector;
use asana_guide::site;
use asana_guide::ui::App;

#[derive(Parser)]
#[command(name = "asana-guide")]
#[command(about = "Step-by-step yoga pose guide for the terminal and the web")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Page content file (TOML), overrides content.path from config
    #[arg(long)]
    content: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site (index plus one page per step)
    Build {
        /// Output directory (default: output.dir from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print one self-contained page to stdout
    ///
    /// Step links are in-page `#` fragments unless --site points at a built
    /// site, in which case they open that site's step pages.
    Render {
        /// Step title to select before rendering
        #[arg(short, long)]
        step: Option<String>,

        /// Root of a site produced by `build` to link step pages into
        #[arg(long)]
        site: Option<String>,
    },

    /// List the steps of the guided breakdown
    Steps,

    /// Print the JSON schema of the content file format
    Schema,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // No subcommand = terminal viewer, which logs to a file
    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    let content_path = cli.content.clone().or_else(|| config.content_path());

    match cli.command {
        Some(Commands::Build { output }) => {
            cmd_build(&config, content_path.as_deref(), output)?;
        }
        Some(Commands::Render { step, site }) => {
            cmd_render(content_path.as_deref(), step, site.as_deref())?;
        }
        Some(Commands::Steps) => {
            cmd_steps(content_path.as_deref())?;
        }
        Some(Commands::Schema) => {
            cmd_schema()?;
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml_string()?);
        }
        None => {
            run_tui(&config, content_path.as_deref(), logging_handle.log_file_path)?;
        }
    }

    Ok(())
}

fn load_content(path: Option<&Path>) -> Result<PageContent> {
    PageContent::load(path).context("Failed to load page content")
}

fn run_tui(
    config: &Config,
    content_path: Option<&Path>,
    log_file_path: Option<PathBuf>,
) -> Result<()> {
    let content = load_content(content_path)?;
    let mut app = App::new(content, config);
    let result = app.run();

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_build(
    config: &Config,
    content_path: Option<&Path>,
    output: Option<PathBuf>,
) -> Result<()> {
    let content = load_content(content_path)?;
    let renderer = PageRenderer::new()?;
    let output_dir = output.unwrap_or_else(|| config.output_path());

    println!("Building site to: {}", output_dir.display());

    let manifest = site::build_site(&content, &renderer, &output_dir)
        .with_context(|| format!("Failed to build site in {}", output_dir.display()))?;

    for file in &manifest.files {
        println!("  {}", file.display());
    }
    println!("Wrote {} files", manifest.files.len());

    Ok(())
}

fn cmd_render(
    content_path: Option<&Path>,
    step: Option<String>,
    site: Option<&str>,
) -> Result<()> {
    let content = Rc::new(load_content(content_path)?);
    let renderer = Rc::new(PageRenderer::new()?);

    let options = site.map_or_else(RenderOptions::standalone, RenderOptions::linked_to_site);

    let mut selector = StepSelector::new(&content.steps);
    let page = LivePage::attach(&mut selector, renderer, Rc::clone(&content), options)?;

    if let Some(title) = step {
        selector.select(title);
        let active = selector.active_step(&content.steps);
        if active.title != selector.selected_title() {
            tracing::warn!(
                requested = %selector.selected_title(),
                shown = %active.title,
                "Unknown step, showing the first one"
            );
        }
    }

    println!("{}", page.detach(&mut selector));
    Ok(())
}

fn cmd_steps(content_path: Option<&Path>) -> Result<()> {
    let content = load_content(content_path)?;

    println!("{} ({} steps)", content.pose_card.name, content.steps.len());
    println!("{}", "─".repeat(60));

    for (i, step) in content.steps.iter().enumerate() {
        let marker = if i == 0 { "*" } else { " " };
        println!("{} {}. {}", marker, i + 1, step.title);
    }

    println!();
    println!("* shown by default");
    Ok(())
}

fn cmd_schema() -> Result<()> {
    let schema = PageContent::json_schema();
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{json}");
    Ok(())
}
