use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mdhtml::Config;

#[derive(Parser)]
#[command(name = "mdhtml")]
#[command(about = "Convert Markdown files to HTML")]
struct Cli {
    /// Log every classified block and copied file
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a single Markdown file
    Render {
        /// Input Markdown file
        input: PathBuf,

        /// Output HTML file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy static assets and render every page of the site
    Build {
        /// Site configuration file
        #[arg(short, long, default_value = "site.toml")]
        config: PathBuf,

        /// Static asset directory (overrides config)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Markdown content directory (overrides config)
        #[arg(long)]
        content_dir: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Render { input, output } => {
            let markdown = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let html = mdhtml::render_document(&markdown)
                .with_context(|| format!("rendering {}", input.display()))?;

            match output {
                Some(output) => {
                    fs::write(&output, html)
                        .with_context(|| format!("writing {}", output.display()))?;
                    log::info!("Created {}", output.display());
                }
                None => println!("{html}"),
            }
        }
        Command::Build {
            config,
            static_dir,
            content_dir,
            output_dir,
        } => {
            let mut config = Config::load_or_default(&config)?;
            if let Some(dir) = static_dir {
                config.paths.static_dir = dir;
            }
            if let Some(dir) = content_dir {
                config.paths.content_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.paths.output_dir = dir;
            }

            let summary = mdhtml::site::generate_site(&config)?;
            log::info!(
                "Copied {} files and rendered {} pages into {}",
                summary.files_copied,
                summary.pages_rendered,
                config.paths.output_dir.display()
            );
        }
    }
    Ok(())
}
