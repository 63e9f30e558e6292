//! MediXScan CLI - check radiology reports and render review HTML

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use medixscan::backend::CorrectionResponse;
use medixscan::config::{self, AnalyzerSettings};
use medixscan::recommendations::{comparison_html, completeness_recommendation, error_statistics, generate_recommendations};
use medixscan::{filter_by_type, ErrorType, ReportAnalyzer};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "medixscan")]
#[command(version)]
#[command(about = "Spelling, grammar and terminology checks for radiology reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a report and print the result
    Analyze {
        /// Report file; reads stdin when omitted
        path: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Render highlighted HTML for a report
    Highlight {
        /// Report file; reads stdin when omitted
        path: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "step")]
        mode: HighlightMode,

        /// Only highlight these types (comma separated, e.g. spelling,abbreviation)
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,
    },

    /// Print recommendations, completeness hints and statistics
    Recommend {
        /// Report file; reads stdin when omitted
        path: Option<PathBuf>,
    },

    /// Adapt a saved correction-service response to an analysis result
    Adapt {
        /// Response JSON from the correction service
        response: PathBuf,

        /// Report file the response was produced for; reads stdin when omitted
        path: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum HighlightMode {
    Step,
    Corrected,
}

fn read_report(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read report '{}'", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read report from stdin")?;
            Ok(text)
        }
    }
}

fn settings_path(cli_path: Option<&Path>) -> Result<PathBuf> {
    match cli_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config::config_path()?),
    }
}

fn load_settings(cli_path: Option<&Path>) -> Result<AnalyzerSettings> {
    match cli_path {
        Some(path) => config::load_or_init(path)
            .with_context(|| format!("Failed to load config '{}'", path.display())),
        None => Ok(config::load_settings()),
    }
}

fn parse_types(names: &[String]) -> Result<Vec<ErrorType>> {
    names
        .iter()
        .map(|name| {
            let name = name.trim();
            let parsed: ErrorType = serde_json::from_value(serde_json::Value::String(name.to_string()))
                .with_context(|| format!("Invalid error type '{}'", name))?;
            if parsed == ErrorType::Other && name != "other" {
                anyhow::bail!(
                    "Unknown error type '{}' (expected one of: {})",
                    name,
                    ErrorType::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
                );
            }
            Ok(parsed)
        })
        .collect()
}

fn print_text_report(analyzer: &ReportAnalyzer, text: &str) {
    let result = analyzer.analyze(text);
    println!("Corrected report:\n{}\n", result.corrected_text);
    println!(
        "{} error(s), confidence {:.2}, production ready: {}",
        result.summary.total_errors,
        result.confidence,
        if result.summary.production_ready { "yes" } else { "no" }
    );
    for (phase, log) in &result.corrections {
        if log.explain.is_empty() {
            continue;
        }
        println!("\n[{}]", phase);
        for line in &log.explain {
            println!("  - {}", line);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze { path, format } => {
            let analyzer = ReportAnalyzer::new(load_settings(config_path)?);
            let text = read_report(path.as_deref())?;
            match format {
                OutputFormat::Json => {
                    let result = analyzer.analyze(&text);
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => print_text_report(&analyzer, &text),
            }
        }

        Commands::Highlight { path, mode, types } => {
            let analyzer = ReportAnalyzer::new(load_settings(config_path)?);
            let text = read_report(path.as_deref())?;
            let result = analyzer.analyze(&text);

            let mut highlights = result.highlights();
            if !types.is_empty() {
                highlights = filter_by_type(&highlights, &parse_types(&types)?);
            }
            debug!("[CLI] Rendering {} highlight(s)", highlights.len());

            let html = match mode {
                HighlightMode::Step => analyzer.renderer().render_step_by_step(&text, &highlights),
                HighlightMode::Corrected => analyzer.renderer().render_corrected(&text, &highlights),
            };
            println!("{}", html);
        }

        Commands::Recommend { path } => {
            let analyzer = ReportAnalyzer::new(load_settings(config_path)?);
            let text = read_report(path.as_deref())?;
            let result = analyzer.analyze(&text);

            let mut recommendations = generate_recommendations(&result.errors);
            recommendations.extend(completeness_recommendation(&text));

            let output = serde_json::json!({
                "recommendations": recommendations,
                "statistics": error_statistics(&result.errors),
                "comparison": comparison_html(text.trim(), &result.corrected_text),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Adapt { response, path } => {
            let raw = fs::read_to_string(&response)
                .with_context(|| format!("Failed to read response '{}'", response.display()))?;
            let response: CorrectionResponse =
                serde_json::from_str(&raw).context("Failed to parse correction-service response")?;
            let text = read_report(path.as_deref())?;

            let renderer = ReportAnalyzer::new(load_settings(config_path)?).renderer().clone();
            let result = response.to_analysis(&text, &renderer);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let settings = load_settings(config_path)?;
                println!("{}", toml::to_string_pretty(&settings)?);
            }
            ConfigAction::Path => {
                println!("{}", settings_path(config_path)?.display());
            }
            ConfigAction::Init { force } => {
                let path = settings_path(config_path)?;
                if path.exists() && !force {
                    anyhow::bail!("Config file already exists at {} (use --force to overwrite)", path.display());
                }
                AnalyzerSettings::default().save_to(&path)?;
                info!("[Config] Wrote default settings to {}", path.display());
            }
        },
    }

    Ok(())
}
