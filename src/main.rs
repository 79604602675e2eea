//! jatsify - manuscript HTML to JATS converter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use jatsify::{BoxedTextPolicy, Config, Template, convert_file};

#[derive(Parser)]
#[command(name = "jatsify")]
#[command(version, about = "Convert manuscript HTML to JATS XML", long_about = None)]
#[command(after_help = "EXAMPLES:
    jatsify paper.html              Write paper/paper.html and paper/paper.xml
    jatsify paper.html out/         Write into out/ (images go to out/media/)
    jatsify paper.html --dump-model Print the segmented document as JSON")]
struct Cli {
    /// Input HTML produced by the DOCX converter
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory (defaults to a directory named after the input)
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Manuscript template
    #[arg(short, long, default_value = "research-article")]
    template: String,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Boxed-text policy, overriding the configuration
    #[arg(long, value_parser = ["standard", "strict", "partial"])]
    boxed_text: Option<String>,

    /// Write XML without indentation
    #[arg(long)]
    compact: bool,

    /// Print the segmented document as JSON
    #[arg(long)]
    dump_model: bool,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report debug details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(cli: &Cli) {
    let level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let template: Template = cli.template.parse().map_err(|e| format!("{e}"))?;
    let config = load_config(cli)?;

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&cli.input));

    let report =
        convert_file(&cli.input, &output_dir, template, &config).map_err(|e| e.to_string())?;

    if cli.dump_model {
        let json = serde_json::to_string_pretty(&report.document).map_err(|e| e.to_string())?;
        println!("{json}");
    }

    if !cli.quiet {
        for anomaly in &report.anomalies {
            eprintln!("warning: {anomaly}");
        }
        eprintln!(
            "{} -> {} ({} sections, {} images)",
            cli.input.display(),
            report.xml_path.display(),
            report.document.sections.len(),
            report.images.len()
        );
    }
    Ok(())
}

/// `dir/paper.html` converts into `dir/paper/`.
fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_else(|| "article".as_ref());
    input.with_file_name(stem)
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };

    if let Some(policy) = &cli.boxed_text {
        config.boxed_text.policy = match policy.as_str() {
            "strict" => BoxedTextPolicy::Strict,
            "partial" => BoxedTextPolicy::Partial,
            _ => BoxedTextPolicy::Standard,
        };
    }
    if cli.compact {
        config.output.pretty = false;
    }
    Ok(config)
}
