//! Rx-Analyzer command-line front end.

mod logging;
mod report;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use rx_analyzer_core::config::ENV_API_KEY;
use rx_analyzer_core::pipeline::{EntityRecognizer, TextAnalyzer};
use rx_analyzer_core::{
    Analyzer, AnalyzerConfig, DrugMatcher, EcommerceLink, LibraryTables, LinkBuilder,
    PatternLibrary, PrescriptionInput,
};
use rx_analyzer_llm::{LexiconEntityRecognizer, TokenClassificationRecognizer};

#[derive(Parser)]
#[command(name = "rx-analyzer")]
#[command(about = "Prescription analyzer: drugs, dosages, frequencies and pharmacy links")]
#[command(version)]
struct Cli {
    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// JSON tables file (overrides RX_ANALYZER_TABLES)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a prescription
    Analyze(AnalyzeArgs),
    /// Print pharmacy links for drug names
    Links {
        /// Drug names; aliases are resolved first
        #[arg(required = true)]
        drugs: Vec<String>,
    },
    /// Print the effective pattern/synonym/site tables as JSON
    Tables,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Prescription text
    #[arg(long, conflicts_with_all = ["file", "image"])]
    text: Option<String>,

    /// Read prescription text from a file ("-" for stdin)
    #[arg(long, conflicts_with = "image")]
    file: Option<PathBuf>,

    /// Prescription image; requires an OCR engine
    #[arg(long)]
    image: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Skip generative analysis
    #[arg(long)]
    no_ai: bool,

    /// Gemini API key (overrides the environment)
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    api_key: Option<String>,

    /// Token-classification output (JSON) to use instead of the built-in lexicon
    #[arg(long)]
    entities_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let mut config = AnalyzerConfig::from_env().context("Failed to read configuration")?;
    if let Some(path) = &cli.tables {
        config.tables = LibraryTables::from_json_file(path)
            .with_context(|| format!("Failed to load tables from {}", path.display()))?;
    }
    let library = config
        .build_library()
        .context("Failed to compile pattern library")?;

    match cli.command {
        Commands::Analyze(args) => {
            if let Some(key) = args.api_key.clone() {
                config = config.with_api_key(key);
            }
            run_analyze(&config, &library, args)?
        }
        Commands::Links { drugs } => run_links(&library, &drugs)?,
        Commands::Tables => println!("{}", serde_json::to_string_pretty(&config.tables)?),
    }

    Ok(())
}

fn run_analyze(config: &AnalyzerConfig, library: &PatternLibrary, args: AnalyzeArgs) -> Result<()> {
    let input = read_input(&args)?;

    let recognizer = build_recognizer(library, args.entities_json.as_deref())?;
    let text_analyzer = if args.no_ai {
        None
    } else {
        build_text_analyzer(config)
    };

    let mut analyzer = Analyzer::new(library).with_entity_recognizer(&*recognizer);
    if let Some(text_analyzer) = text_analyzer.as_deref() {
        analyzer = analyzer.with_text_analyzer(text_analyzer);
    }

    let result = analyzer.analyze_input(&input);

    if args.json {
        println!("{}", result.to_json()?);
    } else {
        println!("{}", report::render_report(&result));
    }
    Ok(())
}

fn read_input(args: &AnalyzeArgs) -> Result<PrescriptionInput> {
    if let Some(text) = &args.text {
        return Ok(PrescriptionInput::Text(text.clone()));
    }
    if let Some(path) = &args.file {
        let text = if path.as_os_str() == "-" {
            std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        };
        return Ok(PrescriptionInput::Text(text));
    }
    if let Some(path) = &args.image {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        warn!("no OCR engine is linked into this binary; image text will be empty");
        return Ok(PrescriptionInput::Image(bytes));
    }
    bail!("One of --text, --file or --image is required")
}

fn build_recognizer(
    library: &PatternLibrary,
    entities_json: Option<&Path>,
) -> Result<Box<dyn EntityRecognizer>> {
    match entities_json {
        Some(path) => {
            let output = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Box::new(TokenClassificationRecognizer::from_output(output)))
        }
        None => {
            let recognizer = LexiconEntityRecognizer::new(library)
                .context("Failed to build entity recognizer")?;
            Ok(Box::new(recognizer))
        }
    }
}

#[cfg(feature = "gemini")]
fn build_text_analyzer(config: &AnalyzerConfig) -> Option<Box<dyn TextAnalyzer>> {
    match rx_analyzer_llm::GeminiAnalyzer::from_config(config) {
        Ok(analyzer) => {
            info!(model = analyzer.model(), "generative analysis enabled");
            Some(Box::new(analyzer))
        }
        Err(e) => {
            info!(error = %e, "generative analysis disabled");
            None
        }
    }
}

#[cfg(not(feature = "gemini"))]
fn build_text_analyzer(config: &AnalyzerConfig) -> Option<Box<dyn TextAnalyzer>> {
    if config.api_key.is_some() {
        info!("API key set but built without the gemini feature");
    }
    None
}

fn run_links(library: &PatternLibrary, drugs: &[String]) -> Result<()> {
    let links = links_for_names(library, drugs);
    println!("{}", serde_json::to_string_pretty(&links)?);
    Ok(())
}

/// Links keyed by canonical name; aliases and brand names are resolved first.
fn links_for_names(
    library: &PatternLibrary,
    names: &[String],
) -> BTreeMap<String, Vec<EcommerceLink>> {
    let matcher = DrugMatcher::new(library);
    let canonical: Vec<String> = names
        .iter()
        .map(|name| matcher.standardizer().standardize(name).0)
        .collect();

    LinkBuilder::new(library).build_links(canonical.as_slice())
}
