//! StudyQuote CLI
//!
//! Runs the pricing API, or computes estimates and budget checks locally.

use std::path::Path;
use std::process::ExitCode;

use clap::{Args as ClapArgs, Parser, Subcommand};
use studyquote_pricing::{
    self as pricing, BudgetCheck, PricingParams, Quote, RateSheet, CALCULATOR_DEFAULTS,
};
use studyquote_server::{server, AppState, Config, EstimateResponse, Portal, QuoteError};
use tracing_subscriber::EnvFilter;

/// StudyQuote - Tutoring Price Estimator
///
/// Estimates the price of an academic task from its level, category,
/// deadline and scope, and checks proposed budgets against the estimate.
#[derive(Parser, Debug)]
#[command(name = "studyquote")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: studyquote.json in current directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pricing HTTP API
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for the HTTP API server
        #[arg(short, long)]
        port: Option<u16>,

        /// Portal to serve (student, expert, admin)
        #[arg(long)]
        portal: Option<Portal>,
    },

    /// Estimate the price of a task
    Estimate {
        #[command(flatten)]
        task: TaskArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a proposed price against the estimate
    Validate {
        /// The proposed price
        #[arg(long, allow_negative_numbers = true)]
        price: f64,

        #[command(flatten)]
        task: TaskArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the rate tables
    Tables {
        /// Print the tables as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Task parameters shared by `estimate` and `validate`.
#[derive(ClapArgs, Debug)]
struct TaskArgs {
    /// Academic level label
    #[arg(long, default_value = CALCULATOR_DEFAULTS.level)]
    level: String,

    /// Assignment type label
    #[arg(long = "type", value_name = "TYPE", default_value = CALCULATOR_DEFAULTS.category)]
    category: String,

    /// Deadline label
    #[arg(long, default_value = CALCULATOR_DEFAULTS.urgency)]
    urgency: String,

    /// Word count (essays)
    #[arg(long, allow_negative_numbers = true)]
    words: Option<i64>,

    /// Number of problems (STEM)
    #[arg(long, allow_negative_numbers = true)]
    problems: Option<i64>,

    /// Page count (theses)
    #[arg(long, allow_negative_numbers = true)]
    pages: Option<i64>,

    /// Project scale label (software)
    #[arg(long)]
    project_scale: Option<String>,
}

impl From<TaskArgs> for PricingParams {
    fn from(args: TaskArgs) -> Self {
        Self {
            level: args.level,
            category: args.category,
            urgency: args.urgency,
            words: args.words,
            problems: args.problems,
            pages: args.pages,
            project_scale: args.project_scale,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Exit status for a failed run: 2 for bad configuration, 1 otherwise.
fn exit_status(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<QuoteError>() {
        Some(e) if e.is_config() => 2,
        _ => 1,
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Serve { host, port, portal } => {
            let mut config = load_config(args.config.as_deref())?;

            // CLI flags take precedence over file and environment
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(portal) = portal {
                config.portal = portal;
            }
            config.validate()?;

            print_config(&config);

            let state = AppState::new(config);
            let listener = server::bind(&state).await?;
            server::run(listener, state, server::ctrl_c()).await?;
        }
        Command::Estimate { task, json } => {
            let params = PricingParams::from(task);
            let quote = pricing::quote(&params);
            if json {
                let response = EstimateResponse {
                    estimated_price: quote.estimated_price,
                };
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_quote(&params, &quote);
            }
        }
        Command::Validate { price, task, json } => {
            let params = PricingParams::from(task);
            let estimate = pricing::estimate(&params);
            let check = pricing::validate(price, estimate);
            tracing::debug!(price, estimate, status = %check.status, "Budget validated");
            if json {
                println!("{}", serde_json::to_string_pretty(&check)?);
            } else {
                print_check(price, &check);
            }
        }
        Command::Tables { json } => {
            let sheet = RateSheet::builtin();
            if json {
                println!("{}", serde_json::to_string_pretty(&sheet)?);
            } else {
                println!("{}", render_rate_sheet(&sheet));
            }
        }
    }

    Ok(())
}

/// Loads configuration from the specified path or default location, then
/// applies environment overrides.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            let mut config = Config::load_from_file(path)?;
            config.apply_env_overrides()?;
            Ok(config)
        }
        None => Ok(Config::load()?),
    }
}

/// Prints the loaded configuration.
fn print_config(config: &Config) {
    println!("Configuration:");
    println!("  Address: {}", config.bind_addr());
    println!("  Portal: {} ({})", config.portal.portal_name(), config.portal);
}

/// Prints an itemised estimate.
fn print_quote(params: &PricingParams, quote: &Quote) {
    println!("Scope:       {}", params.scope());
    println!("Base price:  {:.2}", quote.base_price);
    println!("Level:       x{:.1} ({})", quote.level_multiplier, params.level);
    println!("Urgency:     x{:.1} ({})", quote.urgency_multiplier, params.urgency);
    println!("Estimate:    ${}", quote.estimated_price);
}

/// Prints the outcome of a budget check.
fn print_check(price: f64, check: &BudgetCheck) {
    println!("Proposed:    ${price:.2}");
    println!("Estimate:    ${}", check.suggested_price);
    println!("Status:      {}", check.status);
    if !check.is_fair() {
        println!("Difference:  ${:.2} {}", check.diff, check.status);
    }
}

/// Renders the rate tables as aligned plain text.
fn render_rate_sheet(sheet: &RateSheet) -> String {
    let mut lines = vec!["Academic levels".to_string()];
    lines.extend(
        sheet
            .academic_levels
            .iter()
            .map(|l| format!("  {:<20} x{:.1}", l.label, l.multiplier)),
    );

    lines.push(String::new());
    lines.push("Assignment types".to_string());
    lines.extend(
        sheet
            .assignment_types
            .iter()
            .map(|t| format!("  {:<20} x{:.1}  per {}", t.label, t.multiplier, t.unit)),
    );

    lines.push(String::new());
    lines.push("Deadlines".to_string());
    lines.extend(
        sheet
            .deadlines
            .iter()
            .map(|d| format!("  {:<20} x{:.1}", d.label, d.multiplier)),
    );

    lines.push(String::new());
    lines.push("Project scales".to_string());
    lines.extend(
        sheet
            .project_scales
            .iter()
            .map(|s| format!("  {:<20} base {:>3}  x{:.1}", s.label, s.value, s.multiplier)),
    );

    lines.push(String::new());
    lines.push("Scope ranges".to_string());
    lines.extend(sheet.scope_ranges.iter().map(|r| {
        format!(
            "  {:<20} {}..={} step {}",
            r.unit.to_string(),
            r.min,
            r.max,
            r.step
        )
    }));

    let defaults = &sheet.defaults;
    lines.push(String::new());
    lines.push("Calculator defaults".to_string());
    lines.push(format!("  level: {}", defaults.level));
    lines.push(format!("  type: {}", defaults.category));
    lines.push(format!("  urgency: {}", defaults.urgency));
    lines.push(format!(
        "  words: {}, problems: {}, pages: {}",
        defaults.words, defaults.problems, defaults.pages
    ));
    lines.push(format!("  project scale: {}", defaults.project_scale));

    lines.join("\n")
}
