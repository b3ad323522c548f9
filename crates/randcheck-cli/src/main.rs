//! CLI for randcheck: statistical randomness checks for integer samples.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "randcheck")]
#[command(about = "randcheck — statistical randomness checks for integer samples")]
#[command(version = randcheck_tests::VERSION)]
struct Cli {
    /// Log engine cache activity (overrides the default `warn` filter; RUST_LOG still wins)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test battery: Kolmogorov-Smirnov, chi-square, runs test,
    /// autocorrelation, longest repeat run and CRC-32 fingerprint.
    Analyze {
        /// File of whitespace/comma separated integers ("-" or absent reads stdin)
        #[arg(long)]
        input: Option<String>,

        /// Smallest value the samples are drawn from
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        min: i64,

        /// Largest value the samples are drawn from
        #[arg(long, default_value = "255", allow_hyphen_values = true)]
        max: i64,

        /// Number of equal-width chi-square bins (values below 2 are raised to 2)
        #[arg(long, default_value_t = randcheck_tests::DEFAULT_CHI_SQUARE_BINS)]
        bins: usize,

        /// Significance level for pass/fail
        #[arg(long, default_value_t = randcheck_tests::DEFAULT_ALPHA)]
        alpha: f64,

        /// Autocorrelation lag
        #[arg(long, default_value_t = randcheck_tests::DEFAULT_AUTOCORRELATION_LAG)]
        lag: usize,

        /// Write the full report as JSON
        #[arg(long)]
        output: Option<String>,

        /// Write a Markdown report
        #[arg(long)]
        markdown: Option<String>,
    },

    /// Find the first position of a contiguous sub-sequence
    Find {
        /// Comma-separated values to search for, e.g. "1,2,3"
        #[arg(long, allow_hyphen_values = true)]
        pattern: String,

        /// File of whitespace/comma separated integers ("-" or absent reads stdin)
        #[arg(long)]
        input: Option<String>,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        min: i64,

        #[arg(long, default_value = "255", allow_hyphen_values = true)]
        max: i64,
    },

    /// List every value that occurs more than once, with its positions
    Duplicates {
        /// File of whitespace/comma separated integers ("-" or absent reads stdin)
        #[arg(long)]
        input: Option<String>,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        min: i64,

        #[arg(long, default_value = "255", allow_hyphen_values = true)]
        max: i64,

        /// Write the duplicate map as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            input,
            min,
            max,
            bins,
            alpha,
            lag,
            output,
            markdown,
        } => commands::analyze::run(commands::analyze::AnalyzeCommandConfig {
            input: input.as_deref(),
            min,
            max,
            bins,
            alpha,
            lag,
            output_path: output.as_deref(),
            markdown_path: markdown.as_deref(),
        }),
        Commands::Find {
            pattern,
            input,
            min,
            max,
        } => commands::find::run(&pattern, input.as_deref(), min, max),
        Commands::Duplicates {
            input,
            min,
            max,
            output,
        } => commands::duplicates::run(input.as_deref(), min, max, output.as_deref()),
    }
}
