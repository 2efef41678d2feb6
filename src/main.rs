use clap::{Parser, Subcommand};
use escrow_report::cli::{self, AnalyzeArgs, OutputFormat};
use escrow_report::error::ReportResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "escrow-report")]
#[command(about = "Escrow account inflow reports from bank spreadsheet exports")]
#[command(long_about = "Escrow Report - positive escrow inflows per construction object

Reads bank exports (.xlsx/.xls), normalizes column names and dates, and sums
positive transactions per object for one month or the whole period.

COMMANDS:
  analyze   - Aggregate exports into result and error workbooks
  permits   - Show the construction permit table

EXAMPLES:
  escrow-report analyze march.xlsx --year 2024 --month 3
  escrow-report analyze *.xlsx --all-periods -o reports/
  escrow-report analyze march.xlsx --format json --dry-run
  escrow-report permits --permits permits.yaml

LOGGING:
  Set RUST_LOG (e.g. RUST_LOG=escrow_report=debug) for diagnostics on stderr.")]
#[command(version)]
struct Cli {
    /// Show verbose output and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Aggregate escrow inflows from bank exports.

For every sheet the first rows (banner) are skipped, the header is matched
against the known column names, amounts and dates are coerced and positive
transactions are summed per object. Sheets named like \"Лист1\" are ignored.

OUTPUT:
  excel_results_<YYYY_MM|all_period>_<timestamp>.xlsx  (when there are results)
  errors_<YYYY_MM|all_period>_<timestamp>.xlsx         (when there are errors)

PERIOD:
  By default only the current month is aggregated. Use --year/--month to pick
  another month, or --all-periods to disable the filter.")]
    /// Aggregate escrow inflows from bank exports
    Analyze {
        /// Spreadsheet files to process, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Year of the period filter (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month of the period filter, 1-12 (default: current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Aggregate every transaction regardless of date
        #[arg(short = 'a', long, conflicts_with_all = ["year", "month"])]
        all_periods: bool,

        /// Directory for the result and error workbooks
        #[arg(short, long, default_value = ".", env = "ESCROW_REPORT_OUTPUT_DIR")]
        output_dir: PathBuf,

        /// YAML mapping of permit number to object name (replaces the built-in table)
        #[arg(short, long, env = "ESCROW_REPORT_PERMITS")]
        permits: Option<PathBuf>,

        /// Banner rows above the header row
        #[arg(long, default_value = "6")]
        skip_rows: usize,

        /// Terminal output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Print the report without writing workbooks
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show the construction permit table
    Permits {
        /// YAML mapping of permit number to object name
        #[arg(short, long, env = "ESCROW_REPORT_PERMITS")]
        permits: Option<PathBuf>,
    },
}

fn main() -> ReportResult<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            files,
            year,
            month,
            all_periods,
            output_dir,
            permits,
            skip_rows,
            format,
            dry_run,
        } => cli::analyze(AnalyzeArgs {
            files,
            year,
            month,
            all_periods,
            output_dir,
            permits,
            skip_rows,
            format,
            dry_run,
            verbose: cli.verbose,
        })
        .map(|_| ()),

        Commands::Permits { permits } => cli::permits(permits),
    }
}
