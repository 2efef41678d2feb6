use crate::core::{Aggregator, PermitTable};
use crate::error::ReportResult;
use crate::excel::{ExcelExporter, ReportKind};
use crate::types::{Document, ErrorRow, Period, ResultRow};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output format of the analyze command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal tables
    #[default]
    Table,
    /// Both tables as one JSON document
    Json,
}

/// Parameters of the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    pub files: Vec<PathBuf>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub all_periods: bool,
    pub output_dir: PathBuf,
    pub permits: Option<PathBuf>,
    pub skip_rows: usize,
    pub format: OutputFormat,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Load the permit table from `path`, or the built-in one
pub fn load_permits(path: Option<&Path>) -> ReportResult<PermitTable> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading permit table");
            PermitTable::from_yaml_file(path)
        }
        None => Ok(PermitTable::default()),
    }
}

/// "за 2024-03" or "за весь период"
fn period_text(period: Option<Period>) -> String {
    match period {
        Some(p) => format!("за {}", p),
        None => "за весь период".to_string(),
    }
}

/// Execute the analyze command
pub fn analyze(args: AnalyzeArgs) -> ReportResult<Vec<PathBuf>> {
    let json = args.format == OutputFormat::Json;
    let period = if args.all_periods {
        None
    } else {
        Some(Period::resolve(args.year, args.month)?)
    };
    let permits = load_permits(args.permits.as_deref())?;

    if !json {
        println!("{}", "🏦 Escrow Report - Inflow Analysis".bold().green());
        println!("   Files: {}", args.files.len());
        println!("   Period: {}", period_text(period).bright_yellow());
        println!();
    }

    if args.verbose && !json {
        println!("{}", "📖 Reading spreadsheets...".cyan());
    }

    let documents = args
        .files
        .iter()
        .map(|path| Document::from_path(path))
        .collect::<ReportResult<Vec<_>>>()?;

    if !json {
        println!("Обработка данных {}...", period_text(period));
    }

    let aggregator = Aggregator::new(permits).with_banner_rows(args.skip_rows);
    let report = aggregator.aggregate(&documents, period);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.results.is_empty() {
            println!(
                "{}",
                format!("Данные {} не обработаны. Проверьте файлы.", period_text(period)).red()
            );
        } else {
            print_results_table(&report.results, period);
        }

        if report.errors.is_empty() {
            println!("{}", "✅ Обработка завершена успешно.".green());
        } else {
            print_errors_table(&report.errors);
        }
    }

    if args.dry_run {
        if !json {
            println!("{}", "📋 DRY RUN MODE - No files written".yellow());
        }
        return Ok(Vec::new());
    }

    let generated_at = chrono::Local::now().naive_local();
    let mut written = Vec::new();

    for exporter in [
        ExcelExporter::results(&report.results),
        ExcelExporter::errors(&report.errors),
    ] {
        if exporter.is_empty() {
            continue;
        }
        fs::create_dir_all(&args.output_dir)?;
        let path = args
            .output_dir
            .join(exporter.kind().file_name(period, generated_at));
        exporter.save(&path)?;
        if !json {
            println!("💾 {}", path.display());
        }
        written.push(path);
    }

    Ok(written)
}

/// Execute the permits command
pub fn permits(path: Option<PathBuf>) -> ReportResult<()> {
    let table = load_permits(path.as_deref())?;

    println!("{}", "🏗️  Construction permits".bold().green());
    println!("{}", "─".repeat(85));
    for (permit, object_name) in table.iter() {
        println!("{:<28} {}", permit.bright_blue(), object_name);
    }
    println!("{}", "─".repeat(85));
    println!("   {} permits", table.len());

    Ok(())
}

/// Print the result table
fn print_results_table(rows: &[ResultRow], period: Option<Period>) {
    println!(
        "\n{}",
        format!(
            "📊 Результаты анализа ({}, положительные суммы):",
            period_text(period)
        )
        .bold()
        .cyan()
    );
    print_two_columns(
        ReportKind::Results.headers(),
        rows.iter()
            .map(|r| (r.object_name.as_str(), r.formatted_amount.as_str())),
    );
}

/// Print the error table
fn print_errors_table(rows: &[ErrorRow]) {
    println!("\n{}", "⚠️  Ошибки обработки:".bold().yellow());
    print_two_columns(
        ReportKind::Errors.headers(),
        rows.iter().map(|r| (r.object_label.as_str(), r.reason.as_str())),
    );
}

fn print_two_columns<'a>(
    headers: [&str; 2],
    rows: impl Iterator<Item = (&'a str, &'a str)> + Clone,
) {
    let width = rows
        .clone()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once(headers[0].chars().count()))
        .max()
        .unwrap_or(0);

    println!("{}", "─".repeat(width + 40));
    println!(
        "{:<width$}  {}",
        headers[0].bold(),
        headers[1].bold(),
        width = width
    );
    println!("{}", "─".repeat(width + 40));
    for (name, value) in rows {
        println!("{:<width$}  {}", name.bright_blue(), value, width = width);
    }
    println!("{}", "─".repeat(width + 40));
}
