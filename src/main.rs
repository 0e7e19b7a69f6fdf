/*!
 * Command-line interface for digestfs
 */

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use digestfs::config::{Args, Config};
use digestfs::error::Result;
use digestfs::render::DigestRenderer;
use digestfs::report::{ReportFormat, Reporter, ScanReport};
use digestfs::scanner::Scanner;
use digestfs::utils::count_files;
use digestfs::writer::DigestWriter;

fn run() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Create configuration
    let config = Config::from_args(args);

    // Validate configuration
    config.validate()?;

    println!("Scanning directory: {}", config.target_dir.display());

    // Create progress bar with advanced Unicode styling
    let progress = ProgressBar::new(0);
    progress.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}  Remaining: {eta_precise}  Speed: {per_sec}/s")
        .unwrap());
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Setup");

    // Count files for progress tracking
    let total_files = count_files(&config.target_dir, &config.ignore_rules());
    progress.set_message(format!("🔎 Found {} files to process", total_files));

    progress.set_length(total_files);
    progress.set_prefix("📊 Processing");
    progress.set_message("Starting scan...");

    // Create the pipeline stages
    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()));
    let renderer = DigestRenderer::new(config.clone());
    let writer = DigestWriter::new(config.clone());

    // Time scan, render and write together
    let start_time = Instant::now();

    let (mut root, stats) = scanner.scan()?;
    let digest = renderer.render(&mut root, &stats);
    writer.write(&digest)?;

    let total_duration = start_time.elapsed();

    // Clear the progress bar
    progress.finish_and_clear();

    println!(
        "Successfully generated context file at: {}",
        config.output_path().display()
    );

    // Prepare the scan report
    let scan_report = ScanReport {
        output_file: config.output_path().display().to_string(),
        duration: total_duration,
        files_analyzed: stats.files,
        total_size: stats.total_size,
        estimated_tokens: digest.estimated_tokens,
        extensions: digest.extensions,
    };

    // Create a reporter and print the report
    let reporter = Reporter::new(ReportFormat::ConsoleTable);
    reporter.print_report(&scan_report);

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
