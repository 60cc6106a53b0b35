use std::path::{Path, PathBuf};
use std::process::ExitCode;

use barcode_scan::config::{self, settings::Settings};
use barcode_scan::decode::rxing::RxingDecoder;
use barcode_scan::input::SelectedFile;
use barcode_scan::output::OutputStyle;
use barcode_scan::pipeline::orchestrator::scan_file;
use barcode_scan::pipeline::scanner::Scanner;
use barcode_scan::render::{PdfEngine, UnavailablePdfEngine};

const USAGE: &str = "\
Usage: barcode_scan [OPTIONS] <FILE>...
  Scan images and PDF pages for barcodes.

Options:
  -s, --settings <PATH>  settings YAML (default: settings.yaml next to each FILE)
  -t, --type <MIME>      override the declared type of every FILE
      --json             print a JSON report per file
  -h, --help             show this help
  -V, --version          show version";

struct CliArgs {
    settings: Option<PathBuf>,
    declared_type: Option<String>,
    json: bool,
    files: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        settings: None,
        declared_type: None,
        json: false,
        files: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-s" | "--settings" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{arg} requires a path"))?;
                cli.settings = Some(PathBuf::from(value));
            }
            "-t" | "--type" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{arg} requires a MIME type"))?;
                cli.declared_type = Some(value.clone());
            }
            "--json" => cli.json = true,
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!("unknown option '{other}'"));
            }
            file => cli.files.push(PathBuf::from(file)),
        }
    }

    if cli.files.is_empty() {
        return Err("no input files".to_string());
    }
    Ok(cli)
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "pdfium")]
fn create_pdf_engine() -> Box<dyn PdfEngine> {
    match barcode_scan::render::pdfium::PdfiumEngine::new() {
        Ok(engine) => Box::new(engine),
        Err(e) => {
            tracing::warn!(error = %e, "PDF support unavailable");
            Box::new(UnavailablePdfEngine::new(e.to_string()))
        }
    }
}

#[cfg(not(feature = "pdfium"))]
fn create_pdf_engine() -> Box<dyn PdfEngine> {
    Box::new(UnavailablePdfEngine::default())
}

fn load_settings(cli: &CliArgs, input: &Path) -> barcode_scan::error::Result<Settings> {
    match &cli.settings {
        Some(path) => Settings::from_file(path),
        None => config::load_settings_for_input(input),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("{USAGE}");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("barcode_scan {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    init_logging();

    let mut scanner = match Scanner::new(&Settings::default(), RxingDecoder::new(), create_pdf_engine()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut has_error = false;
    for path in &cli.files {
        let settings = match load_settings(&cli, path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("ERROR: Failed to load settings for {}: {e}", path.display());
                has_error = true;
                continue;
            }
        };
        if let Err(e) = scanner.apply_settings(&settings) {
            eprintln!("ERROR: Invalid settings for {}: {e}", path.display());
            has_error = true;
            continue;
        }

        let file = match SelectedFile::from_path(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("ERROR: Failed to read {}: {e}", path.display());
                has_error = true;
                continue;
            }
        };
        let file = match &cli.declared_type {
            Some(t) => file.with_declared_type(t.clone()),
            None => file,
        };

        let result = scan_file(&mut scanner, &file);
        if result.output.style == OutputStyle::Error {
            has_error = true;
        }

        if cli.json {
            match result.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("ERROR: Failed to serialize report for {}: {e}", path.display());
                    has_error = true;
                }
            }
        } else {
            match result.output.style {
                OutputStyle::Normal => println!("{}", result.output.text),
                OutputStyle::Error => {
                    eprintln!("ERROR: {}: {}", path.display(), result.output.text)
                }
            }
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
