//! listing-caption CLI
//!
//! Reads a CSV/Excel listing file and writes one caption per row.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use listing_caption::{CaptionError, CaptionerBuilder, OutputFormat, SheetSelector};
use tracing_subscriber::EnvFilter;

struct Options {
    input_path: String,
    output_path: String,
    format: Option<OutputFormat>,
    sheet_selector: SheetSelector,
    parallel: bool,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <input.csv|input.xlsx> [<output> | -] [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --format <fmt>       Output format: text, json, csv, xlsx");
    eprintln!("                       (default: from output extension, else text)");
    eprintln!("  --sheet-index <n>    Select sheet by index (0-based, Excel only)");
    eprintln!("  --sheet-name <name>  Select sheet by name (Excel only)");
    eprintln!("  --sequential         Process rows on a single thread");
    eprintln!("\nExamples:");
    eprintln!("  {} listings.xlsx captions.txt", program);
    eprintln!("  {} listings.csv captions.json", program);
    eprintln!("  {} listings.xlsx - --sheet-name \"Sheet1\"", program);
    process::exit(1);
}

fn parse_args(args: &[String]) -> Options {
    let program = args.first().map(String::as_str).unwrap_or("listing-caption");
    let mut positional = Vec::new();
    let mut format = None;
    let mut sheet_selector = SheetSelector::First;
    let mut parallel = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --format requires a value");
                    process::exit(1);
                };
                format = Some(OutputFormat::from_name(value).unwrap_or_else(|| {
                    eprintln!("Error: Unknown output format: {}", value);
                    process::exit(1);
                }));
                i += 2;
            }
            "--sheet-index" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --sheet-index requires a value");
                    process::exit(1);
                };
                let index = value.parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid sheet index: {}", value);
                    process::exit(1);
                });
                sheet_selector = SheetSelector::Index(index);
                i += 2;
            }
            "--sheet-name" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --sheet-name requires a value");
                    process::exit(1);
                };
                sheet_selector = SheetSelector::Name(value.clone());
                i += 2;
            }
            "--sequential" => {
                parallel = false;
                i += 1;
            }
            "-h" | "--help" => usage(program),
            arg if arg.starts_with("--") => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            arg => {
                positional.push(arg.to_string());
                i += 1;
            }
        }
    }

    if positional.is_empty() || positional.len() > 2 {
        usage(program);
    }

    let input_path = positional.remove(0);
    let output_path = positional.pop().unwrap_or_else(|| "-".to_string());

    let options = Options {
        input_path,
        output_path,
        format,
        sheet_selector,
        parallel,
    };

    if let Err(msg) = validate_options(&options) {
        eprintln!("Error: {}", msg);
        usage(program);
    }

    options
}

/// XLSXはバイナリのため標準出力には書き出さない
fn validate_options(options: &Options) -> Result<(), String> {
    if options.output_path == "-" && options.format == Some(OutputFormat::Xlsx) {
        return Err("xlsx output cannot be written to stdout; give an output file path".to_string());
    }
    Ok(())
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    match run(&options) {
        Ok(count) => {
            if options.output_path != "-" {
                eprintln!(
                    "Generated {} captions: {} -> {}",
                    count, options.input_path, options.output_path
                );
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn run(options: &Options) -> Result<usize, CaptionError> {
    let to_stdout = options.output_path == "-";
    let format = options
        .format
        .or_else(|| {
            if to_stdout {
                None
            } else {
                OutputFormat::from_path(Path::new(&options.output_path))
            }
        })
        .unwrap_or(OutputFormat::Text);

    let captioner = CaptionerBuilder::new()
        .with_sheet_selector(options.sheet_selector.clone())
        .with_output_format(format)
        .parallel(options.parallel)
        .build()?;

    let batch = captioner.generate_from_path(&options.input_path)?;

    // Rendered in memory first so a failed export never leaves a partial file.
    let mut rendered = Vec::new();
    captioner.export(&batch, &mut rendered)?;

    if to_stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&rendered)?;
        handle.flush()?;
    } else {
        fs::write(&options.output_path, &rendered)?;
    }

    Ok(batch.len())
}

fn handle_error(error: CaptionError) {
    match error {
        CaptionError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        CaptionError::Excel(parse_err) => {
            eprintln!("Excel Error: {}", parse_err);
            eprintln!("The file may not be a valid spreadsheet or may be corrupted.");
        }
        CaptionError::Zip(zip_err) => {
            eprintln!("Archive Error: {}", zip_err);
            eprintln!("The workbook archive appears to be corrupted.");
        }
        CaptionError::Csv(csv_err) => {
            eprintln!("CSV Error: {}", csv_err);
            eprintln!("The file may not be valid comma-separated text.");
        }
        CaptionError::Xlsx(xlsx_err) => {
            eprintln!("XLSX Export Error: {}", xlsx_err);
        }
        CaptionError::Json(json_err) => {
            eprintln!("JSON Export Error: {}", json_err);
        }
        CaptionError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        CaptionError::SheetNotFound(msg) => {
            eprintln!("Sheet Not Found: {}", msg);
            eprintln!("Please check --sheet-index or --sheet-name.");
        }
        CaptionError::EmptyInput => {
            eprintln!("Error: The file has no header row.");
            eprintln!("The first row must contain the column names.");
        }
        CaptionError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates input limits (file size, row count or archive contents).");
        }
    }
}
