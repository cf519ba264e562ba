//! vap-cli - Command-line interface for vapkit
//!
//! Decodes VoiceAttack profiles to XML and simplified JSON, and generates
//! profiles from simplified JSON.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use vapkit::{decode_with_stats, generate_from_json, to_json, to_xml, DecodeOptions};

/// Inputs above this size get a progress bar
const PROGRESS_THRESHOLD: usize = 1024 * 1024;

#[derive(Parser)]
#[command(name = "vap-cli")]
#[command(about = "Decode and generate VoiceAttack voice-command profiles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a profile into XML and simplified JSON
    Decode {
        /// Profile to decode (.vap, binary or XML)
        input: PathBuf,

        /// Base path for the .xml and .json outputs (defaults to the input
        /// path without its extension)
        output_base: Option<PathBuf>,

        /// Print XML to standard output instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Largest inflated profile accepted, in MiB
        #[arg(long, value_name = "MIB", default_value_t = 64)]
        max_size: usize,
    },

    /// Generate a profile from simplified JSON
    Generate {
        /// JSON description of the profile
        input: PathBuf,

        /// Output profile (defaults to the input path with a .vap extension)
        output: Option<PathBuf>,
    },

    /// Show what the decoder finds in a profile
    Info {
        /// Profile to analyze
        input: PathBuf,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // help and version are printed to stdout and are not failures
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Decode {
            input,
            output_base,
            stdout,
            max_size,
        } => {
            let limit = max_size.saturating_mul(1024 * 1024);
            let options = DecodeOptions::with_max_inflated_size(limit);
            decode_file(&input, output_base.as_deref(), stdout, &options, cli.quiet)
        }
        Commands::Generate { input, output } => {
            generate_file(&input, output.as_deref(), cli.quiet).map(|_| ())
        }
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // RUST_LOG, when set, overrides the flags
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
}

fn read_input(input: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }
    Ok(fs::read(input)?)
}

/// `base` with `suffix` appended, keeping any dots already in the name
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

fn progress_bar(size: usize, quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet || size <= PROGRESS_THRESHOLD {
        return None;
    }
    let pb = ProgressBar::new(2);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message);
    Some(pb)
}

fn decode_file(
    input: &Path,
    output_base: Option<&Path>,
    stdout: bool,
    options: &DecodeOptions,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let start_time = Instant::now();

    let progress = progress_bar(data.len(), quiet || stdout, "Decoding...");

    let (profile, stats) =
        decode_with_stats(&data, options).map_err(|e| format!("Decoding failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let xml = to_xml(&profile)?;

    if stdout {
        print!("{}", xml);
        return Ok(());
    }

    let json = to_json(&profile)?;
    let base = output_base
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(""));
    let xml_path = with_suffix(&base, ".xml");
    let json_path = with_suffix(&base, ".json");
    fs::write(&xml_path, xml)?;
    fs::write(&json_path, json)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decoding complete");
    }

    if !quiet {
        println!(
            "Decoded {} commands ({} actions) from '{}'",
            stats.commands,
            stats.actions,
            input.display()
        );
        println!("  Profile: {}", profile.name);
        println!("  XML:     {}", xml_path.display());
        println!("  JSON:    {}", json_path.display());
        println!("  Time:    {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn generate_file(
    input: &Path,
    output: Option<&Path>,
    quiet: bool,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let json = String::from_utf8(data).map_err(|e| format!("Input is not UTF-8: {}", e))?;

    let generated = generate_from_json(&json).map_err(|e| format!("Generation failed: {}", e))?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("vap"));
    fs::write(&output, &generated.xml)?;

    if !quiet {
        println!("Generated: {}", output.display());
        println!("Commands: {}", generated.command_count);
        if !generated.diagnostics.is_empty() {
            println!("Warnings: {}", generated.diagnostics.len());
        }
    }

    Ok(output)
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let format = if vapkit::decode::looks_like_xml(&data) {
        "XML"
    } else {
        "Binary (deflate)"
    };

    println!("Profile File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!("  Format: {}", format);

    match decode_with_stats(&data, &DecodeOptions::default()) {
        Ok((profile, stats)) => {
            if stats.inflated_bytes > 0 {
                println!("  Inflated Size: {} bytes", stats.inflated_bytes);
                println!("  Scanned Strings: {}", stats.scanned_strings);
                println!("  Category Anchors: {}", stats.category_anchors);
            }
            println!("  Profile: {}", profile.name);
            println!("  Id: {}", profile.id);
            println!("  Commands: {}", stats.commands);
            println!("  Actions: {}", stats.actions);
            println!("  Status: ✓ Decoded");

            if verbose {
                for command in &profile.commands {
                    println!(
                        "    {} [{}] {} actions",
                        command.phrase,
                        command.category,
                        command.actions.len()
                    );
                }
            }
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted profile");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
