//! imgs2pdf CLI tool
//!
//! Prompts for image paths and an output name, then writes one PDF whose
//! pages are all sized to the largest image width and height.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use imgs2pdf::convert::{create_pdf, ConvertOptions, DEFAULT_OUTPUT_DIR};
use imgs2pdf::input::{
    normalize_output_name, print_name_prompt, print_path_instructions, read_image_paths,
    read_output_name,
};

/// imgs2pdf - Combine images into one PDF sized to the largest image
#[derive(Parser)]
#[command(name = "imgs2pdf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Image paths and the PDF name are read interactively from standard input.
Paste one path per line (quotes are fine) and finish with an empty line.")]
struct Cli {
    /// Directory the PDF is written into (created if missing)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Show per-image details while converting
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Plain messages on stderr at `info`; RUST_LOG overrides the default, `-v` overrides both
fn init_logging(verbose: bool) {
    logger_builder(env_logger::Env::default().default_filter_or("info"), verbose).init();
}

fn logger_builder(env: env_logger::Env, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    builder
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    print_path_instructions(&mut stdout)?;
    let image_paths = read_image_paths(&mut input).context("reading image paths")?;

    if image_paths.is_empty() {
        eprintln!("No image paths provided. Exiting.");
        return Ok(());
    }

    print_name_prompt(&mut stdout)?;
    let output_name = normalize_output_name(&read_output_name(&mut input)?);
    println!();

    let options = ConvertOptions {
        image_paths: image_paths.into_iter().map(PathBuf::from).collect(),
        output_dir: cli.output_dir,
        output_name,
    };

    let report = create_pdf(&options)
        .with_context(|| format!("creating {}", options.output_path().display()))?;

    println!("Successfully created PDF: {}", report.output_path.display());
    log::debug!(
        "{} page(s) at {:.1} x {:.1} mm, {} input(s) skipped",
        report.page_count,
        report.page_size.width_length().mm(),
        report.page_size.height_length().mm(),
        report.skipped,
    );

    Ok(())
}
