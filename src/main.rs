//! Command-line entry point for the rendering harness.
//!
//! Renders one or more HTML fixtures to PDF, rasterizes the pages, compares
//! them against reference images, and writes an HTML report into the output
//! directory. Any rendering or external-tool failure aborts the run with
//! exit code 1.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;

use renderproof::pipeline::pdf::ChromeRenderer;
use renderproof::{pipeline, report, HarnessConfig};

#[derive(Parser, Debug)]
#[command(
    name = "renderproof",
    version,
    about = "Renders HTML source files, converts them to PNG and prepares a \
             result HTML file for comparing the output with an expected result"
)]
struct Cli {
    /// Source files to render; all *.html in the source directory when empty
    files: Vec<String>,

    /// Directory containing the HTML source files
    #[arg(short = 's', long, default_value = "data/source")]
    source_dir: PathBuf,

    /// Directory for output files. CAREFUL: deleted and recreated each run
    #[arg(short = 'o', long, default_value = "output")]
    output_dir: PathBuf,

    /// Directory containing the reference images to compare against
    #[arg(short = 'r', long, default_value = "data/reference")]
    ref_dir: PathBuf,

    /// HTML template file for the report
    #[arg(short = 't', long, default_value = "data/template.html")]
    template: PathBuf,

    /// Try to be quiet
    #[arg(short, long)]
    quiet: bool,

    /// Do not compare with reference images, only render to PNG
    #[arg(long)]
    no_compare: bool,

    /// Path to the ImageMagick "convert" tool
    #[arg(long, default_value = "/usr/bin/convert")]
    convert_cmd: PathBuf,

    /// Path to the ImageMagick "compare" tool
    #[arg(long, default_value = "/usr/bin/compare")]
    compare_cmd: PathBuf,
}

impl Cli {
    fn into_config(self) -> (HarnessConfig, Vec<String>) {
        let files = self.files;
        let config = HarnessConfig {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ref_dir: self.ref_dir,
            template: self.template,
            quiet: self.quiet,
            no_compare: self.no_compare,
            convert_cmd: self.convert_cmd,
            compare_cmd: self.compare_cmd,
        };
        (config, files)
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, file_args) = cli.into_config();

    if config.output_dir.is_dir() {
        fs::remove_dir_all(&config.output_dir).with_context(|| {
            format!("removing old output directory {}", config.output_dir.display())
        })?;
    }
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("creating output directory {}", config.output_dir.display())
    })?;

    let files = select_files(&config, &file_args)?;

    let mut renderer = ChromeRenderer::new();
    let mut results = Vec::with_capacity(files.len());
    for file in &files {
        results.push(pipeline::render_file(&mut renderer, file, &config)?);
    }

    let htmlfile = report::create_html_file(&results, &config)?;

    if !config.quiet {
        let num = results.len();
        println!("Rendered {} file{}", num, if num == 1 { "" } else { "s" });
        println!("Check {} for results", htmlfile.display());
    }
    Ok(())
}

/// Explicit arguments resolve against the source directory, in the given
/// order; no arguments means every `*.html` in the source directory, sorted.
fn select_files(config: &HarnessConfig, file_args: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    if !file_args.is_empty() {
        return Ok(file_args
            .iter()
            .map(|f| config.source_dir.join(f))
            .collect());
    }

    let entries = fs::read_dir(&config.source_dir).with_context(|| {
        format!("reading source directory {}", config.source_dir.display())
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "html") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
