//! renderproof
//!
//! A visual regression harness for HTML-to-PDF rendering. Each fixture is
//! rendered to PDF by headless Chrome, rasterized to per-page PNGs with
//! ImageMagick `convert`, optionally diffed against approved reference
//! images with `compare`, and collected into an HTML report.
//!
//! The crate also carries the bootstrap for the legacy demo web server
//! (see [`server`]); the two pieces share nothing beyond the error type.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use renderproof::pipeline::pdf::ChromeRenderer;
//! use renderproof::{pipeline, report, HarnessConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HarnessConfig {
//!     no_compare: true,
//!     ..Default::default()
//! };
//!
//! let mut renderer = ChromeRenderer::new();
//! let result = pipeline::render_file(
//!     &mut renderer,
//!     Path::new("data/source/basic.html"),
//!     &config,
//! )?;
//! let report = report::create_html_file(&[result], &config)?;
//! println!("Report written to {}", report.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod exec;
pub mod pipeline;
pub mod report;
pub mod server;

/// Configuration for one harness run
///
/// Every pipeline stage receives this by reference; there is no process-wide
/// options state. The defaults mirror the CLI defaults, so a default value
/// describes a run from a checkout root.
///
/// # Examples
///
/// ```
/// let cfg = renderproof::HarnessConfig::default();
/// assert_eq!(cfg.output_dir, std::path::PathBuf::from("output"));
/// assert!(!cfg.no_compare);
/// ```
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory containing the HTML source fixtures
    pub source_dir: PathBuf,
    /// Directory for produced artifacts; deleted and recreated at run start
    pub output_dir: PathBuf,
    /// Directory containing approved reference images
    pub ref_dir: PathBuf,
    /// HTML report template containing the title/results tokens
    pub template: PathBuf,
    /// Suppress progress output
    pub quiet: bool,
    /// Skip the reference comparison stage entirely
    pub no_compare: bool,
    /// Path to the ImageMagick `convert` tool
    pub convert_cmd: PathBuf,
    /// Path to the ImageMagick `compare` tool
    pub compare_cmd: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data/source"),
            output_dir: PathBuf::from("output"),
            ref_dir: PathBuf::from("data/reference"),
            template: PathBuf::from("data/template.html"),
            quiet: false,
            no_compare: false,
            convert_cmd: PathBuf::from("/usr/bin/convert"),
            compare_cmd: PathBuf::from("/usr/bin/compare"),
        }
    }
}
