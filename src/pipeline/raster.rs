//! PDF rasterization via the ImageMagick `convert` tool.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::{exec, Error, HarnessConfig, Result};

/// Rasterize every page of `pdf` into the output directory.
///
/// `convert` picks the page file names itself from the `%0d` pattern
/// (`<stem>.page<N>.png`); the produced files are discovered afterwards and
/// ordered by lexical sort, which matches the tool's page numbering.
pub fn convert_to_png(pdf: &Path, config: &HarnessConfig) -> Result<Vec<PathBuf>> {
    if !config.quiet {
        println!("Converting {} to PNG", pdf.display());
    }

    let stem = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| Error::RenderError(format!("PDF has no file name: {}", pdf.display())))?;

    let outfile = config.output_dir.join(format!("{}.page%0d.png", stem));
    exec::exec_cmd(
        config,
        &config.convert_cmd,
        &[
            OsStr::new("-density"),
            OsStr::new("150"),
            pdf.as_os_str(),
            outfile.as_os_str(),
        ],
    )?;

    let prefix = format!("{}.page", stem);
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(&config.output_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(&prefix) && name.ends_with(".png") {
            pages.push(config.output_dir.join(name));
        }
    }
    pages.sort();
    Ok(pages)
}
