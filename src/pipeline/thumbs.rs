//! Thumbnail generation via `convert -resize`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::{exec, HarnessConfig, Result};

/// Create the `<stem>.thumb.<ext>` variant next to `image`.
pub fn create_thumbnail(image: &Path, config: &HarnessConfig) -> Result<PathBuf> {
    let thumbfile = super::tag_path(image, "thumb");
    if !config.quiet {
        println!("Creating thumbnail of {}", image.display());
    }
    exec::exec_cmd(
        config,
        &config.convert_cmd,
        &[
            OsStr::new("-resize"),
            OsStr::new("20%"),
            image.as_os_str(),
            thumbfile.as_os_str(),
        ],
    )?;
    Ok(thumbfile)
}
