//! Reference comparison: copy the approved image and produce a diff.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::{exec, HarnessConfig, Result};

use super::{tag_path, thumbs, PageArtifacts};

/// Compare one rasterized page against its approved reference image,
/// filling in the reference and diff artifact slots.
///
/// A page without a reference image is skipped with a warning; the run
/// continues. Everything else that goes wrong here is fatal.
pub fn compare_page(page: &mut PageArtifacts, config: &HarnessConfig) -> Result<()> {
    let name = match page.png.file_name() {
        Some(name) => name.to_os_string(),
        None => return Ok(()),
    };

    let refsrc = config.ref_dir.join(&name);
    if !refsrc.is_file() {
        warn!("Reference image for {} not found!", page.png.display());
        return Ok(());
    }

    let reference = copy_ref_image(&refsrc, config)?;
    let ref_thumb = thumbs::create_thumbnail(&reference, config)?;
    let diff = create_diff_image(&page.png, &reference, config)?;
    let diff_thumb = thumbs::create_thumbnail(&diff, config)?;

    page.reference = Some(reference);
    page.ref_thumb = Some(ref_thumb);
    page.diff = Some(diff);
    page.diff_thumb = Some(diff_thumb);
    Ok(())
}

/// Copy the reference image into the output directory as `<stem>.ref.<ext>`.
fn copy_ref_image(refsrc: &Path, config: &HarnessConfig) -> Result<PathBuf> {
    if !config.quiet {
        println!("Copying reference image {}", refsrc.display());
    }
    let dstname = tag_path(
        Path::new(refsrc.file_name().unwrap_or_else(|| OsStr::new(""))),
        "ref",
    );
    let dstfile = config.output_dir.join(dstname);
    fs::copy(refsrc, &dstfile)?;
    Ok(dstfile)
}

/// Run `compare` over the rendered page and the reference copy, producing
/// `<stem>.diff.<ext>`.
fn create_diff_image(png: &Path, reference: &Path, config: &HarnessConfig) -> Result<PathBuf> {
    if !config.quiet {
        println!(
            "Creating difference image for {} and {}",
            png.display(),
            reference.display()
        );
    }
    let outfile = tag_path(png, "diff");
    exec::exec_cmd(
        config,
        &config.compare_cmd,
        &[
            png.as_os_str(),
            reference.as_os_str(),
            OsStr::new("-lowlight-color"),
            OsStr::new("white"),
            outfile.as_os_str(),
        ],
    )?;
    Ok(outfile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_leaves_page_untouched() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let config = HarnessConfig {
            ref_dir: tmp.path().join("reference"),
            output_dir: tmp.path().join("out"),
            quiet: true,
            ..Default::default()
        };

        let mut page = PageArtifacts {
            png: tmp.path().join("out/a.page0.png"),
            png_thumb: tmp.path().join("out/a.page0.thumb.png"),
            ..Default::default()
        };

        compare_page(&mut page, &config).expect("missing reference is not fatal");
        assert!(page.reference.is_none());
        assert!(page.ref_thumb.is_none());
        assert!(page.diff.is_none());
        assert!(page.diff_thumb.is_none());
    }
}
