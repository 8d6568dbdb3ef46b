//! HTML to PDF rendering via headless Chrome.
//!
//! The `PdfRenderer` trait is the seam between the pipeline and the actual
//! renderer, so tests can substitute a stub backend. The production
//! implementation drives a headless Chrome instance over the DevTools
//! protocol and prints each fixture through `Page.printToPDF`.

use std::fs;
use std::path::{Path, PathBuf};

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use crate::{Error, HarnessConfig, Result};

/// Backend that turns one HTML source file into a PDF file.
pub trait PdfRenderer {
    /// Render `source` and write the resulting PDF to `dest`.
    fn render(&mut self, source: &Path, dest: &Path) -> Result<()>;
}

/// Production backend driving a headless Chrome instance.
///
/// The browser is launched lazily on the first fixture and reused for the
/// rest of the batch. A run that renders nothing never launches Chrome.
pub struct ChromeRenderer {
    browser: Option<Browser>,
}

impl ChromeRenderer {
    /// Create the backend without launching the browser yet.
    pub fn new() -> Self {
        Self { browser: None }
    }

    fn browser(&mut self) -> Result<&Browser> {
        if self.browser.is_none() {
            let launch_options = LaunchOptions::default_builder()
                .headless(true)
                .build()
                .map_err(|e| {
                    Error::InitializationError(format!("Failed to build launch options: {}", e))
                })?;

            let browser = Browser::new(launch_options).map_err(|e| {
                Error::InitializationError(format!("Failed to launch browser: {}", e))
            })?;

            self.browser = Some(browser);
        }

        self.browser
            .as_ref()
            .ok_or_else(|| Error::InitializationError("Browser unavailable".into()))
    }
}

impl Default for ChromeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRenderer for ChromeRenderer {
    fn render(&mut self, source: &Path, dest: &Path) -> Result<()> {
        // file:// navigation needs an absolute path
        let source = fs::canonicalize(source)?;
        let url = format!("file://{}", source.display());

        let browser = self.browser()?;
        let tab = browser
            .new_tab()
            .map_err(|e| Error::RenderError(format!("Failed to open tab: {}", e)))?;

        tab.navigate_to(&url)
            .map_err(|e| Error::RenderError(format!("Navigation failed: {}", e)))?;
        tab.wait_until_navigated()
            .map_err(|e| Error::RenderError(format!("Wait for navigation failed: {}", e)))?;

        let options = PrintToPdfOptions {
            print_background: Some(true),
            ..Default::default()
        };
        let pdf = tab
            .print_to_pdf(Some(options))
            .map_err(|e| Error::RenderError(format!("PDF print failed: {}", e)))?;

        fs::write(dest, pdf)?;

        let _ = tab.close(true);
        Ok(())
    }
}

/// Render one fixture to `<output>/<stem>.pdf`.
///
/// A renderer-reported failure is fatal for the whole run.
pub fn render_pdf(
    renderer: &mut dyn PdfRenderer,
    source: &Path,
    config: &HarnessConfig,
) -> Result<PathBuf> {
    if !config.quiet {
        println!("Rendering {}", source.display());
    }

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| Error::RenderError(format!("Source has no file name: {}", source.display())))?;

    let outfile = config.output_dir.join(format!("{}.pdf", stem));
    renderer.render(source, &outfile).map_err(|e| match e {
        Error::RenderError(msg) => {
            Error::RenderError(format!("{}: {}", source.display(), msg))
        }
        other => other,
    })?;
    Ok(outfile)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingRenderer;

    impl PdfRenderer for FailingRenderer {
        fn render(&mut self, source: &Path, _dest: &Path) -> Result<()> {
            Err(Error::RenderError(format!("boom: {}", source.display())))
        }
    }

    #[test]
    fn render_pdf_names_output_after_source_stem() {
        struct Capture(Option<PathBuf>);

        impl PdfRenderer for Capture {
            fn render(&mut self, _source: &Path, dest: &Path) -> Result<()> {
                self.0 = Some(dest.to_path_buf());
                Ok(())
            }
        }

        let config = HarnessConfig {
            quiet: true,
            ..Default::default()
        };
        let mut renderer = Capture(None);
        let pdf = render_pdf(&mut renderer, Path::new("data/source/basic.html"), &config)
            .expect("render should succeed");
        assert_eq!(pdf, PathBuf::from("output/basic.pdf"));
        assert_eq!(renderer.0, Some(pdf));
    }

    #[test]
    fn renderer_failure_is_propagated() {
        let config = HarnessConfig {
            quiet: true,
            ..Default::default()
        };
        let err = render_pdf(&mut FailingRenderer, Path::new("a.html"), &config)
            .expect_err("failure should propagate");
        assert!(matches!(err, Error::RenderError(_)));
    }
}
