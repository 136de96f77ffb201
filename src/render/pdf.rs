//! HTML to PDF rasterization through an external renderer.
//!
//! The HTML is written to a temporary file, the renderer binary is run on it,
//! and the produced PDF is read back. Temporary files are removed when the
//! call returns, whether it succeeded or not.

use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Converts an HTML document into PDF bytes.
pub trait Rasterizer: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Render `html` to a PDF.
    fn rasterize(&self, html: &str) -> Result<Vec<u8>>;
}

/// Options for HTML to PDF rasterization.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Renderer binary (looked up on PATH when not absolute)
    pub binary: PathBuf,

    /// Output resolution
    pub dpi: u32,

    /// Top and bottom page margins
    pub margin_vertical: String,

    /// Left and right page margins
    pub margin_horizontal: String,
}

impl RasterOptions {
    /// Create new raster options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the renderer binary.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the output resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set page margins.
    pub fn with_margins(
        mut self,
        vertical: impl Into<String>,
        horizontal: impl Into<String>,
    ) -> Self {
        self.margin_vertical = vertical.into();
        self.margin_horizontal = horizontal.into();
        self
    }

    /// Build the wkhtmltopdf rasterizer these options describe.
    ///
    /// Other renderers plug in through [`Rasterizer`] directly.
    pub fn rasterizer(&self) -> Box<dyn Rasterizer> {
        Box::new(WkhtmltopdfRasterizer::new(self.clone()))
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("wkhtmltopdf"),
            dpi: 300,
            margin_vertical: "24mm".to_string(),
            margin_horizontal: "18mm".to_string(),
        }
    }
}

/// Rasterizer backed by the `wkhtmltopdf` command-line tool.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfRasterizer {
    options: RasterOptions,
}

impl WkhtmltopdfRasterizer {
    /// Create a new wkhtmltopdf rasterizer.
    pub fn new(options: RasterOptions) -> Self {
        Self { options }
    }

    /// Check if the binary can be run.
    pub fn is_available(&self) -> bool {
        Command::new(&self.options.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn arguments(&self) -> Vec<OsString> {
        let o = &self.options;
        let mut args: Vec<OsString> = [
            "--quiet",
            "--disable-smart-shrinking",
            "--enable-local-file-access",
            "--print-media-type",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        args.push("--dpi".into());
        args.push(o.dpi.to_string().into());
        for (flag, value) in [
            ("--margin-top", &o.margin_vertical),
            ("--margin-bottom", &o.margin_vertical),
            ("--margin-left", &o.margin_horizontal),
            ("--margin-right", &o.margin_horizontal),
        ] {
            args.push(flag.into());
            args.push(value.into());
        }
        args
    }
}

impl Rasterizer for WkhtmltopdfRasterizer {
    fn name(&self) -> &str {
        "wkhtmltopdf"
    }

    fn rasterize(&self, html: &str) -> Result<Vec<u8>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("document.html");
        let output = dir.path().join("document.pdf");

        let mut file = std::fs::File::create(&input)?;
        file.write_all(html.as_bytes())?;
        file.flush()?;
        drop(file);

        log::debug!(
            "Running {} on {} bytes of HTML",
            self.options.binary.display(),
            html.len()
        );

        let result = Command::new(&self.options.binary)
            .args(self.arguments())
            .arg(&input)
            .arg(&output)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        let result = match result {
            Ok(result) => result,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::RasterizerUnavailable(format!(
                    "{} not found; install wkhtmltopdf or pass its path",
                    self.options.binary.display()
                )));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Rasterize(format!(
                "{} exited with {}: {}",
                self.name(),
                result.status,
                stderr.trim()
            )));
        }

        let pdf = std::fs::read(&output).map_err(|e| {
            Error::Rasterize(format!("{} produced no output: {}", self.name(), e))
        })?;
        log::debug!("Rasterized {} bytes of PDF", pdf.len());
        Ok(pdf)
    }
}
