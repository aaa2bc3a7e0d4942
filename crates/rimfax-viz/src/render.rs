//! External toolchain pipeline: LaTeX source to PDF to PNG.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rimfax_ir::Circuit;
use tracing::{debug, instrument};

use crate::error::{VizError, VizResult};
use crate::latex::latex_source;

/// Options controlling diagram generation and rasterization.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Basis to rewrite the circuit into before drawing. `None` draws
    /// gates exactly as they appear in the circuit.
    pub basis: Option<String>,
    /// Rasterization resolution in dots per inch.
    pub dpi: u32,
    /// Horizontal spacing between diagram columns, in em.
    pub column_spacing: f64,
    /// Vertical spacing between diagram rows, in em.
    pub row_spacing: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            basis: Some("u1,u2,u3,cx".to_string()),
            dpi: 150,
            column_spacing: 1.0,
            row_spacing: 0.5,
        }
    }
}

/// Render a circuit diagram to a PNG file.
///
/// Writes the LaTeX source into a temporary directory, compiles it with
/// `pdflatex`, rasterizes the PDF with `pdftoppm`, and copies the image
/// to `dest`. The temporary directory is removed afterwards. Both tools
/// must be on the PATH; `pdflatex` also needs the `qcircuit` package.
#[instrument(skip(circuit, dest, options), fields(circuit = circuit.name(), dpi = options.dpi))]
pub fn render_png(circuit: &Circuit, dest: &Path, options: &RenderOptions) -> VizResult<PathBuf> {
    let source = latex_source(circuit, options)?;

    let workdir = tempfile::tempdir()?;
    let tex_path = workdir.path().join("circuit.tex");
    std::fs::write(&tex_path, source)?;

    run_pdflatex(workdir.path(), &tex_path)?;
    let pdf_path = workdir.path().join("circuit.pdf");
    if !pdf_path.is_file() {
        return Err(VizError::MissingOutput(pdf_path));
    }

    run_pdftoppm(&pdf_path, &workdir.path().join("circuit"), options.dpi)?;
    let png_path = workdir.path().join("circuit.png");
    if !png_path.is_file() {
        return Err(VizError::MissingOutput(png_path));
    }

    std::fs::copy(&png_path, dest)?;
    debug!(dest = %dest.display(), "diagram written");
    Ok(dest.to_path_buf())
}

fn run_pdflatex(output_dir: &Path, tex_path: &Path) -> VizResult<()> {
    debug!(tex = %tex_path.display(), "running pdflatex");
    let output = Command::new("pdflatex")
        .arg("-interaction=nonstopmode")
        .arg("-halt-on-error")
        .arg("-output-directory")
        .arg(output_dir)
        .arg(tex_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error("pdflatex", e))?;

    if !output.status.success() {
        // pdflatex reports errors on stdout.
        return Err(VizError::LatexFailed(tail(&output.stdout, 20)));
    }
    Ok(())
}

fn run_pdftoppm(pdf_path: &Path, prefix: &Path, dpi: u32) -> VizResult<()> {
    debug!(pdf = %pdf_path.display(), dpi, "running pdftoppm");
    let output = Command::new("pdftoppm")
        .arg("-png")
        .arg("-r")
        .arg(dpi.to_string())
        .arg("-singlefile")
        .arg(pdf_path)
        .arg(prefix)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error("pdftoppm", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VizError::RasterizeFailed(stderr.trim().to_string()));
    }
    Ok(())
}

fn spawn_error(command: &str, err: std::io::Error) -> VizError {
    if err.kind() == std::io::ErrorKind::NotFound {
        VizError::ToolNotFound(command.to_string())
    } else {
        VizError::Io(err)
    }
}

/// Last `lines` lines of a tool's output, lossily decoded.
fn tail(bytes: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}
