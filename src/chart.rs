use std::path::{Path, PathBuf};

use crate::error::{Result, RevenueError};
use crate::month::MonthKey;

/// Availability of the drawing backend.
///
/// Rendering is compiled in behind the `plot` cargo feature; a build
/// without it can still aggregate and print, but not draw. The renderer
/// takes its backend as an explicit capability so both states can be
/// tested without rebuilding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Backend {
    Available,
    Unavailable,
}

impl Backend {
    /// Reports whether this build carries the drawing backend.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(feature = "plot") {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

/// What a render call produced.
#[derive(Debug, PartialEq)]
pub enum RenderOutcome {
    /// The series was empty, so there was nothing to draw. No file was
    /// touched; callers should report the absence of data instead.
    NoData,
    /// A chart was drawn, saved to `saved` when a path was given, and
    /// handed to the system image viewer when `shown`.
    Rendered {
        saved: Option<PathBuf>,
        shown: bool,
    },
}

/// Draws monthly revenue totals as a bar chart.
///
/// ```
/// use revenue::{ChartRenderer, RenderOutcome};
///
/// let renderer = ChartRenderer::new();
/// let outcome = renderer.render(&[], None, false, "revenue")?;
/// assert_eq!(outcome, RenderOutcome::NoData);
/// # Ok::<(), revenue::RevenueError>(())
/// ```
#[derive(Debug)]
pub struct ChartRenderer {
    backend: Backend,
}

impl ChartRenderer {
    /// Creates a renderer using whatever backend this build carries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: Backend::detect(),
        }
    }

    /// Creates a renderer with the given backend capability. Intended for
    /// callers (and tests) that need to exercise the unavailable path.
    #[must_use]
    pub fn with_backend(backend: Backend) -> Self {
        Self { backend }
    }

    /// Reports whether this renderer can draw at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend == Backend::Available
    }

    /// Draws one bar per `(month, total)` pair, in series order.
    ///
    /// The chart is saved to `output` when given (a PNG raster; with no
    /// path the image goes to a temporary file, which is only useful
    /// together with `show`). With `show`, the saved image is handed to
    /// the platform viewer; the call blocks until the viewer is dismissed
    /// where the launcher can express that (macOS, Windows), and until
    /// the launcher hands off elsewhere.
    ///
    /// An empty series is a no-op, reported as [`RenderOutcome::NoData`]
    /// before anything else is checked or touched.
    ///
    /// # Errors
    ///
    /// Returns [`RevenueError::RenderUnavailable`] when the backend is
    /// missing (checked before any draw call), and [`RevenueError::Render`]
    /// if drawing or saving fails.
    pub fn render(
        &self,
        series: &[(MonthKey, f64)],
        output: Option<&Path>,
        show: bool,
        title: &str,
    ) -> Result<RenderOutcome> {
        if series.is_empty() {
            return Ok(RenderOutcome::NoData);
        }
        if !self.is_available() {
            return Err(RevenueError::RenderUnavailable);
        }
        draw(series, output, show, title)
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "plot")]
fn draw(
    series: &[(MonthKey, f64)],
    output: Option<&Path>,
    show: bool,
    title: &str,
) -> Result<RenderOutcome> {
    use plotters::prelude::*;
    use plotters::style::FontTransform;

    fn render_err<E: std::fmt::Display>(err: E) -> RevenueError {
        RevenueError::Render(err.to_string())
    }

    // With no output path the image is only useful to a viewer; the temp
    // file must outlive the viewer hand-off below.
    let temp;
    let target: &Path = match output {
        Some(path) => path,
        None => {
            temp = tempfile::Builder::new().suffix(".png").tempfile()?;
            temp.path()
        }
    };

    {
        let root = BitMapBackend::new(target, (1024, 512)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let top = series.iter().map(|(_, total)| *total).fold(0.0_f64, f64::max);
        let y_max = if top > 0.0 { top * 1.1 } else { 1.0 };
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(72)
            .y_label_area_size(80)
            .build_cartesian_2d(0..series.len(), 0.0..y_max)
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(series.len())
            .x_label_formatter(&|index| {
                series
                    .get(*index)
                    .map(|(month, _)| month.to_string())
                    .unwrap_or_default()
            })
            .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
            .x_desc("Month")
            .y_desc("Revenue")
            .draw()
            .map_err(render_err)?;
        chart
            .draw_series(series.iter().enumerate().map(|(index, (_, total))| {
                Rectangle::new([(index, 0.0), (index + 1, *total)], BLUE.filled())
            }))
            .map_err(render_err)?;
        root.present().map_err(render_err)?;
    }
    log::debug!("chart written to {}", target.display());

    if show {
        open_viewer(target)?;
    }
    Ok(RenderOutcome::Rendered {
        saved: output.map(Path::to_path_buf),
        shown: show,
    })
}

#[cfg(not(feature = "plot"))]
fn draw(
    _series: &[(MonthKey, f64)],
    _output: Option<&Path>,
    _show: bool,
    _title: &str,
) -> Result<RenderOutcome> {
    Err(RevenueError::RenderUnavailable)
}

/// Hands `path` to the platform image viewer.
///
/// `open -W` and `start /WAIT` block until the viewer is dismissed;
/// `xdg-open` has no waiting mode, so on other unixes the call returns
/// once the launcher has handed the file off.
#[cfg(feature = "plot")]
fn open_viewer(path: &Path) -> Result<()> {
    use std::process::Command;

    let mut command = if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg("-W").arg(path);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "/WAIT", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    };
    let status = command
        .status()
        .map_err(|err| RevenueError::Render(format!("could not launch image viewer: {err}")))?;
    if !status.success() {
        log::warn!("image viewer launcher exited with {status}");
    }
    Ok(())
}
