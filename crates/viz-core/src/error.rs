use thiserror::Error;

/// Setup-time failures. The core performs no I/O, so nothing here is
/// recoverable or retried; every variant indicates a misconfiguration that
/// should surface before the first frame.
#[derive(Debug, Error)]
pub enum VizError {
    /// The resampling stride left fewer than two distinct control points, so
    /// no curve can be fit through them.
    #[error("degenerate curve: only {0} control point(s) sampled (stride too large for trajectory)")]
    DegenerateCurve(usize),

    /// The host page does not contain the requested container element.
    #[error("container element `{0}` not found")]
    MissingContainer(String),
}
