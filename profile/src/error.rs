use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("extract: line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("extract: no track points found")]
    Empty,

    #[error("extract: need at least two track points, found {found}")]
    TooFewSamples { found: usize },

    #[error("normalize: all samples have identical elevation ({elevation})")]
    DegenerateRange { elevation: f64 },

    #[error("distance: all samples share the same position, total distance is zero")]
    DegenerateDistance,

    #[error("distance: scaled distances overflow to infinity, use a smaller scale")]
    NonFiniteDistance,

    #[error("allocate: invalid target width {0}, must be between 1 and 2147483647")]
    InvalidWidth(u32),

    #[error("allocate: target width {target} is too narrow for this track, every segment truncated to zero")]
    ZeroWidth { target: u32 },

    #[error("map: {widths} segment widths cannot join {samples} samples")]
    SegmentMismatch { widths: usize, samples: usize },

    #[error("map: ground ({ground}) and sky ({sky}) thresholds overflow the canvas height")]
    CanvasHeight { ground: u32, sky: u32 },

    #[error("raster: {0}")]
    Raster(String),
}

impl ProfileError {
    /// Returns `true` when the input simply held no track points.
    ///
    /// This is the one recoverable outcome; callers may choose to
    /// treat it as a no-op rather than a failure.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
