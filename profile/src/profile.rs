use crate::{
    allocate::{allocate, Allocation, MAX_WIDTH},
    distance::{distances, DEFAULT_SCALE},
    mapping::{canvas_height, map, DrawPoint},
    narrate::Narrate,
    normalize::{normalize, ElevationRange},
    raster::{render, Canvas, Style},
    track::Sample,
    ProfileError,
};
use log::debug;

/// Default target image width, in pixels.
pub const DEFAULT_WIDTH: u32 = 2560;

/// What to do when a track is degenerate: every sample at the same
/// elevation, or every sample at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Degenerate {
    /// Fail with [`ProfileError::DegenerateRange`] or
    /// [`ProfileError::DegenerateDistance`].
    #[default]
    Reject,

    /// Draw anyway: a flat track is placed at mid height and
    /// coincident samples share the width evenly.
    Fallback,
}

/// Every intermediate result of turning a track into draw points.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Lowest and highest elevation of the track.
    pub range: ElevationRange,

    /// Elevation of each sample scaled to `0..=Z_MAX`.
    pub scaled: Vec<u8>,

    /// Scaled distance between each pair of adjacent samples.
    pub distances: Vec<f64>,

    /// Pixel width given to each pair of adjacent samples.
    pub allocation: Allocation,

    /// Pixel coordinate of each sample.
    pub points: Vec<DrawPoint>,

    /// Height of the canvas, margins included.
    pub canvas_height: u32,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            width: DEFAULT_WIDTH,
            ground: 0,
            sky: 0,
            scale: DEFAULT_SCALE,
            degenerate: Degenerate::Reject,
        }
    }

    /// Width of the canvas: the width actually achieved by allocation.
    pub fn canvas_width(&self) -> u32 {
        self.allocation.achieved
    }

    /// Running sum of `distances`, starting at zero, one entry per
    /// sample.
    pub fn cumulative_distances(&self) -> Vec<f64> {
        std::iter::once(0.0)
            .chain(self.distances.iter().scan(0.0, |total, d| {
                *total += d;
                Some(*total)
            }))
            .collect()
    }

    /// Rasterizes this profile. The returned canvas belongs to the
    /// caller.
    pub fn render<N>(&self, style: &Style, narrator: &mut N) -> Result<Canvas, ProfileError>
    where
        N: Narrate + ?Sized,
    {
        let now = std::time::Instant::now();
        let canvas = render(
            &self.points,
            self.canvas_width(),
            self.canvas_height,
            style,
            narrator,
        )?;
        debug!(
            "render; {}x{}, exec: {:?}",
            self.canvas_width(),
            self.canvas_height,
            now.elapsed()
        );
        Ok(canvas)
    }
}

pub struct ProfileBuilder {
    /// Target image width in pixels (defaults to 2560).
    width: u32,

    /// Margin below the curve in pixels (defaults to 0).
    ground: u32,

    /// Margin above the curve in pixels (defaults to 0).
    sky: u32,

    /// Multiplier applied to degree-space distances (defaults to
    /// 1,000,000).
    scale: f64,

    /// Degenerate track handling (defaults to rejecting).
    degenerate: Degenerate,
}

impl ProfileBuilder {
    /// Target image width in pixels (defaults to 2560). Widths past
    /// [`MAX_WIDTH`] are rejected by `build`.
    #[must_use]
    pub fn width(mut self, pixels: u32) -> Self {
        self.width = pixels;
        self
    }

    /// Margin below the curve in pixels (defaults to 0).
    #[must_use]
    pub fn ground(mut self, pixels: u32) -> Self {
        self.ground = pixels;
        self
    }

    /// Margin above the curve in pixels (defaults to 0).
    #[must_use]
    pub fn sky(mut self, pixels: u32) -> Self {
        self.sky = pixels;
        self
    }

    /// Multiplier applied to degree-space distances (defaults to
    /// 1,000,000). Non-positive values are replaced by a tiny positive
    /// one.
    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Degenerate track handling (defaults to rejecting).
    #[must_use]
    pub fn degenerate(mut self, policy: Degenerate) -> Self {
        self.degenerate = policy;
        self
    }

    pub fn build<N>(&self, samples: &[Sample], narrator: &mut N) -> Result<Profile, ProfileError>
    where
        N: Narrate + ?Sized,
    {
        match samples.len() {
            0 => return Err(ProfileError::Empty),
            1 => return Err(ProfileError::TooFewSamples { found: 1 }),
            _ => (),
        }
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(ProfileError::InvalidWidth(self.width));
        }
        let canvas_height = canvas_height(self.ground, self.sky)?;

        let ((range, scaled), normalize_runtime) = {
            let now = std::time::Instant::now();
            let normalized = normalize(samples, self.degenerate, narrator)?;
            (normalized, now.elapsed())
        };

        let (distances, allocation, allocate_runtime) = {
            let now = std::time::Instant::now();
            let distances = distances(samples, self.scale, narrator);
            let allocation = allocate(&distances, self.width, self.degenerate, narrator)?;
            (distances, allocation, now.elapsed())
        };

        let (points, map_runtime) = {
            let now = std::time::Instant::now();
            let points = map(
                &allocation.widths,
                &scaled,
                self.ground,
                self.sky,
                narrator,
            )?;
            (points, now.elapsed())
        };

        debug!(
            "profile; len: {}, width: {}/{}, normalize_exec: {:?}, allocate_exec: {:?}, map_exec: {:?}",
            samples.len(),
            allocation.achieved,
            allocation.target,
            normalize_runtime,
            allocate_runtime,
            map_runtime
        );

        Ok(Profile {
            range,
            scaled,
            distances,
            allocation,
            points,
            canvas_height,
        })
    }
}
