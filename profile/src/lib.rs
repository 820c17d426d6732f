//! # Elevation profiles
//!
//! `profile` turns a GPS track log into a raster of its elevation
//! profile: cumulative horizontal distance along x, elevation along y,
//! drawn as a filled curve.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`extract`] samples from the log text,
//! 1. [`normalize`] elevations to `0..=Z_MAX`,
//! 1. compute [`distances`] between neighbouring samples,
//! 1. [`allocate`] the target width between them,
//! 1. [`map`] everything to pixel coordinates,
//! 1. [`render`] the canvas.
//!
//! [`Profile::builder`] runs steps 2 through 5 in one go.

mod allocate;
mod distance;
mod error;
mod mapping;
mod math;
pub mod narrate;
mod normalize;
mod profile;
mod raster;
mod track;

pub use crate::{
    allocate::{allocate, Allocation, MAX_WIDTH},
    distance::{distances, DEFAULT_SCALE, MIN_SCALE},
    error::ProfileError,
    mapping::{canvas_height, map, DrawPoint},
    normalize::{normalize, ElevationRange},
    profile::{Degenerate, Profile, ProfileBuilder, DEFAULT_WIDTH},
    raster::{render, Canvas, Style},
    track::{extract, Sample},
};
pub use plotters::style::RGBColor;

/// Scaled elevations span `0..=Z_MAX`.
pub const Z_MAX: u8 = 255;

#[cfg(test)]
fn gpx_dir() -> std::path::PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "..", "data", "gpx"]
        .iter()
        .collect()
}
