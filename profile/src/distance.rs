//! Horizontal spacing between consecutive samples.
//!
//! Spacing is the flat Euclidean distance in raw degree space, scaled
//! by a constant. It is *not* a geodesic and is not meant to be one:
//! the output only needs to be proportional between segments, and
//! image proportions are tuned against this approximation.

use crate::{
    narrate::{Narrate, Stage},
    track::Sample,
};
use geo::EuclideanDistance;
use itertools::Itertools;

/// Default multiplier applied to degree-space distances.
pub const DEFAULT_SCALE: f64 = 1_000_000.0;

/// Replacement for non-positive or non-finite scales.
pub const MIN_SCALE: f64 = f64::EPSILON;

/// Returns `samples.len() - 1` scaled distances, one per adjacent
/// pair.
pub fn distances<N>(samples: &[Sample], scale: f64, narrator: &mut N) -> Vec<f64>
where
    N: Narrate + ?Sized,
{
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        narrator.narrate(
            Stage::Distance,
            format_args!("scale {scale} is not positive, using {MIN_SCALE}"),
        );
        MIN_SCALE
    };

    samples
        .iter()
        .tuple_windows()
        .map(|(a, b)| {
            let distance = a.point().euclidean_distance(&b.point()) * scale;
            narrator.narrate(Stage::Distance, format_args!("distance: {distance}"));
            distance
        })
        .collect()
}
