use crate::{
    narrate::{Narrate, Stage},
    track::Sample,
    Degenerate, ProfileError, Z_MAX,
};

/// Lowest and highest elevation of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    pub min: f64,
    pub max: f64,
}

impl ElevationRange {
    /// Returns the range of `samples` in a single pass, or `None` if
    /// there are no samples.
    pub fn of(samples: &[Sample]) -> Option<Self> {
        let (first, rest) = samples.split_first()?;
        let init = Self {
            min: first.elevation,
            max: first.elevation,
        };
        Some(rest.iter().fold(init, |range, sample| Self {
            min: range.min.min(sample.elevation),
            max: range.max.max(sample.elevation),
        }))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` when every sample has the same elevation.
    pub fn is_flat(&self) -> bool {
        self.max <= self.min
    }
}

/// Shifts elevations to a zero base and scales them to `0..=Z_MAX`.
///
/// Returns the track's elevation range alongside one scaled value per
/// sample.
pub fn normalize<N>(
    samples: &[Sample],
    policy: Degenerate,
    narrator: &mut N,
) -> Result<(ElevationRange, Vec<u8>), ProfileError>
where
    N: Narrate + ?Sized,
{
    let range = ElevationRange::of(samples).ok_or(ProfileError::Empty)?;
    narrator.narrate(
        Stage::Normalize,
        format_args!("min ele: {}, max ele: {}", range.min, range.max),
    );

    if range.is_flat() {
        return match policy {
            Degenerate::Reject => Err(ProfileError::DegenerateRange {
                elevation: range.min,
            }),
            Degenerate::Fallback => {
                let midpoint = Z_MAX / 2;
                narrator.narrate(
                    Stage::Normalize,
                    format_args!("flat track, every sample placed at {midpoint}"),
                );
                Ok((range, vec![midpoint; samples.len()]))
            }
        };
    }

    let span = range.span();
    let scaled = samples
        .iter()
        .map(|sample| {
            let adjusted = sample.elevation - range.min;
            narrator.narrate(Stage::Normalize, format_args!("adjusted: {adjusted}"));
            // `adjusted <= span`, so the cast never saturates.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let scaled = (adjusted / span * f64::from(Z_MAX)).floor() as u8;
            narrator.narrate(Stage::Normalize, format_args!("scaled: {scaled}"));
            scaled
        })
        .collect();

    Ok((range, scaled))
}
