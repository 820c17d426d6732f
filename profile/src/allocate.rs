use crate::{
    narrate::{Narrate, Stage},
    Degenerate, ProfileError,
};

/// Widest image that still fits pixel coordinates in an `i32`.
pub const MAX_WIDTH: u32 = i32::MAX.unsigned_abs();

/// Pixel widths handed out to each segment of a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// One width per segment (`samples.len() - 1`).
    pub widths: Vec<u32>,

    /// Sum of `widths`, never more than `target`.
    pub achieved: u32,

    /// Requested image width.
    pub target: u32,
}

impl Allocation {
    /// Pixels lost to per-segment truncation.
    pub fn lost(&self) -> u32 {
        self.target - self.achieved
    }
}

/// Splits `target` pixels between segments in proportion to their
/// distance.
pub fn allocate<N>(
    distances: &[f64],
    target: u32,
    policy: Degenerate,
    narrator: &mut N,
) -> Result<Allocation, ProfileError>
where
    N: Narrate + ?Sized,
{
    if target == 0 || target > MAX_WIDTH {
        return Err(ProfileError::InvalidWidth(target));
    }

    let total: f64 = distances.iter().sum();
    narrator.narrate(Stage::Allocate, format_args!("total distance: {total}"));
    if !total.is_finite() {
        return Err(ProfileError::NonFiniteDistance);
    }

    let mut widths: Vec<u32> = if total > 0.0 {
        distances
            .iter()
            .map(|distance| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let width = (distance / total * f64::from(target)).floor() as u32;
                width
            })
            .collect()
    } else {
        match (policy, u32::try_from(distances.len())) {
            (Degenerate::Fallback, Ok(segments)) if segments > 0 => {
                narrator.narrate(
                    Stage::Allocate,
                    format_args!("zero total distance, splitting width evenly"),
                );
                vec![target / segments; distances.len()]
            }
            _ => return Err(ProfileError::DegenerateDistance),
        }
    };

    // Float rounding can push the sum of floors one pixel past the
    // target; trim from the widest segment.
    let mut achieved: u32 = widths.iter().sum();
    while achieved > target {
        if let Some(widest) = widths.iter_mut().max() {
            *widest -= 1;
        }
        achieved -= 1;
    }

    for width in &widths {
        narrator.narrate(Stage::Allocate, format_args!("width: {width}"));
    }

    if achieved == 0 {
        return Err(ProfileError::ZeroWidth { target });
    }

    let allocation = Allocation {
        widths,
        achieved,
        target,
    };
    narrator.narrate(
        Stage::Allocate,
        format_args!(
            "target width: {target}, achieved width: {achieved}, precision lost in pixels: {}",
            allocation.lost()
        ),
    );
    Ok(allocation)
}

#[cfg(test)]
mod tests {
    use super::{allocate, Allocation, MAX_WIDTH};
    use crate::{
        narrate::{Recorder, Silent, Stage},
        Degenerate, ProfileError,
    };

    #[test]
    fn test_even_split() {
        let allocation = allocate(
            &[1_000_000.0, 1_000_000.0],
            1000,
            Degenerate::Reject,
            &mut Silent,
        )
        .unwrap();
        assert_eq!(
            allocation,
            Allocation {
                widths: vec![500, 500],
                achieved: 1000,
                target: 1000,
            }
        );
        assert_eq!(allocation.lost(), 0);
    }

    #[test]
    fn test_single_segment_takes_everything() {
        let allocation = allocate(&[42.0], 100, Degenerate::Reject, &mut Silent).unwrap();
        assert_eq!(allocation.widths, [100]);
        assert_eq!(allocation.achieved, 100);
    }

    #[test]
    fn test_truncation_is_reported() {
        let mut rec = Recorder::new();
        let allocation = allocate(&[1.0, 1.0, 1.0], 100, Degenerate::Reject, &mut rec).unwrap();
        assert_eq!(allocation.widths, [33, 33, 33]);
        assert_eq!(allocation.achieved, 99);
        assert_eq!(allocation.lost(), 1);
        assert!(rec
            .stage(Stage::Allocate)
            .any(|line| line.ends_with("precision lost in pixels: 1")));
    }

    #[test]
    fn test_achieved_never_exceeds_target() {
        let distances: Vec<f64> = (1..200).map(|i| f64::from(i).sqrt() * 13.7).collect();
        for target in [1, 7, 199, 640, 2560, 10_000] {
            match allocate(&distances, target, Degenerate::Reject, &mut Silent) {
                Ok(allocation) => {
                    assert!(allocation.achieved <= target);
                    assert_eq!(allocation.widths.iter().sum::<u32>(), allocation.achieved);
                }
                Err(ProfileError::ZeroWidth { target: t }) => assert_eq!(t, target),
                Err(e) => panic!("unexpected error {e}"),
            }
        }
    }

    #[test]
    fn test_zero_target() {
        assert!(matches!(
            allocate(&[1.0], 0, Degenerate::Fallback, &mut Silent),
            Err(ProfileError::InvalidWidth(0))
        ));
    }

    #[test]
    fn test_target_wider_than_pixel_space() {
        assert!(matches!(
            allocate(&[1.0, 1.0], MAX_WIDTH + 1, Degenerate::Reject, &mut Silent),
            Err(ProfileError::InvalidWidth(w)) if w == MAX_WIDTH + 1
        ));
        let allocation = allocate(&[1.0], MAX_WIDTH, Degenerate::Reject, &mut Silent).unwrap();
        assert_eq!(allocation.achieved, MAX_WIDTH);
    }

    #[test]
    fn test_infinite_distance() {
        let err = allocate(&[f64::INFINITY, 1.0], 1000, Degenerate::Fallback, &mut Silent)
            .unwrap_err();
        assert!(matches!(err, ProfileError::NonFiniteDistance));
        assert!(err.to_string().starts_with("distance: "));
    }

    #[test]
    fn test_too_narrow() {
        assert!(matches!(
            allocate(&[1.0; 10], 5, Degenerate::Reject, &mut Silent),
            Err(ProfileError::ZeroWidth { target: 5 })
        ));
    }

    #[test]
    fn test_coincident_points() {
        assert!(matches!(
            allocate(&[0.0, 0.0, 0.0], 100, Degenerate::Reject, &mut Silent),
            Err(ProfileError::DegenerateDistance)
        ));

        let allocation = allocate(&[0.0, 0.0, 0.0], 100, Degenerate::Fallback, &mut Silent).unwrap();
        assert_eq!(allocation.widths, [33, 33, 33]);
        assert_eq!(allocation.achieved, 99);

        assert!(matches!(
            allocate(&[], 100, Degenerate::Fallback, &mut Silent),
            Err(ProfileError::DegenerateDistance)
        ));
    }
}
