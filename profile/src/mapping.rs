use crate::{
    narrate::{Narrate, Stage},
    ProfileError, Z_MAX,
};

/// Final pixel coordinate of one sample. Row 0 is the top of the
/// canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawPoint {
    pub x: i32,
    pub y: i32,
}

impl From<DrawPoint> for (i32, i32) {
    fn from(DrawPoint { x, y }: DrawPoint) -> Self {
        (x, y)
    }
}

/// Returns the canvas height reserved for the plot and both margins:
/// `Z_MAX + 1 + ground + sky`.
pub fn canvas_height(ground: u32, sky: u32) -> Result<u32, ProfileError> {
    u32::from(Z_MAX)
        .checked_add(1)
        .and_then(|h| h.checked_add(ground))
        .and_then(|h| h.checked_add(sky))
        .filter(|h| i32::try_from(*h).is_ok())
        .ok_or(ProfileError::CanvasHeight { ground, sky })
}

/// Combines allocated widths and scaled elevations into one draw
/// point per sample.
///
/// `widths` must hold exactly one fewer entry than `scaled`, and their
/// sum must fit in an `i32`.
pub fn map<N>(
    widths: &[u32],
    scaled: &[u8],
    ground: u32,
    sky: u32,
    narrator: &mut N,
) -> Result<Vec<DrawPoint>, ProfileError>
where
    N: Narrate + ?Sized,
{
    if widths.len() + 1 != scaled.len() {
        return Err(ProfileError::SegmentMismatch {
            widths: widths.len(),
            samples: scaled.len(),
        });
    }
    // Validates that the y offsets below fit in an i32.
    canvas_height(ground, sky)?;
    let sky = i32::try_from(sky).map_err(|_| ProfileError::CanvasHeight { ground, sky })?;

    let mut total: u32 = 0;
    let mut points = Vec::with_capacity(scaled.len());
    for (width, elevation) in std::iter::once(&0).chain(widths).zip(scaled) {
        total = total.saturating_add(*width);
        let x = i32::try_from(total).map_err(|_| ProfileError::InvalidWidth(total))?;
        let y = i32::from(Z_MAX) - i32::from(*elevation) + sky;
        narrator.narrate(Stage::Map, format_args!("x: {x}, y: {y}"));
        points.push(DrawPoint { x, y });
    }
    Ok(points)
}
