//! Elevation profile rasterization.

use crate::{
    mapping::DrawPoint,
    math::catmull_rom,
    narrate::{Narrate, Stage},
    ProfileError,
};
use itertools::Itertools;
use plotters::{
    backend::BitMapBackend,
    drawing::IntoDrawingArea,
    element::{PathElement, Polygon},
    style::{Color, RGBColor},
};

/// Number of spline samples drawn between two neighbouring points in
/// smoothed mode.
const CURVE_STEPS: usize = 16;

/// How to paint a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Canvas background.
    pub background: RGBColor,

    /// Flat tone under the curve.
    pub fill: RGBColor,

    /// Colour of the profile line.
    pub stroke: RGBColor,

    /// Width of the profile line, in pixels.
    pub stroke_width: u32,

    /// Accent colour of the sample markers.
    pub marker: RGBColor,

    /// Stroke a Catmull-Rom spline instead of straight segments.
    ///
    /// Discouraged: with sparse or irregularly spaced samples the
    /// spline overshoots, drawing terrain that was never recorded.
    pub curve: bool,

    /// Draw a vertical marker under every recorded sample.
    pub markers: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: RGBColor(255, 255, 255),
            fill: RGBColor(166, 196, 140),
            stroke: RGBColor(46, 64, 36),
            stroke_width: 2,
            marker: RGBColor(214, 39, 40),
            curve: false,
            markers: false,
        }
    }
}

/// An RGB8 raster, row major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Returns `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGB8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the colour at `(x, y)`, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        let rgb = self.pixels.get(idx..idx + 3)?;
        Some(RGBColor(rgb[0], rgb[1], rgb[2]))
    }
}

/// Paints `points` onto a fresh `width` x `height` canvas.
///
/// Points outside the canvas are clipped.
pub fn render<N>(
    points: &[DrawPoint],
    width: u32,
    height: u32,
    style: &Style,
    narrator: &mut N,
) -> Result<Canvas, ProfileError>
where
    N: Narrate + ?Sized,
{
    if width == 0 || height == 0 {
        return Err(ProfileError::Raster(format!(
            "cannot draw on a {width}x{height} canvas"
        )));
    }
    let bottom = i32::try_from(height - 1)
        .map_err(|_| ProfileError::Raster(format!("canvas height {height} is too large")))?;

    narrator.narrate(
        Stage::Raster,
        format_args!("canvas: {width}x{height}, {} points", points.len()),
    );

    let mut pixels = vec![0_u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&style.background).map_err(raster_err)?;

        // Area under the curve, one quad per segment.
        for (a, b) in points.iter().tuple_windows() {
            if a.x == b.x {
                continue;
            }
            let quad = vec![(a.x, a.y), (b.x, b.y), (b.x, bottom), (a.x, bottom)];
            root.draw(&Polygon::new(quad, style.fill.filled()))
                .map_err(raster_err)?;
        }

        let line = if style.curve {
            smoothed(points)
        } else {
            points.iter().copied().map(Into::into).collect()
        };
        narrator.narrate(
            Stage::Raster,
            format_args!(
                "stroke: {} with {} vertices",
                if style.curve { "curve" } else { "polyline" },
                line.len()
            ),
        );
        root.draw(&PathElement::new(
            line,
            style.stroke.stroke_width(style.stroke_width),
        ))
        .map_err(raster_err)?;

        if style.markers {
            for point in points {
                root.draw(&PathElement::new(
                    vec![(point.x, point.y + 1), (point.x, bottom)],
                    style.marker.stroke_width(1),
                ))
                .map_err(raster_err)?;
            }
            narrator.narrate(Stage::Raster, format_args!("markers: {}", points.len()));
        }

        root.present().map_err(raster_err)?;
    }

    Ok(Canvas {
        width,
        height,
        pixels,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn smoothed(points: &[DrawPoint]) -> Vec<(i32, i32)> {
    let control: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (f64::from(p.x), f64::from(p.y)))
        .collect();
    catmull_rom(&control, CURVE_STEPS)
        .into_iter()
        .map(|(x, y)| (x.round() as i32, y.round() as i32))
        .collect()
}

fn raster_err<E: std::fmt::Display>(e: E) -> ProfileError {
    ProfileError::Raster(e.to_string())
}
