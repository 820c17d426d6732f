//! GPX track point extraction.
//!
//! This is a deliberately small line scanner, not an XML parser. A
//! point is a `<trkpt ...>` line carrying `lon` and `lat` attributes,
//! immediately followed by a line holding `<ele>...</ele>`.

use crate::{
    narrate::{Narrate, Stage},
    ProfileError,
};
use geo::geometry::Point;

/// Substring identifying a track point line.
const POINT_MARKER: &str = "<trkpt";

/// Opening tag of the elevation element.
const ELEVATION_TAG: &str = "<ele>";

/// A single track point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub longitude: f64,
    pub latitude: f64,
    /// Elevation in whatever unit the log uses (usually meters).
    pub elevation: f64,
}

impl Sample {
    pub fn new(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Self {
            longitude,
            latitude,
            elevation,
        }
    }

    /// Horizontal position, with longitude as `x` and latitude as `y`.
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

enum State {
    SeekingPoint,
    ReadingElevation {
        longitude: f64,
        latitude: f64,
        /// Line of the `<trkpt` marker that opened this point.
        line: usize,
    },
}

/// Returns every track point found in `text`, in file order.
///
/// An empty vector means the log held no track points at all; that
/// is not an error at this stage.
pub fn extract<N>(text: &str, narrator: &mut N) -> Result<Vec<Sample>, ProfileError>
where
    N: Narrate + ?Sized,
{
    let mut samples = Vec::new();
    let mut state = State::SeekingPoint;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        state = match state {
            State::SeekingPoint if raw.contains(POINT_MARKER) => {
                let longitude = parse_attribute(raw, "lon", line_no)?;
                let latitude = parse_attribute(raw, "lat", line_no)?;
                State::ReadingElevation {
                    longitude,
                    latitude,
                    line: line_no,
                }
            }
            State::SeekingPoint => State::SeekingPoint,
            State::ReadingElevation {
                longitude,
                latitude,
                ..
            } => {
                let elevation = parse_number(elevation_text(raw, line_no)?, "ele", line_no)?;
                narrator.narrate(
                    Stage::Extract,
                    format_args!("lon: {longitude}, lat: {latitude}, ele: {elevation}"),
                );
                samples.push(Sample::new(longitude, latitude, elevation));
                State::SeekingPoint
            }
        };
    }

    if let State::ReadingElevation { line, .. } = state {
        return Err(ProfileError::Parse {
            line,
            reason: "input ended before the point's <ele> line".to_string(),
        });
    }

    narrator.narrate(
        Stage::Extract,
        format_args!("{} track points", samples.len()),
    );
    Ok(samples)
}

fn parse_attribute(line: &str, name: &str, line_no: usize) -> Result<f64, ProfileError> {
    let value = attribute(line, name).ok_or_else(|| ProfileError::Parse {
        line: line_no,
        reason: format!("track point without a `{name}` attribute"),
    })?;
    parse_number(value, name, line_no)
}

/// Returns the raw value of attribute `name` in `line`.
///
/// `name` must be preceded by whitespace, so `lon` never matches the
/// tail of some other attribute.
fn attribute<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    line.match_indices(name).find_map(|(idx, _)| {
        if !line[..idx].ends_with(char::is_whitespace) {
            return None;
        }
        let rest = line[idx + name.len()..]
            .trim_start()
            .strip_prefix('=')?
            .trim_start();
        let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let rest = &rest[1..];
        let end = rest.find(quote)?;
        Some(&rest[..end])
    })
}

fn elevation_text(line: &str, line_no: usize) -> Result<&str, ProfileError> {
    let missing = || ProfileError::Parse {
        line: line_no,
        reason: format!("expected `{ELEVATION_TAG}...</ele>` after track point"),
    };
    let start = line.find(ELEVATION_TAG).ok_or_else(missing)? + ELEVATION_TAG.len();
    let rest = &line[start..];
    let end = rest.find('<').ok_or_else(missing)?;
    Ok(rest[..end].trim())
}

fn parse_number(text: &str, what: &str, line_no: usize) -> Result<f64, ProfileError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ProfileError::Parse {
            line: line_no,
            reason: format!("invalid `{what}` value {text:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{attribute, extract, Sample};
    use crate::{
        narrate::{Recorder, Silent, Stage},
        ProfileError,
    };

    #[test]
    fn test_extract_fixture() {
        let text = std::fs::read_to_string(crate::gpx_dir().join("mt-washington.gpx")).unwrap();
        let samples = extract(&text, &mut Silent).unwrap();
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[0], Sample::new(-71.254_75, 44.257_31, 618.4));
        assert_eq!(samples[5], Sample::new(-71.303_25, 44.2705, 1903.0));
    }

    #[test]
    fn test_extract_attribute_order_and_quotes() {
        let text = "<trkpt lat='2.5' lon=\"-1.25\">\n<ele> 7 </ele>\n</trkpt>\n";
        let samples = extract(text, &mut Silent).unwrap();
        assert_eq!(samples, [Sample::new(-1.25, 2.5, 7.0)]);
    }

    #[test]
    fn test_attribute_needs_whitespace_before_name() {
        let line = r#"<trkpt xlon="9" lon="1" lat="2">"#;
        assert_eq!(attribute(line, "lon"), Some("1"));
        assert_eq!(attribute(line, "lat"), Some("2"));
        assert_eq!(attribute(line, "ele"), None);
    }

    #[test]
    fn test_extract_skips_unrelated_lines() {
        let text = "<gpx>\n<trk>\n<name>x</name>\n</trk>\n</gpx>\n";
        let samples = extract(text, &mut Silent).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_extract_missing_elevation_line() {
        let text = "<trkpt lon=\"1\" lat=\"2\">\n<time>2023</time>\n";
        match extract(text, &mut Silent) {
            Err(ProfileError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_truncated_input() {
        let text = "<trkseg>\n<trkpt lon=\"1\" lat=\"2\">";
        match extract(text, &mut Silent) {
            Err(ProfileError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_bad_numbers() {
        let bad_lon = "<trkpt lon=\"east\" lat=\"2\">\n<ele>1</ele>\n";
        assert!(matches!(
            extract(bad_lon, &mut Silent),
            Err(ProfileError::Parse { line: 1, .. })
        ));

        let bad_ele = "<trkpt lon=\"1\" lat=\"2\">\n<ele>NaN</ele>\n";
        assert!(matches!(
            extract(bad_ele, &mut Silent),
            Err(ProfileError::Parse { line: 2, .. })
        ));

        let missing_lat = "<trkpt lon=\"1\">\n<ele>1</ele>\n";
        assert!(matches!(
            extract(missing_lat, &mut Silent),
            Err(ProfileError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_extract_narrates_points() {
        let text = "<trkpt lon=\"1\" lat=\"2\">\n<ele>3</ele>\n";
        let mut rec = Recorder::new();
        extract(text, &mut rec).unwrap();
        let lines: Vec<&str> = rec.stage(Stage::Extract).collect();
        assert_eq!(lines, ["lon: 1, lat: 2, ele: 3", "1 track points"]);
    }
}
