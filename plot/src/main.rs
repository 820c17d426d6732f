mod options;

use anyhow::{anyhow, Context, Error as AnyError};
use clap::Parser;
use log::{info, warn};
use options::{Cli, Command as CliCmd};
use plotters::backend::{BitMapBackend, DrawingBackend};
use profile::{
    extract,
    narrate::{LogNarrator, Narrate, Silent},
    Canvas, Degenerate, Profile, Sample, Style,
};
use serde::Serialize;
use std::{
    fs::File,
    io::Write,
    path::Path,
    process::{Command, ExitCode},
};
use textplots::{Chart, Plot, Shape};

fn main() -> Result<ExitCode, AnyError> {
    let Cli {
        input,
        width,
        ground,
        sky,
        scale,
        curve,
        markers,
        flat_fallback,
        verbose,
        log_file,
        cmd,
    } = Cli::parse();

    init_logging(verbose, log_file.as_deref())?;

    let mut narrator: Box<dyn Narrate> = if verbose {
        Box::new(LogNarrator)
    } else {
        Box::new(Silent)
    };

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let samples = extract(&text, narrator.as_mut())?;

    let degenerate = if flat_fallback {
        Degenerate::Fallback
    } else {
        Degenerate::Reject
    };
    let profile = match Profile::builder()
        .width(width)
        .ground(ground)
        .sky(sky)
        .scale(scale)
        .degenerate(degenerate)
        .build(&samples, narrator.as_mut())
    {
        Ok(profile) => profile,
        Err(e) if e.is_no_data() => {
            warn!("no track points found in {}", input.display());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "{} samples, elevation {}..{}, width {} of {} ({} px lost to truncation)",
        samples.len(),
        profile.range.min,
        profile.range.max,
        profile.allocation.achieved,
        profile.allocation.target,
        profile.allocation.lost()
    );

    match cmd {
        CliCmd::Png { out, open } => {
            if curve {
                warn!("--curve may overshoot between sparse samples");
            }
            let style = Style {
                curve,
                markers,
                ..Style::default()
            };
            let canvas = profile.render(&style, narrator.as_mut())?;
            save(&canvas, &out)?;
            info!("wrote {}", out.display());
            if open {
                open_in_viewer(&out)?;
            }
        }
        CliCmd::Display => display(&samples, &profile)?,
        CliCmd::Json => json(&samples, &profile)?,
        CliCmd::Term => term(&samples, &profile),
    };

    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), AnyError> {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(path) = log_file {
        let file =
            File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        builder
            .target(env_logger::Target::Pipe(Box::new(file)))
            .write_style(env_logger::WriteStyle::Never);
    }
    builder.init();
    Ok(())
}

/// Encodes `canvas` to `out`.
fn save(canvas: &Canvas, out: &Path) -> Result<(), AnyError> {
    let dimensions = canvas.dimensions();
    let mut backend = BitMapBackend::new(out, dimensions);
    backend
        .blit_bitmap((0, 0), dimensions, canvas.pixels())
        .map_err(|e| anyhow!("writing {}: {e}", out.display()))?;
    backend
        .present()
        .map_err(|e| anyhow!("writing {}: {e}", out.display()))?;
    Ok(())
}

fn open_in_viewer(path: &Path) -> Result<(), AnyError> {
    let mut viewer = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };
    viewer
        .arg(path)
        .spawn()
        .with_context(|| format!("opening {}", path.display()))?;
    Ok(())
}

fn display(samples: &[Sample], profile: &Profile) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    for (i, ((sample, scaled), point)) in samples
        .iter()
        .zip(profile.scaled.iter())
        .zip(profile.points.iter())
        .enumerate()
    {
        writeln!(
            stdout,
            "{i:4}: lon {}, lat {}, ele {} -> z {scaled:3} -> ({}, {})",
            sample.longitude, sample.latitude, sample.elevation, point.x, point.y
        )?;
    }
    writeln!(
        stdout,
        "canvas: {}x{}, {} px lost to truncation",
        profile.canvas_width(),
        profile.canvas_height,
        profile.allocation.lost()
    )?;
    Ok(())
}

fn json(samples: &[Sample], profile: &Profile) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonEntry {
        location: [f64; 2],
        elevation: f64,
        distance: f64,
        x: i32,
        y: i32,
    }

    let reshaped: Vec<JsonEntry> = samples
        .iter()
        .zip(profile.cumulative_distances())
        .zip(profile.points.iter())
        .map(|((sample, distance), point)| JsonEntry {
            location: [sample.longitude, sample.latitude],
            elevation: sample.elevation,
            distance,
            x: point.x,
            y: point.y,
        })
        .collect();
    let json = serde_json::to_string(&reshaped)?;
    println!("{json}");
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn term(samples: &[Sample], profile: &Profile) {
    let plot_data: Vec<(f32, f32)> = profile
        .cumulative_distances()
        .into_iter()
        .zip(samples.iter())
        .map(|(distance, sample)| (distance as f32, sample.elevation as f32))
        .collect();
    let x_max = plot_data.last().map_or(1.0, |(x, _)| *x);
    Chart::new(300, 150, 0.0, x_max)
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}
