//! Progress narration.
//!
//! Every stage reports what it is doing through a [`Narrate`]
//! implementation handed to it by the caller. Narration is a side
//! channel only; swapping one sink for another never changes a
//! result.

use std::fmt;

/// The pipeline stage a narration line originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Extract,
    Normalize,
    Distance,
    Allocate,
    Map,
    Raster,
}

/// Prefix shared by every stage's `log` target.
const TARGET_PREFIX: &str = "profile::";

impl Stage {
    /// `log` target used by [`LogNarrator`].
    pub fn target(self) -> &'static str {
        match self {
            Self::Extract => "profile::extract",
            Self::Normalize => "profile::normalize",
            Self::Distance => "profile::distance",
            Self::Allocate => "profile::allocate",
            Self::Map => "profile::map",
            Self::Raster => "profile::raster",
        }
    }

    /// Stage name without the target prefix.
    pub fn as_str(self) -> &'static str {
        &self.target()[TARGET_PREFIX.len()..]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sink for human-readable progress narration.
pub trait Narrate {
    fn narrate(&mut self, stage: Stage, args: fmt::Arguments<'_>);
}

/// Discards all narration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Narrate for Silent {
    fn narrate(&mut self, _stage: Stage, _args: fmt::Arguments<'_>) {}
}

/// Forwards narration to the `log` crate at debug level, one target
/// per stage (`profile::extract`, `profile::normalize`, ...).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNarrator;

impl Narrate for LogNarrator {
    fn narrate(&mut self, stage: Stage, args: fmt::Arguments<'_>) {
        log::debug!(target: stage.target(), "{args}");
    }
}

/// Keeps every narration line in memory.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub lines: Vec<(Stage, String)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded lines for `stage`, in emission order.
    pub fn stage(&self, stage: Stage) -> impl Iterator<Item = &str> + '_ {
        self.lines
            .iter()
            .filter(move |(s, _)| *s == stage)
            .map(|(_, line)| line.as_str())
    }
}

impl Narrate for Recorder {
    fn narrate(&mut self, stage: Stage, args: fmt::Arguments<'_>) {
        self.lines.push((stage, args.to_string()));
    }
}
