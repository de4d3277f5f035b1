#![forbid(unsafe_code)]

//! Command-line argument parsing for the sketch.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `SKETCH_*` prefix.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use crate::layout::CellMode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=240;
const SCALE_RANGE: std::ops::RangeInclusive<u32> = 1..=16;

const HELP_TEXT: &str = "\
sketch-tty: interactive generative art in the terminal

USAGE:
    sketch-tty [OPTIONS]

OPTIONS:
    --fps=N              Frames per second, 1-240 (default: 60)
    --scale=N            Surface pixels per terminal sub-pixel, 1-16 (default: 4)
    --cells=MODE         Canvas cells: 'braille' (default) or 'halfblock'
    --auto               Start with auto-animate on
    --seed=N             Seed the random generator for a reproducible session
    --log-file=PATH      Write tracing output to PATH
    --exit-after-ms=N    Auto-quit after N milliseconds (for testing)
    --no-greeting        Start with an empty canvas
    --help, -h           Show this help message
    --version, -V        Show version

MODES:
    Concentric Circles   Five rings around the pointer
    Cosmic Spiral        A two-turn spiral from the pointer
    Magic Particles      Bursts of fading particles
    Psychedelic Waves    A full-width sine wave through the pointer

KEYBINDINGS:
    m               Next mode
    c               Next colour palette
    x               Clear the canvas
    a               Toggle auto-animate
    q / Esc / Ctrl+C  Quit
    Mouse move      Draw the current mode
    Left click      Particle burst (the header buttons are clickable too)

ENVIRONMENT VARIABLES:
    SKETCH_FPS             Override --fps
    SKETCH_SCALE           Override --scale
    SKETCH_CELLS           Override --cells
    SKETCH_AUTO            Start with auto-animate on (1/true)
    SKETCH_SEED            Override --seed
    SKETCH_LOG_FILE        Override --log-file
    SKETCH_LOG             Log filter directives (default: info)
    SKETCH_EXIT_AFTER_MS   Override --exit-after-ms";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Target frame rate.
    pub fps: u32,
    /// Surface pixels per sub-pixel edge.
    pub scale: u32,
    /// Canvas cell rendering.
    pub cells: CellMode,
    /// Start with auto-animate on.
    pub auto_animate: bool,
    /// RNG seed, random when absent.
    pub seed: Option<u64>,
    /// Tracing output file; no subscriber is installed without one.
    pub log_file: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Draw the start-up greeting.
    pub greeting: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            fps: 60,
            scale: 4,
            cells: CellMode::Braille,
            auto_animate: false,
            seed: None,
            log_file: None,
            exit_after_ms: 0,
            greeting: true,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Opts),
    Help,
    Version,
}

/// A rejected option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptsError {
    /// `flag` had a value that does not parse or is out of range.
    InvalidValue { flag: &'static str, value: String },
    /// Flag not recognised.
    UnknownArgument(String),
}

impl fmt::Display for OptsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for OptsError {}

fn parse_in_range(
    flag: &'static str,
    value: &str,
    range: &std::ops::RangeInclusive<u32>,
) -> Result<u32, OptsError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|n| range.contains(n))
        .ok_or_else(|| OptsError::InvalidValue {
            flag,
            value: value.to_string(),
        })
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, OptsError> {
    value.parse().map_err(|_| OptsError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

fn parse_cells(flag: &'static str, value: &str) -> Result<CellMode, OptsError> {
    value.parse().map_err(|_| OptsError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// Prints help/version or an error and exits the process when parsing
    /// does not produce options to run with.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("sketch-tty {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` (without the program name) with `env` as the variable
    /// lookup.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse_from<S: AsRef<str>>(
        args: &[S],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, OptsError> {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = env("SKETCH_FPS") {
            opts.fps = parse_in_range("SKETCH_FPS", &val, &FPS_RANGE)?;
        }
        if let Some(val) = env("SKETCH_SCALE") {
            opts.scale = parse_in_range("SKETCH_SCALE", &val, &SCALE_RANGE)?;
        }
        if let Some(val) = env("SKETCH_CELLS") {
            opts.cells = parse_cells("SKETCH_CELLS", &val)?;
        }
        if let Some(val) = env("SKETCH_AUTO") {
            opts.auto_animate = truthy(&val);
        }
        if let Some(val) = env("SKETCH_SEED") {
            opts.seed = Some(parse_number("SKETCH_SEED", &val)?);
        }
        if let Some(val) = env("SKETCH_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env("SKETCH_EXIT_AFTER_MS") {
            opts.exit_after_ms = parse_number("SKETCH_EXIT_AFTER_MS", &val)?;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                "--auto" => opts.auto_animate = true,
                "--no-greeting" => opts.greeting = false,
                other => {
                    if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = parse_in_range("--fps", val, &FPS_RANGE)?;
                    } else if let Some(val) = other.strip_prefix("--scale=") {
                        opts.scale = parse_in_range("--scale", val, &SCALE_RANGE)?;
                    } else if let Some(val) = other.strip_prefix("--cells=") {
                        opts.cells = parse_cells("--cells", val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(parse_number("--seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_number("--exit-after-ms", val)?;
                    } else {
                        return Err(OptsError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Parsed::Run(opts))
    }
}
