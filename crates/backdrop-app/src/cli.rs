use std::path::PathBuf;

use backdrop_config::palette::AverageMethod;
use backdrop_config::{ColorMode, ConfigPatch, EffectType};
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Backdrop: procedural animated backgrounds rendered headless.
#[derive(Parser, Debug)]
#[command(name = "backdrop", version, about)]
pub struct Args {
    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// settings.toml path override.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Directory for persisted state, overriding `[storage] dir`.
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Force reduced motion regardless of BACKDROP_REDUCED_MOTION.
    #[arg(long, global = true)]
    pub reduced_motion: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current background config as JSON.
    Show,
    /// Change one or more config fields.
    Set(SetArgs),
    /// Switch the background off, or back to the last wallpaper.
    Toggle,
    /// Decide whether this device should animate.
    Probe {
        /// Ignore the cached verdict and probe again.
        #[arg(long)]
        force: bool,
        /// User-agent string used for form-factor detection.
        #[arg(long)]
        user_agent: Option<String>,
    },
    /// Render one frame of the current effect to a PNG.
    Render {
        #[arg(long)]
        out: PathBuf,
        /// Elapsed seconds for the frame.
        #[arg(long, default_value_t = 0.0)]
        time: f64,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Run the animation loop headless.
    Run {
        /// Stop after this many seconds; runs until Ctrl-C when omitted.
        #[arg(long)]
        seconds: Option<f64>,
        /// Write the last frame here on exit.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the average color of the current palette.
    Average {
        /// rgb, hsl or dominant.
        #[arg(long, default_value = "hsl")]
        method: AverageMethod,
        #[arg(long)]
        include_background: bool,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct SetArgs {
    #[arg(long)]
    pub effect: Option<EffectType>,
    #[arg(long)]
    pub opacity: Option<f64>,
    #[arg(long)]
    pub speed: Option<f64>,
    #[arg(long)]
    pub density: Option<f64>,
    #[arg(long)]
    pub color_mode: Option<ColorMode>,
    #[arg(long)]
    pub custom_color: Option<String>,
    #[arg(long)]
    pub animated: Option<bool>,
}

impl SetArgs {
    pub fn to_patch(&self) -> ConfigPatch {
        ConfigPatch {
            effect: self.effect,
            opacity: self.opacity,
            animation_speed: self.speed,
            density: self.density,
            color_mode: self.color_mode,
            custom_color: self.custom_color.clone(),
            is_animated: self.animated,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
