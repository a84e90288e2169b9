// Command-line arguments. Flags win over the config file and environment.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

/// Fog-of-war for tabletop maps: a GM window to paint fog and a player
/// window that only updates when a stroke is finished.
///
/// Left drag reveals, right drag conceals, the wheel resizes the brush,
/// R rotates the map, Escape quits.
#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "fogwarden", version)]
pub struct CliArgs {
    /// Map image (PNG, JPEG, ...). A grey placeholder is shown when omitted.
    pub image: Option<PathBuf>,

    /// Settings file. Defaults to ./fogwarden.toml when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fog grid width in cells.
    #[arg(long, value_name = "CELLS")]
    pub fog_width: Option<u32>,

    /// Fog grid height in cells.
    #[arg(long, value_name = "CELLS")]
    pub fog_height: Option<u32>,

    /// Size the fog grid to the map instead of the configured resolution.
    #[arg(long)]
    pub match_image: bool,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "fogwarden=trace").
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl CliArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(w) = self.fog_width {
            settings.fog.width = w;
        }
        if let Some(h) = self.fog_height {
            settings.fog.height = h;
        }
        if self.match_image {
            settings.fog.match_image = true;
        }
        if let Some(log) = &self.log {
            settings.log = log.clone();
        }
    }
}
