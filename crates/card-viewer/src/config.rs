use card_shading::{Damping, Rarity};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// `card_viewer` - An interactive holographic trading-card preview.
///
/// Shows a photo on a card that tilts toward the pointer, with a foil
/// treatment chosen by rarity. Drop an image onto the window, or use
/// "Choose photo…", to replace the photo.
///
/// The three textures are not bundled. By default they are read from
/// `assets/` relative to the working directory; point the flags (or their
/// environment variables) at your own images. A texture that fails to load
/// renders as black and is listed as missing in the panel.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// The photo shown on the card face. Must exist; not bundled.
    #[arg(long, env = "CARD_IMAGE", default_value = "assets/pikachu.jpg")]
    pub image: PathBuf,

    /// Overlay sampled by the holo and gold treatments. Must exist; not bundled.
    #[arg(long, env = "CARD_HOLO_TEXTURE", default_value = "assets/hologram.jpg")]
    pub holo_texture: PathBuf,

    /// Overlay sampled by the ultra-rare treatment. Must exist; not bundled.
    #[arg(long, env = "CARD_ULTRA_RARE_TEXTURE", default_value = "assets/UltraRare.jpg")]
    pub ultra_rare_texture: PathBuf,

    /// Initial rarity tier: 0 normal, 1 holo, 2 gold, 3 ultra rare.
    #[arg(
        long,
        env = "CARD_RARITY",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(0..=3)
    )]
    pub rarity: u32,

    /// How the tilt approaches the pointer target each frame.
    #[arg(long, env = "CARD_DAMPING", value_enum, default_value_t = DampingMode::Linear)]
    pub damping: DampingMode,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Render the card face to this PNG without opening a window, then exit.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Snapshot width in pixels.
    #[arg(long, default_value_t = 450)]
    pub snapshot_width: u32,

    /// Snapshot height in pixels.
    #[arg(long, default_value_t = 630)]
    pub snapshot_height: u32,

    /// Pointer X in [-1, 1] used for the snapshot's overlay offset.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pointer_x: f32,

    /// Pointer Y in [-1, 1] used for the snapshot's overlay offset.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pointer_y: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DampingMode {
    /// `delta * 5`, capped at 1.
    Linear,
    /// `1 - exp(-5 * delta)`.
    Exponential,
}

impl From<DampingMode> for Damping {
    fn from(mode: DampingMode) -> Self {
        match mode {
            DampingMode::Linear => Damping::Linear,
            DampingMode::Exponential => Damping::Exponential,
        }
    }
}

impl Config {
    pub fn initial_rarity(&self) -> Rarity {
        Rarity::from_index_lossy(self.rarity as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["card_viewer"]).unwrap();
        assert_eq!(config.image, PathBuf::from("assets/pikachu.jpg"));
        assert_eq!(config.initial_rarity(), Rarity::Holo);
        assert_eq!(Damping::from(config.damping), Damping::Linear);
        assert!(config.snapshot.is_none());
        assert_eq!((config.snapshot_width, config.snapshot_height), (450, 630));
    }

    #[test]
    fn test_help_explains_texture_files() {
        let help = Config::command().render_long_help().to_string();
        assert!(help.contains("not bundled"));
        assert!(help.contains("assets/pikachu.jpg"));
        assert!(help.contains("assets/hologram.jpg"));
        assert!(help.contains("assets/UltraRare.jpg"));
    }

    #[test]
    fn test_rarity_range_is_enforced() {
        let config = Config::try_parse_from(["card_viewer", "--rarity", "3"]).unwrap();
        assert_eq!(config.initial_rarity(), Rarity::UltraRare);
        assert!(Config::try_parse_from(["card_viewer", "--rarity", "4"]).is_err());
    }

    #[test]
    fn test_snapshot_flags() {
        let config = Config::try_parse_from([
            "card_viewer",
            "--snapshot",
            "out.png",
            "--pointer-x",
            "-0.5",
            "--pointer-y",
            "0.25",
            "--damping",
            "exponential",
        ])
        .unwrap();
        assert_eq!(config.snapshot, Some(PathBuf::from("out.png")));
        assert_eq!(config.pointer_x, -0.5);
        assert_eq!(config.pointer_y, 0.25);
        assert_eq!(config.damping, DampingMode::Exponential);
    }
}
