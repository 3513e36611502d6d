//! Command-line arguments.

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use termsweeper_core::{CellCount, Coord, GameConfig, Result};

/// Minesweeper in the terminal
#[derive(Parser, Debug)]
#[command(name = "termsweeper", version, about, long_about = None)]
pub struct Cli {
    /// Board preset, individual dimensions below override it
    #[arg(short, long, value_enum, default_value_t = Preset::Intermediate)]
    pub preset: Preset,

    /// Number of columns
    #[arg(long)]
    pub width: Option<Coord>,

    /// Number of rows
    #[arg(long)]
    pub height: Option<Coord>,

    /// Number of mines
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// Seed for mine placement, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 9x9 with 10 mines
    Beginner,
    /// 16x16 with 40 mines
    Intermediate,
    /// 30x16 with 99 mines
    Expert,
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => GameConfig::beginner(),
            Preset::Intermediate => GameConfig::intermediate(),
            Preset::Expert => GameConfig::expert(),
        }
    }
}

impl Cli {
    pub fn game_config(&self) -> Result<GameConfig> {
        let preset = GameConfig::from(self.preset);
        GameConfig::new(
            self.width.unwrap_or(preset.width),
            self.height.unwrap_or(preset.height),
            self.mines.unwrap_or(preset.mines),
        )
    }
}
