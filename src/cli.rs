use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kenshi-calc")]
#[command(version, about = "Kenshi weapon damage calculator")]
pub struct Cli {
    /// Path to the weapon database (default: KenshiData in the working
    /// directory, then the platform data directory)
    #[arg(short, long, global = true)]
    pub db: Option<PathBuf>,

    /// Without a subcommand the interactive shell is launched
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all weapon classes
    Classes {
        /// Emit JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// List all weapon quality tiers
    Qualities {
        /// Emit JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// List weapon names belonging to a class
    Weapons {
        /// Weapon class name, e.g. "Sabres"
        class: String,

        /// Emit JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// Show a single weapon's damage multipliers
    Weapon {
        /// Exact weapon name as stored (underscores included)
        name: String,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// List weapon image paths
    Images {
        /// Emit JSON instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// List tables present in the database
    Tables {
        /// Emit JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// Compute a damage value from weapon and character stats
    Calc {
        /// Weapon cut damage multiplier
        #[arg(long, default_value_t = 0.123)]
        cut: f32,

        /// Weapon blunt damage multiplier
        #[arg(long, default_value_t = 0.123)]
        blunt: f32,

        /// Character strength level
        #[arg(long, default_value_t = 1)]
        strength: u8,

        /// Character dexterity level
        #[arg(long, default_value_t = 1)]
        dexterity: u8,

        /// Character weapon skill level
        #[arg(long, default_value_t = 1)]
        weapon_skill: u8,

        /// Per-race damage scaling factor
        #[arg(long, default_value_t = 1.0)]
        racial_multiplier: f32,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
