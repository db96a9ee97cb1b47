use std::io::ErrorKind;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::{Coords, TermInt};

const MIN_BOARD_SIZE: TermInt = 4;
const MAX_TICKS_PER_SECOND: u32 = 240;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub board_width: TermInt,
    pub board_height: TermInt,
    /// Display size in terminal cells, not counting the status row
    pub display_width: TermInt,
    pub display_height: TermInt,
    pub ticks_per_second: u32,
    pub initial_length: usize,
    pub seed: Option<u64>,
    pub log_file: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(name = "worm", about = "The classic worm game, in a terminal")]
pub struct Args {
    /// YAML file with game settings; a missing file means defaults
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub tps: Option<u32>,

    #[arg(long)]
    pub board_width: Option<TermInt>,

    #[arg(long)]
    pub board_height: Option<TermInt>,

    /// Number of segments the worm spawns with
    #[arg(long)]
    pub length: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            board_width: 40,
            board_height: 40,
            display_width: 80,
            display_height: 40,
            ticks_per_second: 15,
            initial_length: 4,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Builds the configuration from the optional YAML file named by
    /// `args`, then applies the command line overrides and validates.
    pub fn load(args: &Args) -> Result<Self, GameError> {
        let mut config = match &args.config {
            Some(path) => match read_config_file(path)? {
                Some(content) => Config::from_yaml(&content)?,
                None => Config::default(),
            },
            None => Config::default(),
        };

        config.apply(args);
        config.validate().map_err(GameError::Config)?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, GameError> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| GameError::Config(format!("Failed to deserialize config: {}", e)))
    }

    pub fn board_size(&self) -> Coords {
        (self.board_width, self.board_height)
    }

    pub fn display_size(&self) -> Coords {
        (self.display_width, self.display_height)
    }

    fn apply(&mut self, args: &Args) {
        if let Some(tps) = args.tps {
            self.ticks_per_second = tps;
        }
        if let Some(width) = args.board_width {
            self.board_width = width;
        }
        if let Some(height) = args.board_height {
            self.board_height = height;
        }
        if let Some(length) = args.length {
            self.initial_length = length;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if args.log_file.is_some() {
            self.log_file = args.log_file.clone();
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.board_width < MIN_BOARD_SIZE || self.board_height < MIN_BOARD_SIZE {
            return Err(format!(
                "board must be at least {}x{}, got {}x{}",
                MIN_BOARD_SIZE, MIN_BOARD_SIZE, self.board_width, self.board_height
            ));
        }

        if self.display_width < self.board_width || self.display_height < self.board_height {
            return Err(format!(
                "display {}x{} is smaller than board {}x{}",
                self.display_width, self.display_height, self.board_width, self.board_height
            ));
        }

        if !(1..=MAX_TICKS_PER_SECOND).contains(&self.ticks_per_second) {
            return Err(format!(
                "ticks_per_second must be between 1 and {}, got {}",
                MAX_TICKS_PER_SECOND, self.ticks_per_second
            ));
        }

        let max_length = self.board_width as usize / 2 + 1;
        if self.initial_length < 2 || self.initial_length > max_length {
            return Err(format!(
                "initial_length must be between 2 and {}, got {}",
                max_length, self.initial_length
            ));
        }

        Ok(())
    }
}

fn read_config_file(path: &str) -> Result<Option<String>, GameError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) => match err.kind() {
            ErrorKind::NotFound => Ok(None),
            _ => Err(GameError::Config(format!("Failed to read config file: {}", err))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.board_size(), (40, 40));
        assert_eq!(config.ticks_per_second, 15);
        assert_eq!(config.initial_length, 4);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("ticks_per_second: 20\nseed: 99\n").unwrap();

        assert_eq!(config.ticks_per_second, 20);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.board_width, 40);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_unknown_yaml_field_rejected() {
        let result = Config::from_yaml("speed: 3\n");
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = Config { seed: Some(5), log_file: Some("worm.log".to_string()), ..Config::default() };
        let yaml = serde_yaml_ng::to_string(&config).unwrap();

        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let path = std::env::temp_dir().join("worm-config-that-does-not-exist.yaml");
        let args = Args { config: Some(path.to_string_lossy().into_owned()), ..Args::default() };

        assert_eq!(Config::load(&args).unwrap(), Config::default());
    }

    #[test]
    fn test_cli_overrides_apply() {
        let args = Args::parse_from(["worm", "--tps", "30", "--length", "6", "--seed", "1"]);
        let config = Config::load(&args).unwrap();

        assert_eq!(config.ticks_per_second, 30);
        assert_eq!(config.initial_length, 6);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            Config { board_width: 3, ..Config::default() },
            Config { display_height: 20, ..Config::default() },
            Config { ticks_per_second: 0, ..Config::default() },
            Config { ticks_per_second: 1000, ..Config::default() },
            Config { initial_length: 1, ..Config::default() },
            Config { initial_length: 22, ..Config::default() },
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{:?} should be invalid", config);
        }

        let longest = Config { initial_length: 21, ..Config::default() };
        assert_eq!(longest.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_override_reported_as_config_error() {
        let args = Args::parse_from(["worm", "--board-width", "2"]);
        assert!(matches!(Config::load(&args), Err(GameError::Config(_))));
    }
}
