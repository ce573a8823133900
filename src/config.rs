use std::path::Path;

use log::warn;
use rand::Rng;

use crate::ai::SearchConfig;
use crate::error::ConfigError;
use crate::game::{Player, COLS, ROWS};

/// Who opens each game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FirstTurn {
    #[default]
    Random,
    Ai,
    Human,
}

impl FirstTurn {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Player {
        match self {
            FirstTurn::Ai => Player::Ai,
            FirstTurn::Human => Player::Human,
            FirstTurn::Random => {
                if rng.random_bool(0.5) {
                    Player::Ai
                } else {
                    Player::Human
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub first_turn: FirstTurn,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_depth = (ROWS * COLS) as u32;
        if self.search.depth == 0 {
            return Err(ConfigError::Validation("search.depth must be >= 1".into()));
        }
        if self.search.depth > max_depth {
            return Err(ConfigError::Validation(format!(
                "search.depth must be <= {max_depth}"
            )));
        }
        if self.search.time_limit_ms == Some(0) {
            return Err(ConfigError::Validation(
                "search.time_limit_ms must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.search.depth, 7);
        assert_eq!(config.game.first_turn, FirstTurn::Random);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[search]
depth = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.depth, 5);
        assert_eq!(config.search.time_limit_ms, None);
        assert!(!config.search.parallel_root);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_first_turn_parses_lowercase() {
        let config: AppConfig = toml::from_str("[game]\nfirst_turn = \"human\"\n").unwrap();
        assert_eq!(config.game.first_turn, FirstTurn::Human);
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_depth_past_board() {
        let mut config = AppConfig::default();
        config.search.depth = 43;
        assert!(config.validate().is_err());
        config.search.depth = 42;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_time_limit() {
        let mut config = AppConfig::default();
        config.search.time_limit_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[search]
depth = 9
time_limit_ms = 1500
parallel_root = true
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.search.depth, 9);
        assert_eq!(config.search.time_limit_ms, Some(1500));
        assert!(config.search.parallel_root);
        // Others are defaults
        assert_eq!(config.game.first_turn, FirstTurn::Random);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[search]\ndepth = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_first_turn_resolves() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(FirstTurn::Ai.resolve(&mut rng), Player::Ai);
        assert_eq!(FirstTurn::Human.resolve(&mut rng), Player::Human);
        let picks: Vec<Player> = (0..64).map(|_| FirstTurn::Random.resolve(&mut rng)).collect();
        assert!(picks.contains(&Player::Ai));
        assert!(picks.contains(&Player::Human));
    }
}
