//! Rules configuration loaded from TOML.
//!
//! ```toml
//! start_position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"
//! castling = "king-square-only"
//! ```

use std::path::Path;

use chess_core::{FenError, FenParser};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::movegen::{CastlingCheck, MoveGenerator};
use crate::Board;

/// Errors that can occur when loading or applying a rules configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configured start position is not a valid FEN record.
    #[error("Invalid start position: {0}")]
    Position(#[from] FenError),
}

/// Board setup and generator rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Piece placement, or a full FEN record, of the starting position.
    /// Defaults to the standard initial placement.
    #[serde(default = "default_start_position")]
    pub start_position: String,
    /// Squares checked for attacks before castling. Defaults to `path`.
    #[serde(default)]
    pub castling: CastlingCheck,
}

fn default_start_position() -> String {
    FenParser::STARTPOS_PLACEMENT.to_string()
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            start_position: default_start_position(),
            castling: CastlingCheck::default(),
        }
    }
}

impl RulesConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// or [`ConfigError::Parse`] if the file contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), castling = ?config.castling, "loaded rules config");
        Ok(config)
    }

    /// Builds the configured starting board.
    ///
    /// A bare placement is loaded permissively with the default game state;
    /// anything with further fields must be a valid FEN record.
    pub fn board(&self) -> Result<Board, ConfigError> {
        let text = self.start_position.trim();
        if text.split_whitespace().nth(1).is_some() {
            Ok(Board::from_fen(text)?)
        } else {
            Ok(Board::from_placement(text))
        }
    }

    /// Builds a move generator following these rules.
    pub fn generator(&self) -> MoveGenerator {
        MoveGenerator::new(self.castling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    #[test]
    fn empty_config_uses_defaults() {
        let config = RulesConfig::from_toml_str("").unwrap();
        assert_eq!(config, RulesConfig::default());
        assert_eq!(config.castling, CastlingCheck::Path);
        assert_eq!(config.board().unwrap(), Board::startpos());
    }

    #[test]
    fn parses_all_fields() {
        let config = RulesConfig::from_toml_str(
            r#"
            start_position = "4k3/8/8/8/8/8/8/4K3 b - - 0 1"
            castling = "king-square-only"
            "#,
        )
        .unwrap();
        assert_eq!(config.castling, CastlingCheck::KingSquareOnly);
        assert_eq!(
            config.generator().castling_check(),
            CastlingCheck::KingSquareOnly
        );
        let board = config.board().unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.placement(), "4k3/8/8/8/8/8/8/4K3");
    }

    #[test]
    fn placement_only_start_position() {
        let config = RulesConfig {
            start_position: "4k3/8/8/8/8/8/8/4K3".to_string(),
            ..RulesConfig::default()
        };
        let board = config.board().unwrap();
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn rejects_unknown_castling_rule() {
        let err = RulesConfig::from_toml_str("castling = \"never\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_invalid_fen() {
        let config = RulesConfig {
            start_position: "4k3/8/8/8/8/8/8/4K3 x - - 0 1".to_string(),
            ..RulesConfig::default()
        };
        assert!(matches!(config.board(), Err(ConfigError::Position(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = RulesConfig::load("/nonexistent/rules.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
        assert!(err.to_string().starts_with("Failed to read config file"));
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("rules-config-{}.toml", std::process::id()));
        std::fs::write(&path, "castling = \"path\"\n").unwrap();
        let config = RulesConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.castling, CastlingCheck::Path);
    }
}
