//! Severity level definitions

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an entry.
///
/// Levels are a routing key into the handler registry. Their ordering carries
/// no filtering meaning: there is no minimum-level threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Panic = 4,
    Fatal = 5,
}

/// Every level, in ascending order.
pub const ALL_LEVELS: [Level; 6] = [
    Level::Debug,
    Level::Info,
    Level::Warn,
    Level::Error,
    Level::Panic,
    Level::Fatal,
];

impl Level {
    /// Number of levels
    pub const COUNT: usize = ALL_LEVELS.len();

    /// Uppercase name, as used in rendered output
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// Position of this level in [`ALL_LEVELS`].
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Whether finalizing an entry at this level terminates the process.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Level::Panic | Level::Fatal)
    }

    /// Parse a comma-separated level list such as `"info,error"`.
    ///
    /// The keyword `all` expands to [`ALL_LEVELS`]. Duplicates are kept once,
    /// in the order they first appear.
    ///
    /// ```
    /// use rust_log_dispatch::Level;
    ///
    /// let levels = Level::parse_list("warn, error").unwrap();
    /// assert_eq!(levels, vec![Level::Warn, Level::Error]);
    /// assert_eq!(Level::parse_list("all").unwrap().len(), 6);
    /// ```
    pub fn parse_list(s: &str) -> Result<Vec<Level>> {
        let mut levels = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("all") {
                for level in ALL_LEVELS {
                    if !levels.contains(&level) {
                        levels.push(level);
                    }
                }
                continue;
            }
            let level: Level = part.parse()?;
            if !levels.contains(&level) {
                levels.push(level);
            }
        }
        Ok(levels)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "PANIC" => Ok(Level::Panic),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_levels_matches_index() {
        for (i, level) in ALL_LEVELS.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
        assert_eq!(Level::COUNT, 6);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Panic".parse::<Level>().unwrap(), Level::Panic);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_parse_list_dedups() {
        let levels = Level::parse_list("error,info,error").unwrap();
        assert_eq!(levels, vec![Level::Error, Level::Info]);

        let levels = Level::parse_list("debug,all").unwrap();
        assert_eq!(levels, ALL_LEVELS.to_vec());

        assert!(Level::parse_list("info,loud").is_err());
        assert!(Level::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_terminal_levels() {
        assert!(Level::Panic.is_terminal());
        assert!(Level::Fatal.is_terminal());
        assert!(!Level::Error.is_terminal());
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:5}|", Level::Info), "INFO |");
        assert_eq!(Level::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Level::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        let level: Level = serde_json::from_str("\"fatal\"").unwrap();
        assert_eq!(level, Level::Fatal);
    }
}
