//! Watchlist — the finite ticker set the dashboard offers.
//!
//! Stored as a TOML file so users can swap in their own tickers; the
//! default matches the classic four-stock demo set.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Ordered list of offered tickers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Watchlist {
    pub tickers: Vec<String>,
}

impl Watchlist {
    /// Load a watchlist from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read watchlist file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a watchlist from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let parsed: Self = toml::from_str(content).map_err(|e| format!("parse watchlist TOML: {e}"))?;
        if parsed.tickers.is_empty() {
            return Err("watchlist has no tickers".into());
        }
        Ok(parsed)
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self {
            tickers: ["AAPL", "GOOG", "MSFT", "GME"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_demo_tickers() {
        let w = Watchlist::default();
        assert_eq!(w.len(), 4);
        assert!(w.contains("AAPL"));
        assert!(w.contains("GME"));
    }

    #[test]
    fn parses_a_user_file() {
        let w = Watchlist::from_toml(r#"tickers = ["SPY", "QQQ"]"#).unwrap();
        assert_eq!(w.tickers, vec!["SPY", "QQQ"]);
    }

    #[test]
    fn from_file_reads_toml() {
        let path = std::env::temp_dir().join("stockcast_watchlist_test.toml");
        std::fs::write(&path, r#"tickers = ["NVDA", "AMD", "INTC"]"#).unwrap();
        let w = Watchlist::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(w.len(), 3);
        assert!(w.contains("AMD"));
    }

    #[test]
    fn from_file_missing_path_errors() {
        let err = Watchlist::from_file(Path::new("/nonexistent/watchlist.toml")).unwrap_err();
        assert!(err.contains("read watchlist file"));
    }

    #[test]
    fn empty_watchlist_rejected() {
        assert!(Watchlist::from_toml("tickers = []").is_err());
    }
}
