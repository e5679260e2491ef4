//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::model::DisplayMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "lbry-tui")]
#[command(about = "Terminal browser for LBRY claim feeds")]
pub struct AppConfig {
    /// Catalog file with the feed and the claims it resolves to
    #[arg(long, env = "LBRY_TUI_CATALOG", default_value = "demos/catalog.json")]
    pub catalog: PathBuf,

    /// Hide mature content that the viewer does not own
    #[arg(long, env = "LBRY_TUI_OBSCURE_NSFW", default_value_t = true, action = clap::ArgAction::Set)]
    pub obscure_nsfw: bool,

    /// Channels owned by the viewer (comma separated, e.g. "@me,@alt")
    #[arg(long = "my-channel", env = "LBRY_TUI_MY_CHANNELS", value_delimiter = ',')]
    pub my_channels: Vec<String>,

    /// How much of each entry to draw
    #[arg(long, env = "LBRY_TUI_DISPLAY", value_enum, default_value_t = DisplayMode::Normal)]
    pub display: DisplayMode,

    /// Draw skeleton rows while entries resolve
    #[arg(long, env = "LBRY_TUI_PLACEHOLDERS", default_value_t = true, action = clap::ArgAction::Set)]
    pub placeholders: bool,

    /// Simulated resolution latency in milliseconds
    #[arg(long, env = "LBRY_TUI_RESOLVE_DELAY_MS", default_value_t = 350)]
    pub resolve_delay_ms: u64,

    /// Feed entries shown per page
    #[arg(long, env = "LBRY_TUI_PAGE_SIZE", default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: u16,

    /// Wallet balance; publishing is disabled at zero
    #[arg(long, env = "LBRY_TUI_BALANCE", default_value_t = 10.0)]
    pub balance: f64,

    /// Base URL for shareable links
    #[arg(long, env = "LBRY_TUI_SHARE_BASE_URL", default_value = "https://open.lbry.com")]
    pub share_base_url: String,

    /// Directory for rolling log files
    #[arg(long, env = "LBRY_TUI_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_arguments() {
        let config = AppConfig::try_parse_from(["lbry-tui"]).unwrap();

        assert!(config.obscure_nsfw);
        assert!(config.placeholders);
        assert!(config.my_channels.is_empty());
        assert_eq!(config.display, DisplayMode::Normal);
        assert_eq!(config.resolve_delay(), Duration::from_millis(350));
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(AppConfig::try_parse_from(["lbry-tui", "--page-size", "0"]).is_err());
    }

    #[test]
    fn parses_lists_enums_and_explicit_bools() {
        let config = AppConfig::try_parse_from([
            "lbry-tui",
            "--my-channel",
            "@me,@alt",
            "--display",
            "compact",
            "--obscure-nsfw",
            "false",
            "--balance",
            "0",
        ])
        .unwrap();

        assert_eq!(config.my_channels, vec!["@me".to_string(), "@alt".to_string()]);
        assert_eq!(config.display, DisplayMode::Compact);
        assert!(!config.obscure_nsfw);
        assert_eq!(config.balance, 0.0);
    }
}
