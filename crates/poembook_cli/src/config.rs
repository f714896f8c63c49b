//! Command-line configuration.
//!
//! # Responsibility
//! - Declare global flags and subcommands (`clap` derive, env fallbacks).
//! - Validate them into an [`AppConfig`] before any I/O happens.
//!
//! # Invariants
//! - At most one site location (`--data-dir` or `--base-url`) is set.
//! - Log directories are absolute once validated.

use anyhow::Context;
use clap::{Parser, Subcommand};
use poembook_core::{
    default_log_level, CollectionSource, DirSource, FontKey, HttpSource, SortMode, Theme,
    DEFAULT_REQUEST_TIMEOUT,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const PREFS_DB_FILE_NAME: &str = "prefs.sqlite3";
const APP_DIR_NAME: &str = "poembook";

#[derive(Parser, Debug)]
#[command(name = "poembook", version, about = "Browse a poem site from the terminal")]
pub struct Cli {
    /// Local site root containing `data/poems.json` and `data/poets.json`.
    #[arg(long, env = "POEMBOOK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
    /// Remote site base URL.
    #[arg(long, env = "POEMBOOK_BASE_URL", global = true)]
    pub base_url: Option<String>,
    /// Do not append the `v=<millis>` cache-busting parameter.
    #[arg(long, global = true)]
    pub no_cache_bust: bool,
    /// Per-request deadline for `--base-url` sites, in seconds.
    #[arg(long, env = "POEMBOOK_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
    /// Preference database path (`:memory:` for a throwaway store).
    #[arg(long, env = "POEMBOOK_PREFS_DB", global = true)]
    pub prefs_db: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "POEMBOOK_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,
    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, env = "POEMBOOK_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List poems, optionally filtered, and show the selected one.
    List {
        /// Exact tag label.
        #[arg(long)]
        tag: Option<String>,
        /// Case-insensitive text matched against title and body.
        #[arg(long, short)]
        query: Option<String>,
        /// newest|oldest|a-z|z-a
        #[arg(long, default_value = "newest")]
        sort: SortMode,
        /// Poem id to select instead of the newest poem.
        #[arg(long)]
        select: Option<String>,
        /// Print a body preview under each row.
        #[arg(long)]
        excerpts: bool,
    },
    /// Show one poem.
    Show { id: String },
    /// Show tag counts.
    Tags,
    /// List poets.
    Poets,
    /// Show, set or toggle the color theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
        /// System preference used when no theme is saved.
        #[arg(long, env = "POEMBOOK_PREFERS_DARK")]
        prefers_dark: bool,
    },
    /// Show or set the UI font.
    Font { key: Option<FontKey> },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ThemeAction {
    Toggle,
    Set { theme: Theme },
}

/// Where the site collections live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteLocation {
    Dir(PathBuf),
    Url {
        base_url: String,
        cache_bust: bool,
        timeout: Duration,
    },
}

impl SiteLocation {
    /// Builds the collection source for this location.
    pub fn source(&self) -> anyhow::Result<Box<dyn CollectionSource>> {
        let source: Box<dyn CollectionSource> = match self {
            Self::Dir(root) => Box::new(DirSource::new(root.clone())),
            Self::Url {
                base_url,
                cache_bust,
                timeout,
            } => Box::new(
                HttpSource::with_timeout(base_url.clone(), *timeout)
                    .context("cannot build HTTP client")?
                    .cache_bust(*cache_bust),
            ),
        };
        Ok(source)
    }
}

/// Preference store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefsLocation {
    Memory,
    File(PathBuf),
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub site: Option<SiteLocation>,
    pub prefs: PrefsLocation,
    /// `(level, absolute dir)` when file logging is enabled.
    pub logging: Option<(String, PathBuf)>,
}

impl AppConfig {
    /// Validates CLI flags; `cwd` anchors relative log directories.
    pub fn from_cli(cli: &Cli, cwd: &Path) -> Result<Self, ConfigError> {
        let site = match (&cli.data_dir, &cli.base_url) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingSite),
            (Some(dir), None) => Some(SiteLocation::Dir(dir.clone())),
            (None, Some(url)) => Some(SiteLocation::Url {
                base_url: validate_base_url(url)?,
                cache_bust: !cli.no_cache_bust,
                timeout: match cli.timeout_secs {
                    Some(0) => return Err(ConfigError::InvalidTimeout),
                    Some(secs) => Duration::from_secs(secs),
                    None => DEFAULT_REQUEST_TIMEOUT,
                },
            }),
            (None, None) => None,
        };

        let prefs = match &cli.prefs_db {
            Some(path) if path.as_os_str() == ":memory:" => PrefsLocation::Memory,
            Some(path) => PrefsLocation::File(path.clone()),
            None => PrefsLocation::File(default_prefs_path().ok_or(ConfigError::NoDataDir)?),
        };

        let logging = cli.log_dir.as_ref().map(|dir| {
            let level = cli
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string());
            let dir = if dir.is_absolute() {
                dir.clone()
            } else {
                cwd.join(dir)
            };
            (level, dir)
        });

        Ok(Self {
            site,
            prefs,
            logging,
        })
    }

    /// Site location, required by browsing commands.
    pub fn require_site(&self) -> Result<&SiteLocation, ConfigError> {
        self.site.as_ref().ok_or(ConfigError::MissingSite)
    }
}

/// Invalid flag combination or value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ConflictingSite,
    MissingSite,
    InvalidBaseUrl(String),
    /// `--timeout-secs 0`.
    InvalidTimeout,
    /// No platform data directory for the default preference store.
    NoDataDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConflictingSite => write!(f, "use either --data-dir or --base-url, not both"),
            Self::MissingSite => write!(
                f,
                "no site configured; pass --data-dir or --base-url (or POEMBOOK_DATA_DIR / POEMBOOK_BASE_URL)"
            ),
            Self::InvalidBaseUrl(url) => {
                write!(f, "base url must start with http:// or https://, got `{url}`")
            }
            Self::InvalidTimeout => write!(f, "--timeout-secs must be at least 1"),
            Self::NoDataDir => write!(
                f,
                "cannot determine a data directory for preferences; pass --prefs-db"
            ),
        }
    }
}

impl Error for ConfigError {}

fn validate_base_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(trimmed.to_string()))
    }
}

fn default_prefs_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join(PREFS_DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, Cli, ConfigError, PrefsLocation, SiteLocation};
    use clap::Parser;
    use poembook_core::DEFAULT_REQUEST_TIMEOUT;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("poembook").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn data_dir_and_base_url_conflict() {
        let cli = parse(&[
            "--data-dir",
            "site",
            "--base-url",
            "https://poems.example",
            "--prefs-db",
            ":memory:",
            "tags",
        ]);
        let err = AppConfig::from_cli(&cli, Path::new("/work")).unwrap_err();
        assert_eq!(err, ConfigError::ConflictingSite);
    }

    #[test]
    fn base_url_honors_cache_bust_flag() {
        let cli = parse(&[
            "--base-url",
            "https://poems.example",
            "--no-cache-bust",
            "--prefs-db",
            ":memory:",
            "tags",
        ]);
        let config = AppConfig::from_cli(&cli, Path::new("/work")).unwrap();
        assert_eq!(
            config.site,
            Some(SiteLocation::Url {
                base_url: "https://poems.example".to_string(),
                cache_bust: false,
                timeout: DEFAULT_REQUEST_TIMEOUT,
            })
        );
        assert_eq!(config.prefs, PrefsLocation::Memory);
    }

    #[test]
    fn base_url_requires_http_scheme() {
        let cli = parse(&["--base-url", "poems.example", "--prefs-db", ":memory:", "tags"]);
        let err = AppConfig::from_cli(&cli, Path::new("/work")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn timeout_flag_sets_http_deadline() {
        let cli = parse(&[
            "--base-url",
            "https://poems.example",
            "--timeout-secs",
            "3",
            "--prefs-db",
            ":memory:",
            "tags",
        ]);
        let config = AppConfig::from_cli(&cli, Path::new("/work")).unwrap();
        assert!(matches!(
            config.site,
            Some(SiteLocation::Url { timeout, .. }) if timeout == Duration::from_secs(3)
        ));

        let zero = parse(&[
            "--base-url",
            "https://poems.example",
            "--timeout-secs",
            "0",
            "--prefs-db",
            ":memory:",
            "tags",
        ]);
        assert_eq!(
            AppConfig::from_cli(&zero, Path::new("/work")).unwrap_err(),
            ConfigError::InvalidTimeout
        );
    }

    #[test]
    fn relative_log_dir_is_anchored_to_cwd() {
        let cli = parse(&[
            "--log-dir",
            "logs",
            "--log-level",
            "warn",
            "--prefs-db",
            ":memory:",
            "font",
        ]);
        let config = AppConfig::from_cli(&cli, Path::new("/work")).unwrap();
        assert_eq!(
            config.logging,
            Some(("warn".to_string(), PathBuf::from("/work/logs")))
        );
        assert_eq!(config.require_site(), Err(ConfigError::MissingSite));
    }

    #[test]
    fn list_parses_sort_mode() {
        let cli = parse(&["list", "--sort", "a-z", "--tag", "nature"]);
        match cli.command {
            super::Command::List { sort, tag, .. } => {
                assert_eq!(sort, poembook_core::SortMode::AToZ);
                assert_eq!(tag.as_deref(), Some("nature"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
