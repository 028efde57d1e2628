#![forbid(unsafe_code)]

//! Global `tracing` subscriber setup.
//!
//! Library crates only emit events; hosts (the demo page, test binaries)
//! call [`init`] once at startup.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `FOLIO_LOG` | `EnvFilter` directive string | `info` |
//! | `FOLIO_LOG_FORMAT` | `text` or `json` | `text` |
//!
//! JSON output requires the `tracing-json` feature; without it a `json`
//! request falls back to text.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_FILTER_ENV: &str = "FOLIO_LOG";
/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "FOLIO_LOG_FORMAT";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl LogConfig {
    /// Read `FOLIO_LOG` / `FOLIO_LOG_FORMAT`, keeping defaults for unset values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(filter) = lookup(LOG_FILTER_ENV)
            && !filter.trim().is_empty()
        {
            config.filter = filter;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            config.format = LogFormat::parse(&format);
        }
        config
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Failure to install the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if the filter does not parse or a subscriber is
/// already installed.
pub fn init(config: &LogConfig) -> Result<(), LogInitError> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|source| LogInitError::Filter {
        filter: config.filter.clone(),
        source,
    })?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format {
        #[cfg(feature = "tracing-json")]
        LogFormat::Json => builder.json().try_init(),
        #[cfg(not(feature = "tracing-json"))]
        LogFormat::Json => builder.try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|_| LogInitError::AlreadyInstalled)
}

/// Install a test-writer subscriber, ignoring "already installed".
///
/// Safe to call from every test.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
