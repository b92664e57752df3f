//! Search configuration.
//!
//! Every descent step has to find the child edge that continues the query.
//! Two equivalent ways exist: probing the query's own prefixes as exact
//! labels, or scanning every child for a shared prefix. Which one is
//! cheaper depends on the query length versus the node's fanout.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable read by [`Config::from_env`].
pub const SEARCH_ENV: &str = "RADIX_SET_SEARCH";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown search strategy: {0:?} (expected scan, probe or adaptive)")]
    UnknownStrategy(String),

    #[error("{var} is not valid unicode")]
    NotUnicode { var: &'static str },
}

/// How a node locates the child edge for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Compare the query against every child label.
    Scan,
    /// Look up `key[..i]` for `i = len..1` as exact labels.
    ///
    /// Insertion still scans on a probe miss, since a new edge must not be
    /// created next to a sibling that shares part of its prefix.
    Probe,
    /// Probe when the query is shorter than the fanout, scan otherwise.
    #[default]
    Adaptive,
}

impl SearchStrategy {
    /// Whether a node with `fanout` children should be probed for a query of
    /// `key_len` bytes.
    #[inline]
    pub(crate) fn probes(self, key_len: usize, fanout: usize) -> bool {
        match self {
            Self::Scan => false,
            Self::Probe => true,
            Self::Adaptive => key_len < fanout,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Probe => "probe",
            Self::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "probe" => Ok(Self::Probe),
            "adaptive" => Ok(Self::Adaptive),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Configuration for a [`RadixSet`](crate::RadixSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Child lookup strategy used by insert, remove and containment.
    pub search: SearchStrategy,
}

impl Config {
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    /// Read the configuration from [`SEARCH_ENV`].
    ///
    /// An unset variable yields the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var))
    }

    /// Like [`Config::from_env`], but logs and ignores invalid values.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring invalid radix set configuration");
            Self::default()
        })
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, std::env::VarError>,
    ) -> Result<Self, ConfigError> {
        let search = match lookup(SEARCH_ENV) {
            Ok(value) => value.parse()?,
            Err(std::env::VarError::NotPresent) => SearchStrategy::default(),
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NotUnicode { var: SEARCH_ENV })
            }
        };
        Ok(Self { search })
    }
}
