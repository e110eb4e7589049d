use log::LevelFilter;

use crate::{Dialect, Result, logger::LogSettings};

/// Configure how statements are rendered.
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub(crate) dialect: Dialect,
    pub(crate) log_settings: LogSettings,
}

impl Options {
    /// Construct `Self` for a dialect with default logging.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            log_settings: LogSettings::default(),
        }
    }

    /// Construct `Self` with the dialect implied by a database URL.
    pub fn from_url(database_url: &str) -> Result<Self> {
        Ok(Self::new(Dialect::from_url(database_url)?))
    }

    /// Sets the dialect statements are rendered for.
    #[must_use]
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Treat a MySQL connection as MariaDB when its reported server version says so.
    #[must_use]
    pub fn server_version(mut self, version: &str) -> Self {
        if self.dialect.is_mysql_family() {
            self.dialect = Dialect::mysql_with_version(version);
        }
        self
    }

    /// Log written fragments at the given level. Defaults to `Trace`.
    #[must_use]
    pub fn log_fragments(mut self, level: LevelFilter) -> Self {
        self.log_settings.log_fragments(level);
        self
    }

    /// Log skipped expressions at the given level. Defaults to `Debug`.
    #[must_use]
    pub fn log_skipped(mut self, level: LevelFilter) -> Self {
        self.log_settings.log_skipped(level);
        self
    }

    /// Disable render logging.
    #[must_use]
    pub fn disable_logging(self) -> Self {
        self.log_fragments(LevelFilter::Off)
            .log_skipped(LevelFilter::Off)
    }

    pub fn get_dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn log_settings(&self) -> &LogSettings {
        &self.log_settings
    }
}
