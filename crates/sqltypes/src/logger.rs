use log::LevelFilter;
use tracing::Level;

use crate::BuildOutcome;

/// Log target for render events.
pub(crate) const TARGET: &str = "sqltypes::render";

#[derive(Clone, Debug)]
#[non_exhaustive]
/// Logging configuration for rendered expressions.
pub struct LogSettings {
    /// Log level for expressions that wrote a fragment.
    pub fragments_level: LevelFilter,
    /// Log level for expressions that were skipped and wrote nothing.
    pub skipped_level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            fragments_level: LevelFilter::Trace,
            skipped_level: LevelFilter::Debug,
        }
    }
}

impl LogSettings {
    /// Configure the logging level for written fragments.
    pub fn log_fragments(&mut self, level: LevelFilter) {
        self.fragments_level = level;
    }

    /// Configure the logging level for skipped expressions.
    pub fn log_skipped(&mut self, level: LevelFilter) {
        self.skipped_level = level;
    }

    /// Returns `true` if any logging level is enabled.
    pub fn is_enabled(&self) -> bool {
        self.fragments_level != LevelFilter::Off || self.skipped_level != LevelFilter::Off
    }
}

#[doc(hidden)]
pub fn private_level_filter_to_levels(filter: LevelFilter) -> Option<(Level, log::Level)> {
    let tracing_level = match filter {
        LevelFilter::Error => Some(Level::ERROR),
        LevelFilter::Warn => Some(Level::WARN),
        LevelFilter::Info => Some(Level::INFO),
        LevelFilter::Debug => Some(Level::DEBUG),
        LevelFilter::Trace => Some(Level::TRACE),
        LevelFilter::Off => None,
    };

    tracing_level.zip(filter.to_level())
}

/// Check whether tracing is enabled for the render target at the provided level.
fn tracing_enabled_for(level: Level) -> bool {
    match level {
        Level::ERROR => tracing::enabled!(target: TARGET, Level::ERROR),
        Level::WARN => tracing::enabled!(target: TARGET, Level::WARN),
        Level::INFO => tracing::enabled!(target: TARGET, Level::INFO),
        Level::DEBUG => tracing::enabled!(target: TARGET, Level::DEBUG),
        Level::TRACE => tracing::enabled!(target: TARGET, Level::TRACE),
    }
}

/// Emit a render event at a dynamically chosen level. `tracing::event!` needs a constant level,
/// hence one arm per level.
fn emit_render_event(level: Level, dialect: &str, outcome: &str, sql: &str, arguments: usize) {
    match level {
        Level::ERROR => tracing::event!(
            target: TARGET,
            Level::ERROR,
            dialect,
            outcome,
            db.statement = sql,
            arguments,
        ),
        Level::WARN => tracing::event!(
            target: TARGET,
            Level::WARN,
            dialect,
            outcome,
            db.statement = sql,
            arguments,
        ),
        Level::INFO => tracing::event!(
            target: TARGET,
            Level::INFO,
            dialect,
            outcome,
            db.statement = sql,
            arguments,
        ),
        Level::DEBUG => tracing::event!(
            target: TARGET,
            Level::DEBUG,
            dialect,
            outcome,
            db.statement = sql,
            arguments,
        ),
        Level::TRACE => tracing::event!(
            target: TARGET,
            Level::TRACE,
            dialect,
            outcome,
            db.statement = sql,
            arguments,
        ),
    }
}

/// Records one expression render and logs it when finished.
pub struct RenderLogger<'s> {
    /// Dialect the expression was rendered for.
    dialect: &'s str,
    /// Logging settings in effect.
    settings: &'s LogSettings,
}

impl<'s> RenderLogger<'s> {
    pub fn new(dialect: &'s str, settings: &'s LogSettings) -> Self {
        Self { dialect, settings }
    }

    /// Log the fragment written by one expression, along with how many arguments it bound.
    pub fn finish(&self, outcome: &BuildOutcome, fragment: &str, arguments: usize) {
        let lvl = match outcome {
            BuildOutcome::Written => self.settings.fragments_level,
            BuildOutcome::Skipped(_) => self.settings.skipped_level,
        };

        let Some((tracing_level, log_level)) = private_level_filter_to_levels(lvl) else {
            return;
        };

        if !self.log_is_enabled(tracing_level, log_level) {
            return;
        }

        emit_render_event(
            tracing_level,
            self.dialect,
            &outcome.to_string(),
            &build_log_payload(fragment),
            arguments,
        );
    }

    /// Check if either the log or tracing subscriber is enabled at the given level.
    fn log_is_enabled(&self, tracing_level: Level, log_level: log::Level) -> bool {
        log::log_enabled!(target: TARGET, log_level) || tracing_enabled_for(tracing_level)
    }
}

/// Short fragments are logged as-is, long ones are pretty-printed on their own lines.
fn build_log_payload(fragment: &str) -> String {
    if fragment.len() <= 80 {
        return fragment.to_string();
    }
    let formatted = sqlformat::format(
        fragment,
        &sqlformat::QueryParams::None,
        &sqlformat::FormatOptions::default(),
    );
    format!("\n\n{formatted}\n")
}
