//! Logging configuration and utilities.

use std::collections::HashMap;

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Trace level.
    Trace = 0,
    /// Debug level.
    Debug = 1,
    /// Info level.
    #[default]
    Info = 2,
    /// Warning level.
    Warn = 3,
    /// Error level.
    Error = 4,
    /// Off (no logging).
    Off = 5,
}

impl LogLevel {
    /// Returns the level as a `tracing` filter directive.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Include timestamps.
    pub include_timestamps: bool,
    /// Emit JSON lines when installed as a tracing subscriber.
    pub json: bool,
    /// Redact sensitive data.
    pub redact_sensitive: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            include_timestamps: true,
            json: false,
            redact_sensitive: true,
        }
    }
}

impl LogConfig {
    /// Creates a new log configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Switches the tracing subscriber to JSON output.
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Disables sensitive data redaction.
    pub fn no_redact(mut self) -> Self {
        self.redact_sensitive = false;
        self
    }
}

/// Logger interface.
pub trait Logger: Send + Sync {
    /// Logs a message at the specified level.
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>);

    /// Logs at trace level.
    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message, None);
    }

    /// Logs at debug level.
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    /// Logs at info level.
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Logs at warning level.
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, None);
    }

    /// Logs at error level.
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }
}

/// Console logger implementation.
pub struct ConsoleLogger {
    config: LogConfig,
}

impl ConsoleLogger {
    /// Creates a new console logger.
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    /// Redacts sensitive data from text.
    fn redact(&self, text: &str) -> String {
        if !self.config.redact_sensitive {
            return text.to_string();
        }

        let patterns = [
            (r"sk-[a-zA-Z0-9_-]+", "sk-***"),
            (r"Bearer [a-zA-Z0-9_.-]+", "Bearer ***"),
            (r"(?i)authorization[=:][^\s,}]+", "authorization=***"),
        ];

        let mut result = text.to_string();
        for (pattern, replacement) in patterns {
            if let Ok(re) = regex::Regex::new(pattern) {
                result = re.replace_all(&result, replacement).to_string();
            }
        }

        result
    }

    /// Formats a log line, or returns `None` when the level is filtered out.
    fn format(
        &self,
        level: LogLevel,
        message: &str,
        context: Option<&HashMap<String, String>>,
    ) -> Option<String> {
        if level < self.config.level || level == LogLevel::Off {
            return None;
        }

        let mut parts = Vec::new();

        if self.config.include_timestamps {
            parts.push(format!("[{}]", chrono::Utc::now().to_rfc3339()));
        }

        parts.push(format!("[{}]", level.as_directive().to_uppercase()));
        parts.push(self.redact(message));

        if let Some(ctx) = context {
            let redacted: HashMap<&String, String> = ctx
                .iter()
                .map(|(k, v)| {
                    let lower = k.to_lowercase();
                    let v = if self.config.redact_sensitive
                        && (lower.contains("key") || lower.contains("token") || lower.contains("auth"))
                    {
                        "***".to_string()
                    } else {
                        self.redact(v)
                    };
                    (k, v)
                })
                .collect();

            if let Ok(json) = serde_json::to_string(&redacted) {
                parts.push(json);
            }
        }

        Some(parts.join(" "))
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>) {
        let Some(output) = self.format(level, message, context) else {
            return;
        };

        match level {
            LogLevel::Error | LogLevel::Warn => eprintln!("{}", output),
            _ => println!("{}", output),
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("config", &self.config)
            .finish()
    }
}

/// No-op logger that discards all messages.
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: Option<&HashMap<String, String>>) {}
}

impl std::fmt::Debug for NoopLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoopLogger").finish()
    }
}
