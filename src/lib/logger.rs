use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => "DBG".bright_cyan(),
            LogLevel::Info => "INF".bright_green(),
            LogLevel::Warn => "WAR".yellow(),
            LogLevel::Error => "ERR".bright_red(),
        }
    }

    /// Whether a message at this level is shown by a logger configured with
    /// `threshold`.
    pub fn shown_at(&self, threshold: &LogLevel) -> bool {
        match threshold {
            LogLevel::Debug => true,
            LogLevel::Info => *self != LogLevel::Debug,
            LogLevel::Warn => *self == LogLevel::Warn || *self == LogLevel::Error,
            LogLevel::Error => *self == LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    level: LogLevel,
    name: String,
}

impl Logger {
    pub fn new(level: LogLevel, name: impl Into<String>) -> Self {
        Logger {
            level,
            name: name.into(),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if level.shown_at(&self.level) {
            let name = format!("{}:", self.name).dimmed();
            println!("[{}] {} {}", level.tag(), name, message);
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Prints an empty line, subject to the same level filtering.
    pub fn empty(&self, level: LogLevel) {
        if level.shown_at(&self.level) {
            println!();
        }
    }

    pub fn object<'a>(&'a self, name: &'a str) -> ObjectBuilder<'a> {
        ObjectBuilder::new(name, self)
    }
}

/// Builds a multi-line `name { field: value, ... }` log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBuilder<'a> {
    logger: &'a Logger,
    name: &'a str,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObjectBuilder<'a> {
    fn new(name: &'a str, logger: &'a Logger) -> Self {
        ObjectBuilder {
            logger,
            name,
            fields: vec![],
        }
    }

    pub fn add_field(mut self, name: &'a str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));

        self
    }

    fn build(&self) -> String {
        let mut result = format!("{} {{", self.name);
        for (name, value) in &self.fields {
            result.push_str(&format!("\n  {}: {}", name, value));
        }
        result.push_str("\n}");
        result
    }

    pub fn log(&self, level: LogLevel) {
        self.logger.log(level, &self.build());
    }
}
