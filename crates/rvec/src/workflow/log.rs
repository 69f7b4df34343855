//! The Log structure helps print structured log messages to STDERR.

// dependencies
use chrono::Local;

/// The Log structure helps print structured log messages to STDERR.
///
/// By convention, Log objects are named `log`.
pub struct Log {
    tool: String,
}
impl Log {

    /// Create a new Log instance for a given tool.
    ///
    /// By convention, Log objects are named `log`.
    pub fn new(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
        }
    }

    /// Return the tool name that prefixes every message.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Format a time-stamped message without printing it.
    pub fn format(&self, msg: &str) -> String {
        format!("{}: {} ({})", self.tool, msg, Local::now().to_rfc3339())
    }

    /// Print a time-stamped message to STDERR for logging purposes.
    pub fn print(&self, msg: &str) {
        eprintln!("{}", self.format(msg));
    }

    /// Print a time-stamped 'initializing' message to STDERR for logging purposes.
    /// Includes a preceding newline for spacing clarity.
    pub fn initializing(&self) {
        eprintln!("\n{}", self.format("initializing"));
    }

    /// Print one `key = value` line per configuration option to STDERR.
    pub fn options(&self, options: &[(&str, String)]) {
        for (key, value) in options {
            eprintln!("{}: option {} = {}", self.tool, key, value);
        }
    }
}
