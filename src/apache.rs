//! Apache configuration support: well-known formats and `LogFormat` extraction.

use crate::error::{Error, Result};
use crate::format::CompiledFormat;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

/// Common Log Format.
pub const COMMON: &str = r#"%h %l %u %t "%r" %>s %b"#;
/// Combined Log Format.
pub const COMBINED: &str = r#"%h %l %u %t "%r" %>s %b "%{Referer}i" "%{User-agent}i""#;
/// Common Log Format prefixed with the virtual host.
pub const VHOST_COMMON: &str = r#"%v %h %l %u %t "%r" %>s %b"#;
pub const REFERER: &str = "%{Referer}i -> %U";
pub const AGENT: &str = "%{User-agent}i";

/// Look up one of the formats Apache ships under a nickname.
pub fn well_known_format(nickname: &str) -> Option<&'static str> {
    match nickname {
        "common" => Some(COMMON),
        "combined" => Some(COMBINED),
        "vhost_common" => Some(VHOST_COMMON),
        "referer" => Some(REFERER),
        "agent" => Some(AGENT),
        _ => None,
    }
}

/// Treat `value` as a nickname if it is one, otherwise as a format string.
pub fn resolve_format(value: &str) -> &str {
    well_known_format(value).unwrap_or(value)
}

/// Extract a log format from Apache configuration.
///
/// Looks for a `LogFormat "<format>" <nickname>` directive. The directive name is
/// matched case-insensitively, `#` comments are skipped and lines ending in a
/// backslash are joined with the next one. Inside the quoted format, `\"` and
/// `\\` are unescaped.
///
/// # Arguments
///
/// * `config` - The Apache configuration input source
/// * `nickname` - The nickname given to the format (e.g., "combined")
///
/// # Returns
///
/// The format string, or an error if no such format is defined.
///
/// # Example
///
/// ```rust
/// use rsapl::apache::extract_log_format;
/// use std::io::Cursor;
///
/// let config = r#"LogFormat "%h %l %u %t \"%r\" %>s %b" common"#;
/// let format = extract_log_format(Cursor::new(config), "common")?;
/// assert_eq!(format, r#"%h %l %u %t "%r" %>s %b"#);
/// # Ok::<(), rsapl::Error>(())
/// ```
pub fn extract_log_format<R: Read>(config: R, nickname: &str) -> Result<String> {
    let reader = BufReader::new(config);

    let log_format_regex = Regex::new(&format!(
        r#"^\s*(?i:LogFormat)\s+"((?:[^"\\]|\\.)*)"\s+{}\s*$"#,
        regex::escape(nickname)
    ))?;

    let mut logical_line = String::new();

    for line_result in reader.lines() {
        let line = line_result?;
        let trimmed = line.trim_end();

        // Continuation lines are joined before anything else is looked at.
        if let Some(head) = trimmed.strip_suffix('\\') {
            logical_line.push_str(head);
            continue;
        }
        logical_line.push_str(trimmed);

        let current = std::mem::take(&mut logical_line);
        if current.trim_start().starts_with('#') {
            continue;
        }

        if let Some(captures) = log_format_regex.captures(&current) {
            return Ok(unescape(&captures[1]));
        }
    }

    Err(Error::log_format_not_found(nickname))
}

/// Undo `\"` and `\\` escaping; other backslash sequences are kept for
/// mod_log_config.
fn unescape(quoted: &str) -> String {
    let mut result = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => result.push(next),
            Some(next) => {
                result.push('\\');
                result.push(next);
            }
            None => result.push('\\'),
        }
    }

    result
}

impl CompiledFormat {
    /// Compile the format defined under `nickname` in an Apache configuration.
    ///
    /// Falls back to Apache's stock formats (`common`, `combined`, ...) when the
    /// configuration does not define the nickname.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rsapl::CompiledFormat;
    /// use std::io::Cursor;
    ///
    /// let format = CompiledFormat::from_apache_config(Cursor::new(""), "common")?;
    /// assert_eq!(format.len(), 7);
    /// # Ok::<(), rsapl::Error>(())
    /// ```
    pub fn from_apache_config<R: Read>(config: R, nickname: &str) -> Result<Self> {
        match extract_log_format(config, nickname) {
            Ok(format) => Self::new(&format),
            Err(Error::LogFormatNotFound { .. }) if well_known_format(nickname).is_some() => {
                tracing::debug!(nickname, "using stock apache log format");
                Self::new(resolve_format(nickname))
            }
            Err(e) => Err(e),
        }
    }

    /// Compile the format named by an environment variable.
    ///
    /// The variable holds either a nickname of a stock format or a format string.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = std::env::var(var).map_err(|e| Error::env_var(var, e))?;
        Self::from_setting(&value)
    }

    /// Compile a configured value: a stock nickname or a format string.
    pub fn from_setting(value: &str) -> Result<Self> {
        Self::new(resolve_format(value))
    }
}
