//! Applying a compiled format to log lines.

use crate::entry::{Entry, Fields};
use crate::error::{Error, Result};
use crate::format::CompiledFormat;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trait for parsing log lines into entries.
pub trait StringParser {
    /// Parse a log line into an entry.
    fn parse_string(&self, line: &str) -> Result<Entry>;
}

/// How a parsed line is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Values in field order.
    Positional,
    /// Values keyed by field name.
    Named,
}

impl From<bool> for Mode {
    /// `true` selects [`Mode::Named`].
    fn from(named: bool) -> Self {
        if named {
            Self::Named
        } else {
            Self::Positional
        }
    }
}

/// The values extracted from one log line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParsedLine {
    Positional(Vec<String>),
    Named(Entry),
}

impl ParsedLine {
    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(entry) => entry.len(),
        }
    }

    /// Check if the line yielded no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The positional values, if this is a positional result.
    pub fn into_values(self) -> Option<Vec<String>> {
        match self {
            Self::Positional(values) => Some(values),
            Self::Named(_) => None,
        }
    }

    /// The entry, if this is a named result.
    pub fn into_entry(self) -> Option<Entry> {
        match self {
            Self::Positional(_) => None,
            Self::Named(entry) => Some(entry),
        }
    }
}

impl CompiledFormat {
    /// Parse a line, returning values positionally or by name.
    ///
    /// A trailing `\r\n` or `\n` on the line is accepted and not captured.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rsapl::{CompiledFormat, Mode, ParsedLine};
    ///
    /// let format = CompiledFormat::new("%h %>s")?;
    ///
    /// let values = format.parse("127.0.0.1 404", Mode::Positional)?;
    /// assert_eq!(values, ParsedLine::Positional(vec!["127.0.0.1".into(), "404".into()]));
    ///
    /// let entry = format.parse("127.0.0.1 404\n", Mode::Named)?.into_entry().unwrap();
    /// assert_eq!(entry.int_field("status")?, 404);
    /// # Ok::<(), rsapl::Error>(())
    /// ```
    pub fn parse(&self, line: &str, mode: Mode) -> Result<ParsedLine> {
        match mode {
            Mode::Positional => self.parse_positional(line).map(ParsedLine::Positional),
            Mode::Named => self.parse_named(line).map(ParsedLine::Named),
        }
    }

    /// Parse a line into its values, in field order.
    pub fn parse_positional(&self, line: &str) -> Result<Vec<String>> {
        let captures = self.regex().captures(line).ok_or_else(|| {
            tracing::trace!(format = self.format(), line, "log line does not match format");
            Error::unparsable_line(line)
        })?;

        // Every group takes part in a match; an optional group that matched
        // nothing still yields an empty value.
        Ok(captures
            .iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect())
    }

    /// Parse a line into an entry keyed by field name.
    pub fn parse_named(&self, line: &str) -> Result<Entry> {
        let values = self.parse_positional(line)?;

        let fields: Fields = self
            .field_names()
            .iter()
            .cloned()
            .zip(values)
            .collect();

        Ok(Entry::from_fields(fields))
    }
}

impl StringParser for CompiledFormat {
    fn parse_string(&self, line: &str) -> Result<Entry> {
        self.parse_named(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional() {
        let format = CompiledFormat::new(r#"%a %m %U "%q" %H "%{Referer}i""#).unwrap();
        let values = format
            .parse_positional(r#"10.0.0.1 GET /search "?q=rust" HTTP/2.0 "-""#)
            .unwrap();
        assert_eq!(values, ["10.0.0.1", "GET", "/search", "?q=rust", "HTTP/2.0", "-"]);
    }

    #[test]
    fn test_parse_empty_query_string() {
        let format = CompiledFormat::new("%U%q %>s").unwrap();
        let values = format.parse_positional("/index.html 200").unwrap();
        assert_eq!(values, ["/index.html", "", "200"]);
    }

    #[test]
    fn test_parse_empty_fallback_fields() {
        let format = CompiledFormat::new("%h %u|%^ti").unwrap();
        assert_eq!(format.parse_positional("a |").unwrap(), ["a", "", ""]);

        let entry = format.parse_named("a |").unwrap();
        assert_eq!(entry.field("remoteUser").unwrap(), "");
        assert_eq!(entry.field("requestTrailerLine").unwrap(), "");
    }

    #[test]
    fn test_parse_named() {
        let format = CompiledFormat::new("%v:%p %X %D").unwrap();
        let entry = format.parse_named("www.example.com:443 + 1520").unwrap();
        assert_eq!(entry.len(), 4);
        assert_eq!(entry.field("serverName").unwrap(), "www.example.com");
        assert_eq!(entry.int_field("canonicalPort").unwrap(), 443);
        assert_eq!(entry.field("connectionStatus").unwrap(), "+");
        assert_eq!(entry.int64_field("responseTime").unwrap(), 1520);
    }

    #[test]
    fn test_parse_mode_from_bool() {
        let format = CompiledFormat::new("%>s").unwrap();
        assert!(matches!(
            format.parse("200", Mode::from(false)).unwrap(),
            ParsedLine::Positional(_)
        ));
        assert!(matches!(
            format.parse("200", true.into()).unwrap(),
            ParsedLine::Named(_)
        ));
    }

    #[test]
    fn test_parse_trailing_newline() {
        let format = CompiledFormat::new("%h %>s").unwrap();
        for line in ["::1 200", "::1 200\n", "::1 200\r\n", "::1 200\r"] {
            assert_eq!(format.parse_positional(line).unwrap(), ["::1", "200"]);
        }
        assert!(format.parse_positional("::1 200\n\n").is_err());
    }

    #[test]
    fn test_parse_bogus_request() {
        let format = CompiledFormat::new(r#""%r" %b"#).unwrap();
        assert_eq!(format.parse_positional(r#""-" -"#).unwrap(), ["-", "-"]);
        assert!(format.parse_positional(r#""garbage" 12"#).is_err());
    }

    #[test]
    fn test_parse_mismatch() {
        let format = CompiledFormat::new("%h %>s %b").unwrap();
        match format.parse_positional("127.0.0.1 OK 12") {
            Err(Error::UnparsableLine { line }) => assert_eq!(line, "127.0.0.1 OK 12"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parsed_line_accessors() {
        let format = CompiledFormat::new("%h").unwrap();

        let positional = format.parse("host", Mode::Positional).unwrap();
        assert_eq!(positional.len(), 1);
        assert!(positional.clone().into_entry().is_none());
        assert_eq!(positional.into_values().unwrap(), ["host"]);

        let named = format.parse("host", Mode::Named).unwrap();
        assert!(!named.is_empty());
        assert!(named.clone().into_values().is_none());
        assert_eq!(named.into_entry().unwrap().field("remoteHostname").unwrap(), "host");
    }

    #[test]
    fn test_string_parser_trait() {
        let format = CompiledFormat::new("%u").unwrap();
        let parser: &dyn StringParser = &format;
        assert_eq!(parser.parse_string("alice").unwrap().field("remoteUser").unwrap(), "alice");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parsed_line_serializes_untagged() {
        let format = CompiledFormat::new("%h %>s").unwrap();

        let named = format.parse("::1 200", Mode::Named).unwrap();
        let json: serde_json::Value = serde_json::to_value(&named).unwrap();
        assert_eq!(json, serde_json::json!({"remoteHostname": "::1", "status": "200"}));

        let positional = format.parse("::1 200", Mode::Positional).unwrap();
        assert_eq!(serde_json::to_string(&positional).unwrap(), r#"["::1","200"]"#);
    }
}
