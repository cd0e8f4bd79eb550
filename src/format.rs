//! Compilation of `LogFormat` strings into line-matching regexes.

use crate::directive;
use crate::error::{Error, Result};
use crate::lexer::{self, Token};
use regex::Regex;

/// A compiled `LogFormat` string.
///
/// Holds a regex with one capturing group per directive and the field name of
/// each group, in directive order. Field names are unique: a name that was
/// already assigned gets a `:2`, `:3`, ... suffix.
///
/// Compiling is the expensive step; build one `CompiledFormat` per format string
/// and reuse it for every line. It is immutable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    /// The original format string.
    format: String,
    /// The compiled regular expression for parsing.
    regex: Regex,
    /// One name per capturing group.
    names: Vec<String>,
}

impl CompiledFormat {
    /// Compile a format string.
    ///
    /// # Arguments
    ///
    /// * `format` - An Apache `LogFormat` string (e.g., `%h %l %u %t "%r" %>s %b`)
    ///
    /// # Returns
    ///
    /// The compiled format, or [`Error::InvalidFormat`] naming the first `%`
    /// sequence that is not a known directive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rsapl::CompiledFormat;
    ///
    /// let format = CompiledFormat::new(r#"%h %l %u %t "%r" %>s %b"#)?;
    /// assert_eq!(
    ///     format.field_names(),
    ///     ["remoteHostname", "remoteLogname", "remoteUser", "time", "firstRequestLine", "status", "responseSize"]
    /// );
    /// # Ok::<(), rsapl::Error>(())
    /// ```
    pub fn new(format: &str) -> Result<Self> {
        let mut pattern = String::from("^");
        let mut names: Vec<String> = Vec::new();

        for token in lexer::tokenize(format)? {
            match token {
                Token::Literal(text) => pattern.push_str(&regex::escape(text)),
                Token::Escape => pattern.push('%'),
                Token::Directive(d) => {
                    let spec = directive::lookup(d.key)
                        .ok_or_else(|| Error::invalid_format(format!("%{}", d.key)))?;

                    let name = match d.qualifier {
                        Some(qualifier) => format!("{}:{}", spec.name, qualifier),
                        None => spec.name.to_string(),
                    };
                    let name = unique_name(&names, name);

                    pattern.push_str(spec.rule.pattern(d.qualifier.is_some()));
                    names.push(name);
                }
            }
        }

        pattern.push_str(r"\r?\n?$");

        let regex = Regex::new(&pattern)?;
        tracing::debug!(format, fields = names.len(), "compiled log format");

        Ok(Self {
            format: format.to_string(),
            regex,
            names,
        })
    }

    /// Get the original format string.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Get the compiled regex pattern.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Field names, one per capturing group, in directive order.
    pub fn field_names(&self) -> &[String] {
        &self.names
    }

    /// Number of fields a matching line yields.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the format has no directives.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Return `candidate`, or the first of `candidate:2`, `candidate:3`, ... not in `taken`.
fn unique_name(taken: &[String], candidate: String) -> String {
    if !taken.contains(&candidate) {
        return candidate;
    }

    let mut suffix = 2;
    loop {
        let name = format!("{}:{}", candidate, suffix);
        if !taken.contains(&name) {
            return name;
        }
        suffix += 1;
    }
}
