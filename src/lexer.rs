//! Tokenizer for `LogFormat` strings.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Optional `<` / `>` modifier between `%` and the directive key.
///
/// Apache uses it to pick the original or final request after internal
/// redirects; it does not change what the field looks like in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Original,
    Final,
}

/// A `%` directive found in the format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// A single letter, or `^ti` / `^to`.
    pub key: &'a str,
    /// The `{...}` part, without braces.
    pub qualifier: Option<&'a str>,
    pub modifier: Option<Modifier>,
}

/// A lexical token of a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Directive(Directive<'a>),
    /// `%%`, a literal percent sign.
    Escape,
    /// Text copied verbatim from the format.
    Literal(&'a str),
}

/// Alternatives are tried in order: directive, escape, stray `%`, literal run.
fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"(?s)%(?:\{([A-Za-z0-9_-]+)\})?([<>])?([A-Za-z]|\^t[io])|%%|%.|[^%]+")
            .expect("token pattern is valid")
    })
}

/// Split a format string into tokens.
///
/// Fails on the first `%` that starts neither a directive nor `%%`. Directive
/// keys are not checked against the directive table here.
pub fn tokenize(format: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for captures in token_regex().captures_iter(format) {
        let full_match = captures.get(0).expect("group 0 always participates");

        // Only a lone `%` at the very end can be skipped by the pattern.
        if full_match.start() != last_end {
            return Err(Error::invalid_format(&format[last_end..full_match.start()]));
        }
        last_end = full_match.end();

        let text = full_match.as_str();
        let token = if let Some(key) = captures.get(3) {
            Token::Directive(Directive {
                key: key.as_str(),
                qualifier: captures.get(1).map(|m| m.as_str()),
                modifier: captures.get(2).map(|m| match m.as_str() {
                    "<" => Modifier::Original,
                    _ => Modifier::Final,
                }),
            })
        } else if text == "%%" {
            Token::Escape
        } else if text.starts_with('%') {
            return Err(Error::invalid_format(text));
        } else {
            Token::Literal(text)
        };

        tokens.push(token);
    }

    if last_end != format.len() {
        return Err(Error::invalid_format(&format[last_end..]));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(key: &str) -> Token<'_> {
        Token::Directive(Directive {
            key,
            qualifier: None,
            modifier: None,
        })
    }

    #[test]
    fn test_tokenize_simple() {
        let tokens = tokenize("%h %l [%t]").unwrap();
        assert_eq!(
            tokens,
            vec![
                directive("h"),
                Token::Literal(" "),
                directive("l"),
                Token::Literal(" ["),
                directive("t"),
                Token::Literal("]"),
            ]
        );
    }

    #[test]
    fn test_tokenize_qualifier_and_modifier() {
        // The qualifier must come before the modifier.
        let err = tokenize("%{User-Agent_2}i%>s%<{x}u").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { ref directive } if directive == "%<"));

        let tokens = tokenize("%{User-Agent_2}i%>s%{msec}<t").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Directive(Directive {
                    key: "i",
                    qualifier: Some("User-Agent_2"),
                    modifier: None,
                }),
                Token::Directive(Directive {
                    key: "s",
                    qualifier: None,
                    modifier: Some(Modifier::Final),
                }),
                Token::Directive(Directive {
                    key: "t",
                    qualifier: Some("msec"),
                    modifier: Some(Modifier::Original),
                }),
            ]
        );
    }

    #[test]
    fn test_tokenize_trailer_keys() {
        let tokens = tokenize("%^ti|%^to").unwrap();
        assert_eq!(
            tokens,
            vec![directive("^ti"), Token::Literal("|"), directive("^to")]
        );
    }

    #[test]
    fn test_tokenize_escape() {
        let tokens = tokenize("100%%").unwrap();
        assert_eq!(tokens, vec![Token::Literal("100"), Token::Escape]);
    }

    #[test]
    fn test_tokenize_unknown_letters_are_directives() {
        // Rejected later, by the directive table.
        assert_eq!(tokenize("%Z").unwrap(), vec![directive("Z")]);
    }

    #[test]
    fn test_tokenize_invalid_sequences() {
        for (format, offending) in [
            ("%^", "%^"),
            ("%_", "%_"),
            ("a %{Host} b", "%{"),
            ("%^tx", "%^"),
            ("abc %", "%"),
            ("%\n", "%\n"),
        ] {
            match tokenize(format) {
                Err(Error::InvalidFormat { directive }) => assert_eq!(directive, offending),
                other => panic!("unexpected result for {:?}: {:?}", format, other),
            }
        }
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }
}
