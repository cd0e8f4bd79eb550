//! # rsapl - Rust Apache Log Parser
//!
//! A Rust library for parsing Apache access logs described by a
//! [`LogFormat`](https://httpd.apache.org/docs/current/mod/mod_log_config.html#formats)
//! directive.
//!
//! This library provides functionality to:
//! - Compile `LogFormat` strings such as `%h %l %u %t "%r" %>s %b` into a line pattern
//! - Derive a readable, unique field name for every directive (`%{Referer}i` becomes `requestHeader:Referer`)
//! - Parse log lines into positional values or into entries keyed by field name
//! - Extract log formats from Apache configuration files
//!
//! ## Quick Start
//!
//! ```rust
//! use rsapl::{compile, parse, ParsedLine};
//!
//! let format = compile(r#"%h %l %u %t "%r" %>s %b"#)?;
//! let line = r#"127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326"#;
//!
//! if let ParsedLine::Named(entry) = parse(&format, line, true)? {
//!     println!("Host: {}", entry.field("remoteHostname")?);
//!     println!("Status: {}", entry.int_field("status")?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - **Format Compilation**: Every directive becomes exactly one capture group, in order
//! - **Unique Field Names**: Repeated directives are suffixed with `:2`, `:3`, ...
//! - **Type-Safe Field Access**: Access fields as strings, integers, or floats with proper error handling
//! - **Apache Config Integration**: Extract log formats directly from httpd configuration files
//! - **Error Handling**: Comprehensive error types using `thiserror`
//! - **Optional Serde Support**: Serialize/deserialize parsed lines when the `serde` feature is enabled

pub mod apache;
pub mod directive;
pub mod entry;
pub mod error;
pub mod format;
pub mod lexer;
pub mod parser;

// Re-export main types for convenience
pub use entry::{Entry, Fields};
pub use error::{Error, Result};
pub use format::CompiledFormat;
pub use parser::{Mode, ParsedLine, StringParser};

/// Compile a `LogFormat` string.
///
/// Fails with [`Error::InvalidFormat`] on unknown or malformed directives.
pub fn compile(format: &str) -> Result<CompiledFormat> {
    CompiledFormat::new(format)
}

/// Parse one log line with a compiled format.
///
/// Returns [`ParsedLine::Named`] when `named` is true, [`ParsedLine::Positional`]
/// otherwise. Fails with [`Error::UnparsableLine`] when the line does not match.
pub fn parse(format: &CompiledFormat, line: &str, named: bool) -> Result<ParsedLine> {
    format.parse(line, Mode::from(named))
}
