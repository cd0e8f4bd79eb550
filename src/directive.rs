//! The table of known `LogFormat` directives.
//!
//! Each directive key maps to a human readable field name and to the rule
//! describing what its capture group may match.

/// The shape of the text a directive captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRule {
    /// IPv4 or IPv6 address: digits, dots and colons.
    IpAddress,
    /// Response size in CLF format, digits or `-` when no bytes were sent.
    ClfSize,
    /// One or more digits.
    Digits,
    /// `HTTP/` followed by a version number.
    Protocol,
    /// One or more letters.
    Method,
    /// Empty, or `?` followed by anything.
    QueryString,
    /// `METHOD path HTTP/version`, or `-` for a bogus request.
    RequestLine,
    /// `[...]` without a qualifier, digits with one (`%{msec}t` and friends).
    Time,
    /// Any run of non-whitespace, possibly empty.
    Token,
    /// One of `X`, `+` or `-`.
    ConnectionStatus,
    /// Anything, shortest match.
    Any,
}

impl CaptureRule {
    /// Regex fragment holding exactly one capturing group.
    pub fn pattern(self, qualified: bool) -> &'static str {
        match self {
            Self::IpAddress => r"([0-9\.:]+)",
            Self::ClfSize => r"([0-9]+|-)",
            Self::Digits => r"([0-9]+)",
            Self::Protocol => r"(HTTP/[0-9\.]+)",
            Self::Method => r"([A-Za-z]+)",
            Self::QueryString => r"((?:\?.*?)?)",
            Self::RequestLine => r"([A-Za-z]+ \S+ HTTP/[0-9\.]+|-)",
            Self::Time if qualified => r"([0-9]+)",
            Self::Time => r"\[([^\]]+)\]",
            Self::Token => r"(\S*)",
            Self::ConnectionStatus => r"([X+\-])",
            Self::Any => r"(.*?)",
        }
    }
}

/// An entry of the directive table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveSpec {
    /// The directive key following `%`, e.g. `h` or `^ti`.
    pub key: &'static str,
    /// Base field name.
    pub name: &'static str,
    pub rule: CaptureRule,
}

const fn directive(key: &'static str, name: &'static str, rule: CaptureRule) -> DirectiveSpec {
    DirectiveSpec { key, name, rule }
}

use CaptureRule::*;

/// All directives understood by the compiler.
pub static DIRECTIVES: &[DirectiveSpec] = &[
    directive("a", "clientIp", IpAddress),
    directive("A", "localIp", IpAddress),
    directive("B", "responseSize", Digits),
    directive("b", "responseSize", ClfSize),
    directive("C", "cookie", Any),
    directive("D", "responseTime", Digits),
    directive("e", "env", Any),
    directive("f", "filename", Any),
    directive("h", "remoteHostname", Any),
    directive("H", "requestProtocol", Protocol),
    directive("i", "requestHeader", Any),
    directive("k", "keepaliveRequests", Digits),
    directive("l", "remoteLogname", Any),
    directive("L", "requestLogId", Any),
    directive("m", "requestMethod", Method),
    directive("n", "note", Any),
    directive("o", "responseHeader", Any),
    directive("p", "canonicalPort", Digits),
    directive("P", "processId", Digits),
    directive("q", "queryString", QueryString),
    directive("r", "firstRequestLine", RequestLine),
    directive("R", "handler", Any),
    directive("s", "status", Digits),
    directive("t", "time", Time),
    directive("T", "timeToServe", Digits),
    directive("u", "remoteUser", Any),
    directive("U", "urlPath", Token),
    directive("v", "serverName", Token),
    directive("V", "serverName", Token),
    directive("X", "connectionStatus", ConnectionStatus),
    directive("I", "bytesReceived", Digits),
    directive("O", "bytesSent", Digits),
    directive("S", "bytesTransferred", Digits),
    directive("^ti", "requestTrailerLine", Any),
    directive("^to", "responseTrailerLine", Any),
];

/// Look up a directive by key.
pub fn lookup(key: &str) -> Option<&'static DirectiveSpec> {
    DIRECTIVES.iter().find(|d| d.key == key)
}
