//! Fixed dictionary of initialisms kept fully upper-cased in Go identifiers.

/// Initialisms recognised by [`normalize`](crate::normalize).
///
/// The list is closed. Anything not listed here is title-cased.
pub const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Check whether an upper-cased word is a known initialism.
pub fn is_initialism(word: &str) -> bool {
    INITIALISMS.contains(&word)
}
