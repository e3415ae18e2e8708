//! Validation of addresses and host names typed on the command line.
//!
//! Only the shape is checked: anything accepted here parses back as the same
//! host line after a save.

use anyhow::Result;

use crate::syntax;

/// Validate an address: dotted IPv4 or colon-separated IPv6 shape.
pub fn validate_ip(ip: &str) -> Result<()> {
    if ip.is_empty() {
        anyhow::bail!("empty address");
    }
    if ip.chars().any(char::is_whitespace) {
        anyhow::bail!("invalid address {ip:?}: contains whitespace");
    }
    let candidate = format!("{ip}\t{}", crate::entry::DEFAULT_DOMAIN);
    let values = syntax::captured_values(syntax::host_line(), &candidate);
    if values.first().map(String::as_str) != Some(ip) {
        anyhow::bail!("invalid address {ip:?}: expected an IPv4 or IPv6 address");
    }
    Ok(())
}

/// Validate hostname format.
pub fn validate_hostname(domain: &str) -> Result<()> {
    if domain.is_empty() {
        anyhow::bail!("empty hostname");
    }
    if domain.contains("..") {
        anyhow::bail!("invalid hostname: consecutive dots");
    }
    for label in domain.split('.') {
        if label.is_empty() {
            anyhow::bail!("invalid hostname: empty label");
        }
        for c in label.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
                anyhow::bail!("invalid hostname: illegal char {c:?}");
            }
        }
        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!("invalid hostname: label cannot start/end with hyphen");
        }
    }
    Ok(())
}

/// Validate a group name: non-blank and free of `#` and line breaks, which
/// would end the group marker early.
pub fn validate_group_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("empty group name");
    }
    if name.contains(['#', '\n', '\r']) {
        anyhow::bail!("invalid group name {name:?}: must not contain '#' or line breaks");
    }
    if name.trim() != name {
        anyhow::bail!("invalid group name {name:?}: leading or trailing whitespace");
    }
    Ok(())
}
