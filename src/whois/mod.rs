// whois/mod.rs
// WHOIS/RDAP creation-date lookup using whois-service crate

mod parse;

use std::net::IpAddr;

use anyhow::Result;
use chrono::{DateTime, Utc};

use parse::creation_date_from_response;

/// Reduces a host to the domain a registry holds a record for.
///
/// Uses the Public Suffix List, so `www.sub.example.co.uk` becomes
/// `example.co.uk`. IP addresses and empty hosts have no registrable domain.
/// Hosts the list cannot reduce (single labels) are returned unchanged.
pub fn registrable_domain(host: &str) -> Option<String> {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if bare.parse::<IpAddr>().is_ok() {
        return None;
    }

    match psl::domain_str(&host) {
        Some(domain) => Some(domain.to_string()),
        None => Some(host),
    }
}

/// Looks up the registration creation date for a domain.
///
/// The `whois-service` client tries RDAP first and falls back to WHOIS. It has
/// its own internal timeouts of up to 30s, so callers must wrap this in their
/// own `tokio::time::timeout`.
///
/// # Returns
///
/// `Ok(Some(date))` when the record carries a parseable creation date,
/// `Ok(None)` when the lookup succeeded but no date could be read.
///
/// `domain` must already be a registrable domain; see [`registrable_domain`].
///
/// # Errors
///
/// Returns an error if the client cannot be created or the lookup fails.
pub async fn lookup_creation_date(domain: &str) -> Result<Option<DateTime<Utc>>> {
    log::debug!("Starting WHOIS lookup for domain: {}", domain);

    let client = whois_service::WhoisClient::new()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create WHOIS client: {}", e))?;

    let response = client
        .lookup(domain)
        .await
        .map_err(|e| anyhow::anyhow!("WHOIS lookup failed for {}: {}", domain, e))?;

    let created = creation_date_from_response(&response);
    match created {
        Some(date) => log::debug!("WHOIS creation date for {}: {}", domain, date),
        None => log::debug!("WHOIS record for {} has no usable creation date", domain),
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrable_domain_strips_subdomains() {
        assert_eq!(
            registrable_domain("www.sub.example.co.uk").as_deref(),
            Some("example.co.uk")
        );
        assert_eq!(
            registrable_domain("www.rust-lang.org").as_deref(),
            Some("rust-lang.org")
        );
        assert_eq!(
            registrable_domain("paypal-login.short-link.me").as_deref(),
            Some("short-link.me")
        );
        assert_eq!(
            registrable_domain("Example.COM.").as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_registrable_domain_keeps_bare_domains() {
        assert_eq!(
            registrable_domain("example.org").as_deref(),
            Some("example.org")
        );
    }

    #[test]
    fn test_registrable_domain_rejects_ips_and_empty_hosts() {
        assert_eq!(registrable_domain("127.0.0.1"), None);
        assert_eq!(registrable_domain("[::1]"), None);
        assert_eq!(registrable_domain(""), None);
    }
}
