//! HTTP redirect resolution.
//!
//! Redirects are followed hop by hop with header-only (`HEAD`) requests so the
//! full chain from the submitted URL to its destination can be logged.
//! Resolution never fails: any error falls back to the submitted URL.

use std::time::Duration;

use anyhow::{Error, Result};
use log::{debug, warn};
use reqwest::Url;

/// Follows the redirect chain for a URL, up to `max_hops` requests.
///
/// `client` must have automatic redirects disabled.
///
/// # Returns
///
/// A tuple of (final_url, redirect_chain) where the chain lists every URL
/// requested, starting with `start_url`.
///
/// # Errors
///
/// Returns an error if any request fails, a `Location` header cannot be
/// resolved to a URL, or the chain is still redirecting after `max_hops`
/// requests.
pub async fn resolve_redirect_chain(
    start_url: &str,
    max_hops: usize,
    client: &reqwest::Client,
) -> Result<(String, Vec<String>), Error> {
    let mut chain: Vec<String> = Vec::new();
    let mut current = start_url.to_string();

    for _ in 0..max_hops {
        chain.push(current.clone());
        let resp = client.head(&current).send().await?;

        if !resp.status().is_redirection() {
            return Ok((current, chain));
        }

        match resp.headers().get(reqwest::header::LOCATION) {
            Some(loc) => {
                let loc = loc.to_str()?;
                let next = Url::parse(loc).or_else(|_| Url::parse(&current)?.join(loc))?;
                current = next.to_string();
            }
            None => {
                warn!(
                    "Redirect status {} for {} but no Location header",
                    resp.status().as_u16(),
                    current
                );
                return Ok((current, chain));
            }
        }
    }

    // `current` is the next Location target and was never requested
    Err(anyhow::anyhow!(
        "Too many redirects from {} (more than {} hops)",
        start_url,
        max_hops
    ))
}

/// Resolves the final URL for `url`, bounded by `timeout`.
///
/// On timeout or any request failure the original URL is returned with a
/// single-entry chain.
pub async fn resolve_final_url(
    url: &str,
    max_hops: usize,
    timeout: Duration,
    client: &reqwest::Client,
) -> (String, Vec<String>) {
    match tokio::time::timeout(timeout, resolve_redirect_chain(url, max_hops, client)).await {
        Ok(Ok((final_url, chain))) => {
            if chain.len() > 1 {
                debug!("Redirect chain for {}: {}", url, chain.join(" -> "));
            }
            (final_url, chain)
        }
        Ok(Err(e)) => {
            debug!("Redirect resolution failed for {}: {:#}", url, e);
            (url.to_string(), vec![url.to_string()])
        }
        Err(_) => {
            debug!(
                "Redirect resolution timed out for {} ({}s)",
                url,
                timeout.as_secs()
            );
            (url.to_string(), vec![url.to_string()])
        }
    }
}
