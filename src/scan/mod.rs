//! Phishing-risk engine.
//!
//! A scan runs in two phases:
//! 1. **Gather** (network): resolve redirects, then look up the final domain's
//!    registration record and probe its certificate concurrently. Every call
//!    has its own timeout and the whole scan shares one deadline.
//! 2. **Evaluate** (pure): run the detectors over what was gathered and
//!    aggregate them into a [`RiskAssessment`].
//!
//! A trusted-platform host short-circuits before any network access.

pub mod aggregate;
pub mod normalize;
pub mod signals;
pub mod types;

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use tokio::time::{timeout, timeout_at, Instant};

use crate::config::{Config, ScanRules, Timeouts};
use crate::error_handling::{InitializationError, ScanError};
use crate::initialization::{init_crypto_provider, init_redirect_client};
use crate::redirect::resolve_final_url;
use crate::tls::get_peer_certificate;
use crate::whois::{lookup_creation_date, registrable_domain};

pub use aggregate::{evaluate, is_phishing, risk_score, trusted_assessment};
pub use normalize::{domain_of, is_trusted_platform, normalize_url};
pub use signals::{Signal, SignalKind, SignalOutcome};
pub use types::{
    CertificateStatus, DomainAge, Observations, RegistrationRecord, ResolvedTarget,
    RiskAssessment, ScanRequest,
};

/// Shared, read-only resources for scanning.
///
/// Cheap to clone; safe to use from any number of concurrent scans.
#[derive(Debug, Clone)]
pub struct ScanContext {
    rules: Arc<ScanRules>,
    client: reqwest::Client,
    timeouts: Timeouts,
    max_redirects: usize,
}

impl ScanContext {
    /// Builds a context with the default scoring rules.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the redirect client
    /// cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        Self::with_rules(config, ScanRules::default())
    }

    /// Builds a context with custom scoring rules (lists, weights, threshold).
    pub fn with_rules(config: &Config, rules: ScanRules) -> Result<Self, InitializationError> {
        init_crypto_provider();
        let client = init_redirect_client(config)?;
        Ok(Self {
            rules: Arc::new(rules),
            client,
            timeouts: config.timeouts(),
            max_redirects: config.max_redirects,
        })
    }
}

/// Scans one URL and returns its risk assessment.
///
/// # Errors
///
/// Returns `ScanError::InvalidUrl` when the input fails validation. Network
/// failures never surface as errors.
pub async fn scan_url(ctx: &ScanContext, raw: &str) -> Result<RiskAssessment, ScanError> {
    let request = normalize_url(raw)?;

    if is_trusted_platform(&ctx.rules, &request.host) {
        info!("Trusted platform, skipping scoring: {}", request.original_url);
        return Ok(trusted_assessment(&request));
    }

    let deadline = Instant::now() + ctx.timeouts.scan_budget;
    let target = resolve_target(ctx, &request, deadline).await;
    let observations = gather_observations(ctx, &target, deadline).await;
    let assessment = evaluate(&ctx.rules, &request, &target, &observations, Utc::now());

    for signal in assessment.signals.iter().filter(|s| s.triggered()) {
        debug!("Signal {} triggered (+{})", signal.name(), signal.weight);
    }
    info!(
        "Scanned {} -> {} (score {}, phishing: {})",
        assessment.url,
        target.final_url,
        assessment.risk_score.unwrap_or_default(),
        assessment.is_phishing
    );
    Ok(assessment)
}

/// Runs [`scan_url`] on its own task so a panic inside the scan is reported
/// as `ScanError::Internal` instead of taking down the caller.
pub async fn scan_url_isolated(ctx: ScanContext, raw: String) -> Result<RiskAssessment, ScanError> {
    tokio::spawn(async move { scan_url(&ctx, &raw).await })
        .await
        .map_err(|e| ScanError::Internal(format!("Scan task failed: {}", e)))?
}

async fn resolve_target(
    ctx: &ScanContext,
    request: &ScanRequest,
    deadline: Instant,
) -> ResolvedTarget {
    let original = &request.original_url;
    let (final_url, redirect_chain) = timeout_at(
        deadline,
        resolve_final_url(
            original,
            ctx.max_redirects,
            ctx.timeouts.redirect,
            &ctx.client,
        ),
    )
    .await
    .unwrap_or_else(|_| (original.clone(), vec![original.clone()]));

    let target = ResolvedTarget {
        final_domain: domain_of(&final_url),
        final_url,
        redirect_chain,
    };
    if target.redirect_chain.len() > 1 {
        info!(
            "Followed {} redirect(s): {}",
            target.redirect_chain.len() - 1,
            target.redirect_chain.join(" -> ")
        );
    }
    target
}

async fn gather_observations(
    ctx: &ScanContext,
    target: &ResolvedTarget,
    deadline: Instant,
) -> Observations {
    let on_tunnel = signals::detect_tunnel(&ctx.rules, &target.final_url).triggered();
    let domain = target.final_domain.as_str();

    let registration = async {
        if on_tunnel {
            debug!("Skipping WHOIS for tunnel host {}", domain);
            return RegistrationRecord::Skipped;
        }
        let Some(registered) = registrable_domain(domain) else {
            debug!("No registrable domain for host {:?}, skipping WHOIS", domain);
            return RegistrationRecord::Unavailable;
        };
        match timeout_at(
            deadline,
            timeout(ctx.timeouts.whois, lookup_creation_date(&registered)),
        )
        .await
        {
            Ok(Ok(Ok(Some(created)))) => RegistrationRecord::Created(created),
            Ok(Ok(Ok(None))) => RegistrationRecord::Unavailable,
            Ok(Ok(Err(e))) => {
                warn!("WHOIS unavailable for {}: {:#}", registered, e);
                RegistrationRecord::Unavailable
            }
            Ok(Err(_)) => {
                warn!(
                    "WHOIS lookup timed out for {} ({}s)",
                    registered,
                    ctx.timeouts.whois.as_secs()
                );
                RegistrationRecord::Unavailable
            }
            Err(_) => {
                warn!("Scan budget exhausted during WHOIS lookup for {}", registered);
                RegistrationRecord::Unavailable
            }
        }
    };

    let certificate = async {
        match timeout_at(
            deadline,
            get_peer_certificate(domain, ctx.timeouts.connect, ctx.timeouts.tls_handshake),
        )
        .await
        {
            Ok(Ok(cert)) => CertificateStatus::Expires(cert.not_after),
            Ok(Err(e)) => {
                debug!("Certificate check failed for {}: {:#}", domain, e);
                CertificateStatus::Failed(e.to_string())
            }
            Err(_) => CertificateStatus::Failed(format!(
                "Scan budget exhausted during certificate check for {}",
                domain
            )),
        }
    };

    let (registration, certificate) = tokio::join!(registration, certificate);
    Observations {
        registration,
        certificate,
    }
}
