//! Score aggregation, classification and assessment building.

use chrono::{DateTime, Utc};

use crate::config::ScanRules;

use super::signals::{
    assess_certificate, assess_domain_age, detect_shortener, detect_suspicious_keywords,
    detect_tunnel, Signal,
};
use super::types::{
    DomainAge, Observations, RegistrationRecord, ResolvedTarget, RiskAssessment, ScanRequest,
};

/// Sum of the weights of all triggered signals.
pub fn risk_score(signals: &[Signal]) -> u32 {
    signals.iter().map(Signal::contribution).sum()
}

/// Classifies a score against the threshold.
pub fn is_phishing(score: u32, threshold: u32) -> bool {
    score >= threshold
}

/// Runs every detector and folds the outcomes into an assessment.
///
/// Pure: all network results arrive through `observations`, and `now` is the
/// evaluation time for age and expiry arithmetic.
pub fn evaluate(
    rules: &ScanRules,
    request: &ScanRequest,
    target: &ResolvedTarget,
    observations: &Observations,
    now: DateTime<Utc>,
) -> RiskAssessment {
    let tunnel = detect_tunnel(rules, &target.final_url);

    // Tunnel hosts have no meaningful registration record
    let registration = if tunnel.triggered() {
        RegistrationRecord::Skipped
    } else {
        observations.registration
    };

    let signals = vec![
        detect_shortener(rules, &request.host),
        tunnel,
        detect_suspicious_keywords(rules, &target.final_url),
        assess_domain_age(rules, registration, now),
        assess_certificate(rules, &observations.certificate, now),
    ];

    let score = risk_score(&signals);
    build_assessment(
        request,
        target,
        DomainAge::from(registration),
        score,
        is_phishing(score, rules.threshold),
        signals,
    )
}

/// Assembles the final record.
///
/// The submitted URL is kept verbatim; the resolved URL is reported only when
/// it differs.
pub fn build_assessment(
    request: &ScanRequest,
    target: &ResolvedTarget,
    domain_age: DomainAge,
    score: u32,
    is_phishing: bool,
    signals: Vec<Signal>,
) -> RiskAssessment {
    let warnings = signals
        .iter()
        .filter_map(|s| s.message.clone())
        .collect();

    RiskAssessment {
        url: request.original_url.clone(),
        final_url: (target.final_url != request.original_url).then(|| target.final_url.clone()),
        domain: target.final_domain.clone(),
        domain_age,
        risk_score: Some(score),
        warnings,
        is_phishing,
        trusted_platform: false,
        signals,
    }
}

/// Minimal assessment for a trusted-platform host: no score, no warnings.
pub fn trusted_assessment(request: &ScanRequest) -> RiskAssessment {
    RiskAssessment {
        url: request.original_url.clone(),
        final_url: None,
        domain: request.host.clone(),
        domain_age: DomainAge::Unknown,
        risk_score: None,
        warnings: Vec::new(),
        is_phishing: false,
        trusted_platform: true,
        signals: Vec::new(),
    }
}
