//! TLS certificate expiry probe.
//!
//! Connects to `domain:443`, completes a TLS handshake against the
//! `webpki-roots` trust anchors and reads the leaf certificate's validity.
//!
//! Uses `tokio-rustls` for async TLS connections and `x509-parser` for certificate parsing.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::debug;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use x509_parser::time::ASN1Time;

/// Standard HTTPS port
const HTTPS_PORT: u16 = 443;

/// Validity window and issuer of a peer's leaf certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerCertificate {
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

/// Builds the client configuration.
///
/// Relies on the process-wide crypto provider installed by
/// `initialization::init_crypto_provider`.
fn client_config() -> ClientConfig {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}

fn asn1_to_utc(time: &ASN1Time) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(time.timestamp(), 0)
        .ok_or_else(|| anyhow::anyhow!("Certificate timestamp out of range: {}", time))
}

/// Parses the validity window out of a DER-encoded certificate.
pub fn parse_peer_certificate(der: &[u8]) -> Result<PeerCertificate> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| anyhow::anyhow!("Failed to parse certificate: {}", e))?;
    let validity = cert.validity();

    Ok(PeerCertificate {
        issuer: cert.issuer().to_string(),
        not_before: asn1_to_utc(&validity.not_before)?,
        not_after: asn1_to_utc(&validity.not_after)?,
    })
}

/// Retrieves the leaf certificate presented by `domain` on port 443.
///
/// # Errors
///
/// Returns an error if:
/// - The domain name is invalid
/// - TCP connection fails or exceeds `connect_timeout`
/// - TLS handshake fails (including untrusted or expired certificates) or exceeds `handshake_timeout`
/// - The peer presents no certificate or it cannot be parsed
pub async fn get_peer_certificate(
    domain: &str,
    connect_timeout: Duration,
    handshake_timeout: Duration,
) -> Result<PeerCertificate> {
    let server_name = ServerName::try_from(domain.to_string())
        .map_err(|e| anyhow::anyhow!("Invalid domain name {}: {}", domain, e))?;

    debug!("Connecting to {}:{} for certificate probe", domain, HTTPS_PORT);
    let sock = match tokio::time::timeout(connect_timeout, TcpStream::connect((domain, HTTPS_PORT)))
        .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => {
            return Err(anyhow::anyhow!(
                "Failed to connect to {}:{} - {}",
                domain,
                HTTPS_PORT,
                e
            ));
        }
        Err(_) => {
            return Err(anyhow::anyhow!(
                "TCP connection timeout for {}:{} ({}s)",
                domain,
                HTTPS_PORT,
                connect_timeout.as_secs()
            ));
        }
    };

    let connector = TlsConnector::from(Arc::new(client_config()));
    let tls_stream =
        match tokio::time::timeout(handshake_timeout, connector.connect(server_name, sock)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(anyhow::anyhow!("TLS handshake failed for {}: {}", domain, e));
            }
            Err(_) => {
                return Err(anyhow::anyhow!(
                    "TLS handshake timeout for {} ({}s)",
                    domain,
                    handshake_timeout.as_secs()
                ));
            }
        };

    let leaf = tls_stream
        .get_ref()
        .1
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or_else(|| anyhow::anyhow!("No peer certificate presented by {}", domain))?;

    let cert = parse_peer_certificate(leaf.as_ref())?;
    debug!(
        "Certificate for {} issued by {} valid until {}",
        domain, cert.issuer, cert.not_after
    );
    Ok(cert)
}
