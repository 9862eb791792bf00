//! HTTP clients for ENA and UniProt
//!
//! These clients only fetch documents; all parsing goes through
//! [`crate::feature`] and [`crate::uniprot`], so a record fetched over the
//! network is decoded exactly like the same record read from disk.
//!
//! Requests are blocking and are not retried. TLS certificate verification
//! can be switched off per client through
//! [`ClientConfig::accept_invalid_certs`]; the setting applies only to the
//! clients built from that config.
//!
//! # Example
//!
//! ```no_run
//! use ferro_overlap::client::{ClientConfig, EnaClient};
//!
//! let client = EnaClient::new(&ClientConfig::default())?;
//! let feature = client.get_start_end_comp("AAC21905")?;
//! println!("{:?}", feature);
//! # Ok::<(), ferro_overlap::FerroError>(())
//! ```

mod ena;
mod uniprot;

pub use ena::EnaClient;
pub use uniprot::UniprotClient;

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::info;

use crate::error::FerroError;

/// Default ENA browser base URL
pub const DEFAULT_ENA_URL: &str = "https://www.ebi.ac.uk/ena";

/// Default UniProt base URL
pub const DEFAULT_UNIPROT_URL: &str = "https://www.uniprot.org";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport settings shared by the ENA and UniProt clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub ena_base_url: String,
    pub uniprot_base_url: String,
    pub timeout_secs: u64,
    /// Skip TLS certificate verification for these endpoints only
    pub accept_invalid_certs: bool,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ena_base_url: DEFAULT_ENA_URL.to_string(),
            uniprot_base_url: DEFAULT_UNIPROT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            user_agent: None,
        }
    }
}

/// Blocking HTTP client built from a [`ClientConfig`]
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, FerroError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| concat!("ferro-overlap/", env!("CARGO_PKG_VERSION")).to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FerroError::Io {
                msg: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// GET `url` and return the body bytes.
    pub(crate) fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FerroError> {
        info!(url, "fetching");
        let response = self.client.get(url).send().map_err(|e| FerroError::Io {
            msg: format!("HTTP request to {} failed: {}", url, e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FerroError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| FerroError::Io {
            msg: format!("Failed to read response from {}: {}", url, e),
        })?;
        Ok(body.to_vec())
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
