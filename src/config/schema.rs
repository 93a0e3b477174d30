//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the forwarder.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the document forwarder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream DocuWare endpoint settings.
    pub upstream: UpstreamConfig,

    /// Upload policy switches.
    pub upload: UploadPolicy,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Server-side timeouts.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ForwarderConfig {
    /// Apply `PORT` and `DOCUWARE_BASE_URL` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using an arbitrary variable lookup.
    ///
    /// `PORT` replaces only the port of `listener.bind_address`, keeping the host.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            let host = self
                .listener
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.listener.bind_address = format!("{}:{}", host, port.trim());
        }

        if let Some(base_url) = lookup("DOCUWARE_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.upstream.base_url = base_url.trim().to_string();
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4000".to_string(),
        }
    }
}

/// Upstream DocuWare configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and host of the DocuWare organization, without the `/DocuWare` path.
    pub base_url: String,

    /// Total time allowed for one upstream request, in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// User agent sent to DocuWare.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://infomark-tc-limited.docuware.cloud".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!("docuware-forwarder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Switches covering the behavioral differences between handler revisions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Value of the `DocumentType` form field.
    pub document_type: String,

    /// Reject requests without `organizationId`.
    pub require_organization: bool,

    /// Reject requests without `documentBase64` instead of creating a
    /// metadata-only record.
    pub require_document: bool,

    /// Send `X-DocuWare-Organization` when an organization id is present.
    pub send_organization_header: bool,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            document_type: "Diaspora Membership Form".to_string(),
            require_organization: true,
            require_document: false,
            send_organization_header: true,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum JSON body size in bytes. Base64 inflates documents by a third.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 25 * 1024 * 1024, // 25 MiB
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
