//! SSL/TLS configuration and utilities

use crate::config::SslConfig;
use crate::error::{RestError, Result};
use reqwest::{Certificate, ClientBuilder, Identity};
use std::path::Path;

/// SSL/TLS certificate utilities
pub struct SslUtils;

impl SslUtils {
    /// Validate SSL configuration
    pub fn validate_config(config: &SslConfig) -> Result<()> {
        if let Some(ca_cert) = &config.ca_cert_file {
            if !ca_cert.exists() {
                return Err(RestError::FileNotFound(format!(
                    "CA certificate file not found: {:?}",
                    ca_cert
                )));
            }
        }

        if let Some(cert) = &config.client_cert_file {
            if !cert.exists() {
                return Err(RestError::FileNotFound(format!(
                    "Client certificate file not found: {:?}",
                    cert
                )));
            }
        }

        if let Some(key) = &config.client_key_file {
            if !key.exists() {
                return Err(RestError::FileNotFound(format!(
                    "Client key file not found: {:?}",
                    key
                )));
            }
        }

        if config.client_key_file.is_some() && config.client_cert_file.is_none() {
            return Err(RestError::Ssl(
                "client key given without a client certificate".to_string(),
            ));
        }

        Ok(())
    }

    /// Read certificate file contents
    pub fn read_cert_file(path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(RestError::Io)
    }

    /// Apply the TLS settings to a reqwest client builder.
    pub fn configure(mut builder: ClientBuilder, config: &SslConfig) -> Result<ClientBuilder> {
        Self::validate_config(config)?;

        if !config.verify_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &config.ca_cert_file {
            let pem = Self::read_cert_file(ca_cert)?;
            let cert = Certificate::from_pem(&pem)
                .map_err(|e| RestError::Ssl(format!("Invalid CA certificate: {}", e)))?;
            builder = builder.add_root_certificate(cert);
        }

        if let Some(cert) = &config.client_cert_file {
            let mut pem = Self::read_cert_file(cert)?;
            // rustls wants the key and certificate chain in one PEM buffer
            if let Some(key) = &config.client_key_file {
                pem.push(b'\n');
                pem.extend(Self::read_cert_file(key)?);
            }
            let identity = Identity::from_pem(&pem)
                .map_err(|e| RestError::Ssl(format!("Invalid client certificate: {}", e)))?;
            builder = builder.identity(identity);
        }

        Ok(builder)
    }
}
