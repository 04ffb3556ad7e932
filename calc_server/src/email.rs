//! Report delivery by email
//!
//! Sends the report through the Resend API (https://api.resend.com/emails)
//! with the PDF attached. Without an API key the mailer only logs the send,
//! which keeps local development and tests offline.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use calc_core::report::{Report, REPORT_FILE_NAME, REPORT_TITLE};

use crate::config::ServerConfig;

/// Resend API endpoint
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Email delivery failures
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Invalid email address: {0}")]
    InvalidRecipient(String),

    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("Failed to connect to email service: {0}")]
    Transport(String),
}

/// Provider message id of a sent email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    pub id: String,
}

/// Check a recipient address before any work is done for it
pub fn validate_recipient(recipient: &str) -> Result<(), EmailError> {
    if EmailAddress::is_valid(recipient) {
        Ok(())
    } else {
        Err(EmailError::InvalidRecipient(recipient.to_string()))
    }
}

/// Resend API request payload
#[derive(Debug, Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<ResendAttachment<'a>>,
}

/// Base64-encoded file attachment
#[derive(Debug, Serialize)]
struct ResendAttachment<'a> {
    filename: &'a str,
    content: String,
}

/// Resend API success response
#[derive(Debug, Deserialize)]
struct ResendSuccessResponse {
    id: String,
}

/// Resend API error response
#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the Resend HTTP API
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from_address: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, from_address: impl Into<String>) -> Self {
        ResendMailer {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            from_address: from_address.into(),
            endpoint: RESEND_API_URL.to_string(),
        }
    }

    async fn send(&self, recipient: &str, report: &Report, pdf: &[u8]) -> Result<EmailReceipt, EmailError> {
        let to = [recipient.to_string()];
        let html = report.to_html();
        let payload = ResendPayload {
            from: &self.from_address,
            to: &to,
            subject: REPORT_TITLE,
            html: &html,
            attachments: vec![ResendAttachment {
                filename: REPORT_FILE_NAME,
                content: STANDARD.encode(pdf),
            }],
        };

        info!(report_id = %report.id, "Sending report via Resend to {}", recipient);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!("Resend request failed: {}", e);
                EmailError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            return match response.json::<ResendSuccessResponse>().await {
                Ok(success) => {
                    info!("Email sent via Resend: id={}", success.id);
                    Ok(EmailReceipt { id: success.id })
                }
                Err(e) => {
                    // Accepted by the provider; only the body was unreadable
                    warn!("Resend response parse error: {}", e);
                    Ok(EmailReceipt {
                        id: "resend:unknown".to_string(),
                    })
                }
            };
        }

        let error_text = response.text().await.unwrap_or_default();
        warn!("Resend error ({}): {}", status, error_text);
        Err(EmailError::Provider {
            status,
            message: provider_message(status, &error_text),
        })
    }
}

/// User-facing message for a failed provider call
fn provider_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<ResendErrorResponse>(body)
        .ok()
        .and_then(|err| err.message.or(err.name))
        .unwrap_or_else(|| format!("HTTP {}", status));

    match status {
        401 => "Email service authentication failed.".to_string(),
        403 => "Email service access denied.".to_string(),
        422 => format!("Invalid email request: {}", detail),
        429 => "Email rate limit exceeded. Please try again later.".to_string(),
        500..=599 => "Email service temporarily unavailable.".to_string(),
        _ => detail,
    }
}

/// Email dispatcher selected at startup
#[derive(Debug, Clone)]
pub enum Mailer {
    Resend(ResendMailer),
    /// Log the send without contacting a provider
    Log { from_address: String },
}

impl Mailer {
    pub fn from_config(config: &ServerConfig) -> Self {
        match &config.resend_api_key {
            Some(key) => Mailer::Resend(ResendMailer::new(key.clone(), config.from_address.clone())),
            None => Mailer::Log {
                from_address: config.from_address.clone(),
            },
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Mailer::Resend(_) => "resend",
            Mailer::Log { .. } => "log-only",
        }
    }

    /// Send the report with its PDF attached.
    pub async fn send_report(
        &self,
        recipient: &str,
        report: &Report,
        pdf: &[u8],
    ) -> Result<EmailReceipt, EmailError> {
        validate_recipient(recipient)?;

        match self {
            Mailer::Resend(mailer) => mailer.send(recipient, report, pdf).await,
            Mailer::Log { from_address } => {
                info!(
                    report_id = %report.id,
                    from = %from_address,
                    to = %recipient,
                    attachment_bytes = pdf.len(),
                    "Email delivery disabled; report not sent"
                );
                Ok(EmailReceipt {
                    id: format!("log:{}", report.id),
                })
            }
        }
    }
}
