//! Outbound Email Infrastructure
//!
//! The application talks to a transactional email HTTP API (JSON body,
//! bearer key) through the [`Mailer`] port. Development and tests use
//! [`NoopMailer`], which only logs.

use serde::Serialize;
use thiserror::Error;

/// An email ready for delivery
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
        }
    }
}

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The request never reached the mail API
    #[error("Mail API request failed: {0}")]
    Transport(String),

    /// The mail API rejected the request
    #[error("Mail API returned status {0}")]
    Api(u16),
}

/// Port for sending email
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver one message
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

// ============================================================================
// HTTP mailer (production)
// ============================================================================

/// Mailer backed by a transactional email HTTP API
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

#[derive(Serialize)]
struct SendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let payload = SendPayload {
            from: &self.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailerError::Api(response.status().as_u16()));
        }

        tracing::debug!(to = %message.to, subject = %message.subject, "Email delivered");
        Ok(())
    }
}

// ============================================================================
// Noop mailer (development / tests)
// ============================================================================

/// Mailer that drops messages and logs them instead
#[derive(Debug, Clone, Default)]
pub struct NoopMailer;

impl Mailer for NoopMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Email suppressed (noop mailer)"
        );
        Ok(())
    }
}

// ============================================================================
// Runtime-selected mailer
// ============================================================================

/// Mailer selected at startup from the environment
#[derive(Clone)]
pub enum AnyMailer {
    Http(HttpMailer),
    Noop(NoopMailer),
}

impl Mailer for AnyMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        match self {
            AnyMailer::Http(mailer) => Mailer::send(mailer, message).await,
            AnyMailer::Noop(mailer) => Mailer::send(mailer, message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_mailer_accepts_everything() {
        let mailer = NoopMailer;
        let message = EmailMessage::new("someone@example.com", "Hi", "<p>Hello</p>");
        assert!(Mailer::send(&mailer, &message).await.is_ok());
    }

    #[tokio::test]
    async fn test_any_mailer_dispatch() {
        let mailer = AnyMailer::Noop(NoopMailer);
        let message = EmailMessage::new("someone@example.com", "Hi", "<p>Hello</p>");
        assert!(Mailer::send(&mailer, &message).await.is_ok());
    }

    #[test]
    fn test_http_mailer_construction() {
        let mailer = HttpMailer::new(
            "https://mail.example.com/v1/send",
            "key",
            "Fundlift <no-reply@fundlift.example>",
        );
        assert_eq!(mailer.api_url, "https://mail.example.com/v1/send");
    }
}
