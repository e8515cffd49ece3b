//! Paystack Gateway Client
//!
//! Implements [`PaymentGateway`] against the Paystack REST API. All
//! responses arrive in the `{ status, message, data }` envelope; a
//! false `status` or a non-2xx code surfaces as a gateway error with
//! Paystack's own message when it sent one.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::gateway::{
    InitializedPayment, PaymentGateway, PaymentStatus, PaymentVerification, SubscriptionHandle,
};
use crate::domain::value_object::{
    amount::Amount, ids::DonationId, subscription_plan::SubscriptionPlan,
};
use crate::error::{FundingError, FundingResult};

/// Paystack REST client
#[derive(Clone)]
pub struct PaystackGateway {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl PaystackGateway {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.paystack.co";

    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL, secret_key)
    }

    /// Point the client somewhere else (tests, sandbox)
    pub fn with_base_url(base_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> FundingResult<T> {
        let http_status = response.status();

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| FundingError::Gateway(format!("unreadable gateway response: {}", e)))?;

        if !http_status.is_success() || !envelope.status {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("gateway returned HTTP {}", http_status));
            return Err(FundingError::Gateway(message));
        }

        envelope
            .data
            .ok_or_else(|| FundingError::Gateway("gateway response missing data".to_string()))
    }
}

impl PaymentGateway for PaystackGateway {
    async fn initialize(
        &self,
        amount: Amount,
        email: &str,
        reference: &DonationId,
    ) -> FundingResult<InitializedPayment> {
        let response = self
            .client
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&serde_json::json!({
                "amount": amount.minor_units(),
                "email": email,
                "reference": reference.to_string(),
            }))
            .send()
            .await
            .map_err(|e| FundingError::Gateway(format!("initialize request failed: {}", e)))?;

        let data: InitializeData = Self::read_envelope(response).await?;

        Ok(InitializedPayment {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        })
    }

    async fn verify(&self, reference: &DonationId) -> FundingResult<PaymentVerification> {
        let response = self
            .client
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| FundingError::Gateway(format!("verify request failed: {}", e)))?;

        let data: VerifyData = Self::read_envelope(response).await?;

        Ok(PaymentVerification {
            status: PaymentStatus::from_code(&data.status),
            amount: data.amount,
            paid_at: data.paid_at,
            channel: data.channel,
        })
    }

    async fn create_subscription(
        &self,
        amount: Amount,
        email: &str,
        reference: &DonationId,
        plan: SubscriptionPlan,
    ) -> FundingResult<SubscriptionHandle> {
        let response = self
            .client
            .post(format!("{}/subscription", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&serde_json::json!({
                "amount": amount.minor_units(),
                "email": email,
                "reference": reference.to_string(),
                "plan": plan.code(),
            }))
            .send()
            .await
            .map_err(|e| FundingError::Gateway(format!("subscription request failed: {}", e)))?;

        let data: SubscriptionData = Self::read_envelope(response).await?;

        Ok(SubscriptionHandle {
            id: data.id.to_string(),
            subscription_code: data.subscription_code,
        })
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Deserialize)]
struct Envelope<T> {
    status: bool,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: Option<String>,
    reference: String,
}

#[derive(Deserialize)]
struct VerifyData {
    status: String,
    amount: i64,
    paid_at: Option<DateTime<Utc>>,
    channel: Option<String>,
}

#[derive(Deserialize)]
struct SubscriptionData {
    id: i64,
    subscription_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parsing() {
        let body = r#"{
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/abc123",
                "access_code": "abc123",
                "reference": "3f9e9e6a-0000-4000-8000-000000000000"
            }
        }"#;

        let envelope: Envelope<InitializeData> = serde_json::from_str(body).unwrap();
        assert!(envelope.status);
        let data = envelope.data.unwrap();
        assert_eq!(
            data.authorization_url,
            "https://checkout.paystack.com/abc123"
        );
    }

    #[test]
    fn test_verify_payload_parsing() {
        let body = r#"{
            "status": true,
            "message": "Verification successful",
            "data": {
                "status": "success",
                "amount": 50000,
                "paid_at": "2024-05-15T10:22:04Z",
                "channel": "card"
            }
        }"#;

        let envelope: Envelope<VerifyData> = serde_json::from_str(body).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(PaymentStatus::from_code(&data.status), PaymentStatus::Success);
        assert_eq!(data.amount, 50000);
        assert!(data.paid_at.is_some());
    }

    #[test]
    fn test_error_envelope_parsing() {
        let body = r#"{ "status": false, "message": "Invalid key" }"#;
        let envelope: Envelope<InitializeData> = serde_json::from_str(body).unwrap();
        assert!(!envelope.status);
        assert_eq!(envelope.message.as_deref(), Some("Invalid key"));
        assert!(envelope.data.is_none());
    }
}
