use crate::domain::ports::SmsGateway;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::error;

/// MSG91-style SMS gateway. Phone numbers are sent without the +91 prefix,
/// matching the provider's API.
pub struct HttpSmsService {
    client: Client,
    api_url: String,
    api_key: String,
    sender_id: String,
}

impl HttpSmsService {
    pub fn new(api_url: String, api_key: String, sender_id: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url,
            api_key,
            sender_id,
        }
    }
}

#[derive(Serialize)]
struct SmsMessage {
    message: String,
    to: Vec<String>,
}

#[derive(Serialize)]
struct SmsPayload {
    sender: String,
    route: String,
    country: String,
    sms: Vec<SmsMessage>,
}

#[async_trait]
impl SmsGateway for HttpSmsService {
    async fn send(&self, phone: &str, message: &str) -> Result<(), AppError> {
        let payload = SmsPayload {
            sender: self.sender_id.clone(),
            route: "4".to_string(),
            country: "91".to_string(),
            sms: vec![SmsMessage {
                message: message.to_string(),
                to: vec![phone.trim_start_matches("+91").to_string()],
            }],
        };

        let res = self.client.post(&self.api_url)
            .header("authkey", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("SMS gateway connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("SMS gateway failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        Ok(())
    }
}
