use crate::domain::ports::SmsGateway;
use crate::error::AppError;
use async_trait::async_trait;
use tracing::info;

/// Stand-in used when no SMS gateway is configured: logs the message and
/// reports success.
pub struct LogSmsService;

#[async_trait]
impl SmsGateway for LogSmsService {
    async fn send(&self, phone: &str, message: &str) -> Result<(), AppError> {
        info!("SMS notification (no gateway configured)");
        info!("To: {}", phone);
        info!("Message: {}", message);
        Ok(())
    }
}
