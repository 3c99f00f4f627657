pub mod http_sms_service;
pub mod log_sms_service;
