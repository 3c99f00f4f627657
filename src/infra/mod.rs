pub mod factory;
pub mod hosting;
pub mod repositories;
pub mod sms;
pub mod uploads;
