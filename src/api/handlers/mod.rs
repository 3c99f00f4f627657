pub mod auth;
pub mod booking;
pub mod health;
pub mod media;
pub mod qr;
