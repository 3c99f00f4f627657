pub mod auth;
pub mod booking;
pub mod credential;
pub mod media;
pub mod qr;
pub mod user;
