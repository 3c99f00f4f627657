pub mod cloudinary;
pub mod youtube;
