//! Media service implementations.

mod cloudinary;

pub use cloudinary::CloudinaryUploader;
