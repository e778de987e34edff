//! Image uploads, stored under the upload directory and served at `/uploads`.

pub mod blob;
pub mod handlers;
pub mod types;

pub use blob::BlobStore;
