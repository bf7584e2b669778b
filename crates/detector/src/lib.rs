//! Client for the remote object-detection inference API.
//!
//! `client` wraps the hosted detection endpoint (single-file multipart
//! upload, API key as a query credential); `batch` runs a sequential
//! inference pass over a list of extracted frame files.

pub mod batch;
pub mod client;

pub use batch::{run_inference, FrameDetection};
pub use client::{DetectorApi, DetectorApiError};
