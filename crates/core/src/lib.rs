//! Core domain logic for the framesight video analysis service.
//!
//! Holds the frame extraction pipeline leaf (`frames`), the zip packaging
//! of extracted frames (`archive`), and the shared filesystem layout for
//! uploads and derived artifacts (`storage`).

pub mod archive;
pub mod frames;
pub mod storage;
pub mod types;
