//! Core module - Business logic
//!
//! Contains the knowledge base record, memory scoring and persistence.

pub mod error;
pub mod handover;
pub mod knowledge;
pub mod score;
pub mod storage;
pub mod validate;
