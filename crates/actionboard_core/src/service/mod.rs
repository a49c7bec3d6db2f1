//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate synthesis and store calls into use-case level APIs.
//! - Keep UI/service callers decoupled from storage details.

pub mod board_service;
