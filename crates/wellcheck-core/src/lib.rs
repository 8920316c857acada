//! wellcheck-core
//!
//! Shared vocabulary of the wellcheck system: who is answering and which
//! questionnaire they picked. No scoring lives here.

pub mod error;
pub mod models;
