//! nursebot-core: chat relay, quiz pipeline and fluid calculator.
//!
//! This crate defines the data model, the provider and extractor seams, and
//! the pure logic (quiz parsing, grading, fluid arithmetic, context
//! retrieval) that the rest of nursebot builds on.

pub mod chat;
pub mod error;
pub mod fluid;
pub mod model;
pub mod quiz;
pub mod retrieval;
pub mod traits;
