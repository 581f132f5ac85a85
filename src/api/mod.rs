//! HTTP API
//!
//! Thin request/response glue over the engine: POST endpoints for each
//! ingestion operation and GET endpoints for the report and export views.

pub mod http;
pub mod rest;
