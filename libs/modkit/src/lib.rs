//! # ModKit
//!
//! Small shared kit used by every module crate:
//!
//! - `contracts`: the [`RestfulModule`] trait modules implement to expose routes
//! - `context`: [`ModuleCtx`], carrying the shared store and per-module config
//! - `api::problem`: the JSON error body (`{"message": ..., "details": ...}`) and its
//!   axum response wrapper
//! - `api::json`: [`JsonBody`], a body extractor that rejects with that error body

pub use anyhow::Result;

pub mod api;
pub mod context;
pub mod contracts;

pub use api::json::JsonBody;
pub use api::problem::{
    bad_request, internal_error, not_found, unauthorized, Problem, ProblemResponse,
};
pub use context::{ConfigProvider, ModuleCtx};
pub use contracts::RestfulModule;
