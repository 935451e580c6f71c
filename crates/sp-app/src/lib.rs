//! Secure Pass Application Orchestration Layer
//!
//! This crate owns the form state container and the use cases that drive
//! it: remote encrypt/decrypt requests, clipboard copy with transient
//! feedback, and the install-offer controller.

pub mod context;
pub mod controller;
pub mod deps;
pub mod internal;
pub mod usecases;

pub use context::{FormContext, FormSnapshot};
pub use controller::SecurePassController;
pub use deps::AppDeps;
