//! Core types and trait definitions for the Casefile record store.
//!
//! This crate has no HTTP or database dependencies. It defines the
//! investigation records with their drafts and validation, the row-level
//! access policy, and the [`store::RecordStore`] abstraction that storage
//! backends implement.

// Store traits spell out `Send` futures; silence the advisory lint.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod case;
pub mod error;
pub mod evidence;
pub mod lab_report;
pub mod officer;
pub mod policy;
pub mod record;
pub mod store;
pub mod suspect;
pub mod validate;

pub use error::{Error, Failure, FailureKind, Result};
pub use policy::{Entity, Operation, Requester};
pub use record::{Child, Domain, Draft, HasStatus, Record};
