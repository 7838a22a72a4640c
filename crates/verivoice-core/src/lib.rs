//! Core types and trait definitions for VeriVoice.
//!
//! This crate is free of HTTP and database dependencies. Storage backends
//! implement [`store::PetitionStore`]; the page layer talks to the two
//! repositories in [`repository`].

pub mod declaration;
pub mod error;
pub mod filter;
pub mod nationality;
pub mod petition;
pub mod repository;
pub mod signer;
pub mod store;

pub use error::{Error, Result};
