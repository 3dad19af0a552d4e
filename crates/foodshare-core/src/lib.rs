//! Core types and engines for the food donation dashboard.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::DonationStore`]; the presentation surfaces
//! (`foodshare-api`, `foodshare-cli`) talk to a [`session::Session`].

pub mod aggregate;
pub mod cache;
pub mod entity;
pub mod error;
pub mod filter;
pub mod load;
pub mod report;
pub mod session;
pub mod store;
pub mod table;

pub use error::{Error, Result};
