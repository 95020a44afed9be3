//! RocketShoes Core - Shared cart and catalog types.
//!
//! This crate provides the types used across all RocketShoes components:
//! - `cart` - Cart store with stock validation and durable persistence
//! - `cli` - Command-line front-end for the cart store
//!
//! # Architecture
//!
//! The core crate contains only types and pure transitions - no I/O, no
//! storage access, no HTTP clients. Every cart operation here returns a new
//! [`Cart`] value and leaves the original untouched.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, catalog entries, stock levels and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
