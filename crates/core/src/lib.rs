//! Verdant Core - Domain types and cart state.
//!
//! This crate holds everything the storefront needs to reason about products,
//! carts and visitors without touching I/O:
//! - [`types`] - Newtype wrappers for IDs, prices, emails, products and users
//! - [`cart`] - The shopping cart and its invariants
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no HTTP, no sessions,
//! no async. The storefront crate loads a [`Cart`] from the visitor's session,
//! mutates it through the operations defined here, and stores it back.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine};
pub use types::*;
