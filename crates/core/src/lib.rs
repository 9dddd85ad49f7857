//! Trailhead Core - Shared domain library.
//!
//! This crate provides the domain model used across all Trailhead components:
//! - `storefront` - Public-facing store (catalog, cart, checkout)
//! - `admin` - Internal administration panel (product CRUD, fulfillment)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and domain logic - no I/O, no database
//! access, no HTTP. The cart aggregate, order validation, and paging math all
//! live here so they can be tested without infrastructure.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs
//! - [`product`] - Catalog product record
//! - [`cart`] - The session-owned cart aggregate
//! - [`order`] - Orders, order lines, and checkout field validation
//! - [`paging`] - Derived pagination metadata

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod paging;
pub mod product;
pub mod types;

pub use cart::{Cart, CartLine};
pub use order::{Order, OrderDetails, OrderLine, ValidationFailure};
pub use paging::PagingInfo;
pub use product::Product;
pub use types::*;
