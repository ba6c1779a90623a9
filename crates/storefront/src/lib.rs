//! Pawmart Storefront - headless commerce engine.
//!
//! This crate holds the business logic behind the storefront UI: catalog
//! snapshots, variant resolution, per-card option selection, and the session
//! cart. The presentation layer (product cards, cart drawer, header badge)
//! consumes it through the [`state::StorefrontLogic`] trait and renders
//! whatever the engine reports - no rendering concerns live here.
//!
//! # Modules
//!
//! - [`catalog`] - Immutable catalog types, validated snapshots, variant index
//! - [`selection`] - Per-card option selection state machine
//! - [`cart`] - Session cart aggregation and totals
//! - [`pricing`] - Discount and featured display predicates
//! - [`views`] - Display-ready cart projections for templates
//! - [`state`] - The engine handle tying catalog, cart, and config together
//! - [`config`] - Display configuration from environment variables
//! - [`error`] - Unified error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod selection;
pub mod state;
pub mod views;

pub use error::{Result, StorefrontError};
