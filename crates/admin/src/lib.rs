//! Magento → Shopify catalog bridge, admin service.
//!
//! Hosts the collection menu editor and the category and attribute sync
//! endpoints. The pure menu logic lives in `magbridge_core`; this crate
//! wires it to `PostgreSQL`, the Shopify Admin API and Magento's REST
//! exports.
//!
//! # Security
//!
//! This crate holds a Shopify Admin API token and the Magento bearer token.
//! Neither is ever logged or returned to clients.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod magento;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
