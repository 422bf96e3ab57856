//! The paycli library.
//!
//! A command-line client for a cross-border payments API. The interesting
//! part is request building for beneficiaries and transfers: flags are mapped
//! to dot paths, one of many country-specific routing identifiers is chosen
//! for the generic routing slots, raw `--field` overrides are merged on top
//! and the result can be checked against a server-declared schema.
//!
//! # Modules
//!
//! - `field_registry`: flag to request-path table
//! - `request_tree`: dot-path nesting, flattening and deep merge
//! - `routing`: priority-ordered routing-slot resolution
//! - `validators`: per-identifier format checks
//! - `schema`: server schema completeness and pattern checks
//! - `overrides`: `--field path=value` parsing
//! - `request_builder`: gather, validate and submit phases
//! - `payments_api`: the API seam and its HTTP implementation

pub mod actions;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod exit_codes;
pub mod field_registry;
pub mod format;
pub mod http_utils;
pub mod keyring;
pub mod overrides;
pub mod payments_api;
pub mod request_builder;
pub mod request_error;
pub mod request_tree;
pub mod routing;
pub mod schema;
pub mod validators;
