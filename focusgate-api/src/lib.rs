//! # FocusGate Server Library
//!
//! This library provides the HTTP layer of FocusGate: a small multi-user
//! focus app combining a per-user todo list, a per-user website blocklist,
//! and a motivational-quote proxy behind a session gate.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder, session middleware
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `gate`: The allow/redirect decision for each request
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod routes;
