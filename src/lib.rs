// postman-env: Postman Environments API Client
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          list / show / push / merge
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML + POSTMAN_* env    |
//!              '------------+--------------'
//!                           |
//!                           v
//!                        client
//!               get / replace / merge-update
//!                           |
//!                           v
//!                      environment
//!                model, strategy, wire codec
//!
//!   +-----------------------------------------+
//!   |  foundation       error, logging        |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod client;
pub mod cmd;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;

pub use client::{PostmanClient, UpdateTarget};
pub use environment::Environment;
pub use environment::strategy::MergeStrategy;
pub use error::{ApiError, ClientError, ClientResult};
