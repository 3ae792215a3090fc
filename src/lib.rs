//! # proseprint
//!
//! Finds near-duplicate prose passages across a tree of Markdown documents,
//! ignoring fenced code, inline code and markup.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────────────────┐   ┌──────────┐
//! │  Filesystem  │──▶│       proseprint-core        │──▶│  Report  │
//! │ walk + decode│   │ blocks → SimHash → LSH → J  │   │ text/JSON│
//! └──────────────┘   └─────────────────────────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! proseprint find ./docs                       # cross-file duplicates
//! proseprint find ./docs --include-same-file   # also within one file
//! proseprint find ./docs --exhaustive --format json
//! proseprint inspect ./docs --top 20           # calibrate the threshold
//! proseprint stats ./docs --bands 8
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`connector_fs`] | Filesystem document source |
//! | [`find`] | `find` command |
//! | [`inspect`] | `blocks` and `inspect` commands |
//! | [`stats`] | `stats` command |
//! | [`report`] | Text and JSON rendering |

pub mod config;
pub mod connector_fs;
pub mod find;
pub mod inspect;
pub mod report;
pub mod stats;
