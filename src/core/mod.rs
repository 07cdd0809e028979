//! # Core Application Logic
//!
//! This module contains hail's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                     ┌──────────┴──────────┐
//!                     ▼                     ▼
//!              ┌────────────┐        ┌────────────┐
//!              │    TUI     │        │  Booking   │
//!              │  Adapter   │        │ API client │
//!              │ (ratatui)  │        │ (reqwest)  │
//!              └────────────┘        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum — everything that can happen in the app
//! - [`search`]: Debounced, generation-tagged location search
//! - [`booking`]: The booking form draft and its validation
//! - [`config`]: Settings from `~/.hail/config.toml`

pub mod action;
pub mod booking;
pub mod config;
pub mod search;
pub mod state;
