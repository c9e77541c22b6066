//! Terminal rendering.
//!
//! - [`common`]: header, tabs, status banner, status bar and help overlay
//! - [`services`]: service cards with daily uptime strips
//! - [`incidents`]: recent incident timeline
//! - [`detail`]: per-service overlay with every aggregation window
//! - [`theme`]: light/dark themes and status colour lookups

pub mod common;
pub mod detail;
pub mod incidents;
pub mod services;
pub mod theme;

pub use theme::Theme;
