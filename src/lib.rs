//! postboard
//!
//! Terminal client for browsing, searching and editing the posts of a blog
//! API.
//!
//! Follows a Pure Core / Impure Shell split: [`state`] and [`navigation`]
//! are deterministic and clock-injected, [`client`] and [`dispatch`] perform
//! I/O, [`view`] draws and owns the event loop.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod state;
pub mod view;
