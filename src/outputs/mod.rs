//! Rendering of resolved headlines into outgoing messages.
//!
//! # Submodules
//!
//! - [`markdown`]: Builds the markdown briefing posted to the group chat

pub mod markdown;
