//! Map of solar auto-charger stations with clickable glyph pins.
//!
//! [`init::init_map`] builds a map and its markers against any
//! [`library::LibraryHost`]; [`terminal::TerminalHost`] renders them in the
//! terminal with Braille Unicode.

pub mod app;
pub mod braille;
pub mod config;
pub mod data;
pub mod error;
pub mod glyph;
pub mod init;
pub mod library;
pub mod logging;
pub mod map;
pub mod poi;
pub mod terminal;
pub mod ui;

pub use config::MapConfig;
pub use error::{GlyphError, MapError};
pub use init::{init_map, MapSession};
