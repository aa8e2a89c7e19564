//! pxemenu: fetch an iPXE menu script, interpret its `:menu` block and
//! render the result.
//!
//! The load cycle is [`load::load`]; [`state::MenuState`] publishes its
//! result for concurrent readers.  Everything else is plumbing for the
//! `pxemenu` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod load;
pub mod render;
pub mod script;
pub mod state;
pub mod var;
