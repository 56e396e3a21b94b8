//! Intrusive-style containers driven by a small line-oriented command shell.
//!
//! The library side provides three containers: a doubly-linked [`List`] with
//! stable element handles, an open-chaining [`HashTable`] built on top of it,
//! and a fixed-length [`Bitmap`]. A [`Registry`] keeps up to ten of them in
//! numbered slots.
//!
//! The main entry point for the command side is [`Interpreter`], which parses
//! one command per line with [`argh`] and runs it against the registry. The
//! public modules [`command`] and [`env`] expose the traits and state commands
//! are built from.

pub mod bitmap;
mod builtin;
pub mod command;
pub mod env;
pub mod error;
pub mod hash;
mod interpreter;
pub mod list;
pub mod registry;

#[cfg(test)]
mod proptests;

pub use bitmap::{BITMAP_ERROR, Bitmap};
pub use error::ContainerError;
pub use hash::HashTable;
pub use list::{ElemId, List};
pub use registry::{Instance, Registry, RegistryError};

/// Just a convenient re-export of the line-oriented command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
