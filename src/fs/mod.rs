//! Virtual filesystem mirror: an in-memory tree kept coherent with a
//! user-designated on-disk root, plus the OS primitives it mutates through.

pub(crate) mod context;
pub(crate) mod node;
mod os;

pub use context::FsContext;
