//! CLI command implementations.

pub mod graphs;
pub mod linear;
pub mod maps;
pub mod trees;
