//! Trie operations. Every operation reads the existing trie and returns new
//! nodes; nothing is mutated in place.

pub mod get;
pub mod insert;
pub mod remove;
