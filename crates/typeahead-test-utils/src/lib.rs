//! Test helpers shared by the typeahead crates
//!
//! - [`stub::StubServer`]: a local HTTP server answering with canned responses and
//!   recording every request it sees
//! - [`sandbox::Sandbox`]: an isolated home/config directory for running the CLI

pub mod sandbox;
pub mod stub;
