//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::LoadArgs;
pub use types::{PositiveU64, PositiveUsize};

pub(crate) use defaults::DEFAULT_USER_AGENT;
#[cfg(test)]
pub(crate) use test_support::parse_test_args;
