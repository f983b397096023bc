//! Commands for the token CLI.

pub mod balance;
pub mod collection;
pub mod token;
pub mod transfer;
