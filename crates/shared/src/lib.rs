//! Wire and domain types shared by the Stryde clients.

pub mod domain;
pub mod error;
pub mod protocol;
