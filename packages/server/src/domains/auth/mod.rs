//! Auth domain - bearer tokens and operator account bootstrap
//!
//! Tokens carry the user id and site role; the HTTP middleware turns a
//! verified token into an [`Actor`](crate::common::Actor).

pub mod bootstrap;
pub mod jwt;

pub use jwt::{Claims, JwtService};
