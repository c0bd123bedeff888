//! Neo4j access: records, sessions and the shared client.

mod client;
#[cfg(test)]
pub(crate) mod mock;
mod record;
mod session;
mod wire;

pub use client::Neo4jClient;
pub use record::{Entity, QueryRecord, Relationship};
pub use session::{HttpSession, Session};
