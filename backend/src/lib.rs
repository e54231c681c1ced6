//! Backend library for the barangay relief coordination dashboard.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services and
//! port traits; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports (memory store, JSON snapshots, Argon2).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
