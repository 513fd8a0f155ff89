//! Hosted store adapters speaking the PostgREST dialect.
//!
//! [`PostgrestClient`] is the transport; [`PostgrestStore`] maps the domain's
//! data ports onto tables and procedures; [`SupabaseIdentityProvider`]
//! resolves access tokens against the same project's auth endpoint.

mod client;
mod identity;
mod query;
mod store;

pub use client::{PostgrestClient, StoreClientError, StoreConnection};
pub use identity::SupabaseIdentityProvider;
pub use query::{Direction, SelectQuery};
pub use store::PostgrestStore;
