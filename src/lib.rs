//! Catalogue backend for a small apparel storefront.
//!
//! The domain owns the category tree and product catalogue semantics; inbound
//! adapters expose them over REST, and outbound adapters talk to the hosted
//! data API and the public municipality directory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped trace identifier middleware.
pub use middleware::trace::Trace;
/// Request-scoped trace identifier primitive.
pub use domain::TraceId;
