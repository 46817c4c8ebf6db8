// Module layout (Clean Architecture style)
// - bootstrap: configuration and wiring
// - infrastructure: Postgres and in-memory store adapters
// - presentation: HTTP handlers, extractors and routing
// - application: ports, use cases, access and extraction policies
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
