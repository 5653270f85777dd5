// Air quality analytics - layered like a service: domain, use cases, adapters, HTTP
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
