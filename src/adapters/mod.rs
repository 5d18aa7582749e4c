// Adapters layer: concrete implementations of the domain ports (http transport, enrichment).

pub mod http;
pub mod readability;
