// JSON mirror of the competency-matrix read API, served from the configured source.

pub mod handlers;
