// Browsing views: full pages and HTMX fragments rendered from the catalog source.

pub mod handlers;
