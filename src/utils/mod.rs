//! Shared helpers: dates, slugs and output minification.

pub mod date;
pub mod minify;
pub mod slug;
