//! Scan server HTTP handlers.

mod index;
mod scan;

pub use index::{health_handler, index_handler};
pub use scan::scan_handler;
