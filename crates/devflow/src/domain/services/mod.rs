//! Domain Services
//!
//! Side-effect-free logic that operates on domain entities.

mod template_filter;

pub use template_filter::*;
