//! Utility functions for rule implementations.

pub mod allowance;
pub mod jsx;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use allowance::{check_allow, AllowCheck, AllowDirective};
#[doc(inline)]
pub use jsx::{find_elements, JsxAttribute, JsxElement};
