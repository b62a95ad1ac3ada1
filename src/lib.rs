//! Python extension module for tephra.
//!
//! The engine lives in [`tephra_core`]; this crate only exposes it to Python
//! as `tephra._lib`.

mod python;

pub use tephra_core::*;
