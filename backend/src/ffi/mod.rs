//! Python bindings (feature `pyo3`)
//!
//! Tuple-returning functions so the output can be dropped into existing
//! tensor code.

pub mod generator;
