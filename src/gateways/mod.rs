//! Gateway implementations

pub mod jolpica;

pub use jolpica::JolpicaGateway;
