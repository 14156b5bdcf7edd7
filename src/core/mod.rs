//! Subsistemas do núcleo do carregador.

pub mod games;
pub mod loader;
pub mod memory;
