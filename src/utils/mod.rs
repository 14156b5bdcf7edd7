//! Utilitários compartilhados entre os subsistemas.

pub mod bytes;
