// Este é o ponto de entrada principal da biblioteca.
// Identifica o jogo contido em um arquivo ZIP, valida o conjunto completo e
// mapeia cada imagem para as regiões de memória fornecidas pelo chamador.

// Módulos principais do projeto.
pub mod core;
pub mod utils;

// Re-exportações para facilitar o uso.
pub use crate::core::games::{GameDatabase, GameInfo, RomInfo};
pub use crate::core::loader::{load_romset, load_romset_from_zip, LoaderError, LoaderResult};
pub use crate::core::memory::{RegionBinding, RegionMap};
pub use crate::utils::bytes::{byte_swap16, mirror_fill};

/// Versão do carregador.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
