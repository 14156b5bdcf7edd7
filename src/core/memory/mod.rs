//! Regiões de memória de destino do carregamento.
//! Os buffers pertencem sempre ao chamador; o carregador nunca aloca memória
//! de região, apenas escreve nos buffers registrados aqui.

/// Associa o nome simbólico de uma região a um buffer de destino.
pub struct RegionBinding<'a> {
    /// Nome simbólico da região (ex.: "crom", "vrom", "sound").
    pub region: &'a str,
    /// Buffer de destino, de propriedade do chamador.
    pub data: &'a mut [u8],
}

/// Tabela de regiões fornecida a cada carregamento.
/// A busca é linear e a primeira associação com o nome procurado vence.
#[derive(Default)]
pub struct RegionMap<'a> {
    bindings: Vec<RegionBinding<'a>>,
}

impl<'a> RegionMap<'a> {
    /// Cria uma tabela vazia.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Registra uma associação região -> buffer.
    pub fn bind(&mut self, region: &'a str, data: &'a mut [u8]) {
        self.bindings.push(RegionBinding { region, data });
    }

    /// Obtém o buffer associado a `region`, se existir.
    pub fn get_mut(&mut self, region: &str) -> Option<&mut [u8]> {
        self.bindings
            .iter_mut()
            .find(|binding| binding.region == region)
            .map(|binding| &mut *binding.data)
    }

    /// Número de regiões registradas.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Verdadeiro se nenhuma região foi registrada.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_lookup() {
        let mut prog = [0u8; 4];
        let mut data = [0u8; 4];
        let mut map = RegionMap::new();
        map.bind("prog", &mut prog);
        map.bind("data", &mut data);

        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
        assert!(map.get_mut("prog").is_some());
        assert!(map.get_mut("video").is_none());

        map.get_mut("data").unwrap()[0] = 0xEE;
        drop(map);
        assert_eq!(data[0], 0xEE);
    }

    #[test]
    fn test_first_binding_wins() {
        let mut first = [0u8; 2];
        let mut second = [0u8; 2];
        let mut map = RegionMap::new();
        map.bind("prog", &mut first);
        map.bind("prog", &mut second);

        map.get_mut("prog").unwrap()[0] = 1;
        drop(map);
        assert_eq!(first[0], 1);
        assert_eq!(second[0], 0);
    }

    #[test]
    fn test_empty_map() {
        let mut map = RegionMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.get_mut("prog").is_none());
    }
}
