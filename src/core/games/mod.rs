//! Game catalog and checksum lookups.
//!
//! A [`GameDatabase`] describes every supported game and the ROM images each
//! set is built from. Identification is content-addressed: archive entries
//! are matched against the expected CRC32 of each image, never against file
//! names.

/// One ROM image of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomInfo {
    /// Symbolic name of the destination memory region.
    pub region: &'static str,
    /// Canonical file name, used in diagnostics only.
    pub file: &'static str,
    /// Expected CRC32 of the file contents.
    pub crc: u32,
    /// Expected size in bytes.
    pub size: usize,
    /// Swap each adjacent byte pair after extraction (16-bit byte order).
    pub byte_swap: bool,
    /// Offset within the destination region where placement starts.
    pub offset: usize,
    /// Destination step between consecutive groups.
    pub stride: usize,
    /// Contiguous source bytes copied per group. Equal to `stride` for a
    /// plain contiguous image.
    pub group_size: usize,
}

/// One supported game and the complete list of images in its set.
#[derive(Debug, Clone)]
pub struct GameInfo {
    /// Short ROM set identifier.
    pub id: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Every image the set is expected to contain.
    pub roms: Vec<RomInfo>,
}

impl GameInfo {
    /// Index of the image whose expected CRC32 equals `crc`.
    pub fn find_rom(&self, crc: u32) -> Option<usize> {
        self.roms.iter().position(|rom| rom.crc == crc)
    }

    /// Size in bytes of the largest image in the set.
    pub fn max_rom_size(&self) -> usize {
        self.roms.iter().map(|rom| rom.size).max().unwrap_or(0)
    }
}

/// Read-only catalog of every supported game.
#[derive(Debug, Clone, Default)]
pub struct GameDatabase {
    games: Vec<GameInfo>,
}

impl GameDatabase {
    /// Builds a catalog from an ordered game list.
    pub fn new(games: Vec<GameInfo>) -> Self {
        Self { games }
    }

    /// All games, in catalog order.
    pub fn games(&self) -> &[GameInfo] {
        &self.games
    }

    /// Finds the game and image index owning `crc`.
    ///
    /// When `bias` names a game, that game's list is searched first, so an
    /// image shared between sets resolves to the game already identified.
    /// The rest of the catalog is searched in order and the first match wins.
    pub fn find_by_crc(&self, bias: Option<usize>, crc: u32) -> Option<(usize, usize)> {
        if let Some(game) = bias {
            if let Some(rom) = self.games.get(game).and_then(|info| info.find_rom(crc)) {
                return Some((game, rom));
            }
        }
        self.games
            .iter()
            .enumerate()
            .find_map(|(game, info)| info.find_rom(crc).map(|rom| (game, rom)))
    }
}
