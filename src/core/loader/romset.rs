//! Two-pass ROM set loading from ZIP archives.
//!
//! The first pass walks entry metadata only: it identifies the game from the
//! stored CRC32s and checks that every image of the set is present. Only
//! then does the second pass decompress the images and place them into the
//! destination regions, so a doomed load never touches caller memory.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crc::Crc;
use log::{debug, error, warn};
use zip::ZipArchive;

use crate::core::games::{GameDatabase, GameInfo, RomInfo};
use crate::core::loader::{LoaderError, LoaderResult};
use crate::core::memory::RegionMap;
use crate::utils::bytes::byte_swap16;

/// Standard ZIP CRC32, the same algorithm catalog checksums use.
const CRC32: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// Loads a ROM set from a ZIP file, detecting the game automatically.
///
/// `load_all` selects full-load mode: every image of the identified game must
/// be extracted and placed. Without it, images whose region has no binding in
/// `map` are skipped, which allows loading one subsystem at a time.
///
/// On success returns the catalog entry of the identified game. Failure
/// diagnostics are emitted through the `log` facade as they are found.
pub fn load_romset_from_zip<'db, P: AsRef<Path>>(
    map: &mut RegionMap<'_>,
    db: &'db GameDatabase,
    path: P,
    load_all: bool,
) -> LoaderResult<&'db GameInfo> {
    let name = path.as_ref().display().to_string();
    let file = match File::open(path.as_ref()) {
        Ok(file) => file,
        Err(err) => {
            error!("Unable to open {}.", name);
            return Err(LoaderError::ArchiveOpen {
                path: name,
                source: err,
            });
        }
    };
    load_romset(map, db, BufReader::new(file), &name, load_all)
}

/// Loads a ROM set from an already-open archive reader.
///
/// `archive_name` only appears in diagnostics. See [`load_romset_from_zip`].
pub fn load_romset<'db, R: Read + Seek>(
    map: &mut RegionMap<'_>,
    db: &'db GameDatabase,
    reader: R,
    archive_name: &str,
    load_all: bool,
) -> LoaderResult<&'db GameInfo> {
    let mut archive = match ZipArchive::new(reader) {
        Ok(archive) => archive,
        Err(err) => {
            error!("Unable to read the contents of {}.", archive_name);
            return Err(LoaderError::ArchiveList {
                path: archive_name.to_string(),
                source: err,
            });
        }
    };

    // First pass: identify the game from entry checksums alone and record
    // which of its images are present.
    let mut game_idx: Option<usize> = None;
    let mut roms_found: Vec<bool> = Vec::new();
    let mut multi_game_warned = false;
    for index in 0..archive.len() {
        let entry = match archive.by_index_raw(index) {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let Some((game, rom)) = db.find_by_crc(game_idx, entry.crc32()) else {
            continue;
        };
        match game_idx {
            None => {
                // The first recognized image decides which game this is.
                let info = &db.games()[game];
                debug!("{}: identified {} ({})", archive_name, info.id, info.title);
                game_idx = Some(game);
                roms_found = vec![false; info.roms.len()];
            }
            Some(current) if current != game => {
                let other = &db.games()[game];
                debug!("{} also contains {} ({})", archive_name, other.id, other.title);
                if !multi_game_warned {
                    warn!(
                        "Multiple games were found in {}; loading \"{}\".",
                        archive_name,
                        db.games()[current].title
                    );
                    multi_game_warned = true;
                }
                continue;
            }
            Some(_) => {}
        }
        roms_found[rom] = true;
    }

    let Some(game_idx) = game_idx else {
        error!("{} contains no supported games.", archive_name);
        return Err(LoaderError::NoSupportedGames {
            path: archive_name.to_string(),
        });
    };
    let game = &db.games()[game_idx];

    // The set must be complete before anything is extracted.
    let mut missing = 0;
    for (rom, found) in game.roms.iter().zip(&roms_found) {
        if !found {
            error!(
                "{} (CRC={:08X}) is missing from {}.",
                rom.file, rom.crc, archive_name
            );
            missing += 1;
        }
    }
    if missing > 0 {
        return Err(LoaderError::MissingRoms {
            title: game.title,
            missing,
        });
    }

    // One scratch buffer sized for the largest image, reused for all of them.
    let scratch_size = game.max_rom_size();
    let mut scratch: Vec<u8> = Vec::new();
    if scratch.try_reserve_exact(scratch_size).is_err() {
        error!(
            "Insufficient memory to load ROM files ({} bytes).",
            scratch_size
        );
        return Err(LoaderError::ScratchAlloc {
            bytes: scratch_size,
        });
    }
    scratch.resize(scratch_size, 0);

    // Second pass: extract and place every image of the identified game.
    let mut roms_loaded = vec![false; game.roms.len()];
    let mut first_error: Option<LoaderError> = None;
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let entry_crc = entry.crc32();
        let Some((owner, rom_idx)) = db.find_by_crc(Some(game_idx), entry_crc) else {
            continue;
        };
        if owner != game_idx {
            continue;
        }
        let rom = &game.roms[rom_idx];
        let entry_name = entry.name().to_string();

        if entry.size() != rom.size as u64 {
            error!(
                "{} in {} is not the correct size (must be {} bytes).",
                entry_name, archive_name, rom.size
            );
            first_error.get_or_insert(LoaderError::SizeMismatch {
                file: entry_name,
                expected: rom.size,
                actual: entry.size(),
            });
            continue;
        }

        let data = &mut scratch[..rom.size];
        if entry.read_exact(data).is_err() {
            error!("Unable to read {} from {}.", entry_name, archive_name);
            first_error.get_or_insert(LoaderError::ReadFailed { file: entry_name });
            continue;
        }
        if CRC32.checksum(data) != entry_crc {
            // The declared checksum matched the catalog; the content did not.
            warn!(
                "CRC error reading {} from {}. File may be corrupt.",
                entry_name, archive_name
            );
        }

        match place_rom(map, rom, data, &entry_name, load_all) {
            Ok(true) => roms_loaded[rom_idx] = true,
            Ok(false) => {}
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    if load_all {
        // Full-load mode: every image must have been placed.
        let mut unloaded = 0;
        for (rom, loaded) in game.roms.iter().zip(&roms_loaded) {
            if !loaded {
                error!(
                    "Failed to load {} (CRC={:08X}) from {}.",
                    rom.file, rom.crc, archive_name
                );
                unloaded += 1;
            }
        }
        if unloaded > 0 {
            return Err(LoaderError::Incomplete {
                title: game.title,
                missing: unloaded,
            });
        }
    } else if let Some(err) = first_error {
        // Partial loads still refuse to paper over extraction failures.
        return Err(err);
    }

    Ok(game)
}

/// Places one decoded image into its destination region.
///
/// Returns `Ok(true)` when the image was written, `Ok(false)` when its region
/// has no binding and partial loads are allowed. Interleaved images are
/// reassembled by copying `group_size` contiguous bytes at a time and
/// stepping the destination cursor by `stride` until the source is consumed.
fn place_rom(
    map: &mut RegionMap<'_>,
    rom: &RomInfo,
    data: &mut [u8],
    file: &str,
    load_all: bool,
) -> LoaderResult<bool> {
    let Some(dest) = map.get_mut(rom.region) else {
        if load_all {
            error!("No mapping for \"{}\".", rom.region);
            return Err(LoaderError::UnmappedRegion { region: rom.region });
        }
        return Ok(false);
    };

    if rom.byte_swap {
        byte_swap16(data);
    }

    match placement_end(rom, data.len()) {
        Some(end) if end <= dest.len() => {}
        _ => {
            error!("{} does not fit in region \"{}\".", file, rom.region);
            return Err(LoaderError::RegionOverflow {
                file: file.to_string(),
                region: rom.region,
            });
        }
    }

    for (index, group) in data.chunks(rom.group_size).enumerate() {
        let at = rom.offset + index * rom.stride;
        dest[at..at + group.len()].copy_from_slice(group);
    }
    Ok(true)
}

/// Exclusive end of the furthest byte `place_rom` would write, or `None` when
/// the walk is ill-defined (`group_size == 0`) or overflows `usize`.
fn placement_end(rom: &RomInfo, len: usize) -> Option<usize> {
    if rom.group_size == 0 {
        return None;
    }
    let full = len / rom.group_size;
    let tail = len % rom.group_size;
    let mut end: usize = 0;
    if full > 0 {
        end = (full - 1)
            .checked_mul(rom.stride)?
            .checked_add(rom.group_size)?;
    }
    if tail > 0 {
        end = end.max(full.checked_mul(rom.stride)?.checked_add(tail)?);
    }
    rom.offset.checked_add(end)
}
