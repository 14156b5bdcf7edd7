//! ROM set loading.
//!
//! Identifies which supported game a ZIP archive contains, verifies that the
//! whole set is present, then extracts every image into the caller's memory
//! regions. Destination buffers are only written once the set has passed the
//! completeness check.

mod romset;

pub use romset::{load_romset, load_romset_from_zip};

use std::fmt;
use std::io;

/// Erros do carregamento de ROM sets.
///
/// Every failure is also reported through the `log` facade at the point it is
/// found, one message per affected file, so a single run gives the operator
/// the complete remediation list.
#[derive(Debug)]
pub enum LoaderError {
    /// The archive file could not be opened.
    ArchiveOpen { path: String, source: io::Error },
    /// The archive contents could not be enumerated.
    ArchiveList {
        path: String,
        source: zip::result::ZipError,
    },
    /// No entry matched any game in the catalog.
    NoSupportedGames { path: String },
    /// Expected images are absent from the archive.
    MissingRoms { title: &'static str, missing: usize },
    /// An image's stored size does not match the catalog.
    SizeMismatch {
        file: String,
        expected: usize,
        actual: u64,
    },
    /// An image could not be read out of the archive.
    ReadFailed { file: String },
    /// The catalog names a region with no bound destination buffer.
    UnmappedRegion { region: &'static str },
    /// An image's placement would run past its destination buffer.
    RegionOverflow { file: String, region: &'static str },
    /// The scratch buffer for the largest image could not be allocated.
    ScratchAlloc { bytes: usize },
    /// Images of the identified game were not placed in full-load mode.
    Incomplete { title: &'static str, missing: usize },
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArchiveOpen { path, source } => {
                write!(f, "unable to open {}: {}", path, source)
            }
            Self::ArchiveList { path, source } => {
                write!(f, "unable to read the contents of {}: {}", path, source)
            }
            Self::NoSupportedGames { path } => {
                write!(f, "{} contains no supported games", path)
            }
            Self::MissingRoms { title, missing } => {
                write!(f, "{} image(s) of \"{}\" are missing", missing, title)
            }
            Self::SizeMismatch {
                file,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{} is not the correct size (expected {} bytes, found {})",
                    file, expected, actual
                )
            }
            Self::ReadFailed { file } => write!(f, "unable to read {}", file),
            Self::UnmappedRegion { region } => {
                write!(f, "no mapping for region \"{}\"", region)
            }
            Self::RegionOverflow { file, region } => {
                write!(f, "{} does not fit in region \"{}\"", file, region)
            }
            Self::ScratchAlloc { bytes } => {
                write!(f, "insufficient memory to load ROM files ({} bytes)", bytes)
            }
            Self::Incomplete { title, missing } => {
                write!(f, "failed to load {} image(s) of \"{}\"", missing, title)
            }
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ArchiveOpen { source, .. } => Some(source),
            Self::ArchiveList { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Tipo de resultado para operações de carregamento
pub type LoaderResult<T> = Result<T, LoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LoaderError::SizeMismatch {
            file: "epr-19734.20".to_string(),
            expected: 0x20_0000,
            actual: 0x10_0000,
        };
        assert_eq!(
            err.to_string(),
            "epr-19734.20 is not the correct size (expected 2097152 bytes, found 1048576)"
        );

        let err = LoaderError::UnmappedRegion { region: "vrom" };
        assert_eq!(err.to_string(), "no mapping for region \"vrom\"");
    }

    #[test]
    fn test_source_chains_io_error() {
        use std::error::Error;

        let err = LoaderError::ArchiveOpen {
            path: "scud.zip".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.source().is_some());

        let err = LoaderError::NoSupportedGames {
            path: "scud.zip".to_string(),
        };
        assert!(err.source().is_none());
    }
}
