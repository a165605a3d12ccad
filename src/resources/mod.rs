//! Loading of the roms, either from a plain file or from an entry of a zip archive.
use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
};

use zip::{read::ZipArchive, result::ZipError};

use crate::{
    definitions::{cpu, memory},
    ResourceError,
};

/// The largest rom that fits between the program start and the end of memory.
pub const MAX_ROM_SIZE: usize = memory::SIZE - cpu::PROGRAM_COUNTER as usize;

/// Separates the archive path from the entry name, e.g. `games.zip:PONG`.
const ARCHIVE_SEPARATOR: char = ':';
const ARCHIVE_EXTENSION: &str = ".zip";

/// Represents an archive of roms.
pub struct RomArchive<R> {
    archive: ZipArchive<R>,
}

impl RomArchive<File> {
    /// Will open the archive at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|_| ResourceError::FileNotFound(path.display().to_string()))?;
        Self::new(file)
    }
}

impl<R: Read + Seek> RomArchive<R> {
    /// Will generate a new rom archive object based of the given zip data
    pub fn new(reader: R) -> Result<Self, ResourceError> {
        Ok(RomArchive {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Will return all the rom names available to be chosen
    pub fn file_names(&self) -> Vec<&'_ str> {
        let mut names: Vec<_> = self.archive.file_names().collect();
        names.sort_unstable();
        names
    }

    /// Will decompress the rom with the given name from the archive
    pub fn get_file_data(&mut self, name: &str) -> Result<Rom, ResourceError> {
        let file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(ResourceError::EntryNotFound(name.to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        let data = read_rom(name, file)?;
        Ok(Rom::new(name, data))
    }
}

/// Reads at most one byte more than a rom may have, so oversized roms are detected without
/// reading them completely.
fn read_rom<R: Read>(name: &str, reader: R) -> Result<Vec<u8>, ResourceError> {
    let mut data = Vec::with_capacity(MAX_ROM_SIZE);
    reader
        .take(MAX_ROM_SIZE as u64 + 1)
        .read_to_end(&mut data)
        .map_err(|source| ResourceError::Io {
            name: name.to_string(),
            source,
        })?;

    if data.len() > MAX_ROM_SIZE {
        return Err(ResourceError::TooLarge {
            name: name.to_string(),
            len: data.len(),
        });
    }

    log::debug!("read {} bytes of the rom '{}'", data.len(), name);
    Ok(data)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program, stored as a u8 slice on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    pub fn new<D: Into<Box<[u8]>>>(name: &str, data: D) -> Self {
        Rom {
            name: name.to_string(),
            data: data.into(),
        }
    }

    /// Will read the whole file as a rom, the file name becomes the rom name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path).map_err(|_| ResourceError::FileNotFound(display.clone()))?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(display);

        let data = read_rom(&name, file)?;
        Ok(Rom::new(&name, data))
    }

    /// Will read the rom from the given location, either a plain file path or
    /// `archive.zip:NAME` for an entry of a zip archive.
    pub fn open(location: &str) -> Result<Self, ResourceError> {
        match location.rsplit_once(ARCHIVE_SEPARATOR) {
            Some((archive, name)) if archive.ends_with(ARCHIVE_EXTENSION) => {
                RomArchive::open(archive)?.get_file_data(name)
            }
            _ => Rom::from_file(location),
        }
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}
