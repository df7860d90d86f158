use std::io::{Cursor, Read, Seek, SeekFrom};

use binrw::{BinRead, binrw};
use log::debug;

use super::error::P3dResult;
use super::superblock::Geometry;
use super::{DIRENTRY_SIZE, read_region};

/// Owner code of an empty or deleted directory entry.
pub const DELETED: u8 = 0xE5;

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirRecord {
    pub owner_code: u8,       // UU
    pub name: [u8; 8],        // F1..F8
    pub file_type: [u8; 3],   // T1..T3, MSB used as attribute flags
    pub extent_low: u8,       // EX
    pub reserved1: u8,        // S1
    pub reserved2: u8,        // S2
    pub record_count: u8,     // RC
    pub block_pointers: [u8; 16], // AL
}

impl DirRecord {
    pub fn is_deleted(&self) -> bool {
        self.owner_code == DELETED
    }

    /// Number of allocated blocks in this extent.
    pub fn occupied_blocks(&self) -> usize {
        self.block_pointers.iter().filter(|&&block| block != 0).count()
    }

    pub fn identity(&self) -> (u8, [u8; 8], [u8; 3]) {
        (self.owner_code, self.name, self.file_type)
    }

    pub fn sort_key(&self) -> (u8, [u8; 8], [u8; 3], u8) {
        (self.owner_code, self.name, self.file_type, self.extent_low)
    }
}

pub fn read_directory<R: Read + Seek>(disk: &mut R, geometry: &Geometry) -> P3dResult<Vec<DirRecord>> {
    let offset = geometry.directory_offset()?;
    debug!(
        "Number of directory entries: {} at offset {:#x}",
        geometry.dir_entry_count, offset
    );

    disk.seek(SeekFrom::Start(offset))?;
    let buffer = read_region(disk, "directory", offset, geometry.directory_len())?;

    let mut catalog = Vec::with_capacity(geometry.dir_entry_count as usize);
    for entry in buffer.chunks_exact(DIRENTRY_SIZE) {
        catalog.push(DirRecord::read(&mut Cursor::new(entry))?);
    }

    Ok(catalog)
}
