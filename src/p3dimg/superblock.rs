//! Boot sector ("superblock") decoding and the geometry derived from it.
//!
//! +3DOS and PCW discs carry their format description in the first 16
//! bytes of track 0, sector 0:
//!
//! - Byte 0: Disk type
//! - Byte 1: Sideness (bits 0-1 layout, bit 7 double track)
//! - Byte 2: Tracks per side
//! - Byte 3: Sectors per track
//! - Byte 4: log2(sector size) - 7
//! - Byte 5: Reserved tracks
//! - Byte 6: log2(block size) - 7
//! - Byte 7: Directory blocks
//! - Byte 8: Gap length read/write
//! - Byte 9: Gap length format
//! - Bytes 10-14: Reserved
//! - Byte 15: Checksum fiddle byte

use std::io::{Cursor, Read};

use binrw::{BinRead, BinWrite, binrw};
use num_enum::TryFromPrimitive;

use super::error::{P3dError, P3dResult};
use super::{DIRENTRY_SIZE, read_region};

pub const SUPERBLOCK_SIZE: usize = 16;

// 128 << 9 = 64KB, nothing on a floppy comes close
const MAX_LOG_SIZE: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum DiskType {
    StandardPlus3Dos = 0,
    StandardSystem = 1,
    StandardDataOnly = 2,
    PcwDdDsDt = 3,
}

impl DiskType {
    pub fn description(self) -> &'static str {
        match self {
            DiskType::StandardPlus3Dos => "Standard +3DOS",
            DiskType::StandardSystem => "Standard System format",
            DiskType::StandardDataOnly => "Standard Data only",
            DiskType::PcwDdDsDt => "PCW DD.DS.DT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Sideness {
    SingleSide = 0,
    DoubleSideAlternating = 1,
    DoubleSideSuccessive = 2,
}

impl Sideness {
    pub fn description(self) -> &'static str {
        match self {
            Sideness::SingleSide => "Single side",
            Sideness::DoubleSideAlternating => "Double side, alternative sides",
            Sideness::DoubleSideSuccessive => "Double side, successive sides",
        }
    }
}

/// The packed sideness byte as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
pub struct SidenessByte(pub u8);

impl SidenessByte {
    #[inline] pub fn layout_bits(self) -> u8 {
        self.0 & 0x03
    }

    /// `None` for the undefined layout value 3.
    #[inline] pub fn layout(self) -> Option<Sideness> {
        Sideness::try_from(self.layout_bits()).ok()
    }

    #[inline] pub fn double_track(self) -> bool {
        self.0 & 0x80 != 0
    }
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Superblock {
    pub disk_type: u8,
    pub sideness: SidenessByte,
    pub tracks_per_side: u8,
    pub sectors_per_track: u8,
    pub log_sector_size: u8,
    pub reserved_tracks: u8,
    pub log_block_size: u8,
    pub directory_blocks: u8,
    pub gap_read_write: u8,
    pub gap_format: u8,
    pub reserved: [u8; 5],
    pub checksum: u8,
}

impl Superblock {
    /// `None` when the type byte is outside the known formats.
    pub fn disk_type(&self) -> Option<DiskType> {
        DiskType::try_from(self.disk_type).ok()
    }
}

/// Sizes derived from the superblock, shared by every later stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub sector_size: u32,
    pub block_size: u32,
    pub dir_entry_count: u32,
    pub sectors_per_track: u8,
    pub reserved_tracks: u8,
    pub sideness: SidenessByte,
}

impl Geometry {
    pub fn from_superblock(superblock: &Superblock) -> P3dResult<Self> {
        let sector_size = size_from_log("sector", superblock.log_sector_size)?;
        let block_size = size_from_log("block", superblock.log_block_size)?;

        let directory_bytes = block_size * superblock.directory_blocks as u32;
        if directory_bytes % DIRENTRY_SIZE as u32 != 0 {
            return Err(P3dError::MalformedGeometry(format!(
                "{} directory blocks of {} bytes don't hold a whole number of {} byte entries",
                superblock.directory_blocks, block_size, DIRENTRY_SIZE
            )));
        }

        Ok(Geometry {
            sector_size,
            block_size,
            dir_entry_count: directory_bytes / DIRENTRY_SIZE as u32,
            sectors_per_track: superblock.sectors_per_track,
            reserved_tracks: superblock.reserved_tracks,
            sideness: superblock.sideness,
        })
    }

    pub fn directory_len(&self) -> usize {
        self.dir_entry_count as usize * DIRENTRY_SIZE
    }

    /// The directory starts at sector 0 of the first track after the reserved ones.
    pub fn directory_offset(&self) -> P3dResult<u64> {
        super::position::sector_offset(self, self.reserved_tracks as u32, 0)
    }
}

fn size_from_log(what: &str, log_size: u8) -> P3dResult<u32> {
    if log_size > MAX_LOG_SIZE {
        return Err(P3dError::MalformedGeometry(format!(
            "{} size exponent {} exceeds {} ({} bytes)",
            what,
            log_size,
            MAX_LOG_SIZE,
            128u32 << MAX_LOG_SIZE
        )));
    }
    Ok(128u32 << log_size)
}

pub fn read_superblock<R: Read>(disk: &mut R) -> P3dResult<Superblock> {
    let buf = read_region(disk, "boot sector", 0, SUPERBLOCK_SIZE)?;
    let superblock = Superblock::read(&mut Cursor::new(buf))?;
    Ok(superblock)
}
