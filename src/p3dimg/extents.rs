//! Coalescing of directory extents into logical files.
//!
//! A directory entry maps at most 16 blocks. Larger files get further
//! entries with the same owner, name and type and an increasing extent
//! number (EX). The reported size is every allocated block of every
//! extent, so the last block always counts as full.

use log::{debug, warn};

use super::directory::DirRecord;
use super::error::P3dError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalFile {
    pub owner_code: u8,
    pub name: [u8; 8],      // raw, attribute bits left in place
    pub file_type: [u8; 3],
    pub extent_count: usize,
    pub occupied_blocks: usize,
    pub size_kb: u64,
}

impl LogicalFile {
    pub fn size_bytes(&self, block_size: u32) -> u64 {
        self.occupied_blocks as u64 * block_size as u64
    }
}

/// Files that could be reconstructed, and the groups that couldn't.
#[derive(Debug, Default)]
pub struct Listing {
    pub files: Vec<LogicalFile>,
    pub skipped: Vec<P3dError>,
}

pub fn merge_extents(records: &[DirRecord], block_size: u32) -> Listing {
    let mut live: Vec<&DirRecord> = records.iter().filter(|r| !r.is_deleted()).collect();
    // stable, so equal keys keep their directory order
    live.sort_by_key(|r| r.sort_key());

    let mut listing = Listing::default();
    for group in live.chunk_by(|a, b| a.identity() == b.identity()) {
        let first = group[0];

        if !group.iter().any(|r| r.extent_low == 0) {
            let err = P3dError::MissingPrimaryExtent {
                owner_code: first.owner_code,
                name: printable(&first.name),
                file_type: printable(&first.file_type),
                extents: group.iter().map(|r| r.extent_low).collect(),
            };
            warn!("skipping {}", err);
            listing.skipped.push(err);
            continue;
        }

        let occupied_blocks: usize = group.iter().map(|r| r.occupied_blocks()).sum();
        let size_kb = occupied_blocks as u64 * block_size as u64 / 1024;
        debug!(
            "{}:{}.{} {} extent(s), {} block(s)",
            first.owner_code,
            printable(&first.name),
            printable(&first.file_type),
            group.len(),
            occupied_blocks
        );

        listing.files.push(LogicalFile {
            owner_code: first.owner_code,
            name: first.name,
            file_type: first.file_type,
            extent_count: group.len(),
            occupied_blocks,
            size_kb,
        });
    }

    listing
}

// For diagnostics only, the listing itself writes the raw bytes.
fn printable(field: &[u8]) -> String {
    field
        .iter()
        .map(|b| (b & 0x7F) as char)
        .collect::<String>()
        .trim_end()
        .to_string()
}
