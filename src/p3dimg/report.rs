use std::io::{self, Write};

use super::extents::LogicalFile;
use super::superblock::{Geometry, Superblock};

/// Print informations found in the boot sector
pub fn render_summary<W: Write>(out: &mut W, superblock: &Superblock, geometry: &Geometry) -> io::Result<()> {
    writeln!(out)?;
    match superblock.disk_type() {
        Some(disk_type) => writeln!(out, "DISKTYPE: {}", disk_type.description())?,
        None => writeln!(out, "DISKTYPE: Unknown ({})", superblock.disk_type)?,
    }

    match superblock.sideness.layout() {
        Some(sideness) => write!(out, "{}", sideness.description())?,
        None => write!(out, "Unknown sideness ({})", superblock.sideness.layout_bits())?,
    }
    if superblock.sideness.double_track() {
        writeln!(out, ", Double track")?;
    } else {
        writeln!(out)?;
    }

    writeln!(out, "Number of tracks per side {}", superblock.tracks_per_side)?;
    writeln!(out, "Number of sectors per track {}", superblock.sectors_per_track)?;
    writeln!(out, "Number of reserved track {}", superblock.reserved_tracks)?;
    writeln!(out, "Number of directory blocks {}", superblock.directory_blocks)?;
    writeln!(out, "Gap length Read/Write {}", superblock.gap_read_write)?;
    writeln!(out, "Gap length Format {}", superblock.gap_format)?;
    writeln!(out, "Sector Size {} bytes", geometry.sector_size)?;
    writeln!(out, "Block Size {} bytes", geometry.block_size)?;
    writeln!(out)?;
    writeln!(out, "Number of directory entries: {}", geometry.dir_entry_count)?;

    Ok(())
}

/// One line per file: `owner: NAME    .TYP size KB`, name bytes as stored.
pub fn render_listing<W: Write>(out: &mut W, files: &[LogicalFile]) -> io::Result<()> {
    for file in files {
        write!(out, "{}: ", file.owner_code)?;
        out.write_all(&file.name)?;
        out.write_all(b".")?;
        out.write_all(&file.file_type)?;
        writeln!(out, " {} KB", file.size_kb)?;
    }
    out.flush()
}
