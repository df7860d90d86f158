//! Read-only inspection of +3DOS / PCW disc images.
//!
//! The pipeline is: boot sector -> geometry -> directory -> extents -> report.
//! Only "double side, alternative sides" images (PCW DD.DS.DT) can be
//! addressed; everything else stops with `UnsupportedGeometry`.

mod error;

pub mod directory;
pub mod extents;
pub mod position;
pub mod report;
pub mod superblock;

use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

use log::info;

pub use directory::{DirRecord, read_directory};
pub use error::{P3dError, P3dResult};
pub use extents::{Listing, LogicalFile, merge_extents};
pub use superblock::{DiskType, Geometry, Sideness, Superblock, read_superblock};

pub const DIRENTRY_SIZE: usize = 32;

/// Everything read from one image.
#[derive(Debug)]
pub struct Inspection {
    pub superblock: Superblock,
    pub geometry: Geometry,
    pub listing: Listing,
}

/// Read exactly `needed` bytes, or report how many there were.
pub(crate) fn read_region<R: Read>(disk: &mut R, what: &'static str, offset: u64, needed: usize) -> P3dResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(needed);
    disk.by_ref().take(needed as u64).read_to_end(&mut buf)?;
    if buf.len() < needed {
        return Err(P3dError::TruncatedImage {
            what,
            offset,
            needed,
            available: buf.len(),
        });
    }
    Ok(buf)
}

pub fn inspect<R: Read + Seek>(disk: &mut R) -> P3dResult<Inspection> {
    let superblock = read_superblock(disk)?;
    let geometry = Geometry::from_superblock(&superblock)?;
    let catalog = read_directory(disk, &geometry)?;
    let listing = merge_extents(&catalog, geometry.block_size);

    Ok(Inspection {
        superblock,
        geometry,
        listing,
    })
}

pub fn inspect_image<P: AsRef<Path>>(image_path: P) -> P3dResult<Inspection> {
    let image_path = image_path.as_ref();
    let mut disk = File::open(image_path).map_err(|source| P3dError::OpenFailure {
        path: image_path.to_path_buf(),
        source,
    })?;
    info!("Reading image '{}'", image_path.display());
    inspect(&mut disk)
}

/// Boot sector summary to stderr, one line per file to stdout.
pub fn list_directory<P: AsRef<Path>>(image_path: P) -> P3dResult<()> {
    let inspection = inspect_image(image_path)?;

    report::render_summary(&mut io::stderr().lock(), &inspection.superblock, &inspection.geometry)?;
    report::render_listing(&mut io::stdout().lock(), &inspection.listing.files)?;

    if !inspection.listing.skipped.is_empty() {
        info!(
            "{} file(s) listed, {} skipped",
            inspection.listing.files.len(),
            inspection.listing.skipped.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::p3dimg::directory::DELETED;
    use crate::p3dimg::directory::tests::record;
    use crate::p3dimg::superblock::SidenessByte;
    use crate::p3dimg::superblock::tests::pcw_superblock;
    use binrw::BinWrite;
    use std::io::{Cursor, SeekFrom};

    fn build_image(superblock: &Superblock, records: &[DirRecord]) -> Vec<u8> {
        let geometry = Geometry::from_superblock(superblock).unwrap();
        let mut cursor = Cursor::new(Vec::new());
        superblock.write(&mut cursor).unwrap();

        let offset = geometry.directory_offset().unwrap();
        cursor.seek(SeekFrom::Start(offset)).unwrap();
        for idx in 0..geometry.dir_entry_count as usize {
            match records.get(idx) {
                Some(entry) => entry.write(&mut cursor).unwrap(),
                None => record(DELETED, "", "", 0, &[]).write(&mut cursor).unwrap(),
            }
        }
        cursor.into_inner()
    }

    #[test]
    fn test_inspect() {
        let records = vec![
            record(0, "PROFILE", "SUB", 0, &[2]),
            record(0, "BASIC", "COM", 1, &[9, 10, 11]),
            record(DELETED, "OLD", "TXT", 0, &[20, 21]),
            record(0, "BASIC", "COM", 0, &[3, 4, 5, 6, 7, 8, 12, 13]),
        ];
        let mut disk = Cursor::new(build_image(&pcw_superblock(), &records));

        let inspection = inspect(&mut disk).unwrap();
        assert_eq!(inspection.geometry.dir_entry_count, 128);
        let sizes: Vec<(&[u8; 8], u64)> = inspection
            .listing
            .files
            .iter()
            .map(|f| (&f.name, f.size_kb))
            .collect();
        assert_eq!(sizes, vec![(b"BASIC   ", 22), (b"PROFILE ", 2)]);
    }

    #[test]
    fn test_inspect_truncated_directory() {
        let mut image = build_image(&pcw_superblock(), &[]);
        image.truncate(image.len() - 1);

        assert!(matches!(
            inspect(&mut Cursor::new(image)),
            Err(P3dError::TruncatedImage { what: "directory", .. })
        ));
    }

    #[test]
    fn test_inspect_single_sided() {
        let mut superblock = pcw_superblock();
        superblock.sideness = SidenessByte(0x00);
        let mut image = vec![0u8; 16];
        superblock.write(&mut Cursor::new(&mut image[..])).unwrap();

        assert!(matches!(
            inspect(&mut Cursor::new(image)),
            Err(P3dError::UnsupportedGeometry(_))
        ));
    }

    #[test]
    fn test_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = inspect_image(dir.path().join("missing.dsk")).unwrap_err();
        assert!(matches!(err, P3dError::OpenFailure { .. }));
    }
}
