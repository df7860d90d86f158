//! Mapping of track/sector and block addresses to byte offsets in the image.

use super::error::{P3dError, P3dResult};
use super::superblock::{Geometry, Sideness};

// Data in an alternating sides image is stored like this:
// track 0 side 0, track 0 side 1, track 1 side 0, track 1 side 1, ...
// A logical track is one physical track on one side, so the offset is
// linear in the logical track number.

pub fn sector_offset(geometry: &Geometry, track: u32, sector: u32) -> P3dResult<u64> {
    match geometry.sideness.layout() {
        Some(Sideness::DoubleSideAlternating) => {
            let sector_size = geometry.sector_size as u64;
            let track_size = geometry.sectors_per_track as u64 * sector_size;
            Ok(track as u64 * track_size + sector as u64 * sector_size)
        }
        _ => Err(unsupported_layout(geometry, "track/sector")),
    }
}

/// Block addressing isn't implemented for any layout yet.
pub fn block_offset(geometry: &Geometry, block: u16) -> P3dResult<u64> {
    match geometry.sideness.layout() {
        Some(Sideness::DoubleSideAlternating) => Err(P3dError::UnsupportedGeometry(format!(
            "block addressing (block {}) is not implemented",
            block
        ))),
        _ => Err(unsupported_layout(geometry, "block")),
    }
}

fn unsupported_layout(geometry: &Geometry, addressing: &str) -> P3dError {
    let layout = match geometry.sideness.layout() {
        Some(sideness) => sideness.description().to_string(),
        None => format!("unknown sideness {}", geometry.sideness.layout_bits()),
    };
    P3dError::UnsupportedGeometry(format!("{} addressing on '{}' discs", addressing, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::p3dimg::superblock::SidenessByte;
    use proptest::prelude::*;

    fn geometry(sideness: u8) -> Geometry {
        Geometry {
            sector_size: 512,
            block_size: 2048,
            dir_entry_count: 128,
            sectors_per_track: 9,
            reserved_tracks: 1,
            sideness: SidenessByte(sideness),
        }
    }

    #[test]
    fn test_alternating_offsets() {
        let geometry = geometry(0x81);
        assert_eq!(sector_offset(&geometry, 0, 0).unwrap(), 0);
        assert_eq!(sector_offset(&geometry, 0, 3).unwrap(), 3 * 512);
        assert_eq!(sector_offset(&geometry, 1, 0).unwrap(), 9 * 512);
        assert_eq!(sector_offset(&geometry, 159, 8).unwrap(), 159 * 9 * 512 + 8 * 512);
    }

    #[test]
    fn test_other_layouts_are_unsupported() {
        for sideness in [0x00, 0x02, 0x03, 0x80, 0x82, 0x83] {
            let geometry = geometry(sideness);
            assert!(matches!(
                sector_offset(&geometry, 1, 0),
                Err(P3dError::UnsupportedGeometry(_))
            ));
            assert!(matches!(
                block_offset(&geometry, 2),
                Err(P3dError::UnsupportedGeometry(_))
            ));
        }
    }

    #[test]
    fn test_block_addressing_is_unsupported() {
        assert!(matches!(
            block_offset(&geometry(0x81), 2),
            Err(P3dError::UnsupportedGeometry(_))
        ));
    }

    proptest! {
        #[test]
        fn sector_offset_is_deterministic(
            track in 0u32..256,
            sector in 0u32..256,
            sectors_per_track in 1u8..=255,
            log_sector_size in 0u32..=9,
        ) {
            let mut geometry = geometry(0x01);
            geometry.sectors_per_track = sectors_per_track;
            geometry.sector_size = 128 << log_sector_size;

            let first = sector_offset(&geometry, track, sector).unwrap();
            let second = sector_offset(&geometry, track, sector).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn non_alternating_never_resolves(sideness in any::<u8>(), track in 0u32..256, block in any::<u16>()) {
            prop_assume!(sideness & 0x03 != 1);
            let geometry = geometry(sideness);
            prop_assert!(sector_offset(&geometry, track, 0).is_err());
            prop_assert!(block_offset(&geometry, block).is_err());
        }
    }
}
