//! Logical-to-physical pixel mapping for serpentine panel chains.
//!
//! The logical grid is cut into horizontal bands (one per pass of the chain)
//! and vertical thirds (one per sub-panel within a pass). Every band/third
//! cell is a [`Segment`]: an optional mirror on each axis plus the offset of
//! that cell inside the physical scan rectangle. New wiring layouts are new
//! tables, never new code.
//!
//! ```text
//! pikaled preset (192x48 logical -> 64x144 physical), physical row offsets:
//!
//!          third 0    third 1    third 2
//! band 0:  32 (XY)    16         0  (XY)
//! band 1:  48 (XY)    64         80 (XY)
//! band 2:  96 (XY)    112        128 (XY)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mirror flags and physical offset for one band/third cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub mirror_x: bool,
    #[serde(default)]
    pub mirror_y: bool,
    pub offset_x: usize,
    pub offset_y: usize,
}

impl Segment {
    pub const fn straight(offset_x: usize, offset_y: usize) -> Self {
        Self {
            mirror_x: false,
            mirror_y: false,
            offset_x,
            offset_y,
        }
    }

    /// Point-reflected cell: the sub-panel is mounted upside down.
    pub const fn flipped(offset_x: usize, offset_y: usize) -> Self {
        Self {
            mirror_x: true,
            mirror_y: true,
            offset_x,
            offset_y,
        }
    }
}

/// Serialized form of a wiring table, as found in deployment files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WiringTable {
    pub logical: (usize, usize),
    pub physical: (usize, usize),
    /// `segments[band][third]`
    pub segments: Vec<Vec<Segment>>,
}

/// A validated wiring table. Construction guarantees the transform is a
/// bijection from the logical grid onto the physical rectangle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WiringTable", into = "WiringTable")]
pub struct WiringConfig {
    logical_width: usize,
    logical_height: usize,
    physical_width: usize,
    physical_height: usize,
    band_height: usize,
    third_width: usize,
    segments: Vec<Vec<Segment>>,
}

impl WiringConfig {
    pub fn new(
        logical: (usize, usize),
        physical: (usize, usize),
        segments: Vec<Vec<Segment>>,
    ) -> Result<Self> {
        let (logical_width, logical_height) = logical;
        let (physical_width, physical_height) = physical;
        if logical_width == 0 || logical_height == 0 {
            return Err(Error::InvalidWiring("logical grid must not be empty".into()));
        }
        if logical_width * logical_height != physical_width * physical_height {
            return Err(Error::InvalidWiring(format!(
                "logical {}x{} and physical {}x{} differ in pixel count",
                logical_width, logical_height, physical_width, physical_height
            )));
        }

        let bands = segments.len();
        let thirds = segments.first().map_or(0, Vec::len);
        if bands == 0 || thirds == 0 {
            return Err(Error::InvalidWiring("segment table must not be empty".into()));
        }
        if let Some(band) = segments.iter().position(|row| row.len() != thirds) {
            return Err(Error::InvalidWiring(format!(
                "band {} has {} segments, expected {}",
                band,
                segments[band].len(),
                thirds
            )));
        }
        if logical_height % bands != 0 || logical_width % thirds != 0 {
            return Err(Error::InvalidWiring(format!(
                "{}x{} grid does not split into {} bands of {} segments",
                logical_width, logical_height, bands, thirds
            )));
        }

        let config = Self {
            logical_width,
            logical_height,
            physical_width,
            physical_height,
            band_height: logical_height / bands,
            third_width: logical_width / thirds,
            segments,
        };
        config.check_segments_fit()?;
        config.check_bijection()?;
        Ok(config)
    }

    /// The simulator/hardware table for the 3x3 group scoreboard.
    pub fn pikaled() -> Self {
        use Segment as S;
        Self::new(
            (192, 48),
            (64, 144),
            vec![
                vec![S::flipped(0, 32), S::straight(0, 16), S::flipped(0, 0)],
                vec![S::flipped(0, 48), S::straight(0, 64), S::flipped(0, 80)],
                vec![S::flipped(0, 96), S::straight(0, 112), S::flipped(0, 128)],
            ],
        )
        .expect("pikaled wiring preset is a bijection")
    }

    /// Pass-through wiring: one band, one segment, no mirroring.
    pub fn identity(width: usize, height: usize) -> Result<Self> {
        Self::new(
            (width, height),
            (width, height),
            vec![vec![Segment::straight(0, 0)]],
        )
    }

    pub fn logical_size(&self) -> (usize, usize) {
        (self.logical_width, self.logical_height)
    }

    pub fn physical_size(&self) -> (usize, usize) {
        (self.physical_width, self.physical_height)
    }

    /// Map a logical pixel to its physical address in chain-scan order.
    pub fn transform(&self, x: usize, y: usize) -> Result<(usize, usize)> {
        if x >= self.logical_width || y >= self.logical_height {
            return Err(Error::OutOfRange {
                x,
                y,
                width: self.logical_width,
                height: self.logical_height,
            });
        }
        Ok(self.map(x, y))
    }

    fn map(&self, x: usize, y: usize) -> (usize, usize) {
        let band = y / self.band_height;
        let third = x / self.third_width;
        let local_x = x % self.third_width;
        let local_y = y % self.band_height;
        let segment = &self.segments[band][third];

        let physical_x = if segment.mirror_x {
            self.third_width - 1 - local_x
        } else {
            local_x
        };
        let physical_y = if segment.mirror_y {
            self.band_height - 1 - local_y
        } else {
            local_y
        };
        (
            segment.offset_x + physical_x,
            segment.offset_y + physical_y,
        )
    }

    fn check_segments_fit(&self) -> Result<()> {
        for (band, row) in self.segments.iter().enumerate() {
            for (third, segment) in row.iter().enumerate() {
                if segment.offset_x + self.third_width > self.physical_width
                    || segment.offset_y + self.band_height > self.physical_height
                {
                    return Err(Error::InvalidWiring(format!(
                        "segment (band {}, third {}) at ({}, {}) leaves the {}x{} chain",
                        band,
                        third,
                        segment.offset_x,
                        segment.offset_y,
                        self.physical_width,
                        self.physical_height
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_bijection(&self) -> Result<()> {
        let mut seen = vec![false; self.physical_width * self.physical_height];
        for y in 0..self.logical_height {
            for x in 0..self.logical_width {
                let (physical_x, physical_y) = self.map(x, y);
                let slot = &mut seen[physical_y * self.physical_width + physical_x];
                if *slot {
                    return Err(Error::InvalidWiring(format!(
                        "physical pixel ({}, {}) is driven twice (second time from logical ({}, {}))",
                        physical_x, physical_y, x, y
                    )));
                }
                *slot = true;
            }
        }
        // Equal pixel counts plus injectivity already imply coverage.
        debug_assert!(seen.iter().all(|covered| *covered));
        Ok(())
    }
}

impl TryFrom<WiringTable> for WiringConfig {
    type Error = Error;

    fn try_from(table: WiringTable) -> Result<Self> {
        Self::new(table.logical, table.physical, table.segments)
    }
}

impl From<WiringConfig> for WiringTable {
    fn from(config: WiringConfig) -> Self {
        Self {
            logical: (config.logical_width, config.logical_height),
            physical: (config.physical_width, config.physical_height),
            segments: config.segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pikaled_matches_simulator_corners() {
        let wiring = WiringConfig::pikaled();
        assert_eq!(wiring.transform(0, 0).unwrap(), (63, 47));
        assert_eq!(wiring.transform(64, 0).unwrap(), (0, 16));
        assert_eq!(wiring.transform(128, 0).unwrap(), (63, 15));
        assert_eq!(wiring.transform(0, 16).unwrap(), (63, 63));
        assert_eq!(wiring.transform(64, 16).unwrap(), (0, 64));
        assert_eq!(wiring.transform(191, 47).unwrap(), (0, 128));
    }

    #[test]
    fn identity_is_pass_through() {
        let wiring = WiringConfig::identity(4, 3).unwrap();
        assert_eq!(wiring.transform(3, 2).unwrap(), (3, 2));
    }

    #[test]
    fn ragged_table_is_rejected() {
        let result = WiringConfig::new(
            (4, 2),
            (4, 2),
            vec![
                vec![Segment::straight(0, 0), Segment::straight(2, 0)],
                vec![Segment::straight(0, 1)],
            ],
        );
        assert!(matches!(result, Err(Error::InvalidWiring(_))));
    }
}
