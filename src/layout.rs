//! Participant/arrow slots to logical grid placements.
//!
//! Slots are data: each participant slot names a cell row, the cell column
//! where its arrow group starts, and whether the group faces the far side of
//! the shooting line. Far-facing groups are drawn point-reflected and count
//! their arrows right to left, so both sides converge on the line.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Where one arrow result is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub anchor_x: usize,
    pub anchor_y: usize,
    pub rotated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPlacement {
    pub row: usize,
    pub column: usize,
    #[serde(default)]
    pub rotated: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub cell_width: usize,
    pub cell_height: usize,
    pub arrows: usize,
    pub slots: Vec<SlotPlacement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutSpec", into = "LayoutSpec")]
pub struct LayoutTable {
    cell_width: usize,
    cell_height: usize,
    arrows: usize,
    slots: Vec<SlotPlacement>,
}

impl LayoutTable {
    pub fn new(
        cell_size: (usize, usize),
        arrows: usize,
        slots: Vec<SlotPlacement>,
    ) -> Result<Self> {
        let (cell_width, cell_height) = cell_size;
        if cell_width == 0 || cell_height == 0 {
            return Err(Error::InvalidLayout("cells must not be empty".into()));
        }
        if arrows == 0 {
            return Err(Error::InvalidLayout("at least one arrow per participant".into()));
        }
        if slots.is_empty() {
            return Err(Error::InvalidLayout("at least one participant slot".into()));
        }
        Ok(Self {
            cell_width,
            cell_height,
            arrows,
            slots,
        })
    }

    /// Nine shooters in three rows; the middle group of each row faces the
    /// viewer, the outer groups face across the line.
    pub fn pikaled() -> Self {
        let slot = |row, column, rotated| SlotPlacement {
            row,
            column,
            rotated,
        };
        Self::new(
            (16, 16),
            4,
            vec![
                slot(0, 8, true),
                slot(0, 4, false),
                slot(0, 0, true),
                slot(1, 0, true),
                slot(1, 4, false),
                slot(1, 8, true),
                slot(2, 0, true),
                slot(2, 4, false),
                slot(2, 8, true),
            ],
        )
        .expect("pikaled layout preset is well formed")
    }

    /// Number of participant slots in a tachi.
    pub fn tachi_size(&self) -> usize {
        self.slots.len()
    }

    pub fn arrows(&self) -> usize {
        self.arrows
    }

    pub fn cell_size(&self) -> (usize, usize) {
        (self.cell_width, self.cell_height)
    }

    pub fn placement(&self, participant: usize, arrow: usize) -> Result<Placement> {
        let slot = self
            .slots
            .get(participant)
            .filter(|_| arrow < self.arrows)
            .ok_or(Error::InvalidSlot { participant, arrow })?;

        let column = if slot.rotated {
            slot.column + (self.arrows - 1 - arrow)
        } else {
            slot.column + arrow
        };
        Ok(Placement {
            anchor_x: column * self.cell_width,
            anchor_y: slot.row * self.cell_height,
            rotated: slot.rotated,
        })
    }

    /// Check every placement footprint lies inside a `width` x `height` grid
    /// and no two placements share a cell.
    pub fn check_fits(&self, width: usize, height: usize) -> Result<()> {
        let mut taken = Vec::with_capacity(self.slots.len() * self.arrows);
        for participant in 0..self.slots.len() {
            for arrow in 0..self.arrows {
                let placement = self.placement(participant, arrow)?;
                if placement.anchor_x + self.cell_width > width
                    || placement.anchor_y + self.cell_height > height
                {
                    return Err(Error::InvalidLayout(format!(
                        "participant {} arrow {} at ({}, {}) leaves the {}x{} grid",
                        participant, arrow, placement.anchor_x, placement.anchor_y, width, height
                    )));
                }
                let anchor = (placement.anchor_x, placement.anchor_y);
                if taken.contains(&anchor) {
                    return Err(Error::InvalidLayout(format!(
                        "participant {} arrow {} overlaps another slot at ({}, {})",
                        participant, arrow, anchor.0, anchor.1
                    )));
                }
                taken.push(anchor);
            }
        }
        Ok(())
    }
}

impl TryFrom<LayoutSpec> for LayoutTable {
    type Error = Error;

    fn try_from(spec: LayoutSpec) -> Result<Self> {
        Self::new((spec.cell_width, spec.cell_height), spec.arrows, spec.slots)
    }
}

impl From<LayoutTable> for LayoutSpec {
    fn from(table: LayoutTable) -> Self {
        Self {
            cell_width: table.cell_width,
            cell_height: table.cell_height,
            arrows: table.arrows,
            slots: table.slots,
        }
    }
}
