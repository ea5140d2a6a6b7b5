use log::trace;

use crate::error::{Error, Result};
use crate::frame::{draw, FrameBuffer};
use crate::icons::IconSet;
use crate::layout::LayoutTable;
use crate::scoreboard::{Participant, ResultStatus, Scoreboard};
use crate::wiring::WiringConfig;

/// Everything needed to turn a scoreboard into a physical frame.
pub struct Board {
    wiring: WiringConfig,
    layout: LayoutTable,
    icons: IconSet,
}

impl Board {
    pub fn new(wiring: WiringConfig, layout: LayoutTable) -> Result<Self> {
        let (cell_width, cell_height) = layout.cell_size();
        if cell_width != cell_height {
            return Err(Error::InvalidLayout(format!(
                "icons are square, cells are {}x{}",
                cell_width, cell_height
            )));
        }
        let (width, height) = wiring.logical_size();
        layout.check_fits(width, height)?;
        Ok(Self {
            wiring,
            layout,
            icons: IconSet::new(cell_width),
        })
    }

    pub fn wiring(&self) -> &WiringConfig {
        &self.wiring
    }

    pub fn layout(&self) -> &LayoutTable {
        &self.layout
    }

    pub fn icons(&self) -> &IconSet {
        &self.icons
    }

    pub fn tachi_size(&self) -> usize {
        self.layout.tachi_size()
    }

    pub fn new_frame(&self) -> FrameBuffer {
        let (width, height) = self.wiring.physical_size();
        FrameBuffer::new(width, height)
    }

    /// Draw one arrow result.
    pub fn draw_result(
        &self,
        frame: &mut FrameBuffer,
        participant: usize,
        arrow: usize,
        status: ResultStatus,
        is_final: bool,
    ) -> Result<()> {
        let placement = self.layout.placement(participant, arrow)?;
        trace!(
            "participant {} arrow {}: {:?} (final: {}) at {:?}",
            participant,
            arrow,
            status,
            is_final,
            placement
        );
        let icon = self.icons.select(status, is_final);
        draw(frame, &self.wiring, icon, &placement)
    }

    /// Redraw the whole board. Slots without a participant, and arrows
    /// without a result, are drawn blank; no scoreboard blanks everything.
    pub fn render(&self, frame: &mut FrameBuffer, scoreboard: Option<&Scoreboard>) -> Result<()> {
        frame.clear();
        let participants = scoreboard.map_or(&[][..], Scoreboard::participants);
        for slot in 0..self.tachi_size() {
            let results = participants.get(slot).map_or(&[][..], Participant::results);
            for arrow in 0..self.layout.arrows() {
                let (status, is_final) = match results.get(arrow) {
                    Some(result) => (result.status()?, result.is_final),
                    None => (ResultStatus::Absent, false),
                };
                self.draw_result(frame, slot, arrow, status, is_final)?;
            }
        }
        Ok(())
    }
}
