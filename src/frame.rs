use crate::error::{Error, Result};
use crate::icons::{Icon, Rgba, BLACK};
use crate::layout::Placement;
use crate::wiring::WiringConfig;

/// Off-screen pixel surface in physical (chain-scan) coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row-major physical pixels.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, color: Rgba) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.pixels[y * self.width + x] = color;
        Ok(())
    }

    /// Read back the pixel a logical address lands on.
    pub fn logical(&self, wiring: &WiringConfig, x: usize, y: usize) -> Result<Rgba> {
        let (physical_x, physical_y) = wiring.transform(x, y)?;
        self.get(physical_x, physical_y).ok_or(Error::OutOfRange {
            x: physical_x,
            y: physical_y,
            width: self.width,
            height: self.height,
        })
    }
}

/// Draw `icon` at `placement`, point-reflected when the placement is rotated.
///
/// The whole footprint is checked before the first write, so an icon that
/// would leave the grid fails without touching the buffer.
pub fn draw(
    frame: &mut FrameBuffer,
    wiring: &WiringConfig,
    icon: &Icon,
    placement: &Placement,
) -> Result<()> {
    let (width, height) = wiring.logical_size();
    let right = placement.anchor_x + icon.width();
    let bottom = placement.anchor_y + icon.height();
    if right > width || bottom > height {
        return Err(Error::OutOfRange {
            x: right - 1,
            y: bottom - 1,
            width,
            height,
        });
    }
    if frame.size() != wiring.physical_size() {
        let (frame_width, frame_height) = frame.size();
        let (physical_width, physical_height) = wiring.physical_size();
        return Err(Error::Display(format!(
            "{}x{} frame does not match the {}x{} chain",
            frame_width, frame_height, physical_width, physical_height
        )));
    }

    let last_x = icon.width() - 1;
    let last_y = icon.height() - 1;
    for iy in 0..icon.height() {
        for ix in 0..icon.width() {
            let color = if placement.rotated {
                icon.pixel(last_x - ix, last_y - iy)
            } else {
                icon.pixel(ix, iy)
            };
            let (x, y) = wiring.transform(placement.anchor_x + ix, placement.anchor_y + iy)?;
            frame.set(x, y, color)?;
        }
    }
    Ok(())
}
