use crate::frame::FrameBuffer;
use crate::icons::Rgba;

const GAP: Rgba = [0x10, 0x10, 0x10, 0xFF];

/// Paints a physical frame as a grid of LEDs with a dark gap between them.
#[derive(Clone, Copy, Debug)]
pub struct LedRenderer {
    pub led_size: usize,
    pub gap: usize,
}

impl Default for LedRenderer {
    fn default() -> Self {
        Self {
            led_size: 5,
            gap: 2,
        }
    }
}

impl LedRenderer {
    pub fn output_size(&self, frame: &FrameBuffer) -> (usize, usize) {
        let (width, height) = frame.size();
        (width * self.led_size, height * self.led_size)
    }

    /// `output_frame` is RGBA, sized by [`Self::output_size`].
    pub fn draw(&self, frame: &FrameBuffer, output_frame: &mut [u8]) {
        let (output_width, _) = self.output_size(frame);
        let lit = self.led_size.saturating_sub(self.gap);
        for (i, pixel) in output_frame.chunks_exact_mut(4).enumerate() {
            let x = i % output_width;
            let y = i / output_width;
            let color = if x % self.led_size < lit && y % self.led_size < lit {
                frame
                    .get(x / self.led_size, y / self.led_size)
                    .unwrap_or(GAP)
            } else {
                GAP
            };
            pixel.copy_from_slice(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::WHITE;

    #[test]
    fn leds_are_separated_by_gap() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.set(1, 0, WHITE).unwrap();
        let renderer = LedRenderer { led_size: 3, gap: 1 };
        let (width, height) = renderer.output_size(&frame);
        let mut output = vec![0u8; width * height * 4];
        renderer.draw(&frame, &mut output);

        let at = |x: usize, y: usize| -> [u8; 4] {
            let i = (y * width + x) * 4;
            [output[i], output[i + 1], output[i + 2], output[i + 3]]
        };
        assert_eq!(at(3, 0), WHITE);
        assert_eq!(at(4, 1), WHITE);
        assert_eq!(at(5, 0), GAP);
        assert_eq!(at(0, 2), GAP);
    }
}
