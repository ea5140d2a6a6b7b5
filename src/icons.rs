//! Fixed-size result icons, rasterised once at startup.
//!
//! Each icon is an `embedded-graphics` draw target, so the shapes are plain
//! primitives and a font glyph drawn over a background fill.

use std::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_9X15_BOLD, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::scoreboard::ResultStatus;

pub type Rgba = [u8; 4];

pub const BLACK: Rgba = [0x00, 0x00, 0x00, 0xFF];
pub const WHITE: Rgba = [0xFF, 0xFF, 0xFF, 0xFF];
pub const FINAL_HIT_BACKGROUND: Rgba = [0x00, 0x50, 0x00, 0xFF];
pub const FINAL_MISS_BACKGROUND: Rgba = [0x50, 0x00, 0x00, 0xFF];

const STROKE_WIDTH: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Icon {
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        Self::from_fn(width, height, |_, _| color)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Caller keeps `x < width` and `y < height`.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.width + x]
    }
}

impl OriginDimensions for Icon {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Icon {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(coord.x), usize::try_from(coord.y)) else {
                continue;
            };
            if x < self.width && y < self.height {
                self.pixels[y * self.width + x] = [color.r(), color.g(), color.b(), 0xFF];
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct IconSet {
    pub blank: Icon,
    pub hit: Icon,
    pub final_hit: Icon,
    pub miss: Icon,
    pub final_miss: Icon,
    pub unknown: Icon,
}

impl IconSet {
    pub fn new(size: usize) -> Self {
        Self {
            blank: Icon::filled(size, size, BLACK),
            hit: ring(size, BLACK),
            final_hit: ring(size, FINAL_HIT_BACKGROUND),
            miss: cross(size, BLACK),
            final_miss: cross(size, FINAL_MISS_BACKGROUND),
            unknown: question_mark(size),
        }
    }

    pub fn select(&self, status: ResultStatus, is_final: bool) -> &Icon {
        match (status, is_final) {
            (ResultStatus::Absent, _) => &self.blank,
            (ResultStatus::Unknown, _) => &self.unknown,
            (ResultStatus::Hit, false) => &self.hit,
            (ResultStatus::Hit, true) => &self.final_hit,
            (ResultStatus::Miss, false) => &self.miss,
            (ResultStatus::Miss, true) => &self.final_miss,
        }
    }
}

fn paint<D>(icon: &mut Icon, drawable: &D)
where
    D: Drawable<Color = Rgb888>,
{
    match drawable.draw(icon) {
        Ok(_) => {}
        Err(never) => match never {},
    }
}

fn ring(size: usize, background: Rgba) -> Icon {
    let mut icon = Icon::filled(size, size, background);
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(Rgb888::WHITE)
        .stroke_width(STROKE_WIDTH)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    paint(
        &mut icon,
        &Circle::new(Point::zero(), size as u32).into_styled(style),
    );
    icon
}

fn cross(size: usize, background: Rgba) -> Icon {
    let mut icon = Icon::filled(size, size, background);
    let style = PrimitiveStyle::with_stroke(Rgb888::WHITE, STROKE_WIDTH);
    // Keep the stroke ends off the border so the background frames the X.
    let near = 2;
    let far = size as i32 - 3;
    paint(
        &mut icon,
        &Line::new(Point::new(near, near), Point::new(far, far)).into_styled(style),
    );
    paint(
        &mut icon,
        &Line::new(Point::new(near, far), Point::new(far, near)).into_styled(style),
    );
    icon
}

fn question_mark(size: usize) -> Icon {
    let mut icon = Icon::filled(size, size, BLACK);
    let center = Point::new(size as i32 / 2, size as i32 / 2);
    let character_style = MonoTextStyle::new(&FONT_9X15_BOLD, Rgb888::WHITE);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    paint(
        &mut icon,
        &Text::with_text_style("?", center, character_style, text_style),
    );
    icon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(icon: &Icon) -> Vec<(usize, usize)> {
        let mut lit = Vec::new();
        for y in 0..icon.height() {
            for x in 0..icon.width() {
                if icon.pixel(x, y) == WHITE {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn icons_are_square_and_distinct() {
        let icons = IconSet::new(16);
        let all = [
            &icons.blank,
            &icons.hit,
            &icons.final_hit,
            &icons.miss,
            &icons.final_miss,
            &icons.unknown,
        ];
        for (i, a) in all.iter().enumerate() {
            assert_eq!((a.width(), a.height()), (16, 16));
            for b in all.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn final_hit_differs_only_in_background() {
        let icons = IconSet::new(16);
        assert_eq!(icons.hit.pixel(0, 0), BLACK);
        assert_eq!(icons.final_hit.pixel(0, 0), FINAL_HIT_BACKGROUND);
        assert!(!lit(&icons.hit).is_empty());
        assert_eq!(lit(&icons.hit), lit(&icons.final_hit));
    }

    #[test]
    fn ring_is_hollow_and_cross_crosses_the_center() {
        let icons = IconSet::new(16);
        assert_ne!(icons.hit.pixel(8, 8), WHITE);
        assert_eq!(icons.miss.pixel(8, 8), WHITE);
        assert_eq!(icons.miss.pixel(0, 0), BLACK);
        assert_eq!(icons.final_miss.pixel(0, 0), FINAL_MISS_BACKGROUND);
        assert_eq!(lit(&icons.miss), lit(&icons.final_miss));
    }

    #[test]
    fn question_mark_is_drawn_and_not_point_symmetric() {
        let icon = IconSet::new(16).unknown;
        assert!(!lit(&icon).is_empty());
        let reflected = Icon::from_fn(16, 16, |x, y| icon.pixel(15 - x, 15 - y));
        assert_ne!(icon, reflected);
    }

    #[test]
    fn drawing_off_the_icon_is_clipped() {
        let mut icon = Icon::filled(4, 4, BLACK);
        paint(
            &mut icon,
            &Line::new(Point::new(-2, 1), Point::new(6, 1))
                .into_styled(PrimitiveStyle::with_stroke(Rgb888::WHITE, 1)),
        );
        assert_eq!(lit(&icon), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }
}
