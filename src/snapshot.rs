//! Headless output: each committed frame is also written as a PNG preview.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use png::{BitDepth, ColorType, Encoder};

use crate::display::{Display, MemoryDisplay};
use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::renderer::LedRenderer;

/// Render `frame` as LEDs into a PNG file.
///
/// The image is written next to `output_path` and renamed over it, so a
/// viewer polling the file never reads half a frame.
pub fn write_frame_png(
    frame: &FrameBuffer,
    renderer: &LedRenderer,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let output_path = output_path.as_ref();
    let (width, height) = renderer.output_size(frame);
    let mut bytes = vec![0u8; width * height * 4];
    renderer.draw(frame, &mut bytes);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(png_error)?;
        }
    }

    let partial = partial_path(output_path);
    let file = File::create(&partial).map_err(png_error)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(png_error)?;
    writer.write_image_data(&bytes).map_err(png_error)?;
    writer.finish().map_err(png_error)?;
    fs::rename(&partial, output_path).map_err(png_error)?;
    Ok(())
}

fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = output_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    output_path.with_file_name(name)
}

fn png_error(err: impl std::fmt::Display) -> Error {
    Error::Display(format!("png preview: {}", err))
}

pub struct PngDisplay {
    inner: MemoryDisplay,
    renderer: LedRenderer,
    output_path: PathBuf,
}

impl PngDisplay {
    pub fn new(width: usize, height: usize, output_path: impl Into<PathBuf>) -> Self {
        Self {
            inner: MemoryDisplay::new(width, height),
            renderer: LedRenderer::default(),
            output_path: output_path.into(),
        }
    }
}

impl Display for PngDisplay {
    fn size(&self) -> (usize, usize) {
        self.inner.size()
    }

    fn commit(&mut self, frame: FrameBuffer) -> Result<FrameBuffer> {
        let back = self.inner.commit(frame)?;
        write_frame_png(self.inner.front(), &self.renderer, &self.output_path)?;
        Ok(back)
    }

    fn front(&self) -> &FrameBuffer {
        self.inner.front()
    }
}
