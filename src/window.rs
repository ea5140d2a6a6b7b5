use std::mem;
use std::process;
use std::time::{Duration, Instant};

use log::{error, trace};
use pixels::{Pixels, SurfaceTexture};
use pikaled::cycle::UpdateCycle;
use pikaled::display::{check_size, Display};
use pikaled::frame::FrameBuffer;
use pikaled::renderer::LedRenderer;
use pikaled::{Error, Result};
use winit::{
    dpi::LogicalSize,
    event::{Event, StartCause, VirtualKeyCode},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};
use winit_input_helper::WinitInputHelper;

use crate::EXIT_FATAL;

/// Simulator window showing the chains as they are wired.
pub struct WindowDisplay {
    window: Window,
    pixels: Pixels,
    renderer: LedRenderer,
    front: FrameBuffer,
}

impl WindowDisplay {
    fn new(event_loop: &EventLoop<()>, width: usize, height: usize) -> Result<Self> {
        let renderer = LedRenderer::default();
        let front = FrameBuffer::new(width, height);
        let (output_width, output_height) = renderer.output_size(&front);
        let size = LogicalSize::new(output_width as u32, output_height as u32);
        let window = WindowBuilder::new()
            .with_title("pikaled")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(event_loop)
            .map_err(|err| Error::Display(err.to_string()))?;

        let pixels = {
            let window_size = window.inner_size();
            let surface_texture =
                SurfaceTexture::new(window_size.width, window_size.height, &window);
            Pixels::new(output_width as u32, output_height as u32, surface_texture)
                .map_err(|err| Error::Display(err.to_string()))?
        };

        Ok(Self {
            window,
            pixels,
            renderer,
            front,
        })
    }

    fn present(&mut self) -> Result<()> {
        self.pixels
            .render()
            .map_err(|err| Error::Display(format!("pixels.render() failed: {}", err)))
    }
}

impl Display for WindowDisplay {
    fn size(&self) -> (usize, usize) {
        self.front.size()
    }

    fn commit(&mut self, frame: FrameBuffer) -> Result<FrameBuffer> {
        check_size(self.size(), &frame)?;
        self.renderer.draw(&frame, self.pixels.get_frame());
        self.window.request_redraw();
        Ok(mem::replace(&mut self.front, frame))
    }

    fn front(&self) -> &FrameBuffer {
        &self.front
    }
}

/// Drive `cycle` from the window's event loop until the window closes.
pub fn run(mut cycle: UpdateCycle, interval: Duration) -> Result<()> {
    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let (width, height) = cycle.board().wiring().physical_size();
    let mut display = WindowDisplay::new(&event_loop, width, height)?;

    event_loop.run(move |event, _, control_flow| {
        match &event {
            Event::NewEvents(StartCause::Init)
            | Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                match cycle.run_once(&mut display) {
                    Ok(outcome) => trace!("committed: {:?}", outcome),
                    Err(err) => {
                        error!("{}", err);
                        process::exit(EXIT_FATAL);
                    }
                }
                *control_flow = match Instant::now().checked_add(interval) {
                    Some(deadline) => ControlFlow::WaitUntil(deadline),
                    None => ControlFlow::Wait,
                };
            }
            Event::RedrawRequested(_) => {
                if let Err(err) = display.present() {
                    error!("{}", err);
                    process::exit(EXIT_FATAL);
                }
            }
            _ => {}
        }

        if input.update(&event) {
            // Close events
            if input.key_pressed(VirtualKeyCode::Escape) || input.quit() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            if let Some(size) = input.window_resized() {
                display.pixels.resize_surface(size.width, size.height);
            }
        }
    })
}
