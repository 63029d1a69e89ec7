//! Test doubles for the display path.
//!
//! `TestCanvas` records every [`Canvas`] call and also rasterizes it into a
//! plain frame buffer, so tests can check either the command stream or the
//! resulting pixels. Overdraw is allowed, unlike `MockDisplay`.

use std::cell::Cell;
use std::rc::Rc;

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::config::display;
use crate::display::{draw_line, draw_rect, Canvas};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Clear,
    Rect(u8, u8, u8, u8),
    FillRect(u8, u8, u8, u8),
    HLine(u8, u8, u8),
    VLine(u8, u8, u8),
    Pixel(u8, u8),
    Flush,
}

/// Framebuffer sized like the OLED
pub struct FrameBuffer {
    pixels: Vec<BinaryColor>,
}

impl FrameBuffer {
    const WIDTH: u32 = display::WIDTH as u32;
    const HEIGHT: u32 = display::HEIGHT as u32;

    fn new() -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (Self::WIDTH * Self::HEIGHT) as usize],
        }
    }

    fn blank(&mut self) {
        for pixel in self.pixels.iter_mut() {
            *pixel = BinaryColor::Off;
        }
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as u32) < Self::WIDTH
                && (coord.y as u32) < Self::HEIGHT
            {
                let idx = (coord.y as u32 * Self::WIDTH + coord.x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(Self::WIDTH, Self::HEIGHT)
    }
}

pub struct TestCanvas {
    pub commands: Vec<DrawCommand>,
    frame: FrameBuffer,
}

impl TestCanvas {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            frame: FrameBuffer::new(),
        }
    }

    pub fn lit(&self, x: u32, y: u32) -> bool {
        self.frame.pixels[(y * FrameBuffer::WIDTH + x) as usize] == BinaryColor::On
    }

    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&DrawCommand) -> bool,
    {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for TestCanvas {
    type Error = core::convert::Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Clear);
        self.frame.blank();
        Ok(())
    }

    fn rect(&mut self, x: u8, y: u8, width: u8, height: u8) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Rect(x, y, width, height));
        draw_rect(&mut self.frame, x, y, width, height, false)
    }

    fn fill_rect(&mut self, x: u8, y: u8, width: u8, height: u8) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillRect(x, y, width, height));
        draw_rect(&mut self.frame, x, y, width, height, true)
    }

    fn hline(&mut self, x0: u8, x1: u8, y: u8) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::HLine(x0, x1, y));
        draw_line(&mut self.frame, (x0, y), (x1, y))
    }

    fn vline(&mut self, x: u8, y0: u8, y1: u8) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::VLine(x, y0, y1));
        draw_line(&mut self.frame, (x, y0), (x, y1))
    }

    fn pixel(&mut self, x: u8, y: u8) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Pixel(x, y));
        Pixel(Point::new(i32::from(x), i32::from(y)), BinaryColor::On).draw(&mut self.frame)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Flush);
        Ok(())
    }
}

/// Traffic seen by a [`RecordingInterface`], readable after the display
/// driver has taken ownership of the interface
#[derive(Default)]
pub struct Traffic {
    pub commands: Cell<usize>,
    pub data_bytes: Cell<usize>,
}

/// Display interface that accepts everything and counts the traffic
pub struct RecordingInterface {
    traffic: Rc<Traffic>,
}

impl RecordingInterface {
    /// Returns the interface and a handle onto its counters
    pub fn new() -> (Self, Rc<Traffic>) {
        let traffic = Rc::new(Traffic::default());
        let interface = Self {
            traffic: Rc::clone(&traffic),
        };
        (interface, traffic)
    }
}

impl WriteOnlyDataCommand for RecordingInterface {
    fn send_commands(&mut self, _cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        let commands = &self.traffic.commands;
        commands.set(commands.get() + 1);
        Ok(())
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        let sent = match buf {
            DataFormat::U8(bytes) => bytes.len(),
            _ => 1,
        };
        let data_bytes = &self.traffic.data_bytes;
        data_bytes.set(data_bytes.get() + sent);
        Ok(())
    }
}
