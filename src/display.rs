//! # Display Module
//!
//! Draws one frame per loop on the 128x64 SSD1306: a decorative border
//! selected by [`BorderStyle`] and a filled square whose position follows
//! the joystick.
//!
//! Drawing goes through the [`Canvas`] primitives so the frame logic does
//! not depend on the display driver. The SSD1306 implementation rasterizes
//! them with `embedded-graphics` into the driver's frame buffer and
//! `flush` pushes the buffer over I2C.

use display_interface::{DisplayError, WriteOnlyDataCommand};
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};
use ssd1306::{mode::BufferedGraphicsMode, prelude::DisplayConfig, size::DisplaySize, Ssd1306};

use crate::config::{adc, display};
use crate::joystick::Sample;
use crate::mapping::map_value;

/// Border drawn around the canvas, cycled by the joystick button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderStyle {
    Solid = 0,
    Dashed = 1,
    Dotted = 2,
}

impl BorderStyle {
    /// Solid -> Dashed -> Dotted -> Solid
    pub const fn next(self) -> Self {
        match self {
            BorderStyle::Solid => BorderStyle::Dashed,
            BorderStyle::Dashed => BorderStyle::Dotted,
            BorderStyle::Dotted => BorderStyle::Solid,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        BorderStyle::Solid
    }
}

/// Monochrome drawing primitives. All of them draw lit pixels.
///
/// Rectangles are given by their top-left corner and size. Line end points
/// are inclusive. Nothing reaches the panel until `flush`.
pub trait Canvas {
    type Error;

    /// Turns every pixel off
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// One pixel wide outline
    fn rect(&mut self, x: u8, y: u8, width: u8, height: u8) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, x: u8, y: u8, width: u8, height: u8) -> Result<(), Self::Error>;

    fn hline(&mut self, x0: u8, x1: u8, y: u8) -> Result<(), Self::Error>;

    fn vline(&mut self, x: u8, y0: u8, y1: u8) -> Result<(), Self::Error>;

    fn pixel(&mut self, x: u8, y: u8) -> Result<(), Self::Error>;

    fn flush(&mut self) -> Result<(), Self::Error>;
}

fn point(x: u8, y: u8) -> Point {
    Point::new(i32::from(x), i32::from(y))
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

/// Rasterizes a [`Canvas`] rectangle onto any monochrome draw target
pub fn draw_rect<D>(
    target: &mut D,
    x: u8,
    y: u8,
    width: u8,
    height: u8,
    filled: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = if filled {
        PrimitiveStyle::with_fill(BinaryColor::On)
    } else {
        stroke()
    };

    Rectangle::new(point(x, y), Size::new(u32::from(width), u32::from(height)))
        .into_styled(style)
        .draw(target)
}

/// Rasterizes an inclusive line segment onto any monochrome draw target
pub fn draw_line<D>(target: &mut D, from: (u8, u8), to: (u8, u8)) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Line::new(point(from.0, from.1), point(to.0, to.1))
        .into_styled(stroke())
        .draw(target)
}

impl<DI, SIZE> Canvas for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    type Error = DisplayError;

    fn clear(&mut self) -> Result<(), DisplayError> {
        DrawTarget::clear(self, BinaryColor::Off)
    }

    fn rect(&mut self, x: u8, y: u8, width: u8, height: u8) -> Result<(), DisplayError> {
        draw_rect(self, x, y, width, height, false)
    }

    fn fill_rect(&mut self, x: u8, y: u8, width: u8, height: u8) -> Result<(), DisplayError> {
        draw_rect(self, x, y, width, height, true)
    }

    fn hline(&mut self, x0: u8, x1: u8, y: u8) -> Result<(), DisplayError> {
        draw_line(self, (x0, y), (x1, y))
    }

    fn vline(&mut self, x: u8, y0: u8, y1: u8) -> Result<(), DisplayError> {
        draw_line(self, (x, y0), (x, y1))
    }

    fn pixel(&mut self, x: u8, y: u8) -> Result<(), DisplayError> {
        Pixel(point(x, y), BinaryColor::On).draw(self)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ssd1306::flush(self)
    }
}

/// Sends the controller's init sequence and blanks the panel
pub fn init_display<DI, SIZE>(
    oled: &mut Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>,
) -> Result<(), DisplayError>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    oled.init()?;
    Canvas::clear(oled)?;
    Canvas::flush(oled)
}

/// Top-left corner of the square for a joystick sample.
/// Y is inverted so pushing the stick up moves the square up.
pub fn square_position(sample: Sample) -> (u8, u8) {
    let x = map_value(
        sample.x,
        0,
        adc::MAX_VALUE,
        0,
        display::WIDTH - display::SQUARE_SIZE,
    );
    let y = map_value(
        sample.y,
        0,
        adc::MAX_VALUE,
        display::HEIGHT - display::SQUARE_SIZE,
        0,
    );
    (x, y)
}

/// Draws the border variant into the frame buffer without flushing.
///
/// Solid and Dashed blank the canvas first, Dotted draws over whatever is
/// already there.
pub fn draw_border<C: Canvas>(canvas: &mut C, style: BorderStyle) -> Result<(), C::Error> {
    const W: u8 = display::WIDTH;
    const H: u8 = display::HEIGHT;

    match style {
        BorderStyle::Solid => {
            canvas.clear()?;
            canvas.rect(0, 0, W, H)?;
        }
        BorderStyle::Dashed => {
            canvas.clear()?;
            for x in (0..W).step_by(6) {
                canvas.hline(x, x + 4, 0)?;
                canvas.hline(x, x + 4, H - 4)?;
            }
            for y in (0..H).step_by(6) {
                canvas.vline(0, y, y + 4)?;
                canvas.vline(W - 1, y, y + 4)?;
            }
        }
        BorderStyle::Dotted => {
            for x in (0..W - 4).step_by(4) {
                canvas.pixel(x, 0)?;
                canvas.pixel(x, H - 4)?;
            }
            for y in (0..H - 4).step_by(4) {
                canvas.pixel(0, y)?;
                canvas.pixel(W - 1, y)?;
            }
        }
    }
    Ok(())
}

/// Draws and flushes one complete frame
pub fn render<C: Canvas>(
    canvas: &mut C,
    sample: Sample,
    style: BorderStyle,
) -> Result<(), C::Error> {
    let (x, y) = square_position(sample);

    canvas.clear()?;
    draw_border(canvas, style)?;
    canvas.fill_rect(x, y, display::SQUARE_SIZE, display::SQUARE_SIZE)?;
    canvas.flush()
}
