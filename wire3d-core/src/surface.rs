/// Display and input capabilities the frame loop drives
use nalgebra::Point2;

use crate::error::Result;

/// RGB line or background color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Something that can draw line segments and present a frame
pub trait DisplaySurface {
    fn clear(&mut self, color: Color) -> Result<()>;

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) -> Result<()>;

    fn present(&mut self) -> Result<()>;

    /// Logical size in pixels as (width, height)
    fn size(&self) -> (u32, u32);
}

/// Keys that move the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl MovementKey {
    pub const ALL: [MovementKey; 6] = [
        MovementKey::Forward,
        MovementKey::Back,
        MovementKey::Left,
        MovementKey::Right,
        MovementKey::Up,
        MovementKey::Down,
    ];
}

/// Result of draining pending input events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEvents {
    pub quit: bool,
}

/// Source of quit requests and movement key state
pub trait InputSource {
    fn poll_events(&mut self) -> Result<InputEvents>;

    fn is_key_pressed(&self, key: MovementKey) -> bool;
}
