/// Character-grid display surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;
use std::time::Instant;
use wire3d_core::{Color, DisplaySurface, Error, Result};

const CONTROLS: &str = "W/S=Forward/Back A/D=Left/Right Arrows=Up/Down Q=Quit";

/// Display surface that rasterizes lines into terminal cells.
///
/// Callers draw in logical pixel coordinates (`size()`); each line is clipped
/// to the logical viewport and scaled onto the `cols` x `rows` cell grid.
pub struct TerminalSurface<W: Write> {
    writer: W,
    cols: usize,
    rows: usize,
    logical_width: u32,
    logical_height: u32,
    glyphs: Vec<char>,
    colors: Vec<Color>,
    background: Color,
    show_status: bool,
    last_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl<W: Write> TerminalSurface<W> {
    /// Fails when either the cell grid or the logical size has no area
    pub fn new(
        writer: W,
        cols: u16,
        rows: u16,
        logical_width: u32,
        logical_height: u32,
    ) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::Surface(format!("terminal grid {cols}x{rows} has no cells")));
        }
        if logical_width == 0 || logical_height == 0 {
            return Err(Error::Surface(format!(
                "logical size {logical_width}x{logical_height} has no pixels"
            )));
        }
        let cols = cols as usize;
        let rows = rows as usize;
        let size = cols * rows;
        Ok(Self {
            writer,
            cols,
            rows,
            logical_width,
            logical_height,
            glyphs: vec![' '; size],
            colors: vec![Color::WHITE; size],
            background: Color::BLACK,
            show_status: true,
            last_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn with_status_line(mut self, show: bool) -> Self {
        self.show_status = show;
        self
    }

    /// Character currently stored at a cell, if the cell exists
    pub fn glyph_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.glyphs[row * self.cols + col])
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn to_cell(&self, p: Point2<f32>) -> (i32, i32) {
        let x = p.x / self.logical_width as f32 * self.cols as f32;
        let y = p.y / self.logical_height as f32 * self.rows as f32;
        (x.floor() as i32, y.floor() as i32)
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return;
        }
        let idx = y as usize * self.cols + x as usize;
        self.glyphs[idx] = glyph;
        self.colors[idx] = color;
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.last_sample.elapsed();
        if elapsed.as_secs() >= 1 {
            self.fps = self.frame_count as f32 / elapsed.as_secs_f32();
            self.frame_count = 0;
            self.last_sample = Instant::now();
        }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn clear(&mut self, color: Color) -> Result<()> {
        self.glyphs.fill(' ');
        self.background = color;
        Ok(())
    }

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) -> Result<()> {
        let viewport = (self.logical_width as f32, self.logical_height as f32);
        let Some((a, b)) = clip_line(from, to, viewport) else {
            return Ok(());
        };

        let glyph = line_glyph(b.x - a.x, b.y - a.y);
        let (x0, y0) = self.to_cell(a);
        let (x1, y1) = self.to_cell(b);

        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.plot(x, y, glyph, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.update_fps();

        let background = to_term_color(self.background);
        self.writer.queue(SetBackgroundColor(background))?;
        let mut current = None;
        for row in 0..self.rows {
            self.writer.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let idx = row * self.cols + col;
                let color = self.colors[idx];
                if current != Some(color) {
                    self.writer.queue(SetForegroundColor(to_term_color(color)))?;
                    current = Some(color);
                }
                self.writer.queue(Print(self.glyphs[idx]))?;
            }
        }

        if self.show_status {
            let mut status = format!("Wire3D | FPS: {:.1} | {}", self.fps, CONTROLS);
            status.truncate(self.cols);
            self.writer
                .queue(cursor::MoveTo(0, 0))?
                .queue(SetForegroundColor(TermColor::Yellow))?
                .queue(Print(status))?;
        }

        self.writer.queue(ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.logical_width, self.logical_height)
    }
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Pick a glyph that follows the line direction (screen y grows downward)
fn line_glyph(dx: f32, dy: f32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment against `[0, width) x [0, height)`
fn clip_line(
    from: Point2<f32>,
    to: Point2<f32>,
    (width, height): (f32, f32),
) -> Option<(Point2<f32>, Point2<f32>)> {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return None;
    }
    let max_x = width - f32::EPSILON * width;
    let max_y = height - f32::EPSILON * height;
    let d = to - from;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    let checks = [
        (-d.x, from.x),
        (d.x, max_x - from.x),
        (-d.y, from.y),
        (d.y, max_y - from.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((from + d * t0, from + d * t1))
}
