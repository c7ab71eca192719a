/// Character-grid pixel sink for terminal output
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, Write};
use wf3d_core::{DrawSurface, Rgba};

/// Glyph drawn for a line pixel.
const LINE_GLYPH: char = '#';

/// A width x height grid of colored character cells.
///
/// Implements the renderer's pixel sink: plots outside the grid are
/// ignored, which also covers clipped endpoints sitting exactly on the
/// far window edge.
pub struct TerminalCanvas {
    width: usize,
    height: usize,
    draw_color: Color,
    glyphs: Vec<char>,
    colors: Vec<Color>,
}

impl TerminalCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            draw_color: Color::White,
            glyphs: vec![' '; size],
            colors: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for glyph in &mut self.glyphs {
            *glyph = ' ';
        }
    }

    /// Queue the whole grid to the writer, one cursor jump per row.
    /// Color changes are emitted only when a cell differs from the last.
    pub fn present<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.colors[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.glyphs[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for TerminalCanvas {
    fn set_draw_color(&mut self, color: Rgba) {
        self.draw_color = Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        };
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.glyphs[idx] = LINE_GLYPH;
        self.colors[idx] = self.draw_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plots_land_in_the_grid() {
        let mut canvas = TerminalCanvas::new(4, 3);
        canvas.set_draw_color(Rgba::WHITE);
        canvas.plot(1, 2);
        assert_eq!(canvas.glyphs[2 * 4 + 1], LINE_GLYPH);
        assert_eq!(
            canvas.colors[2 * 4 + 1],
            Color::Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
    }

    #[test]
    fn out_of_range_plots_are_ignored() {
        let mut canvas = TerminalCanvas::new(4, 3);
        canvas.plot(-1, 0);
        canvas.plot(0, -1);
        // The clip window's far edge is one past the last cell.
        canvas.plot(4, 0);
        canvas.plot(0, 3);
        assert!(canvas.glyphs.iter().all(|&c| c == ' '));
    }

    #[test]
    fn clear_blanks_every_cell() {
        let mut canvas = TerminalCanvas::new(4, 3);
        canvas.plot(0, 0);
        canvas.plot(3, 2);
        canvas.clear();
        assert!(canvas.glyphs.iter().all(|&c| c == ' '));
    }

    #[test]
    fn present_emits_the_plotted_glyph() {
        let mut canvas = TerminalCanvas::new(3, 2);
        canvas.set_draw_color(Rgba::new(255, 0, 0, 255));
        canvas.plot(1, 0);
        let mut bytes = Vec::new();
        canvas.present(&mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(LINE_GLYPH));
    }
}
