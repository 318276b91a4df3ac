// The drawing surface: a software raster canvas plus the stroke session
// state. All pixel writes happen here; the overlays and the window never
// touch canvas memory.

use crate::types::{BACKGROUND, FrameBuffer};

pub struct Canvas {
    fb: FrameBuffer,
    // Last point of the active stroke; None between gestures. At most one
    // stroke session exists at a time.
    last_point: Option<(i32, i32)>,
}

impl Canvas {
    /// A canvas filled with the background color, sized once at startup.
    pub fn new(width: usize, height: usize) -> Self {
        Self { fb: FrameBuffer::filled(width, height, BACKGROUND), last_point: None }
    }

    pub fn width(&self) -> usize {
        self.fb.width
    }

    pub fn height(&self) -> usize {
        self.fb.height
    }

    /// The raw pixel rows, for compositing into the screen buffer.
    pub fn pixels(&self) -> &[u32] {
        &self.fb.pixels
    }

    /// A copy of the canvas as it is right now, for export. Strokes drawn
    /// after this call are not part of the snapshot.
    pub fn snapshot(&self) -> FrameBuffer {
        self.fb.clone()
    }

    /// Begin a new stroke path at (x, y). Draws nothing by itself; a click
    /// with no movement leaves no mark.
    pub fn begin_stroke(&mut self, x: i32, y: i32) {
        self.last_point = Some((x, y));
    }

    /// End the stroke path. Further stroke_to calls no-op until the next
    /// begin_stroke.
    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    /// Extend the active stroke to (x, y) and render the segment immediately:
    /// filled discs of diameter `size` stamped along the line give the round
    /// caps and joins of a pen. No active stroke means nothing happens.
    /// Visual: a smooth line appears between the previous point and the cursor.
    pub fn stroke_to(&mut self, x: i32, y: i32, size: u32, color: u32) {
        let Some((px, py)) = self.last_point else {
            return;
        };
        self.stamp_line(px, py, x, y, size, color);
        self.last_point = Some((x, y));
    }

    /// Clear a square of side `size` centered on (x, y) back to the
    /// background. Independent of any stroke path: erasing is a rect-clear
    /// per move, so fast sweeps leave disjoint squares rather than a
    /// continuous trail.
    pub fn erase_at(&mut self, x: i32, y: i32, size: u32) {
        let s = size as i32;
        let x0 = x - s / 2;
        let y0 = y - s / 2;
        for yy in y0..y0 + s {
            for xx in x0..x0 + s {
                self.put_pixel(xx, yy, BACKGROUND);
            }
        }
    }

    /// Wipe everything back to the background color. Irrecoverable.
    pub fn clear(&mut self) {
        self.fb.pixels.fill(BACKGROUND);
    }

    /// Put a pixel if (x, y) is inside bounds; off-canvas writes are skipped.
    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.fb.width || y >= self.fb.height {
            return;
        }
        self.fb.pixels[y * self.fb.width + x] = color;
    }

    /// Fill a disc of diameter `size` centered at (cx, cy).
    /// Visual: one round pen dab.
    fn stamp_disc(&mut self, cx: i32, cy: i32, size: u32, color: u32) {
        let radius = size as f32 / 2.0;
        let r = radius.ceil() as i32;
        let r2 = radius * radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= r2 {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Walk the Bresenham line from (x0, y0) to (x1, y1), stamping a disc at
    /// every step. Adjacent stamps overlap, so the segment reads as one
    /// continuous stroke of width `size`.
    fn stamp_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, size: u32, color: u32) {
        let (mut x0, mut y0) = (x0, y0);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp_disc(x0, y0, size, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: u32 = 0x0000_0000;

    fn pixel(canvas: &Canvas, x: usize, y: usize) -> u32 {
        canvas.pixels()[y * canvas.width() + x]
    }

    #[test]
    fn stroke_renders_connected_segment() {
        let mut canvas = Canvas::new(100, 100);
        canvas.begin_stroke(10, 50);
        canvas.stroke_to(40, 50, 4, INK);

        // Endpoints and midpoint all carry ink.
        assert_eq!(pixel(&canvas, 10, 50), INK);
        assert_eq!(pixel(&canvas, 25, 50), INK);
        assert_eq!(pixel(&canvas, 40, 50), INK);
        // Well off the segment stays background.
        assert_eq!(pixel(&canvas, 25, 70), BACKGROUND);
    }

    #[test]
    fn stroke_width_tracks_brush_size() {
        let mut canvas = Canvas::new(100, 100);
        canvas.begin_stroke(20, 50);
        canvas.stroke_to(80, 50, 10, INK);

        // Inside the half-width above and below the center line.
        assert_eq!(pixel(&canvas, 50, 45), INK);
        assert_eq!(pixel(&canvas, 50, 55), INK);
        // Clearly outside the half-width.
        assert_eq!(pixel(&canvas, 50, 58), BACKGROUND);
        assert_eq!(pixel(&canvas, 50, 42), BACKGROUND);
    }

    #[test]
    fn stroke_without_begin_is_a_no_op() {
        let mut canvas = Canvas::new(50, 50);
        canvas.stroke_to(25, 25, 8, INK);
        assert!(canvas.pixels().iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn click_without_movement_leaves_no_mark() {
        let mut canvas = Canvas::new(50, 50);
        canvas.begin_stroke(25, 25);
        canvas.end_stroke();
        assert!(canvas.pixels().iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn ended_stroke_does_not_extend() {
        let mut canvas = Canvas::new(50, 50);
        canvas.begin_stroke(10, 10);
        canvas.end_stroke();
        canvas.stroke_to(40, 40, 6, INK);
        assert!(canvas.pixels().iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn strokes_survive_out_of_bounds_points() {
        let mut canvas = Canvas::new(40, 40);
        canvas.begin_stroke(-10, 20);
        canvas.stroke_to(60, 20, 6, INK);
        // The in-bounds span is painted; nothing panicked on the way.
        assert_eq!(pixel(&canvas, 0, 20), INK);
        assert_eq!(pixel(&canvas, 39, 20), INK);
    }

    #[test]
    fn erase_clears_centered_square() {
        let mut canvas = Canvas::new(100, 100);
        canvas.begin_stroke(30, 50);
        canvas.stroke_to(70, 50, 20, INK);

        canvas.erase_at(50, 50, 10);
        // Inside the square: background again.
        assert_eq!(pixel(&canvas, 50, 50), BACKGROUND);
        assert_eq!(pixel(&canvas, 45, 45), BACKGROUND);
        assert_eq!(pixel(&canvas, 54, 54), BACKGROUND);
        // Just past the square edge: ink remains.
        assert_eq!(pixel(&canvas, 44, 50), INK);
        assert_eq!(pixel(&canvas, 55, 50), INK);
    }

    #[test]
    fn erase_footprint_is_square_not_round() {
        let mut canvas = Canvas::new(100, 100);
        canvas.begin_stroke(30, 50);
        canvas.stroke_to(70, 50, 30, INK);

        canvas.erase_at(50, 50, 10);
        // The square's corner lies outside a disc of the same diameter;
        // a round eraser would have left this pixel inked.
        assert_eq!(pixel(&canvas, 45, 45), BACKGROUND);
    }

    #[test]
    fn erase_needs_no_stroke_session() {
        let mut canvas = Canvas::new(60, 60);
        canvas.begin_stroke(10, 30);
        canvas.stroke_to(50, 30, 12, INK);
        canvas.end_stroke();

        // No begin_stroke here: erase acts per move, not per path.
        canvas.erase_at(30, 30, 8);
        assert_eq!(pixel(&canvas, 30, 30), BACKGROUND);
    }

    #[test]
    fn clear_restores_background_everywhere() {
        let mut canvas = Canvas::new(80, 80);
        canvas.begin_stroke(5, 5);
        canvas.stroke_to(75, 75, 16, INK);
        canvas.stroke_to(75, 5, 16, 0x00E0_3131);

        canvas.clear();
        assert!(canvas.pixels().iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn snapshot_is_detached_from_later_strokes() {
        let mut canvas = Canvas::new(50, 50);
        canvas.begin_stroke(10, 25);
        canvas.stroke_to(40, 25, 4, INK);

        let snap = canvas.snapshot();
        canvas.clear();

        // The live canvas is blank; the snapshot still holds the stroke.
        assert_eq!(pixel(&canvas, 25, 25), BACKGROUND);
        assert_eq!(snap.pixels[25 * 50 + 25], INK);
    }
}
