// What you SEE:
// • A white canvas filling the window. Hold Left Mouse to paint.
// • [ and ] shrink/grow the brush (1-50); keys 1-8 pick the color.
// • E toggles erase mode: a gray circle follows the pointer and moves wipe
//   squares of canvas. C clears everything. S saves sketch.png. ESC quits.

mod canvas;
mod easel;
mod error;
mod export;
mod overlay;
mod types;

use canvas::Canvas;
use easel::Easel;
use error::Error;
use types::{BACKGROUND, Brush, FrameBuffer, PALETTE};

const WIDTH: usize = 1280;
const HEIGHT: usize = 720;

fn main() -> Result<(), Error> {
    /* --- Canvas + window setup ---
       The canvas is sized once, here; the window opens at the same size and
       is not resizable, so the two stay matched for the whole run. */
    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    let mut easel = Easel::new("Sketchpad", canvas.width(), canvas.height())?;

    /* --- Screen buffer ---
       Visual: this is the image you actually see each frame; the canvas
       plus the overlays, never the canvas alone. */
    let mut screen = FrameBuffer::filled(canvas.width(), canvas.height(), BACKGROUND);

    /* --- Brush + gesture state --- */
    let mut brush = Brush::new();
    let mut color_name = PALETTE[0].0; // status-line label for the color
    let mut was_down = false;
    let mut prev_pos: Option<(usize, usize)> = None;

    /* ------------------------------ Frame loop ------------------------------ */
    while easel.is_open() && !easel.esc_pressed() {
        /* 1) Key controls: mutate the brush or trigger an action. */
        if easel.size_up_pressed() {
            brush.grow(); // visual: eraser cursor widens with it
        }
        if easel.size_down_pressed() {
            brush.shrink();
        }
        if let Some(slot) = easel.palette_slot_pressed() {
            let (name, rgb) = PALETTE[slot];
            brush.color = rgb; // future strokes only
            color_name = name;
        }
        if easel.erase_toggled() {
            brush.erase = !brush.erase;
        }
        if easel.clear_pressed() {
            canvas.clear(); // visual: everything drawn so far vanishes
        }
        if easel.save_pressed() {
            // Snapshot now; later strokes don't leak into the file.
            export::save_png(canvas.snapshot());
        }

        /* 2) Mouse gesture: press begins a stroke, movement extends it (or
           erases), release ends it. A press with no movement leaves no mark,
           matching pen behavior. */
        let down = easel.left_mouse_down();
        let pos = easel.mouse_pos();
        if let Some((mx, my)) = pos {
            let (x, y) = (mx as i32, my as i32);
            if down && !was_down {
                canvas.begin_stroke(x, y);
            } else if down && pos != prev_pos {
                if brush.erase {
                    canvas.erase_at(x, y, brush.size);
                } else {
                    canvas.stroke_to(x, y, brush.size, brush.color);
                }
            }
        }
        if !down && was_down {
            canvas.end_stroke();
        }
        was_down = down;
        prev_pos = pos;

        /* 3) Composite: canvas first, overlays on top. */
        screen.pixels.copy_from_slice(canvas.pixels());

        if brush.erase {
            if let Some((mx, my)) = pos {
                overlay::draw_eraser_cursor(&mut screen, mx as i32, my as i32, brush.size);
            }
        }

        let mode = if brush.erase { "ERASE" } else { "DRAW" };
        let status = format!(
            "{mode} | SIZE: {} | {color_name} | [ ]: SIZE  1-8: COLOR  E: ERASE  C: CLEAR  S: SAVE",
            brush.size
        );
        overlay::draw_text_5x7(&mut screen, 8, 8, &status, 0x0040_4040);

        /* 4) Present to the window. */
        easel.present(&screen)?;
    }

    Ok(())
}
