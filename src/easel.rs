// Window + input polling.
// The easel is the surface everything gets pinned to:
// 1) A window that shows the canvas (plus overlays) once per frame.
// 2) Mouse position/button state for the stroke gestures.
// 3) One helper per key control, so the main loop stays readable.

use crate::error::Error;
use crate::types::{FrameBuffer, PALETTE};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

// Keys 1-8 pick the matching palette slot.
const PALETTE_KEYS: [Key; PALETTE.len()] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
];

pub struct Easel {
    window: Window, // the on-screen window you see
}

impl Easel {
    /// Create the window the canvas will live in. The default options give a
    /// fixed-size window, so the canvas stays in sync with it for the whole
    /// run.
    /// Visual: a new blank window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately shows the composited frame.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates (clamped to the
    /// window). Window space *is* canvas space here, since both share a size.
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    /// Visual: while this is true, moving the mouse paints (or erases).
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    // Brush size steps with key repeat, so holding the bracket sweeps the
    // whole 1-50 range like dragging a slider.
    pub fn size_up_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::RightBracket, KeyRepeat::Yes)
    }
    pub fn size_down_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::LeftBracket, KeyRepeat::Yes)
    }

    /// Which palette slot was picked this frame, if any (keys 1-8).
    pub fn palette_slot_pressed(&self) -> Option<usize> {
        PALETTE_KEYS
            .iter()
            .position(|&k| self.window.is_key_pressed(k, KeyRepeat::No))
    }

    // One-shot action keys. Each returns true exactly once per press.
    /// Visual: the eraser cursor appears (or disappears) when this fires.
    pub fn erase_toggled(&self) -> bool {
        self.window.is_key_pressed(Key::E, KeyRepeat::No)
    }

    /// Visual: when pressed, everything drawn so far vanishes.
    pub fn clear_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    /// Visual: nothing on screen; sketch.png shows up next to the binary.
    pub fn save_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }
}
