// One-shot PNG export. The snapshot is taken synchronously by the caller;
// encoding and the file write happen on a detached thread so the frame loop
// never blocks on disk.

use crate::error::Error;
use crate::types::FrameBuffer;
use image::{Rgb, RgbImage};
use std::path::Path;
use std::thread;

/// Every save lands here, overwriting the previous export. No collision
/// handling, no format choice.
pub const EXPORT_FILE: &str = "sketch.png";

/// Unpack the 0x00RRGGBB pixel rows into an RGB image buffer.
pub fn snapshot_to_image(fb: &FrameBuffer) -> RgbImage {
    let mut img = RgbImage::new(fb.width as u32, fb.height as u32);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        let r = ((px >> 16) & 0xFF) as u8;
        let g = ((px >> 8) & 0xFF) as u8;
        let b = (px & 0xFF) as u8;
        *pixel = Rgb([r, g, b]);
    }
    img
}

/// Encode the snapshot and write it to `path` (format picked from the
/// extension, so EXPORT_FILE comes out as a PNG).
pub fn write_png(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    snapshot_to_image(fb)
        .save(path)
        .map_err(|e| Error::PngEncode(format!("Save {}: {e}", path.display())))
}

/// Fire-and-forget save of a canvas snapshot as sketch.png.
/// Visual: nothing changes on screen; the file appears in the working
/// directory. A failure prints one line to the console and is otherwise
/// dropped.
pub fn save_png(snapshot: FrameBuffer) {
    thread::spawn(move || {
        if let Err(e) = write_png(&snapshot, Path::new(EXPORT_FILE)) {
            eprintln!("{e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn snapshot_channels_unpack_in_rgb_order() {
        let fb = FrameBuffer {
            width: 2,
            height: 1,
            pixels: vec![0x0011_2233, 0x00FF_FFFF],
        };
        let img = snapshot_to_image(&fb);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0x11, 0x22, 0x33]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0xFF, 0xFF, 0xFF]));
    }

    #[test]
    fn write_png_produces_a_png_file() {
        let fb = FrameBuffer::filled(4, 3, 0x00FF_FFFF);
        let path = std::env::temp_dir().join("sketchpad-export-test.png");

        write_png(&fb, &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        // PNG signature
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn write_png_reports_bad_destinations() {
        let fb = FrameBuffer::filled(2, 2, 0x0000_0000);
        let path = Path::new("/nonexistent-dir/sketchpad.png");
        let err = write_png(&fb, path).unwrap_err();
        assert!(matches!(err, Error::PngEncode(_)));
    }
}
