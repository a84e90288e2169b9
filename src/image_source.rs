// Loads the battle map and converts it into a buffer suitable for the windows.
// Decoding is entirely the `image` crate's job; we only repack pixels.

use std::path::Path;

use image::{ImageBuffer, Rgb};
use tracing::info;

use crate::error::Result;
use crate::types::FrameBuffer;

/// Decodes `path` (PNG/JPEG/...) into 0x00RRGGBB pixels.
pub fn load_map(path: &Path) -> Result<FrameBuffer> {
    let rgb = image::open(path)?.to_rgb8();
    let frame = pack(&rgb);
    info!(path = %path.display(), width = frame.width, height = frame.height, "map loaded");
    Ok(frame)
}

/// Placeholder map shown when no image was given.
pub fn blank_map(width: usize, height: usize) -> FrameBuffer {
    FrameBuffer::solid(width, height, 0x00_80_80_80)
}

/// Quarter turn clockwise; width and height swap.
pub fn rotate_clockwise(src: &FrameBuffer) -> FrameBuffer {
    let (w, h) = (src.width, src.height);
    let mut pixels = vec![0u32; w * h];
    for y in 0..h {
        for x in 0..w {
            // Source column x becomes destination row x, read bottom-up.
            let (dx, dy) = (h - 1 - y, x);
            pixels[dy * h + dx] = src.pixels[y * w + x];
        }
    }
    FrameBuffer { width: h, height: w, pixels }
}

fn pack(img: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let pixels = img
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    FrameBuffer { width: w as usize, height: h as usize, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::RgbImage;

    fn unpack(frame: &FrameBuffer) -> RgbImage {
        RgbImage::from_fn(frame.width as u32, frame.height as u32, |x, y| {
            let px = frame.pixels[y as usize * frame.width + x as usize];
            Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
        })
    }

    #[test]
    fn pack_orders_channels_as_rrggbb() {
        let img = RgbImage::from_pixel(1, 1, Rgb([0x12, 0x34, 0x56]));
        assert_eq!(pack(&img).pixels, vec![0x00_12_34_56]);
    }

    #[test]
    fn rotate_swaps_dimensions_and_turns_clockwise() {
        // 3x2:  a b c
        //       d e f
        let src = FrameBuffer { width: 3, height: 2, pixels: vec![1, 2, 3, 4, 5, 6] };
        let rot = rotate_clockwise(&src);
        // 2x3:  d a
        //       e b
        //       f c
        assert_eq!((rot.width, rot.height), (2, 3));
        assert_eq!(rot.pixels, vec![4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn rotation_matches_image_crate() {
        let src = FrameBuffer { width: 3, height: 2, pixels: vec![1, 2, 3, 4, 5, 6] };
        let ours = rotate_clockwise(&src);
        let theirs = pack(&image::imageops::rotate90(&unpack(&src)));
        assert_eq!(ours, theirs);
    }

    #[test]
    fn load_map_reports_missing_files() {
        let err = load_map(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad(_)));
    }
}
