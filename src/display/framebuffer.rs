// Frame assembler - composes the PPU's tile cache and sprite prefetch
// into a 256x240 RGBA image
//
// Backgrounds map each two-bit pixel through the background half of the
// palette snapshot; sprites use the sprite half, skip transparent pixels,
// honor flips, and yield to the background when their priority bit says
// so. Lower OAM indices win overlaps, so sprites are painted in reverse
// order.

use super::palette::palette_to_rgba;
use crate::ppu::constants::{
    NAMETABLE_WIDTH, PALETTE_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE,
};
use crate::ppu::{Sprite, Tile};

/// Bytes per pixel (RGBA)
const BYTES_PER_PIXEL: usize = 4;

/// 256x240 RGBA frame buffer
pub struct FrameBuffer {
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Create an opaque-black frame buffer
    pub fn new() -> Self {
        let mut data = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * BYTES_PER_PIXEL];
        for pixel in data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[3] = 0xFF;
        }
        FrameBuffer { data }
    }

    /// The raw RGBA bytes (256 x 240 x 4)
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Assemble one frame from the PPU's per-frame state
    pub fn render(
        &mut self,
        tiles: &[Tile],
        sprites: &[Option<Sprite>],
        palette: &[u8; PALETTE_SIZE],
    ) {
        self.render_background(tiles, palette);
        self.render_sprites(sprites, palette);
    }

    /// Write one RGBA pixel; coordinates outside the screen are dropped
    #[inline]
    fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return;
        }
        let offset = (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL;
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Paint the 32x30 tile cache
    fn render_background(&mut self, tiles: &[Tile], palette: &[u8; PALETTE_SIZE]) {
        for (index, tile) in tiles.iter().enumerate() {
            let screen_x = (index % NAMETABLE_WIDTH) * TILE_SIZE;
            let screen_y = (index / NAMETABLE_WIDTH) * TILE_SIZE;

            for row in 0..TILE_SIZE {
                for column in 0..TILE_SIZE {
                    let pixel = tile.pixels[row][column];
                    let color = palette[(tile.palette_id * 4 + pixel) as usize];
                    self.put_pixel(
                        screen_x + column,
                        screen_y + row,
                        palette_to_rgba(color),
                    );
                }
            }
        }
    }

    /// Paint the sprite prefetch over the background
    ///
    /// Reverse iteration makes lower OAM indices overwrite higher ones.
    /// Pixel value 0 is transparent; behind-background sprites are
    /// skipped entirely.
    fn render_sprites(&mut self, sprites: &[Option<Sprite>], palette: &[u8; PALETTE_SIZE]) {
        for sprite in sprites.iter().rev().flatten() {
            if sprite.behind_background {
                continue;
            }

            for row in 0..TILE_SIZE {
                for column in 0..TILE_SIZE {
                    let source_row = if sprite.flip_vertical {
                        TILE_SIZE - 1 - row
                    } else {
                        row
                    };
                    let source_column = if sprite.flip_horizontal {
                        TILE_SIZE - 1 - column
                    } else {
                        column
                    };

                    let pixel = sprite.pixels[source_row][source_column];
                    if pixel == 0 {
                        continue;
                    }

                    let color = palette[16 + (sprite.palette_id * 4 + pixel) as usize];
                    self.put_pixel(
                        sprite.x as usize + column,
                        sprite.y as usize + row,
                        palette_to_rgba(color),
                    );
                }
            }
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
