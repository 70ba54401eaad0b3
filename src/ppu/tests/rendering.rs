//! Background tile synthesis and sprite prefetch tests

use super::*;

/// CHR bank whose tile 1 is solid color 1 and tile 2 solid color 3
fn solid_tiles_chr() -> Vec<u8> {
    let mut chr = vec![0u8; 0x2000];
    for row in 0..8 {
        chr[16 + row] = 0xFF; // tile 1: low plane only
        chr[32 + row] = 0xFF; // tile 2: both planes
        chr[40 + row] = 0xFF;
    }
    chr
}

#[test]
fn test_build_background_row_reads_nametable() {
    let mut ppu = test_ppu_with_chr(&solid_tiles_chr());

    // Tile index 1 at cell (0, 0)
    ppu.vram.store(0x2000, 0x01);
    ppu.build_background_row(0);

    let tile = &ppu.tiles[0];
    assert_eq!(tile.pixels[0][0], 0x01, "tile 1 is solid color 1");
    assert_eq!(tile.palette_id, 0, "attribute table is empty");
}

#[test]
fn test_attribute_quadrants_select_palette() {
    let mut ppu = test_ppu_with_chr(&solid_tiles_chr());

    // One attribute byte covers a 4x4 tile block; quadrants are 2 bits
    // each: top-left=1, top-right=2, bottom-left=3, bottom-right=0
    ppu.vram.store(0x23C0, 0b00_11_10_01);

    ppu.build_background_row(0); // rows 0-1 are the top quadrants
    ppu.build_background_row(2); // rows 2-3 are the bottom quadrants

    assert_eq!(ppu.tiles[0].palette_id, 1, "top-left quadrant");
    assert_eq!(ppu.tiles[2].palette_id, 2, "top-right quadrant");
    assert_eq!(ppu.tiles[2 * 32].palette_id, 3, "bottom-left quadrant");
    assert_eq!(ppu.tiles[2 * 32 + 2].palette_id, 0, "bottom-right quadrant");
}

#[test]
fn test_background_table_select() {
    let mut chr = vec![0u8; 0x2000];
    for row in 0..8 {
        chr[0x1000 + row] = 0xFF; // tile 0 of table 1: solid color 1
    }
    let mut ppu = test_ppu_with_chr(&chr);

    ppu.build_background_row(0);
    assert_eq!(ppu.tiles[0].pixels[0][0], 0, "table 0 tile is empty");

    ppu.write_register(0, 0x10); // background table -> $1000
    ppu.build_background_row(0);
    assert_eq!(ppu.tiles[0].pixels[0][0], 1, "table 1 tile is solid");
}

#[test]
fn test_horizontal_scroll_shifts_tiles() {
    let mut ppu = test_ppu_with_chr(&solid_tiles_chr());

    // Tile 1 sits one cell to the right of the origin
    ppu.vram.store(0x2001, 0x01);

    ppu.build_background_row(0);
    assert_eq!(ppu.tiles[0].pixels[0][0], 0, "no scroll: cell 0 is empty");

    // Scrolling 8 pixels right brings it to cell 0
    ppu.write_register(5, 8);
    ppu.write_register(5, 0);
    ppu.build_background_row(0);
    assert_eq!(ppu.tiles[0].pixels[0][0], 1);
}

#[test]
fn test_scroll_wraps_into_horizontal_neighbor() {
    let mut ppu = Ppu::new(&solid_tiles_chr(), crate::cartridge::Mirroring::Vertical);

    // With vertical mirroring the table at $2400 is a distinct page.
    // Put tile 1 at its first cell.
    ppu.vram.store(0x2400, 0x01);

    // Scrolled 248 pixels right, world column 256 (the neighbor's first
    // cell) lands on screen cell 1
    ppu.write_register(5, 248);
    ppu.write_register(5, 0);
    ppu.build_background_row(0);

    assert_eq!(ppu.tiles[1].pixels[0][0], 1, "cell 1 comes from $2400");
    assert_eq!(ppu.tiles[0].pixels[0][0], 0, "cell 0 is still table 0");
}

#[test]
fn test_negative_y_scroll_region() {
    let mut ppu = test_ppu_with_chr(&solid_tiles_chr());

    // scroll_y = 248 means -8: the world row above the origin, which
    // wraps to the bottom of the lower nametable pair
    ppu.vram.store(0x2000, 0x01);
    ppu.write_register(5, 0);
    ppu.write_register(5, 248);

    ppu.build_background_row(1);
    assert_eq!(
        ppu.tiles[32].pixels[0][0],
        1,
        "row 1 shows the origin row shifted down by one tile"
    );
}

#[test]
fn test_base_nametable_offsets_origin() {
    let mut ppu = Ppu::new(&solid_tiles_chr(), crate::cartridge::Mirroring::Vertical);

    ppu.vram.store(0x2400, 0x01); // first cell of nametable 1

    ppu.write_register(0, 0x01); // base nametable = 1
    ppu.build_background_row(0);

    assert_eq!(ppu.tiles[0].pixels[0][0], 1);
}

// ========================================
// Sprite prefetch
// ========================================

#[test]
fn test_rebuild_sprites_decodes_attributes() {
    let mut ppu = test_ppu_with_chr(&solid_tiles_chr());

    ppu.oam[0] = 0x30; // y
    ppu.oam[1] = 0x01; // tile
    ppu.oam[2] = 0xE3; // vflip | hflip | behind | palette 3
    ppu.oam[3] = 0x40; // x

    ppu.rebuild_sprites();

    let sprite = ppu.sprites[0].expect("sprite 0 is visible");
    assert_eq!(sprite.y, 0x30);
    assert_eq!(sprite.x, 0x40);
    assert_eq!(sprite.palette_id, 3);
    assert!(sprite.behind_background);
    assert!(sprite.flip_horizontal);
    assert!(sprite.flip_vertical);
    assert_eq!(sprite.pixels[0][0], 0x01);
}

#[test]
fn test_hidden_sprites_prefetch_as_none() {
    let mut ppu = test_ppu();

    ppu.oam[0] = 0xEF; // parked off screen
    ppu.oam[4] = 0xFF;
    ppu.oam[8] = 0xEE; // still visible

    ppu.rebuild_sprites();

    assert!(ppu.sprites[0].is_none());
    assert!(ppu.sprites[1].is_none());
    assert!(ppu.sprites[2].is_some());
}

#[test]
fn test_sprite_table_select() {
    let mut chr = vec![0u8; 0x2000];
    for row in 0..8 {
        chr[0x1000 + row] = 0xFF; // tile 0 of table 1
    }
    let mut ppu = test_ppu_with_chr(&chr);
    ppu.oam[0] = 0x10;

    ppu.rebuild_sprites();
    assert_eq!(ppu.sprites[0].unwrap().pixels[0][0], 0);

    ppu.write_register(0, 0x08); // sprite table -> $1000
    ppu.rebuild_sprites();
    assert_eq!(ppu.sprites[0].unwrap().pixels[0][0], 1);
}
