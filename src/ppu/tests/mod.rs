//! PPU test suite, split by concern:
//! - registers: $2000-$2007 behaviors and latches
//! - rendering: tile synthesis, scroll, sprite prefetch
//! - timing: scanline machine, VBlank/NMI, frame cadence

mod registers;
mod rendering;

use super::*;

/// A PPU with empty CHR and horizontal mirroring
pub(crate) fn test_ppu() -> Ppu {
    Ppu::new(&[], crate::cartridge::Mirroring::Horizontal)
}

/// A PPU preloaded with the given CHR data
pub(crate) fn test_ppu_with_chr(chr: &[u8]) -> Ppu {
    Ppu::new(chr, crate::cartridge::Mirroring::Horizontal)
}
