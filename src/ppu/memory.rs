// PPU memory - VRAM with the mirroring rules baked into load/store
//
// The PPU sees a 16KB logical address space:
//
// ```text
// $0000-$1FFF: Pattern tables (preloaded with CHR-ROM)
// $2000-$2FFF: Four logical nametables, collapsed onto two physical pages
// $3000-$3EFF: Mirror of $2000-$2EFF
// $3F00-$3F1F: Palette RAM
// $3F20-$3FFF: Mirrors of palette RAM
// ```
//
// Every access goes through one translation that applies, in order: the
// 16KB wrap, the $3F10/$3F14/$3F18/$3F1C palette aliases, the $3000 fold,
// the palette mirror wrap, and nametable mirroring.

use super::constants::VRAM_SIZE;
use crate::cartridge::Mirroring;

/// 16KB logical PPU address space
pub struct Vram {
    mem: [u8; VRAM_SIZE],
    mirroring: Mirroring,
}

impl Vram {
    /// Create VRAM with the pattern tables preloaded from CHR data
    pub fn new(chr: &[u8], mirroring: Mirroring) -> Self {
        let mut mem = [0u8; VRAM_SIZE];
        let len = chr.len().min(0x2000);
        mem[..len].copy_from_slice(&chr[..len]);
        Vram { mem, mirroring }
    }

    /// The nametable mirroring mode in effect
    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    /// Translate a logical address to its physical index
    fn translate(&self, addr: u16) -> usize {
        let mut addr = addr as usize % VRAM_SIZE;

        // Sprite palette entry 0 columns alias the background ones
        if matches!(addr, 0x3F10 | 0x3F14 | 0x3F18 | 0x3F1C) {
            addr -= 0x10;
        }

        // $3000-$3EFF folds onto the nametables
        if (0x3000..0x3F00).contains(&addr) {
            addr -= 0x1000;
        }

        // Palette RAM repeats every 32 bytes through $3FFF
        if (0x3F20..=0x3FFF).contains(&addr) {
            addr = 0x3F00 + (addr % 0x20);
        }

        // Nametable range: collapse the four logical tables onto the two
        // physical pages according to the cartridge mirroring
        if (0x2000..0x3000).contains(&addr) {
            let offset = addr - 0x2000;
            let table = offset / 0x400;
            let page = match self.mirroring {
                Mirroring::Horizontal => table / 2, // 0,1 -> 0 and 2,3 -> 1
                Mirroring::Vertical => table % 2,   // 0,2 -> 0 and 1,3 -> 1
            };
            addr = 0x2000 + page * 0x400 + offset % 0x400;
        }

        addr
    }

    /// Read a byte at a logical address
    #[inline]
    pub fn load(&self, addr: u16) -> u8 {
        self.mem[self.translate(addr)]
    }

    /// Write a byte at a logical address
    #[inline]
    pub fn store(&mut self, addr: u16, data: u8) {
        let index = self.translate(addr);
        self.mem[index] = data;
    }

    /// View the raw backing array (save states)
    pub fn as_slice(&self) -> &[u8] {
        &self.mem
    }

    /// Overwrite the raw backing array (save states)
    ///
    /// # Panics
    /// Panics if `data` is not exactly 16KB.
    pub fn copy_from_slice(&mut self, data: &[u8]) {
        self.mem.copy_from_slice(data);
    }
}
