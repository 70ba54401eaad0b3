// Cartridge module - iNES image loading (Mapper 0 / NROM)
//
// Parses iNES v1 images and exposes the PRG-ROM and CHR-ROM banks together
// with the nametable mirroring mode. Only Mapper 0 (NROM) is supported.
//
// # iNES v1 Header Layout
//
// ```text
// Offset 0-3:  Magic "NES\x1A" (0x4E 0x45 0x53 0x1A)
// Offset 4:    PRG-ROM size in 16KB units
// Offset 5:    CHR-ROM size in 8KB units
// Offset 6:    Flags 6 - mirroring (bit 0), battery (bit 1), trainer (bit 2),
//              lower mapper nibble (bits 4-7)
// Offset 7:    Flags 7 - upper mapper nibble (bits 4-7)
// Offset 8-15: Rarely used extensions, ignored here
// ```
//
// PRG data begins at offset 16 (or 16 + 512 when a trainer block is
// present); CHR data follows immediately after the PRG banks.

use std::fs;
use std::io;
use std::path::Path;

/// Size of the iNES header in bytes
const HEADER_SIZE: usize = 16;

/// Size of one PRG-ROM bank (16KB)
const PRG_BANK_SIZE: usize = 16 * 1024;

/// Size of one CHR-ROM bank (8KB)
const CHR_BANK_SIZE: usize = 8 * 1024;

/// Size of the optional trainer block
const TRAINER_SIZE: usize = 512;

/// Size of the PRG-RAM (SRAM) bank at $6000-$7FFF
const SRAM_SIZE: usize = 8 * 1024;

/// The four magic bytes every iNES image starts with
const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// Nametable mirroring mode
///
/// The cartridge hardware collapses the four logical nametables onto the
/// two physical 1KB VRAM pages in one of two arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// Horizontal: tables 0/1 share a page, tables 2/3 share the other
    Horizontal,
    /// Vertical: tables 0/2 share a page, tables 1/3 share the other
    Vertical,
}

/// Errors produced while loading a cartridge image
#[derive(Debug)]
pub enum CartridgeError {
    /// The file does not start with the iNES magic or is truncated
    InvalidHeader,
    /// The image requests a mapper other than 0 (NROM)
    UnsupportedMapper(u8),
    /// The image file could not be read
    Io(io::Error),
}

impl std::fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartridgeError::InvalidHeader => {
                write!(f, "not an iNES image (bad magic or truncated header)")
            }
            CartridgeError::UnsupportedMapper(num) => {
                write!(f, "mapper {} is not supported (only NROM/mapper 0)", num)
            }
            CartridgeError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CartridgeError {}

impl From<io::Error> for CartridgeError {
    fn from(e: io::Error) -> Self {
        CartridgeError::Io(e)
    }
}

/// A loaded NROM cartridge
///
/// Immutable after load except for the battery-backed SRAM bank. PRG-ROM is
/// 16KB or 32KB; a 16KB image is mirrored across $8000-$FFFF by reading
/// through `index % prg_rom.len()`.
pub struct Cartridge {
    /// PRG-ROM data (16KB or 32KB)
    pub prg_rom: Vec<u8>,
    /// CHR-ROM data (8KB), preloaded into the PPU pattern tables
    pub chr_rom: Vec<u8>,
    /// PRG-RAM (SRAM) bank mapped at $6000-$7FFF
    pub sram: Vec<u8>,
    /// Nametable mirroring mode
    pub mirroring: Mirroring,
    /// Whether the SRAM bank is battery backed (iNES flags 6, bit 1)
    pub has_battery: bool,
}

impl Cartridge {
    /// Parse a cartridge from raw iNES file bytes
    ///
    /// # Arguments
    /// * `bytes` - The complete contents of a `.nes` file
    ///
    /// # Errors
    /// * `CartridgeError::InvalidHeader` on a bad magic or truncated image
    /// * `CartridgeError::UnsupportedMapper` for any mapper other than 0
    pub fn from_ines_bytes(bytes: &[u8]) -> Result<Self, CartridgeError> {
        if bytes.len() < HEADER_SIZE || bytes[0..4] != INES_MAGIC {
            return Err(CartridgeError::InvalidHeader);
        }

        let prg_banks = bytes[4] as usize;
        let chr_banks = bytes[5] as usize;
        let flags6 = bytes[6];
        let flags7 = bytes[7];

        let mapper = (flags7 & 0xF0) | (flags6 >> 4);
        if mapper != 0 {
            return Err(CartridgeError::UnsupportedMapper(mapper));
        }

        let mirroring = if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let has_battery = flags6 & 0x02 != 0;
        let has_trainer = flags6 & 0x04 != 0;

        let prg_start = HEADER_SIZE + if has_trainer { TRAINER_SIZE } else { 0 };
        let chr_start = prg_start + prg_banks * PRG_BANK_SIZE;
        let chr_end = chr_start + chr_banks * CHR_BANK_SIZE;

        if prg_banks == 0 || bytes.len() < chr_end {
            return Err(CartridgeError::InvalidHeader);
        }

        log::info!(
            "loaded cartridge: {}KB PRG, {}KB CHR, {:?} mirroring{}",
            prg_banks * 16,
            chr_banks * 8,
            mirroring,
            if has_battery { ", battery" } else { "" }
        );

        Ok(Cartridge {
            prg_rom: bytes[prg_start..chr_start].to_vec(),
            chr_rom: bytes[chr_start..chr_end].to_vec(),
            sram: vec![0; SRAM_SIZE],
            mirroring,
            has_battery,
        })
    }

    /// Load a cartridge from a `.nes` file on disk
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes)
    }

    /// Read a byte from PRG-ROM space ($8000-$FFFF, offset relative to $8000)
    ///
    /// 16KB images mirror into the upper bank through the modulo.
    #[inline]
    pub fn read_prg(&self, offset: u16) -> u8 {
        self.prg_rom[offset as usize % self.prg_rom.len()]
    }

    /// Read a byte from the SRAM bank ($6000-$7FFF, offset relative to $6000)
    #[inline]
    pub fn read_sram(&self, offset: u16) -> u8 {
        self.sram[offset as usize % SRAM_SIZE]
    }

    /// Write a byte to the SRAM bank ($6000-$7FFF, offset relative to $6000)
    #[inline]
    pub fn write_sram(&mut self, offset: u16, data: u8) {
        self.sram[offset as usize % SRAM_SIZE] = data;
    }
}
