// Save states
//
// Serializes the complete machine state to slot-numbered JSON files.
// The PPU's per-frame caches (tile rows, sprite prefetch) are derived
// state and are rebuilt during the next frame, so only registers,
// counters and memories are stored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Nes;
use crate::cpu::Interrupt;

/// Bump when the snapshot layout changes
const SAVE_STATE_VERSION: u32 = 1;

/// Errors from save-state operations
#[derive(Debug)]
pub enum SaveStateError {
    /// I/O error
    Io(io::Error),

    /// JSON encoding/decoding error
    Serialization(serde_json::Error),

    /// The file was written by an incompatible version
    IncompatibleVersion(u32),
}

impl std::fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "I/O error: {}", e),
            SaveStateError::Serialization(e) => write!(f, "serialization error: {}", e),
            SaveStateError::IncompatibleVersion(v) => {
                write!(f, "incompatible save state version {}", v)
            }
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

impl From<serde_json::Error> for SaveStateError {
    fn from(e: serde_json::Error) -> Self {
        SaveStateError::Serialization(e)
    }
}

/// CPU register snapshot
#[derive(Debug, Serialize, Deserialize)]
struct CpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,
    cycles: u64,
}

/// PPU register and counter snapshot
#[derive(Debug, Serialize, Deserialize)]
struct PpuState {
    ppuctrl: u8,
    ppumask: u8,
    ppustatus: u8,
    oam_addr: u8,
    scroll_x: u8,
    scroll_y: u8,
    addr: u16,
    write_latch: bool,
    read_buffer: u8,
    dot: u64,
    scanline: u16,
}

/// Complete machine snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveState {
    version: u32,
    cpu: CpuState,
    ppu: PpuState,
    wram: Vec<u8>,
    vram: Vec<u8>,
    oam: Vec<u8>,
    sram: Vec<u8>,
}

impl SaveState {
    /// Capture the current machine state
    pub fn from_nes(nes: &Nes) -> Self {
        let cpu = nes.cpu();
        let ppu = nes.ppu();

        SaveState {
            version: SAVE_STATE_VERSION,
            cpu: CpuState {
                a: cpu.a,
                x: cpu.x,
                y: cpu.y,
                sp: cpu.sp,
                pc: cpu.pc,
                status: cpu.status,
                cycles: cpu.cycles,
            },
            ppu: PpuState {
                ppuctrl: ppu.ppuctrl,
                ppumask: ppu.ppumask,
                ppustatus: ppu.ppustatus,
                oam_addr: ppu.oam_addr,
                scroll_x: ppu.scroll_x,
                scroll_y: ppu.scroll_y,
                addr: ppu.addr,
                write_latch: ppu.write_latch,
                read_buffer: ppu.read_buffer,
                dot: ppu.dot,
                scanline: ppu.scanline,
            },
            wram: nes.wram().as_slice().to_vec(),
            vram: ppu.vram.as_slice().to_vec(),
            oam: ppu.oam.to_vec(),
            sram: nes.cartridge_sram().to_vec(),
        }
    }

    /// Restore this snapshot into a running machine
    pub fn restore_to(&self, nes: &mut Nes) -> Result<(), SaveStateError> {
        if self.version != SAVE_STATE_VERSION {
            return Err(SaveStateError::IncompatibleVersion(self.version));
        }

        {
            let cpu = nes.cpu_mut();
            cpu.a = self.cpu.a;
            cpu.x = self.cpu.x;
            cpu.y = self.cpu.y;
            cpu.sp = self.cpu.sp;
            cpu.pc = self.cpu.pc;
            cpu.status = self.cpu.status;
            cpu.cycles = self.cpu.cycles;
            cpu.pending_interrupt = Interrupt::None;
        }

        {
            let ppu = nes.ppu_mut();
            ppu.ppuctrl = self.ppu.ppuctrl;
            ppu.ppumask = self.ppu.ppumask;
            ppu.ppustatus = self.ppu.ppustatus;
            ppu.oam_addr = self.ppu.oam_addr;
            ppu.scroll_x = self.ppu.scroll_x;
            ppu.scroll_y = self.ppu.scroll_y;
            ppu.addr = self.ppu.addr;
            ppu.write_latch = self.ppu.write_latch;
            ppu.read_buffer = self.ppu.read_buffer;
            ppu.dot = self.ppu.dot;
            ppu.scanline = self.ppu.scanline;
            ppu.vram.copy_from_slice(&self.vram);
            ppu.oam.copy_from_slice(&self.oam);
        }

        nes.wram_mut().copy_from_slice(&self.wram);
        nes.cartridge_sram_mut().copy_from_slice(&self.sram);

        log::info!("restored save state at PC={:#06X}", self.cpu.pc);
        Ok(())
    }

    /// Write this snapshot to a slot file
    pub fn save_to_file(&self, slot: u8, rom_path: Option<&Path>) -> Result<(), SaveStateError> {
        let dir = save_directory(rom_path);
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("slot_{}.json", slot));
        let json = serde_json::to_string(self)?;
        fs::write(&path, json)?;

        log::info!("saved state to {}", path.display());
        Ok(())
    }

    /// Read a snapshot back from a slot file
    pub fn load_from_file(slot: u8, rom_path: Option<&Path>) -> Result<Self, SaveStateError> {
        let path = save_directory(rom_path).join(format!("slot_{}.json", slot));
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Per-ROM save directory: saves/<rom_name>/
fn save_directory(rom_path: Option<&Path>) -> PathBuf {
    let base = PathBuf::from("saves");
    match rom_path.and_then(|p| p.file_stem()) {
        Some(stem) => base.join(stem),
        None => base.join("default"),
    }
}
