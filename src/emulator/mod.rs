// Emulator module - top-level container and frame loop
//
// `Nes` owns every component as a sibling: CPU, PPU, WRAM, cartridge,
// controller and the output frame buffer. Each CPU step borrows them
// through a fresh `Bus` view; the PPU then advances three dots per CPU
// cycle and its NMI output is latched into the CPU's pending slot.

mod config;
mod save_state;
mod screenshot;

pub use config::{EmulatorConfig, RunConfig, ScreenshotConfig, VideoConfig};
pub use save_state::{SaveState, SaveStateError};
pub use screenshot::{save_screenshot, ScreenshotError};

use std::path::{Path, PathBuf};

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::{Cpu, Interrupt};
use crate::display::FrameBuffer;
use crate::input::Controller;
use crate::ppu::Ppu;
use crate::ram::Wram;

/// Errors from emulator control operations
#[derive(Debug)]
pub enum EmulatorError {
    /// The cartridge carries no PRG-ROM to fetch the reset vector from
    NoPrgRom,
}

impl std::fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmulatorError::NoPrgRom => write!(f, "cartridge has no PRG-ROM"),
        }
    }
}

impl std::error::Error for EmulatorError {}

/// The emulator: all components owned side by side
pub struct Nes {
    cpu: Cpu,
    ppu: Ppu,
    wram: Wram,
    cartridge: Cartridge,
    controller: Controller,
    frame: FrameBuffer,
}

impl Nes {
    /// Build a console around a loaded cartridge
    ///
    /// The PPU's pattern tables are preloaded from the cartridge CHR
    /// data and its nametable mirroring follows the cartridge header.
    pub fn new(cartridge: Cartridge) -> Self {
        let ppu = Ppu::new(&cartridge.chr_rom, cartridge.mirroring);
        Nes {
            cpu: Cpu::new(),
            ppu,
            wram: Wram::new(),
            cartridge,
            controller: Controller::new(),
            frame: FrameBuffer::new(),
        }
    }

    /// Power-on reset
    ///
    /// Loads PC from the reset vector at $FFFC, sets SP to 0xFD and P to
    /// 0x24.
    pub fn init(&mut self) -> Result<(), EmulatorError> {
        if self.cartridge.prg_rom.is_empty() {
            return Err(EmulatorError::NoPrgRom);
        }

        let mut bus = Bus::new(
            &mut self.wram,
            &mut self.cartridge,
            &mut self.ppu,
            &mut self.controller,
        );
        self.cpu.reset(&mut bus);
        log::info!("reset: PC={:#06X}", self.cpu.pc);
        Ok(())
    }

    /// Execute one CPU instruction and advance the PPU three dots per
    /// CPU cycle
    ///
    /// Returns true when this step completed a frame, at which point the
    /// RGBA buffer has been refreshed.
    pub fn step(&mut self) -> bool {
        let mut bus = Bus::new(
            &mut self.wram,
            &mut self.cartridge,
            &mut self.ppu,
            &mut self.controller,
        );
        let cycles = self.cpu.step(&mut bus);

        let mut nmi = false;
        let frame_done = self.ppu.step(cycles as u64, &mut nmi);
        if nmi {
            self.cpu.request_interrupt(Interrupt::Nmi);
        }

        if frame_done {
            self.frame.render(
                self.ppu.tiles(),
                self.ppu.sprites(),
                self.ppu.frame_palette(),
            );
        }
        frame_done
    }

    /// Run until the PPU completes one frame (~60Hz)
    pub fn step_frame(&mut self) {
        while !self.step() {}
    }

    /// The current 256x240x4 RGBA frame
    pub fn frame_buffer(&self) -> &[u8] {
        self.frame.as_bytes()
    }

    /// Set the controller snapshot for the next frames (order: A, B,
    /// Select, Start, Up, Down, Left, Right)
    pub fn push_buttons(&mut self, buttons: [bool; 8]) {
        self.controller.set_buttons(buttons);
    }

    /// Read a byte through the bus (debugger and test access)
    pub fn read(&mut self, addr: u16) -> u8 {
        let mut bus = Bus::new(
            &mut self.wram,
            &mut self.cartridge,
            &mut self.ppu,
            &mut self.controller,
        );
        bus.read(addr)
    }

    /// Write a byte through the bus (debugger and test access)
    pub fn write(&mut self, addr: u16, data: u8) {
        let mut bus = Bus::new(
            &mut self.wram,
            &mut self.cartridge,
            &mut self.ppu,
            &mut self.controller,
        );
        bus.write(addr, data);
    }

    /// Save the machine state to a slot file next to the ROM
    pub fn save_state(&self, slot: u8, rom_path: Option<&Path>) -> Result<(), SaveStateError> {
        SaveState::from_nes(self).save_to_file(slot, rom_path)
    }

    /// Restore the machine state from a slot file
    pub fn load_state(&mut self, slot: u8, rom_path: Option<&Path>) -> Result<(), SaveStateError> {
        SaveState::load_from_file(slot, rom_path)?.restore_to(self)
    }

    /// Dump the current frame as a PNG screenshot
    pub fn screenshot(&self, rom_path: Option<&Path>) -> Result<PathBuf, ScreenshotError> {
        screenshot::save_screenshot(self.frame.as_bytes(), rom_path)
    }

    /// Reference to the CPU
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable reference to the CPU
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Reference to the PPU
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Mutable reference to the PPU
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub(crate) fn wram(&self) -> &Wram {
        &self.wram
    }

    pub(crate) fn wram_mut(&mut self) -> &mut Wram {
        &mut self.wram
    }

    pub(crate) fn cartridge_sram(&self) -> &[u8] {
        &self.cartridge.sram
    }

    pub(crate) fn cartridge_sram_mut(&mut self) -> &mut [u8] {
        &mut self.cartridge.sram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Mirroring;

    /// A cartridge whose reset vector points at an endless NOP loop
    fn nop_cartridge() -> Cartridge {
        let mut prg = vec![0xEA; 0x4000]; // NOP sled
        prg[0x3FFC] = 0x00; // reset vector -> $8000
        prg[0x3FFD] = 0x80;
        Cartridge {
            prg_rom: prg,
            chr_rom: vec![0; 0x2000],
            sram: vec![0; 0x2000],
            mirroring: Mirroring::Horizontal,
            has_battery: false,
        }
    }

    #[test]
    fn test_init_loads_reset_vector() {
        let mut nes = Nes::new(nop_cartridge());
        nes.init().expect("init should succeed");

        assert_eq!(nes.cpu().pc, 0x8000);
        assert_eq!(nes.cpu().sp, 0xFD);
        assert_eq!(nes.cpu().status, 0x24);
    }

    #[test]
    fn test_init_without_prg_fails() {
        let mut cart = nop_cartridge();
        cart.prg_rom.clear();

        let mut nes = Nes::new(cart);
        assert!(matches!(nes.init(), Err(EmulatorError::NoPrgRom)));
    }

    #[test]
    fn test_step_frame_produces_a_frame() {
        let mut nes = Nes::new(nop_cartridge());
        nes.init().unwrap();

        nes.step_frame();

        assert_eq!(nes.frame_buffer().len(), 256 * 240 * 4);
        // One frame is 262 scanlines of 341 dots at 3 dots per cycle
        assert!(nes.cpu().cycles >= 262 * 341 / 3);
    }

    #[test]
    fn test_step_frame_raises_nmi_when_enabled() {
        let mut nes = Nes::new(nop_cartridge());
        nes.init().unwrap();

        nes.write(0x2000, 0x80); // enable NMI generation
        nes.step_frame();

        // The NMI fired and was serviced through the (zeroed) NMI vector
        // is invisible here, but the pending slot must be drained within
        // the frame that raised it plus one instruction
        nes.step_frame();
        assert_eq!(nes.cpu().pending_interrupt, Interrupt::None);
    }

    #[test]
    fn test_bus_helpers_reach_wram() {
        let mut nes = Nes::new(nop_cartridge());
        nes.write(0x0005, 0xAB);

        assert_eq!(nes.read(0x0005), 0xAB);
        assert_eq!(nes.read(0x0805), 0xAB, "mirror");
    }

    #[test]
    fn test_push_buttons_reaches_controller() {
        let mut nes = Nes::new(nop_cartridge());
        nes.push_buttons([true, false, false, false, false, false, false, false]);

        nes.write(0x4016, 1);
        nes.write(0x4016, 0);
        assert_eq!(nes.read(0x4016) & 1, 1);
    }
}
