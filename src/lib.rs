// NES Emulator Core Library
// Cycle-stepped emulation of the NES: 6502 CPU, PPU, bus, cartridge, input

// Public modules
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod debug;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;
pub mod ram;

// Re-export main types for convenience
pub use bus::Bus;
pub use cartridge::{Cartridge, CartridgeError, Mirroring};
pub use cpu::{Cpu, Interrupt};
pub use debug::{disassemble_instruction, trace_line, DisassembledInstruction};
pub use display::{FrameBuffer, SYSTEM_PALETTE};
pub use emulator::{EmulatorConfig, EmulatorError, Nes, SaveState, SaveStateError};
pub use input::Controller;
pub use ppu::Ppu;
pub use ram::Wram;
