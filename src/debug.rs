// Debug module - disassembler and CPU trace formatting
//
// The trace format follows the common nestest log layout so runs can be
// diffed against reference logs.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::OPCODE_TABLE;
use crate::cpu::Cpu;

/// One disassembled instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Address of the opcode byte
    pub address: u16,
    /// Raw instruction bytes (1-3)
    pub bytes: Vec<u8>,
    /// Mnemonic, e.g. "LDA"
    pub mnemonic: &'static str,
    /// Formatted operand, e.g. "#$42" or "($20),Y"
    pub operand: String,
}

impl DisassembledInstruction {
    /// Total instruction length in bytes
    pub fn length(&self) -> u16 {
        self.bytes.len() as u16
    }
}

impl std::fmt::Display for DisassembledInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.operand.is_empty() {
            write!(f, "{}", self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, self.operand)
        }
    }
}

/// Operand byte count for an addressing mode
fn operand_length(mode: AddressingMode) -> u16 {
    match mode {
        AddressingMode::Implied | AddressingMode::Accumulator => 0,
        AddressingMode::Immediate
        | AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::ZeroPageY
        | AddressingMode::Relative
        | AddressingMode::IndirectX
        | AddressingMode::IndirectY => 1,
        AddressingMode::Absolute
        | AddressingMode::AbsoluteX
        | AddressingMode::AbsoluteY
        | AddressingMode::Indirect => 2,
    }
}

/// Disassemble the instruction at `addr`
///
/// Undefined opcodes disassemble as `???` with a single byte so a trace
/// can keep going past them.
pub fn disassemble_instruction(bus: &mut Bus, addr: u16) -> DisassembledInstruction {
    let opcode = bus.read(addr);
    let info = &OPCODE_TABLE[opcode as usize];

    let mut bytes = vec![opcode];
    for i in 0..operand_length(info.mode) {
        bytes.push(bus.read(addr.wrapping_add(1 + i)));
    }

    let operand = match info.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${:02X}", bytes[1]),
        AddressingMode::ZeroPage => format!("${:02X}", bytes[1]),
        AddressingMode::ZeroPageX => format!("${:02X},X", bytes[1]),
        AddressingMode::ZeroPageY => format!("${:02X},Y", bytes[1]),
        AddressingMode::Relative => {
            let offset = bytes[1] as i8;
            let target = addr.wrapping_add(2).wrapping_add(offset as i16 as u16);
            format!("${:04X}", target)
        }
        AddressingMode::Absolute => {
            format!("${:04X}", u16::from_le_bytes([bytes[1], bytes[2]]))
        }
        AddressingMode::AbsoluteX => {
            format!("${:04X},X", u16::from_le_bytes([bytes[1], bytes[2]]))
        }
        AddressingMode::AbsoluteY => {
            format!("${:04X},Y", u16::from_le_bytes([bytes[1], bytes[2]]))
        }
        AddressingMode::Indirect => {
            format!("(${:04X})", u16::from_le_bytes([bytes[1], bytes[2]]))
        }
        AddressingMode::IndirectX => format!("(${:02X},X)", bytes[1]),
        AddressingMode::IndirectY => format!("(${:02X}),Y", bytes[1]),
    };

    DisassembledInstruction {
        address: addr,
        bytes,
        mnemonic: info.name,
        operand,
    }
}

/// Format one nestest-style trace line for the instruction at PC
///
/// ```text
/// C000  4C F5 C5  JMP $C5F5      A:00 X:00 Y:00 P:24 SP:FD CYC:7
/// ```
pub fn trace_line(cpu: &Cpu, bus: &mut Bus) -> String {
    let inst = disassemble_instruction(bus, cpu.pc);

    let raw: Vec<String> = inst.bytes.iter().map(|b| format!("{:02X}", b)).collect();

    format!(
        "{:04X}  {:<8}  {:<14} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        inst.address,
        raw.join(" "),
        inst.to_string(),
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status,
        cpu.sp,
        cpu.cycles
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{Cartridge, Mirroring};
    use crate::input::Controller;
    use crate::ppu::Ppu;
    use crate::ram::Wram;

    struct Parts {
        wram: Wram,
        cart: Cartridge,
        ppu: Ppu,
        controller: Controller,
    }

    impl Parts {
        fn new() -> Self {
            Parts {
                wram: Wram::new(),
                cart: Cartridge {
                    prg_rom: vec![0; 0x4000],
                    chr_rom: vec![0; 0x2000],
                    sram: vec![0; 0x2000],
                    mirroring: Mirroring::Horizontal,
                    has_battery: false,
                },
                ppu: Ppu::new(&[], Mirroring::Horizontal),
                controller: Controller::new(),
            }
        }

        fn bus(&mut self) -> Bus<'_> {
            Bus::new(
                &mut self.wram,
                &mut self.cart,
                &mut self.ppu,
                &mut self.controller,
            )
        }
    }

    #[test]
    fn test_disassemble_immediate() {
        let mut parts = Parts::new();
        let mut bus = parts.bus();
        bus.write(0x0200, 0xA9);
        bus.write(0x0201, 0x42);

        let inst = disassemble_instruction(&mut bus, 0x0200);
        assert_eq!(inst.mnemonic, "LDA");
        assert_eq!(inst.operand, "#$42");
        assert_eq!(inst.length(), 2);
        assert_eq!(inst.to_string(), "LDA #$42");
    }

    #[test]
    fn test_disassemble_absolute_and_indirect() {
        let mut parts = Parts::new();
        let mut bus = parts.bus();
        bus.write(0x0200, 0x4C); // JMP $C5F5
        bus.write(0x0201, 0xF5);
        bus.write(0x0202, 0xC5);
        bus.write(0x0203, 0x6C); // JMP ($10FF)
        bus.write(0x0204, 0xFF);
        bus.write(0x0205, 0x10);

        assert_eq!(
            disassemble_instruction(&mut bus, 0x0200).to_string(),
            "JMP $C5F5"
        );
        assert_eq!(
            disassemble_instruction(&mut bus, 0x0203).to_string(),
            "JMP ($10FF)"
        );
    }

    #[test]
    fn test_disassemble_relative_shows_target() {
        let mut parts = Parts::new();
        let mut bus = parts.bus();
        bus.write(0x0200, 0xD0); // BNE +4
        bus.write(0x0201, 0x04);

        let inst = disassemble_instruction(&mut bus, 0x0200);
        assert_eq!(inst.to_string(), "BNE $0206");
    }

    #[test]
    fn test_disassemble_undefined_opcode() {
        let mut parts = Parts::new();
        let mut bus = parts.bus();
        bus.write(0x0200, 0x03);

        let inst = disassemble_instruction(&mut bus, 0x0200);
        assert_eq!(inst.mnemonic, "???");
        assert_eq!(inst.length(), 1);
    }

    #[test]
    fn test_trace_line_layout() {
        let mut parts = Parts::new();
        let mut cpu = Cpu::new();
        cpu.pc = 0x0200;
        cpu.cycles = 7;

        let mut bus = parts.bus();
        bus.write(0x0200, 0xEA);

        let line = trace_line(&cpu, &mut bus);
        assert!(line.starts_with("0200  EA"));
        assert!(line.contains("NOP"));
        assert!(line.contains("A:00 X:00 Y:00 P:24 SP:FD CYC:7"));
    }
}
