// RAM module - CPU work RAM (WRAM)
//
// The NES has 2KB of internal RAM at $0000-$07FF, mirrored three times
// through $1FFF. Mirroring is baked into the load/store path with a mask,
// so any address in $0000-$1FFF resolves to the same 2KB array.
//
// # Memory Layout
//
// ```text
// $0000-$07FF: 2KB internal RAM (physical)
// $0800-$0FFF: Mirror of $0000-$07FF
// $1000-$17FF: Mirror of $0000-$07FF
// $1800-$1FFF: Mirror of $0000-$07FF
// ```
//
// Zero page ($0000-$00FF) and the hardware stack ($0100-$01FF) both live in
// this array.

/// Size of the work RAM in bytes (2KB)
const WRAM_SIZE: usize = 0x0800;

/// Mask applied to CPU addresses to fold the mirrors onto the 2KB array
const WRAM_MIRROR_MASK: u16 = 0x07FF;

/// 2KB CPU work RAM with modular mirroring
#[derive(Clone)]
pub struct Wram {
    memory: [u8; WRAM_SIZE],
}

impl Wram {
    /// Create a new zero-filled WRAM
    pub fn new() -> Self {
        Wram {
            memory: [0x00; WRAM_SIZE],
        }
    }

    /// Read a byte; any address in $0000-$1FFF is accepted
    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & WRAM_MIRROR_MASK) as usize]
    }

    /// Write a byte; any address in $0000-$1FFF is accepted
    #[inline]
    pub fn write(&mut self, addr: u16, data: u8) {
        self.memory[(addr & WRAM_MIRROR_MASK) as usize] = data;
    }

    /// View the raw 2KB array (save states)
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }

    /// Overwrite the raw 2KB array (save states)
    ///
    /// # Panics
    /// Panics if `data` is not exactly 2KB.
    pub fn copy_from_slice(&mut self, data: &[u8]) {
        self.memory.copy_from_slice(data);
    }
}

impl Default for Wram {
    fn default() -> Self {
        Self::new()
    }
}
