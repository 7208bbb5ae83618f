//! Host-side memory map stub
//!
//! A simplified SNES-like layout: work RAM in banks 7e/7f with the usual
//! low mirror, save RAM in the 6000-7fff window of the mirrored banks and
//! a flat ROM image everywhere else. The hardware-register window is not
//! modeled and reads as open bus.

use crate::bus::{Addr24, Bus};
use core::fmt;
use save_state::{InSaveState, SaveStateDeserializer, SaveStateSerializer};

const WRAM_SIZE: usize = 0x20000;
const SRAM_SIZE: usize = 0x8000;
const OPEN_BUS: u8 = 0xff;

#[derive(Debug)]
pub enum LoadRomError {
    Empty,
}

impl fmt::Display for LoadRomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "ROM image is empty"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Memory {
    wram: Vec<u8>,
    sram: Vec<u8>,
    rom: Vec<u8>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            wram: vec![0; WRAM_SIZE],
            sram: vec![0; SRAM_SIZE],
            rom: Vec::new(),
        }
    }

    /// Install a flat ROM image. Addresses that map to ROM are reduced
    /// modulo the image length, so any non-empty size works.
    pub fn load_rom(&mut self, image: Vec<u8>) -> Result<(), LoadRomError> {
        if image.is_empty() {
            return Err(LoadRomError::Empty);
        }
        self.rom = image;
        Ok(())
    }

    /// Clear the RAM regions, keeping the ROM image
    pub fn reset(&mut self) {
        self.wram.fill(0);
        self.sram.fill(0);
    }

    fn read_rom(&self, addr: Addr24) -> u8 {
        if self.rom.is_empty() {
            OPEN_BUS
        } else {
            self.rom[addr.to_u32() as usize % self.rom.len()]
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for Memory {
    fn read(&mut self, addr: Addr24) -> u8 {
        match addr.bank {
            0x7e..=0x7f => self.wram[((addr.bank as usize & 1) << 16) | addr.addr as usize],
            0x00..=0x3f | 0x80..=0xbf => match addr.addr {
                0x0000..=0x1fff => self.wram[addr.addr as usize],
                // hardware register window, not modeled
                0x2000..=0x5fff => OPEN_BUS,
                0x6000..=0x7fff => self.sram[(addr.addr - 0x6000) as usize],
                0x8000..=0xffff => self.read_rom(addr),
            },
            _ => self.read_rom(addr),
        }
    }

    fn write(&mut self, addr: Addr24, value: u8) {
        match addr.bank {
            0x7e..=0x7f => {
                self.wram[((addr.bank as usize & 1) << 16) | addr.addr as usize] = value
            }
            0x00..=0x3f | 0x80..=0xbf => match addr.addr {
                0x0000..=0x1fff => self.wram[addr.addr as usize] = value,
                0x6000..=0x7fff => self.sram[(addr.addr - 0x6000) as usize] = value,
                // hardware window and ROM ignore writes
                _ => {}
            },
            _ => {}
        }
    }
}

// The ROM image comes from the host's file, so snapshots carry the RAM
// contents only.
impl InSaveState for Memory {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        self.wram.serialize(state);
        self.sram.serialize(state);
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        self.wram.deserialize(state);
        self.sram.deserialize(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wram_read_after_write() {
        let mut memory = Memory::new();
        memory.write(Addr24::new(0x7e, 0x0000), 0x42);
        assert_eq!(memory.read(Addr24::new(0x7e, 0x0000)), 0x42);
        memory.write(Addr24::new(0x7e, 0x0100), 0xab);
        assert_eq!(memory.read(Addr24::new(0x7e, 0x0100)), 0xab);
    }

    #[test]
    fn low_wram_mirror() {
        let mut memory = Memory::new();
        memory.write(Addr24::new(0x00, 0x0000), 0x55);
        assert_eq!(memory.read(Addr24::new(0x00, 0x0000)), 0x55);
        // the first 8 KiB of bank 7e appear in every mirrored bank
        assert_eq!(memory.read(Addr24::new(0x01, 0x0000)), 0x55);
        assert_eq!(memory.read(Addr24::new(0x80, 0x0000)), 0x55);
    }

    #[test]
    fn bank_7f_is_the_upper_wram_half() {
        let mut memory = Memory::new();
        memory.write(Addr24::new(0x7f, 0x0000), 0x99);
        assert_eq!(memory.read(Addr24::new(0x7f, 0x0000)), 0x99);
        assert_eq!(memory.read(Addr24::new(0x7e, 0x0000)), 0x00);
    }

    #[test]
    fn sram_window() {
        let mut memory = Memory::new();
        memory.write(Addr24::new(0x00, 0x6000), 0x77);
        assert_eq!(memory.read(Addr24::new(0x00, 0x6000)), 0x77);
        assert_eq!(memory.read(Addr24::new(0x80, 0x6000)), 0x77);
    }

    #[test]
    fn rom_reads_and_ignores_writes() {
        let mut memory = Memory::new();
        let mut image = vec![0u8; 0x10000];
        image[0x8000] = 0x99;
        memory.load_rom(image).unwrap();
        assert_eq!(memory.read(Addr24::new(0x00, 0x8000)), 0x99);
        memory.write(Addr24::new(0x00, 0x8000), 0x11);
        assert_eq!(memory.read(Addr24::new(0x00, 0x8000)), 0x99);
    }

    #[test]
    fn hardware_window_is_open_bus() {
        let mut memory = Memory::new();
        memory.write(Addr24::new(0x00, 0x2100), 0x12);
        assert_eq!(memory.read(Addr24::new(0x00, 0x2100)), 0xff);
    }

    #[test]
    fn empty_rom_is_rejected() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.load_rom(Vec::new()),
            Err(LoadRomError::Empty)
        ));
        assert_eq!(memory.read(Addr24::new(0x40, 0x0000)), 0xff);
    }
}
