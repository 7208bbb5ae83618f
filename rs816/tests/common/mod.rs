#![allow(dead_code)]

use rs816::bus::{Addr24, Bus};
use rs816::cpu::Status;
use rs816::device::Device;

/// Flat RAM over the whole 24-bit space. Bank 0 starts filled with NOPs
/// so stray execution is harmless; everything else is zero until written.
pub struct FlatBus {
    ram: Vec<u8>,
}

impl FlatBus {
    pub fn new() -> Self {
        let mut ram = vec![0u8; 0x100_0000];
        ram[..0x1_0000].fill(0xea);
        Self { ram }
    }

    pub fn poke(&mut self, bank: u8, addr: u16, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            let addr = Addr24::new(bank, addr.wrapping_add(i as u16));
            self.ram[addr.to_u32() as usize] = *byte;
        }
    }

    pub fn peek(&self, bank: u8, addr: u16) -> u8 {
        self.ram[Addr24::new(bank, addr).to_u32() as usize]
    }

    pub fn peek16(&self, bank: u8, addr: u16) -> u16 {
        u16::from_le_bytes([self.peek(bank, addr), self.peek(bank, addr.wrapping_add(1))])
    }
}

impl Bus for FlatBus {
    fn read(&mut self, addr: Addr24) -> u8 {
        self.ram[addr.to_u32() as usize]
    }

    fn write(&mut self, addr: Addr24, value: u8) {
        self.ram[addr.to_u32() as usize] = value;
    }
}

/// A reset device with `program` placed at the 00:8000 entry point
pub fn device_with_program(program: &[u8]) -> Device<FlatBus> {
    let mut bus = FlatBus::new();
    bus.poke(0, 0x8000, program);
    let mut device = Device::new(bus);
    device.reset();
    device
}

/// Leave emulation mode, keeping the 8-bit width flags set
pub fn enter_native(device: &mut Device<FlatBus>) {
    device.cpu.regs.is_emulation = false;
}

/// Native mode with a 16-bit accumulator
pub fn enter_native_a16(device: &mut Device<FlatBus>) {
    enter_native(device);
    device.cpu.regs.status &= !Status::MEMORY_WIDTH;
}

/// Native mode with 16-bit index registers
pub fn enter_native_idx16(device: &mut Device<FlatBus>) {
    enter_native(device);
    device.cpu.regs.status &= !Status::INDEX_WIDTH;
}

/// Native mode with everything 16-bit
pub fn enter_native_wide(device: &mut Device<FlatBus>) {
    enter_native(device);
    device.cpu.regs.status &= !(Status::MEMORY_WIDTH | Status::INDEX_WIDTH);
}

pub fn flag(device: &Device<FlatBus>, flag: Status) -> bool {
    device.cpu.regs.status.has(flag)
}

/// Step until the program counter reaches `addr` or `max_steps` runs out
pub fn step_until_pc(device: &mut Device<FlatBus>, addr: u16, max_steps: u32) {
    for _ in 0..max_steps {
        if device.cpu.regs.pc.addr >= addr {
            return;
        }
        device.step();
    }
    panic!(
        "program did not reach {:04x} within {} steps (pc = {})",
        addr, max_steps, device.cpu.regs.pc
    );
}
