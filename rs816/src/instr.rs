//! Instruction decoding and execution
//!
//! One dispatch arm per opcode, in the manner of the classic dense-table
//! interpreters: a 256-entry base cycle table holds each opcode's 8-bit
//! cost, and executors add one cycle in their 16-bit paths. Opcodes the
//! processor family does not define execute as two-cycle no-ops.

use crate::bus::{Addr24, Bus};
use crate::cpu::Status;
use crate::device::{vectors, Device};
use crate::timing::Cycles;

#[rustfmt::skip]
static CYCLES: [Cycles; 256] = [
    /* ^0 ^1 ^2 ^3 ^4 ^5 ^6 ^7 | ^8 ^9 ^a ^b ^c ^d ^e ^f */
       7, 6, 7, 2, 5, 3, 5, 2,   3, 2, 2, 4, 6, 4, 6, 2,  // 0^
       2, 5, 2, 2, 5, 4, 6, 2,   2, 4, 2, 2, 6, 4, 7, 2,  // 1^
       6, 6, 2, 2, 3, 3, 5, 2,   4, 2, 2, 5, 4, 4, 6, 2,  // 2^
       2, 5, 2, 2, 4, 4, 6, 2,   2, 4, 2, 2, 4, 4, 7, 2,  // 3^
       6, 6, 2, 2, 7, 3, 5, 2,   3, 2, 2, 3, 3, 4, 6, 2,  // 4^
       2, 5, 2, 2, 7, 4, 6, 2,   2, 4, 3, 2, 2, 4, 7, 2,  // 5^
       6, 6, 2, 2, 3, 3, 5, 2,   4, 2, 2, 2, 5, 4, 6, 2,  // 6^
       2, 5, 2, 2, 4, 4, 6, 2,   2, 4, 4, 2, 6, 4, 7, 2,  // 7^
       2, 6, 2, 2, 3, 3, 3, 2,   2, 2, 2, 3, 4, 4, 4, 2,  // 8^
       2, 6, 2, 2, 4, 4, 4, 2,   2, 5, 2, 2, 4, 5, 5, 2,  // 9^
       2, 6, 2, 2, 3, 3, 3, 2,   2, 2, 2, 4, 4, 4, 4, 2,  // a^
       2, 5, 2, 2, 4, 4, 4, 2,   2, 4, 2, 2, 4, 4, 4, 2,  // b^
       2, 6, 3, 2, 3, 3, 5, 2,   2, 2, 2, 3, 4, 4, 6, 2,  // c^
       2, 5, 2, 2, 2, 4, 6, 2,   2, 4, 3, 3, 2, 4, 7, 2,  // d^
       2, 6, 3, 2, 3, 3, 5, 2,   2, 2, 2, 2, 4, 4, 6, 2,  // e^
       2, 5, 2, 2, 2, 4, 6, 2,   2, 4, 4, 2, 2, 4, 7, 2,  // f^
];

/// Addressing modes resolving to a data address.
///
/// Each mode is a pure function from the operand bytes at the program
/// counter (plus registers) to a 24-bit effective address; resolving one
/// consumes its operand. The two JMP-only indirect forms are handled in
/// their dispatch arms since they produce a new program counter rather
/// than a data address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// Operand bytes follow the opcode; the consumer's width decides how
    /// many
    Immediate,
    /// 16-bit address in the data bank
    Absolute,
    /// 16-bit address plus X, wrapping inside the data bank
    AbsoluteX,
    /// 16-bit address plus Y, wrapping inside the data bank
    AbsoluteY,
    /// 8-bit offset into the direct page (bank 0)
    Direct,
    /// Direct page plus the low byte of X
    DirectX,
    /// Direct page plus the low byte of Y
    DirectY,
    /// Pointer in the direct page indexed by X, contents are a bank-0
    /// address
    IndirectX,
    /// Pointer in the direct page, Y added linearly to the loaded address
    IndirectY,
}

impl<B: Bus> Device<B> {
    /// Resolve an addressing mode to the operand's effective address,
    /// consuming the operand bytes at the program counter. `wide` is the
    /// active width of the consuming operation; only the immediate mode's
    /// program-counter advance depends on it.
    fn operand_addr(&mut self, mode: AddrMode, wide: bool) -> Addr24 {
        match mode {
            AddrMode::Immediate => {
                let addr = self.cpu.regs.pc;
                let len = if wide { 2 } else { 1 };
                self.cpu.regs.pc.addr = self.cpu.regs.pc.addr.wrapping_add(len);
                addr
            }
            AddrMode::Absolute => {
                let abs = self.load::<u16>();
                self.cpu.data_addr(abs)
            }
            AddrMode::AbsoluteX => {
                let abs = self.load::<u16>();
                self.cpu.data_addr(abs.wrapping_add(self.cpu.regs.x))
            }
            AddrMode::AbsoluteY => {
                let abs = self.load::<u16>();
                self.cpu.data_addr(abs.wrapping_add(self.cpu.regs.y))
            }
            AddrMode::Direct => {
                let offset = self.load::<u8>();
                Addr24::new(0, self.cpu.regs.dp.wrapping_add(offset.into()))
            }
            AddrMode::DirectX => {
                let offset = self.load::<u8>();
                Addr24::new(
                    0,
                    self.cpu
                        .regs
                        .dp
                        .wrapping_add(offset.into())
                        .wrapping_add(self.cpu.regs.x & 0xff),
                )
            }
            AddrMode::DirectY => {
                let offset = self.load::<u8>();
                Addr24::new(
                    0,
                    self.cpu
                        .regs
                        .dp
                        .wrapping_add(offset.into())
                        .wrapping_add(self.cpu.regs.y & 0xff),
                )
            }
            AddrMode::IndirectX => {
                let offset = self.load::<u8>();
                let ptr = self
                    .cpu
                    .regs
                    .dp
                    .wrapping_add(offset.into())
                    .wrapping_add(self.cpu.regs.x & 0xff);
                let addr = self.read::<u16>(Addr24::new(0, ptr));
                Addr24::new(0, addr)
            }
            AddrMode::IndirectY => {
                let offset = self.load::<u8>();
                let ptr = self.cpu.regs.dp.wrapping_add(offset.into());
                let base = self.read::<u16>(Addr24::new(0, ptr));
                Addr24::from_u32(u32::from(base) + u32::from(self.cpu.regs.y))
            }
        }
    }

    /// Fetch one opcode, execute it and return the cycles taken
    pub fn dispatch_instruction(&mut self) -> Cycles {
        let op = self.load::<u8>();
        let mut cycles = CYCLES[op as usize];
        match op {
            0x00 => {
                // BRK - Software Break
                self.software_interrupt(vectors::EMU_BRK, vectors::BRK, true, &mut cycles)
            }
            0x01 => {
                // ORA - Or A with DP Indirect Indexed, X
                self.ora(AddrMode::IndirectX, &mut cycles)
            }
            0x02 => {
                // COP - Co-Processor Enable
                self.software_interrupt(vectors::EMU_COP, vectors::COP, false, &mut cycles)
            }
            0x04 => {
                // TSB - Test and Set Bits in direct page
                self.tsb(AddrMode::Direct, &mut cycles)
            }
            0x05 => {
                // ORA - Or A with direct page
                self.ora(AddrMode::Direct, &mut cycles)
            }
            0x06 => {
                // ASL - Arithmetic left shift on direct page
                self.asl_mem(AddrMode::Direct, &mut cycles)
            }
            0x08 => {
                // PHP - Push Status Register
                self.push(self.cpu.regs.status.0)
            }
            0x09 => {
                // ORA - Or A with immediate value
                self.ora(AddrMode::Immediate, &mut cycles)
            }
            0x0a => {
                // ASL - Arithmetic left shift on A
                if self.cpu.is_a8() {
                    let val = self.cpu.regs.a8();
                    let res = val << 1;
                    self.cpu.regs.status.set_if(Status::CARRY, val & 0x80 != 0);
                    self.cpu.regs.set_a8(res);
                    self.cpu.update_nz8(res);
                } else {
                    let val = self.cpu.regs.a;
                    let res = val << 1;
                    self.cpu
                        .regs
                        .status
                        .set_if(Status::CARRY, val & 0x8000 != 0);
                    self.cpu.regs.a = res;
                    self.cpu.update_nz16(res);
                }
            }
            0x0b => {
                // PHD - Push Direct Page
                self.push(self.cpu.regs.dp)
            }
            0x0c => {
                // TSB - Test and Set Bits at absolute address
                self.tsb(AddrMode::Absolute, &mut cycles)
            }
            0x0d => {
                // ORA - Or A with absolute value
                self.ora(AddrMode::Absolute, &mut cycles)
            }
            0x0e => {
                // ASL - Arithmetic left shift at absolute address
                self.asl_mem(AddrMode::Absolute, &mut cycles)
            }
            0x10 => {
                // BPL - Branch if Plus
                self.branch_near(!self.cpu.regs.status.has(Status::NEGATIVE))
            }
            0x11 => {
                // ORA - Or A with DP Indirect Indexed, Y
                self.ora(AddrMode::IndirectY, &mut cycles)
            }
            0x14 => {
                // TRB - Test and Reset Bits in direct page
                self.trb(AddrMode::Direct, &mut cycles)
            }
            0x15 => {
                // ORA - Or A with DP Indexed, X
                self.ora(AddrMode::DirectX, &mut cycles)
            }
            0x16 => {
                // ASL - Arithmetic left shift on DP Indexed, X
                self.asl_mem(AddrMode::DirectX, &mut cycles)
            }
            0x18 => {
                // CLC - Clear the Carry Flag
                self.cpu.regs.status &= !Status::CARRY
            }
            0x19 => {
                // ORA - Or A with Absolute Indexed, Y
                self.ora(AddrMode::AbsoluteY, &mut cycles)
            }
            0x1a => {
                // INC/INA - Increment A
                if self.cpu.is_a8() {
                    let a = self.cpu.regs.a8().wrapping_add(1);
                    self.cpu.regs.set_a8(a);
                    self.cpu.update_nz8(a)
                } else {
                    self.cpu.regs.a = self.cpu.regs.a.wrapping_add(1);
                    self.cpu.update_nz16(self.cpu.regs.a)
                }
            }
            0x1b => {
                // TCS - Transfer A to SP (no flags)
                self.cpu.regs.sp = self.cpu.regs.a;
                if self.cpu.regs.is_emulation {
                    self.cpu.regs.sp = (self.cpu.regs.sp & 0xff) | 0x100
                }
            }
            0x1c => {
                // TRB - Test and Reset Bits at absolute address
                self.trb(AddrMode::Absolute, &mut cycles)
            }
            0x1d => {
                // ORA - Or A with Absolute Indexed, X
                self.ora(AddrMode::AbsoluteX, &mut cycles)
            }
            0x1e => {
                // ASL - Arithmetic left shift on Absolute Indexed, X
                self.asl_mem(AddrMode::AbsoluteX, &mut cycles)
            }
            0x20 => {
                // JSR - Jump to Subroutine
                let target = self.load::<u16>();
                let ret = self.cpu.regs.pc.addr.wrapping_sub(1);
                self.push(ret);
                self.cpu.regs.pc.addr = target;
            }
            0x21 => {
                // AND - And A with DP Indirect Indexed, X
                self.and_a(AddrMode::IndirectX, &mut cycles)
            }
            0x24 => {
                // BIT - Bit test with direct page
                self.bit(AddrMode::Direct, &mut cycles)
            }
            0x25 => {
                // AND - And A with direct page
                self.and_a(AddrMode::Direct, &mut cycles)
            }
            0x26 => {
                // ROL - Rotate direct page left
                self.rol_mem(AddrMode::Direct, &mut cycles)
            }
            0x28 => {
                // PLP - Pull status
                self.cpu.regs.status = Status(self.pull::<u8>());
                self.cpu.enforce_mode_invariants();
            }
            0x29 => {
                // AND - And A with immediate value
                self.and_a(AddrMode::Immediate, &mut cycles)
            }
            0x2a => {
                // ROL - Rotate A left
                let carry_in = self.cpu.regs.status.has(Status::CARRY);
                if self.cpu.is_a8() {
                    let val = self.cpu.regs.a8();
                    let res = val << 1 | carry_in as u8;
                    self.cpu.regs.status.set_if(Status::CARRY, val & 0x80 != 0);
                    self.cpu.regs.set_a8(res);
                    self.cpu.update_nz8(res);
                } else {
                    let val = self.cpu.regs.a;
                    let res = val << 1 | carry_in as u16;
                    self.cpu
                        .regs
                        .status
                        .set_if(Status::CARRY, val & 0x8000 != 0);
                    self.cpu.regs.a = res;
                    self.cpu.update_nz16(res);
                }
            }
            0x2b => {
                // PLD - Pull Direct Page
                self.cpu.regs.dp = self.pull();
                self.cpu.update_nz16(self.cpu.regs.dp)
            }
            0x2c => {
                // BIT - Bit test with absolute value
                self.bit(AddrMode::Absolute, &mut cycles)
            }
            0x2d => {
                // AND - And A with absolute value
                self.and_a(AddrMode::Absolute, &mut cycles)
            }
            0x2e => {
                // ROL - Rotate absolute address left
                self.rol_mem(AddrMode::Absolute, &mut cycles)
            }
            0x30 => {
                // BMI - Branch if Negative Flag set
                self.branch_near(self.cpu.regs.status.has(Status::NEGATIVE))
            }
            0x31 => {
                // AND - And A with DP Indirect Indexed, Y
                self.and_a(AddrMode::IndirectY, &mut cycles)
            }
            0x34 => {
                // BIT - Bit test with DP Indexed, X
                self.bit(AddrMode::DirectX, &mut cycles)
            }
            0x35 => {
                // AND - And A with DP Indexed, X
                self.and_a(AddrMode::DirectX, &mut cycles)
            }
            0x36 => {
                // ROL - Rotate DP Indexed, X left
                self.rol_mem(AddrMode::DirectX, &mut cycles)
            }
            0x38 => {
                // SEC - Set Carry Flag
                self.cpu.regs.status |= Status::CARRY
            }
            0x39 => {
                // AND - And A with Absolute Indexed, Y
                self.and_a(AddrMode::AbsoluteY, &mut cycles)
            }
            0x3a => {
                // DEC/DEA - Decrement A
                if self.cpu.is_a8() {
                    let a = self.cpu.regs.a8().wrapping_sub(1);
                    self.cpu.regs.set_a8(a);
                    self.cpu.update_nz8(a)
                } else {
                    self.cpu.regs.a = self.cpu.regs.a.wrapping_sub(1);
                    self.cpu.update_nz16(self.cpu.regs.a)
                }
            }
            0x3b => {
                // TSC - Transfer SP to A (always 16-bit)
                self.cpu.regs.a = self.cpu.regs.sp;
                self.cpu.update_nz16(self.cpu.regs.a)
            }
            0x3c => {
                // BIT - Bit test with Absolute Indexed, X
                self.bit(AddrMode::AbsoluteX, &mut cycles)
            }
            0x3d => {
                // AND - And A with Absolute Indexed, X
                self.and_a(AddrMode::AbsoluteX, &mut cycles)
            }
            0x3e => {
                // ROL - Rotate Absolute Indexed, X left
                self.rol_mem(AddrMode::AbsoluteX, &mut cycles)
            }
            0x40 => {
                // RTI - Return from Interrupt
                self.cpu.regs.status = Status(self.pull::<u8>());
                self.cpu.enforce_mode_invariants();
                let addr = self.pull::<u16>();
                if self.cpu.regs.is_emulation {
                    self.cpu.regs.pc.addr = addr;
                } else {
                    let bank = self.pull::<u8>();
                    self.cpu.regs.pc = Addr24::new(bank, addr);
                    cycles += 1
                }
            }
            0x41 => {
                // EOR - Exclusive Or A with DP Indirect Indexed, X
                self.eor(AddrMode::IndirectX, &mut cycles)
            }
            0x42 => {
                // WDM - Reserved; consume the signature byte
                let _ = self.load::<u8>();
            }
            0x44 => {
                // MVP - Block Move Previous (one byte per step)
                self.block_move(0xffff)
            }
            0x45 => {
                // EOR - Exclusive Or A with direct page
                self.eor(AddrMode::Direct, &mut cycles)
            }
            0x46 => {
                // LSR - Logical shift right on direct page
                self.lsr_mem(AddrMode::Direct, &mut cycles)
            }
            0x48 => {
                // PHA - Push A
                if self.cpu.is_a8() {
                    self.push(self.cpu.regs.a8())
                } else {
                    self.push(self.cpu.regs.a);
                    cycles += 1
                }
            }
            0x49 => {
                // EOR - Exclusive Or A with immediate value
                self.eor(AddrMode::Immediate, &mut cycles)
            }
            0x4a => {
                // LSR - Logical shift right on A
                if self.cpu.is_a8() {
                    let val = self.cpu.regs.a8();
                    let res = val >> 1;
                    self.cpu.regs.status.set_if(Status::CARRY, val & 1 != 0);
                    self.cpu.regs.set_a8(res);
                    self.cpu.update_nz8(res);
                } else {
                    let val = self.cpu.regs.a;
                    let res = val >> 1;
                    self.cpu.regs.status.set_if(Status::CARRY, val & 1 != 0);
                    self.cpu.regs.a = res;
                    self.cpu.update_nz16(res);
                }
            }
            0x4b => {
                // PHK - Push Program Bank
                self.push(self.cpu.regs.pc.bank)
            }
            0x4c => {
                // JMP - Jump absolute
                self.cpu.regs.pc.addr = self.load()
            }
            0x4d => {
                // EOR - Exclusive Or A with absolute value
                self.eor(AddrMode::Absolute, &mut cycles)
            }
            0x4e => {
                // LSR - Logical shift right at absolute address
                self.lsr_mem(AddrMode::Absolute, &mut cycles)
            }
            0x50 => {
                // BVC - Branch if Overflow Clear
                self.branch_near(!self.cpu.regs.status.has(Status::OVERFLOW))
            }
            0x51 => {
                // EOR - Exclusive Or A with DP Indirect Indexed, Y
                self.eor(AddrMode::IndirectY, &mut cycles)
            }
            0x54 => {
                // MVN - Block Move Next (one byte per step)
                self.block_move(1)
            }
            0x55 => {
                // EOR - Exclusive Or A with DP Indexed, X
                self.eor(AddrMode::DirectX, &mut cycles)
            }
            0x56 => {
                // LSR - Logical shift right on DP Indexed, X
                self.lsr_mem(AddrMode::DirectX, &mut cycles)
            }
            0x58 => {
                // CLI - Clear the Interrupt Disable flag
                self.cpu.regs.status &= !Status::IRQ_DISABLE
            }
            0x59 => {
                // EOR - Exclusive Or A with Absolute Indexed, Y
                self.eor(AddrMode::AbsoluteY, &mut cycles)
            }
            0x5a => {
                // PHY - Push Y
                if self.cpu.is_idx8() {
                    self.push(self.cpu.regs.y8())
                } else {
                    self.push(self.cpu.regs.y);
                    cycles += 1
                }
            }
            0x5b => {
                // TCD - Transfer A to DP (always 16-bit)
                self.cpu.regs.dp = self.cpu.regs.a;
                self.cpu.update_nz16(self.cpu.regs.dp);
            }
            0x5d => {
                // EOR - Exclusive Or A with Absolute Indexed, X
                self.eor(AddrMode::AbsoluteX, &mut cycles)
            }
            0x5e => {
                // LSR - Logical shift right on Absolute Indexed, X
                self.lsr_mem(AddrMode::AbsoluteX, &mut cycles)
            }
            0x60 => {
                // RTS - Return from Subroutine
                self.cpu.regs.pc.addr = 1u16.wrapping_add(self.pull());
            }
            0x61 => {
                // ADC - Add DP Indirect Indexed, X with carry
                self.adc(AddrMode::IndirectX, &mut cycles)
            }
            0x64 => {
                // STZ - Store Zero to direct page
                self.stz(AddrMode::Direct, &mut cycles)
            }
            0x65 => {
                // ADC - Add direct page with carry
                self.adc(AddrMode::Direct, &mut cycles)
            }
            0x66 => {
                // ROR - Rotate direct page right
                self.ror_mem(AddrMode::Direct, &mut cycles)
            }
            0x68 => {
                // PLA - Pull A
                if self.cpu.is_a8() {
                    let a = self.pull();
                    self.cpu.regs.set_a8(a);
                    self.cpu.update_nz8(a);
                } else {
                    self.cpu.regs.a = self.pull();
                    self.cpu.update_nz16(self.cpu.regs.a);
                    cycles += 1
                }
            }
            0x69 => {
                // ADC - Add immediate value with carry
                self.adc(AddrMode::Immediate, &mut cycles)
            }
            0x6a => {
                // ROR - Rotate A right
                let carry_in = self.cpu.regs.status.has(Status::CARRY);
                if self.cpu.is_a8() {
                    let val = self.cpu.regs.a8();
                    let res = val >> 1 | (carry_in as u8) << 7;
                    self.cpu.regs.status.set_if(Status::CARRY, val & 1 != 0);
                    self.cpu.regs.set_a8(res);
                    self.cpu.update_nz8(res);
                } else {
                    let val = self.cpu.regs.a;
                    let res = val >> 1 | (carry_in as u16) << 15;
                    self.cpu.regs.status.set_if(Status::CARRY, val & 1 != 0);
                    self.cpu.regs.a = res;
                    self.cpu.update_nz16(res);
                }
            }
            0x6c => {
                // JMP - Jump absolute indirect
                let ptr = self.load::<u16>();
                let addr = self.cpu.data_addr(ptr);
                self.cpu.regs.pc.addr = self.read::<u16>(addr);
            }
            0x6d => {
                // ADC - Add absolute value with carry
                self.adc(AddrMode::Absolute, &mut cycles)
            }
            0x6e => {
                // ROR - Rotate absolute address right
                self.ror_mem(AddrMode::Absolute, &mut cycles)
            }
            0x70 => {
                // BVS - Branch if Overflow Set
                self.branch_near(self.cpu.regs.status.has(Status::OVERFLOW))
            }
            0x71 => {
                // ADC - Add DP Indirect Indexed, Y with carry
                self.adc(AddrMode::IndirectY, &mut cycles)
            }
            0x74 => {
                // STZ - Store Zero to DP Indexed, X
                self.stz(AddrMode::DirectX, &mut cycles)
            }
            0x75 => {
                // ADC - Add DP Indexed, X with carry
                self.adc(AddrMode::DirectX, &mut cycles)
            }
            0x76 => {
                // ROR - Rotate DP Indexed, X right
                self.ror_mem(AddrMode::DirectX, &mut cycles)
            }
            0x78 => {
                // SEI - Set the Interrupt Disable flag
                self.cpu.regs.status |= Status::IRQ_DISABLE
            }
            0x79 => {
                // ADC - Add Absolute Indexed, Y with carry
                self.adc(AddrMode::AbsoluteY, &mut cycles)
            }
            0x7a => {
                // PLY - Pull Y
                if self.cpu.is_idx8() {
                    let y = self.pull();
                    self.cpu.regs.set_y8(y);
                    self.cpu.update_nz8(y);
                } else {
                    self.cpu.regs.y = self.pull();
                    self.cpu.update_nz16(self.cpu.regs.y);
                    cycles += 1
                }
            }
            0x7b => {
                // TDC - Transfer DP to A (always 16-bit)
                self.cpu.regs.a = self.cpu.regs.dp;
                self.cpu.update_nz16(self.cpu.regs.a)
            }
            0x7c => {
                // JMP - Jump absolute indexed indirect (pointer in the
                // program bank)
                let ptr = self.load::<u16>();
                let addr = Addr24::new(
                    self.cpu.regs.pc.bank,
                    ptr.wrapping_add(self.cpu.regs.x),
                );
                self.cpu.regs.pc.addr = self.read::<u16>(addr);
            }
            0x7d => {
                // ADC - Add Absolute Indexed, X with carry
                self.adc(AddrMode::AbsoluteX, &mut cycles)
            }
            0x7e => {
                // ROR - Rotate Absolute Indexed, X right
                self.ror_mem(AddrMode::AbsoluteX, &mut cycles)
            }
            0x81 => {
                // STA - Store A to DP Indirect Indexed, X
                self.sta(AddrMode::IndirectX, &mut cycles)
            }
            0x84 => {
                // STY - Store Y to direct page
                self.sty(AddrMode::Direct, &mut cycles)
            }
            0x85 => {
                // STA - Store A to direct page
                self.sta(AddrMode::Direct, &mut cycles)
            }
            0x86 => {
                // STX - Store X to direct page
                self.stx(AddrMode::Direct, &mut cycles)
            }
            0x88 => {
                // DEY - Decrement Y
                if self.cpu.is_idx8() {
                    let y = self.cpu.regs.y8().wrapping_sub(1);
                    self.cpu.regs.set_y8(y);
                    self.cpu.update_nz8(y);
                } else {
                    self.cpu.regs.y = self.cpu.regs.y.wrapping_sub(1);
                    self.cpu.update_nz16(self.cpu.regs.y);
                }
            }
            0x89 => {
                // BIT - Bit test with immediate value
                self.bit(AddrMode::Immediate, &mut cycles)
            }
            0x8a => {
                // TXA - Transfer X to A
                if self.cpu.is_a8() {
                    let val = self.cpu.regs.x8();
                    self.cpu.regs.set_a8(val);
                    self.cpu.update_nz8(val);
                } else {
                    self.cpu.regs.a = self.cpu.regs.x;
                    self.cpu.update_nz16(self.cpu.regs.a)
                }
            }
            0x8b => {
                // PHB - Push Data Bank
                self.push(self.cpu.regs.db)
            }
            0x8c => {
                // STY - Store Y to absolute address
                self.sty(AddrMode::Absolute, &mut cycles)
            }
            0x8d => {
                // STA - Store A to absolute address
                self.sta(AddrMode::Absolute, &mut cycles)
            }
            0x8e => {
                // STX - Store X to absolute address
                self.stx(AddrMode::Absolute, &mut cycles)
            }
            0x90 => {
                // BCC - Branch if Carry Clear
                self.branch_near(!self.cpu.regs.status.has(Status::CARRY))
            }
            0x91 => {
                // STA - Store A to DP Indirect Indexed, Y
                self.sta(AddrMode::IndirectY, &mut cycles)
            }
            0x94 => {
                // STY - Store Y to DP Indexed, X
                self.sty(AddrMode::DirectX, &mut cycles)
            }
            0x95 => {
                // STA - Store A to DP Indexed, X
                self.sta(AddrMode::DirectX, &mut cycles)
            }
            0x96 => {
                // STX - Store X to DP Indexed, Y
                self.stx(AddrMode::DirectY, &mut cycles)
            }
            0x98 => {
                // TYA - Transfer Y to A
                if self.cpu.is_a8() {
                    let val = self.cpu.regs.y8();
                    self.cpu.regs.set_a8(val);
                    self.cpu.update_nz8(val);
                } else {
                    self.cpu.regs.a = self.cpu.regs.y;
                    self.cpu.update_nz16(self.cpu.regs.a)
                }
            }
            0x99 => {
                // STA - Store A to Absolute Indexed, Y
                self.sta(AddrMode::AbsoluteY, &mut cycles)
            }
            0x9a => {
                // TXS - Transfer X to SP (no flags)
                self.cpu.regs.sp = self.cpu.regs.x;
                if self.cpu.regs.is_emulation {
                    self.cpu.regs.sp = (self.cpu.regs.sp & 0xff) | 0x100
                }
            }
            0x9c => {
                // STZ - Store Zero to absolute address
                self.stz(AddrMode::Absolute, &mut cycles)
            }
            0x9d => {
                // STA - Store A to Absolute Indexed, X
                self.sta(AddrMode::AbsoluteX, &mut cycles)
            }
            0x9e => {
                // STZ - Store Zero to Absolute Indexed, X
                self.stz(AddrMode::AbsoluteX, &mut cycles)
            }
            0xa0 => {
                // LDY - Load immediate value into Y
                self.ldy(AddrMode::Immediate, &mut cycles)
            }
            0xa1 => {
                // LDA - Load DP Indirect Indexed, X into A
                self.lda(AddrMode::IndirectX, &mut cycles)
            }
            0xa2 => {
                // LDX - Load immediate value into X
                self.ldx(AddrMode::Immediate, &mut cycles)
            }
            0xa4 => {
                // LDY - Load direct page into Y
                self.ldy(AddrMode::Direct, &mut cycles)
            }
            0xa5 => {
                // LDA - Load direct page into A
                self.lda(AddrMode::Direct, &mut cycles)
            }
            0xa6 => {
                // LDX - Load direct page into X
                self.ldx(AddrMode::Direct, &mut cycles)
            }
            0xa8 => {
                // TAY - Transfer A to Y
                if self.cpu.is_idx8() {
                    let val = self.cpu.regs.a8();
                    self.cpu.regs.set_y8(val);
                    self.cpu.update_nz8(val);
                } else {
                    self.cpu.regs.y = self.cpu.regs.a;
                    self.cpu.update_nz16(self.cpu.regs.y);
                }
            }
            0xa9 => {
                // LDA - Load immediate value into A
                self.lda(AddrMode::Immediate, &mut cycles)
            }
            0xaa => {
                // TAX - Transfer A to X
                if self.cpu.is_idx8() {
                    let val = self.cpu.regs.a8();
                    self.cpu.regs.set_x8(val);
                    self.cpu.update_nz8(val);
                } else {
                    self.cpu.regs.x = self.cpu.regs.a;
                    self.cpu.update_nz16(self.cpu.regs.x);
                }
            }
            0xab => {
                // PLB - Pull Data Bank
                self.cpu.regs.db = self.pull();
                self.cpu.update_nz8(self.cpu.regs.db)
            }
            0xac => {
                // LDY - Load absolute value into Y
                self.ldy(AddrMode::Absolute, &mut cycles)
            }
            0xad => {
                // LDA - Load absolute value into A
                self.lda(AddrMode::Absolute, &mut cycles)
            }
            0xae => {
                // LDX - Load absolute value into X
                self.ldx(AddrMode::Absolute, &mut cycles)
            }
            0xb0 => {
                // BCS - Branch if Carry Set
                self.branch_near(self.cpu.regs.status.has(Status::CARRY))
            }
            0xb1 => {
                // LDA - Load DP Indirect Indexed, Y into A
                self.lda(AddrMode::IndirectY, &mut cycles)
            }
            0xb4 => {
                // LDY - Load DP Indexed, X into Y
                self.ldy(AddrMode::DirectX, &mut cycles)
            }
            0xb5 => {
                // LDA - Load DP Indexed, X into A
                self.lda(AddrMode::DirectX, &mut cycles)
            }
            0xb6 => {
                // LDX - Load DP Indexed, Y into X
                self.ldx(AddrMode::DirectY, &mut cycles)
            }
            0xb8 => {
                // CLV - Clear the Overflow Flag
                self.cpu.regs.status &= !Status::OVERFLOW
            }
            0xb9 => {
                // LDA - Load Absolute Indexed, Y into A
                self.lda(AddrMode::AbsoluteY, &mut cycles)
            }
            0xba => {
                // TSX - Transfer SP to X (full 16-bit copy, flags at the
                // index width)
                self.cpu.regs.x = self.cpu.regs.sp;
                if self.cpu.is_idx8() {
                    self.cpu.update_nz8(self.cpu.regs.x8())
                } else {
                    self.cpu.update_nz16(self.cpu.regs.x)
                }
            }
            0xbc => {
                // LDY - Load Absolute Indexed, X into Y
                self.ldy(AddrMode::AbsoluteX, &mut cycles)
            }
            0xbd => {
                // LDA - Load Absolute Indexed, X into A
                self.lda(AddrMode::AbsoluteX, &mut cycles)
            }
            0xbe => {
                // LDX - Load Absolute Indexed, Y into X
                self.ldx(AddrMode::AbsoluteY, &mut cycles)
            }
            0xc0 => {
                // CPY - Compare Y with immediate value
                self.cpy(AddrMode::Immediate, &mut cycles)
            }
            0xc1 => {
                // CMP - Compare A with DP Indirect Indexed, X
                self.cmp_a(AddrMode::IndirectX, &mut cycles)
            }
            0xc2 => {
                // REP - Reset specified bits in the Status Register
                let mut mask = self.load::<u8>();
                if self.cpu.regs.is_emulation {
                    // the width bits cannot be cleared in emulation mode
                    mask &= !0x30;
                }
                self.cpu.regs.status &= !Status(mask);
            }
            0xc4 => {
                // CPY - Compare Y with direct page
                self.cpy(AddrMode::Direct, &mut cycles)
            }
            0xc5 => {
                // CMP - Compare A with direct page
                self.cmp_a(AddrMode::Direct, &mut cycles)
            }
            0xc6 => {
                // DEC - Decrement direct page
                self.dec_mem(AddrMode::Direct, &mut cycles)
            }
            0xc8 => {
                // INY - Increment Y
                if self.cpu.is_idx8() {
                    let y = self.cpu.regs.y8().wrapping_add(1);
                    self.cpu.regs.set_y8(y);
                    self.cpu.update_nz8(y);
                } else {
                    self.cpu.regs.y = self.cpu.regs.y.wrapping_add(1);
                    self.cpu.update_nz16(self.cpu.regs.y);
                }
            }
            0xc9 => {
                // CMP - Compare A with immediate value
                self.cmp_a(AddrMode::Immediate, &mut cycles)
            }
            0xca => {
                // DEX - Decrement X
                if self.cpu.is_idx8() {
                    let x = self.cpu.regs.x8().wrapping_sub(1);
                    self.cpu.regs.set_x8(x);
                    self.cpu.update_nz8(x);
                } else {
                    self.cpu.regs.x = self.cpu.regs.x.wrapping_sub(1);
                    self.cpu.update_nz16(self.cpu.regs.x);
                }
            }
            0xcb => {
                // WAI - Wait for interrupt; modeled as a stall that
                // re-executes itself
                self.cpu.regs.pc.addr = self.cpu.regs.pc.addr.wrapping_sub(1)
            }
            0xcc => {
                // CPY - Compare Y with absolute value
                self.cpy(AddrMode::Absolute, &mut cycles)
            }
            0xcd => {
                // CMP - Compare A with absolute value
                self.cmp_a(AddrMode::Absolute, &mut cycles)
            }
            0xce => {
                // DEC - Decrement absolute address
                self.dec_mem(AddrMode::Absolute, &mut cycles)
            }
            0xd0 => {
                // BNE - Branch if Zero Flag clear
                self.branch_near(!self.cpu.regs.status.has(Status::ZERO))
            }
            0xd1 => {
                // CMP - Compare A with DP Indirect Indexed, Y
                self.cmp_a(AddrMode::IndirectY, &mut cycles)
            }
            0xd5 => {
                // CMP - Compare A with DP Indexed, X
                self.cmp_a(AddrMode::DirectX, &mut cycles)
            }
            0xd6 => {
                // DEC - Decrement DP Indexed, X
                self.dec_mem(AddrMode::DirectX, &mut cycles)
            }
            0xd8 => {
                // CLD - Clear the Decimal Flag
                self.cpu.regs.status &= !Status::DECIMAL
            }
            0xd9 => {
                // CMP - Compare A with Absolute Indexed, Y
                self.cmp_a(AddrMode::AbsoluteY, &mut cycles)
            }
            0xda => {
                // PHX - Push X
                if self.cpu.is_idx8() {
                    self.push(self.cpu.regs.x8())
                } else {
                    self.push(self.cpu.regs.x);
                    cycles += 1
                }
            }
            0xdb => {
                // STP - Stop the processor; modeled as a stall that
                // re-executes itself
                self.cpu.regs.pc.addr = self.cpu.regs.pc.addr.wrapping_sub(1)
            }
            0xdd => {
                // CMP - Compare A with Absolute Indexed, X
                self.cmp_a(AddrMode::AbsoluteX, &mut cycles)
            }
            0xde => {
                // DEC - Decrement Absolute Indexed, X
                self.dec_mem(AddrMode::AbsoluteX, &mut cycles)
            }
            0xe0 => {
                // CPX - Compare X with immediate value
                self.cpx(AddrMode::Immediate, &mut cycles)
            }
            0xe1 => {
                // SBC - Subtract DP Indirect Indexed, X with borrow
                self.sbc(AddrMode::IndirectX, &mut cycles)
            }
            0xe2 => {
                // SEP - Set specified bits in the Status Register
                let mask = self.load::<u8>();
                self.cpu.regs.status |= Status(mask);
                self.cpu.enforce_mode_invariants();
            }
            0xe4 => {
                // CPX - Compare X with direct page
                self.cpx(AddrMode::Direct, &mut cycles)
            }
            0xe5 => {
                // SBC - Subtract direct page with borrow
                self.sbc(AddrMode::Direct, &mut cycles)
            }
            0xe6 => {
                // INC - Increment direct page
                self.inc_mem(AddrMode::Direct, &mut cycles)
            }
            0xe8 => {
                // INX - Increment X
                if self.cpu.is_idx8() {
                    let x = self.cpu.regs.x8().wrapping_add(1);
                    self.cpu.regs.set_x8(x);
                    self.cpu.update_nz8(x);
                } else {
                    self.cpu.regs.x = self.cpu.regs.x.wrapping_add(1);
                    self.cpu.update_nz16(self.cpu.regs.x);
                }
            }
            0xe9 => {
                // SBC - Subtract immediate value with borrow
                self.sbc(AddrMode::Immediate, &mut cycles)
            }
            0xea => {
                // NOP - No Operation
            }
            0xec => {
                // CPX - Compare X with absolute value
                self.cpx(AddrMode::Absolute, &mut cycles)
            }
            0xed => {
                // SBC - Subtract absolute value with borrow
                self.sbc(AddrMode::Absolute, &mut cycles)
            }
            0xee => {
                // INC - Increment absolute address
                self.inc_mem(AddrMode::Absolute, &mut cycles)
            }
            0xf0 => {
                // BEQ - Branch if Zero Flag set
                self.branch_near(self.cpu.regs.status.has(Status::ZERO))
            }
            0xf1 => {
                // SBC - Subtract DP Indirect Indexed, Y with borrow
                self.sbc(AddrMode::IndirectY, &mut cycles)
            }
            0xf5 => {
                // SBC - Subtract DP Indexed, X with borrow
                self.sbc(AddrMode::DirectX, &mut cycles)
            }
            0xf6 => {
                // INC - Increment DP Indexed, X
                self.inc_mem(AddrMode::DirectX, &mut cycles)
            }
            0xf8 => {
                // SED - Set the Decimal Flag
                self.cpu.regs.status |= Status::DECIMAL
            }
            0xf9 => {
                // SBC - Subtract Absolute Indexed, Y with borrow
                self.sbc(AddrMode::AbsoluteY, &mut cycles)
            }
            0xfa => {
                // PLX - Pull X
                if self.cpu.is_idx8() {
                    let x = self.pull();
                    self.cpu.regs.set_x8(x);
                    self.cpu.update_nz8(x);
                } else {
                    self.cpu.regs.x = self.pull();
                    self.cpu.update_nz16(self.cpu.regs.x);
                    cycles += 1
                }
            }
            0xfb => {
                // XCE - Exchange Carry and Emulation flags
                let old_emulation = self.cpu.regs.is_emulation;
                self.cpu.regs.is_emulation = self.cpu.regs.status.has(Status::CARRY);
                self.cpu.regs.status.set_if(Status::CARRY, old_emulation);
                self.cpu.enforce_mode_invariants();
            }
            0xfd => {
                // SBC - Subtract Absolute Indexed, X with borrow
                self.sbc(AddrMode::AbsoluteX, &mut cycles)
            }
            0xfe => {
                // INC - Increment Absolute Indexed, X
                self.inc_mem(AddrMode::AbsoluteX, &mut cycles)
            }
            _ => {
                // opcodes outside the implemented map behave as two-cycle
                // no-ops
            }
        };
        cycles
    }

    fn lda(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            self.cpu.regs.set_a8(val);
            self.cpu.update_nz8(val);
        } else {
            let val = self.read::<u16>(addr);
            self.cpu.regs.a = val;
            self.cpu.update_nz16(val);
            *cycles += 1
        }
    }

    fn ldx(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_idx8());
        if self.cpu.is_idx8() {
            let val = self.read::<u8>(addr);
            self.cpu.regs.set_x8(val);
            self.cpu.update_nz8(val);
        } else {
            let val = self.read::<u16>(addr);
            self.cpu.regs.x = val;
            self.cpu.update_nz16(val);
            *cycles += 1
        }
    }

    fn ldy(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_idx8());
        if self.cpu.is_idx8() {
            let val = self.read::<u8>(addr);
            self.cpu.regs.set_y8(val);
            self.cpu.update_nz8(val);
        } else {
            let val = self.read::<u16>(addr);
            self.cpu.regs.y = val;
            self.cpu.update_nz16(val);
            *cycles += 1
        }
    }

    fn sta(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            self.write(addr, self.cpu.regs.a8());
        } else {
            self.write(addr, self.cpu.regs.a);
            *cycles += 1
        }
    }

    fn stx(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_idx8());
        if self.cpu.is_idx8() {
            self.write(addr, self.cpu.regs.x8());
        } else {
            self.write(addr, self.cpu.regs.x);
            *cycles += 1
        }
    }

    fn sty(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_idx8());
        if self.cpu.is_idx8() {
            self.write(addr, self.cpu.regs.y8());
        } else {
            self.write(addr, self.cpu.regs.y);
            *cycles += 1
        }
    }

    fn stz(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            self.write(addr, 0u8);
        } else {
            self.write(addr, 0u16);
            *cycles += 1
        }
    }

    fn ora(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr) | self.cpu.regs.a8();
            self.cpu.regs.set_a8(val);
            self.cpu.update_nz8(val);
        } else {
            self.cpu.regs.a |= self.read::<u16>(addr);
            self.cpu.update_nz16(self.cpu.regs.a);
            *cycles += 1
        }
    }

    fn and_a(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr) & self.cpu.regs.a8();
            self.cpu.regs.set_a8(val);
            self.cpu.update_nz8(val);
        } else {
            self.cpu.regs.a &= self.read::<u16>(addr);
            self.cpu.update_nz16(self.cpu.regs.a);
            *cycles += 1
        }
    }

    fn eor(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr) ^ self.cpu.regs.a8();
            self.cpu.regs.set_a8(val);
            self.cpu.update_nz8(val);
        } else {
            self.cpu.regs.a ^= self.read::<u16>(addr);
            self.cpu.update_nz16(self.cpu.regs.a);
            *cycles += 1
        }
    }

    fn adc(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let op = self.read::<u8>(addr);
            self.add_carry8(op);
        } else {
            let op = self.read::<u16>(addr);
            self.add_carry16(op);
            *cycles += 1
        }
    }

    fn sbc(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let op = self.read::<u8>(addr);
            self.sub_carry8(op);
        } else {
            let op = self.read::<u16>(addr);
            self.sub_carry16(op);
            *cycles += 1
        }
    }

    // The decimal flag selects this same binary path; no BCD correction
    // is applied.
    pub(crate) fn add_carry8(&mut self, op: u8) {
        let a = self.cpu.regs.a8();
        let carry = self.cpu.regs.status.has(Status::CARRY) as u16;
        let sum = u16::from(a) + u16::from(op) + carry;
        self.cpu.regs.status.set_if(Status::CARRY, sum > 0xff);
        let res = (sum & 0xff) as u8;
        self.cpu
            .regs
            .status
            .set_if(Status::OVERFLOW, (a ^ res) & (op ^ res) & 0x80 != 0);
        self.cpu.regs.set_a8(res);
        self.cpu.update_nz8(res);
    }

    pub(crate) fn add_carry16(&mut self, op: u16) {
        let a = self.cpu.regs.a;
        let carry = self.cpu.regs.status.has(Status::CARRY) as u32;
        let sum = u32::from(a) + u32::from(op) + carry;
        self.cpu.regs.status.set_if(Status::CARRY, sum > 0xffff);
        let res = (sum & 0xffff) as u16;
        self.cpu
            .regs
            .status
            .set_if(Status::OVERFLOW, (a ^ res) & (op ^ res) & 0x8000 != 0);
        self.cpu.regs.a = res;
        self.cpu.update_nz16(res);
    }

    pub(crate) fn sub_carry8(&mut self, op: u8) {
        let a = self.cpu.regs.a8();
        let borrow = 1 - self.cpu.regs.status.has(Status::CARRY) as u16;
        let diff = u16::from(a)
            .wrapping_sub(u16::from(op))
            .wrapping_sub(borrow);
        // carry set means no borrow occurred
        self.cpu.regs.status.set_if(Status::CARRY, diff & 0x100 == 0);
        let res = (diff & 0xff) as u8;
        self.cpu
            .regs
            .status
            .set_if(Status::OVERFLOW, (a ^ op) & (a ^ res) & 0x80 != 0);
        self.cpu.regs.set_a8(res);
        self.cpu.update_nz8(res);
    }

    pub(crate) fn sub_carry16(&mut self, op: u16) {
        let a = self.cpu.regs.a;
        let borrow = 1 - self.cpu.regs.status.has(Status::CARRY) as u32;
        let diff = u32::from(a)
            .wrapping_sub(u32::from(op))
            .wrapping_sub(borrow);
        self.cpu
            .regs
            .status
            .set_if(Status::CARRY, diff & 0x10000 == 0);
        let res = (diff & 0xffff) as u16;
        self.cpu
            .regs
            .status
            .set_if(Status::OVERFLOW, (a ^ op) & (a ^ res) & 0x8000 != 0);
        self.cpu.regs.a = res;
        self.cpu.update_nz16(res);
    }

    fn cmp_a(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            self.compare8(self.cpu.regs.a8(), val);
        } else {
            let val = self.read::<u16>(addr);
            self.compare16(self.cpu.regs.a, val);
            *cycles += 1
        }
    }

    fn cpx(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_idx8());
        if self.cpu.is_idx8() {
            let val = self.read::<u8>(addr);
            self.compare8(self.cpu.regs.x8(), val);
        } else {
            let val = self.read::<u16>(addr);
            self.compare16(self.cpu.regs.x, val);
            *cycles += 1
        }
    }

    fn cpy(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_idx8());
        if self.cpu.is_idx8() {
            let val = self.read::<u8>(addr);
            self.compare8(self.cpu.regs.y8(), val);
        } else {
            let val = self.read::<u16>(addr);
            self.compare16(self.cpu.regs.y, val);
            *cycles += 1
        }
    }

    pub(crate) fn compare8(&mut self, a: u8, b: u8) {
        let diff = u16::from(a).wrapping_sub(u16::from(b));
        // carry set means no borrow: a >= b unsigned
        self.cpu.regs.status.set_if(Status::CARRY, diff & 0x100 == 0);
        self.cpu.update_nz8((diff & 0xff) as u8);
    }

    pub(crate) fn compare16(&mut self, a: u16, b: u16) {
        let diff = u32::from(a).wrapping_sub(u32::from(b));
        self.cpu
            .regs
            .status
            .set_if(Status::CARRY, diff & 0x10000 == 0);
        self.cpu.update_nz16((diff & 0xffff) as u16);
    }

    fn inc_mem(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr).wrapping_add(1);
            self.write(addr, val);
            self.cpu.update_nz8(val);
        } else {
            let val = self.read::<u16>(addr).wrapping_add(1);
            self.write(addr, val);
            self.cpu.update_nz16(val);
            *cycles += 1
        }
    }

    fn dec_mem(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr).wrapping_sub(1);
            self.write(addr, val);
            self.cpu.update_nz8(val);
        } else {
            let val = self.read::<u16>(addr).wrapping_sub(1);
            self.write(addr, val);
            self.cpu.update_nz16(val);
            *cycles += 1
        }
    }

    fn asl_mem(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            let res = val << 1;
            self.cpu.regs.status.set_if(Status::CARRY, val & 0x80 != 0);
            self.write(addr, res);
            self.cpu.update_nz8(res);
        } else {
            let val = self.read::<u16>(addr);
            let res = val << 1;
            self.cpu
                .regs
                .status
                .set_if(Status::CARRY, val & 0x8000 != 0);
            self.write(addr, res);
            self.cpu.update_nz16(res);
            *cycles += 1
        }
    }

    fn lsr_mem(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            let res = val >> 1;
            self.cpu.regs.status.set_if(Status::CARRY, val & 1 != 0);
            self.write(addr, res);
            self.cpu.update_nz8(res);
        } else {
            let val = self.read::<u16>(addr);
            let res = val >> 1;
            self.cpu.regs.status.set_if(Status::CARRY, val & 1 != 0);
            self.write(addr, res);
            self.cpu.update_nz16(res);
            *cycles += 1
        }
    }

    fn rol_mem(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        let carry_in = self.cpu.regs.status.has(Status::CARRY);
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            let res = val << 1 | carry_in as u8;
            self.cpu.regs.status.set_if(Status::CARRY, val & 0x80 != 0);
            self.write(addr, res);
            self.cpu.update_nz8(res);
        } else {
            let val = self.read::<u16>(addr);
            let res = val << 1 | carry_in as u16;
            self.cpu
                .regs
                .status
                .set_if(Status::CARRY, val & 0x8000 != 0);
            self.write(addr, res);
            self.cpu.update_nz16(res);
            *cycles += 1
        }
    }

    fn ror_mem(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        let carry_in = self.cpu.regs.status.has(Status::CARRY);
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            let res = val >> 1 | (carry_in as u8) << 7;
            self.cpu.regs.status.set_if(Status::CARRY, val & 1 != 0);
            self.write(addr, res);
            self.cpu.update_nz8(res);
        } else {
            let val = self.read::<u16>(addr);
            let res = val >> 1 | (carry_in as u16) << 15;
            self.cpu.regs.status.set_if(Status::CARRY, val & 1 != 0);
            self.write(addr, res);
            self.cpu.update_nz16(res);
            *cycles += 1
        }
    }

    /// Bit test: Z from `A & M`, N and V from the operand's top bits.
    /// The immediate form behaves identically to the addressed forms here
    /// (the silicon only updates Z for it).
    fn bit(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            self.cpu
                .regs
                .status
                .set_if(Status::ZERO, val & self.cpu.regs.a8() == 0);
            self.cpu.regs.status.set_if(Status::NEGATIVE, val & 0x80 != 0);
            self.cpu.regs.status.set_if(Status::OVERFLOW, val & 0x40 != 0);
        } else {
            let val = self.read::<u16>(addr);
            self.cpu
                .regs
                .status
                .set_if(Status::ZERO, val & self.cpu.regs.a == 0);
            self.cpu
                .regs
                .status
                .set_if(Status::NEGATIVE, val & 0x8000 != 0);
            self.cpu
                .regs
                .status
                .set_if(Status::OVERFLOW, val & 0x4000 != 0);
            *cycles += 1
        }
    }

    fn tsb(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            let a = self.cpu.regs.a8();
            self.cpu.regs.status.set_if(Status::ZERO, val & a == 0);
            self.write(addr, val | a);
        } else {
            let val = self.read::<u16>(addr);
            let a = self.cpu.regs.a;
            self.cpu.regs.status.set_if(Status::ZERO, val & a == 0);
            self.write(addr, val | a);
            *cycles += 1
        }
    }

    fn trb(&mut self, mode: AddrMode, cycles: &mut Cycles) {
        let addr = self.operand_addr(mode, !self.cpu.is_a8());
        if self.cpu.is_a8() {
            let val = self.read::<u8>(addr);
            let a = self.cpu.regs.a8();
            self.cpu.regs.status.set_if(Status::ZERO, val & a == 0);
            self.write(addr, val & !a);
        } else {
            let val = self.read::<u16>(addr);
            let a = self.cpu.regs.a;
            self.cpu.regs.status.set_if(Status::ZERO, val & a == 0);
            self.write(addr, val & !a);
            *cycles += 1
        }
    }

    /// Conditional branch over a signed 8-bit displacement. The cycle
    /// cost is the flat table value whether or not the branch is taken.
    fn branch_near(&mut self, condition: bool) {
        let rel = self.load::<u8>();
        if condition {
            self.cpu.regs.pc.addr = self.cpu.regs.pc.addr.wrapping_add(rel as i8 as u16);
        }
    }

    /// One iteration of MVN/MVP: copy a single byte, step the index
    /// registers by `step` (1 or -1) at the active index width and count
    /// A down. While A has not underflowed the program counter is wound
    /// back onto the opcode so the next step re-enters the same
    /// instruction.
    fn block_move(&mut self, step: u16) {
        let dst_bank = self.load::<u8>();
        let src_bank = self.load::<u8>();
        let (src, dst) = if self.cpu.is_idx8() {
            (self.cpu.regs.x & 0xff, self.cpu.regs.y & 0xff)
        } else {
            (self.cpu.regs.x, self.cpu.regs.y)
        };
        let val = self.read::<u8>(Addr24::new(src_bank, src));
        self.write(Addr24::new(dst_bank, dst), val);
        if self.cpu.is_idx8() {
            self.cpu.regs.set_x8(self.cpu.regs.x8().wrapping_add(step as u8));
            self.cpu.regs.set_y8(self.cpu.regs.y8().wrapping_add(step as u8));
        } else {
            self.cpu.regs.x = self.cpu.regs.x.wrapping_add(step);
            self.cpu.regs.y = self.cpu.regs.y.wrapping_add(step);
        }
        self.cpu.regs.db = dst_bank;
        let remaining = self.cpu.regs.a;
        self.cpu.regs.a = remaining.wrapping_sub(1);
        if remaining != 0 {
            self.cpu.regs.pc.addr = self.cpu.regs.pc.addr.wrapping_sub(3);
        }
    }

    /// Shared BRK/COP entry. The byte after the opcode is a signature and
    /// is skipped. `set_break` marks the pushed status with the break bit
    /// (BRK in emulation mode only).
    fn software_interrupt(
        &mut self,
        emu_vector: u16,
        native_vector: u16,
        set_break: bool,
        cycles: &mut Cycles,
    ) {
        let _ = self.load::<u8>();
        let vector = if self.cpu.regs.is_emulation {
            self.push(self.cpu.regs.pc.addr);
            let status = if set_break {
                self.cpu.regs.status | Status::BREAK
            } else {
                self.cpu.regs.status
            };
            self.push(status.0);
            emu_vector
        } else {
            self.push(self.cpu.regs.pc.bank);
            self.push(self.cpu.regs.pc.addr);
            self.push(self.cpu.regs.status.0);
            *cycles += 1;
            native_vector
        };
        self.cpu.regs.status |= Status::IRQ_DISABLE;
        self.cpu.regs.status &= !Status::DECIMAL;
        let target = self.read::<u16>(Addr24::new(0, vector));
        self.cpu.regs.pc = Addr24::new(0, target);
    }
}
