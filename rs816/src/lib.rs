//! W65C816 core interpreter.
//!
//! The crate models the 16-bit CPU of the Super Nintendo: an instruction
//! stepper over a byte-addressable 24-bit bus, with the emulation/native
//! mode split and the runtime-selectable accumulator and index register
//! widths that make the processor interesting.
//!
//! # Literature
//!
//! - the [super famicom wiki page](https://wiki.superfamicom.org/65816-reference)
//! - <https://www.westerndesigncenter.com/wdc/documentation/w65c816s.pdf>

pub mod bus;
pub mod cpu;
pub mod device;
pub mod instr;
pub mod mem;
pub mod timing;
