//! Small machine-code programs driven through the public step interface.

mod common;

use common::*;
use rs816::cpu::Status;

#[test]
fn counting_loop() {
    // LDX #0; loop: INX / CPX #10 / BNE loop; STX $1000
    let mut device = device_with_program(&[
        0xa2, 0x00, // ldx #$00
        0xe8, // inx
        0xe0, 0x0a, // cpx #$0a
        0xd0, 0xfb, // bne -5
        0x8e, 0x00, 0x10, // stx $1000
    ]);
    step_until_pc(&mut device, 0x800a, 200);
    assert_eq!(device.cpu.regs.x, 0x0a);
    assert_eq!(device.bus().peek(0, 0x1000), 0x0a);
    assert!(flag(&device, Status::ZERO));
}

#[test]
fn multiply_by_repeated_addition() {
    // 5 * 3 accumulated into A, stored to $1000
    let mut device = device_with_program(&[
        0xa9, 0x00, // lda #$00
        0xa0, 0x03, // ldy #$03
        0xa2, 0x05, // outer: ldx #$05
        0x1a, // inner: inc a
        0xca, // dex
        0xd0, 0xfc, // bne inner
        0x88, // dey
        0xd0, 0xf7, // bne outer
        0x8d, 0x00, 0x10, // sta $1000
    ]);
    step_until_pc(&mut device, 0x8010, 500);
    assert_eq!(device.cpu.regs.a8(), 0x0f);
    assert_eq!(device.bus().peek(0, 0x1000), 0x0f);
}

#[test]
fn nested_subroutines_balance_the_stack() {
    // main calls outer, outer calls leaf twice
    let mut device = device_with_program(&[
        0x20, 0x00, 0x90, // jsr $9000
        0xdb, // stp
    ]);
    device.bus_mut().poke(
        0,
        0x9000,
        &[
            0x20, 0x00, 0x91, // jsr $9100
            0x20, 0x00, 0x91, // jsr $9100
            0x60, // rts
        ],
    );
    device.bus_mut().poke(0, 0x9100, &[0x1a, 0x60]); // inc a / rts
    for _ in 0..16 {
        device.step();
        if device.cpu.regs.pc.addr == 0x8003 {
            break;
        }
    }
    assert_eq!(device.cpu.regs.pc.addr, 0x8003);
    assert_eq!(device.cpu.regs.a8(), 0x02);
    assert_eq!(device.cpu.regs.sp, 0x01ff);
}

#[test]
fn sixteen_bit_sum_loop() {
    // native 16-bit accumulator: add $0102 four times
    let mut device = device_with_program(&[
        0xc2, 0x30, // rep #$30
        0xa9, 0x00, 0x00, // lda #$0000
        0xa2, 0x04, 0x00, // ldx #$0004
        0x18, // loop: clc
        0x69, 0x02, 0x01, // adc #$0102
        0xca, // dex
        0xd0, 0xf9, // bne loop
        0x8d, 0x00, 0x10, // sta $1000
    ]);
    enter_native(&mut device);
    step_until_pc(&mut device, 0x8012, 200);
    assert_eq!(device.cpu.regs.a, 0x0408);
    assert_eq!(device.bus().peek16(0, 0x1000), 0x0408);
}

#[test]
fn jsr_rts_stack_bytes_during_the_call() {
    let mut device = device_with_program(&[0x20, 0x00, 0x90]);
    device.bus_mut().poke(0, 0x9000, &[0x60]);
    device.step();
    // between the two steps the return address sits on the page-1 stack
    assert_eq!(device.bus().peek(0, 0x01fe), 0x02);
    assert_eq!(device.bus().peek(0, 0x01ff), 0x80);
    device.step();
    assert_eq!(device.cpu.regs.pc.addr, 0x8003);
    assert_eq!(device.cpu.regs.sp, 0x01ff);
}

#[test]
fn mode_switch_program() {
    // enter native mode, widen, load a 16-bit value, come back
    let mut device = device_with_program(&[
        0x18, // clc
        0xfb, // xce
        0xc2, 0x20, // rep #$20
        0xa9, 0x34, 0x12, // lda #$1234
        0xe2, 0x20, // sep #$20
        0x38, // sec
        0xfb, // xce
    ]);
    for _ in 0..7 {
        device.step();
    }
    assert!(device.cpu.regs.is_emulation);
    assert_eq!(device.snapshot().status & 0x30, 0x30);
    // the high byte survives the switch back to 8-bit mode
    assert_eq!(device.cpu.regs.a, 0x1234);
    assert_eq!(device.cpu.regs.a8(), 0x34);
}

#[test]
fn block_move_program() {
    // copy a four byte buffer from bank 1 to bank 2 with mvn
    let mut device = device_with_program(&[0x54, 0x02, 0x01, 0xdb]);
    enter_native_wide(&mut device);
    device.cpu.regs.a = 0x0003;
    device.cpu.regs.x = 0x1000;
    device.cpu.regs.y = 0x2000;
    device.bus_mut().poke(0x01, 0x1000, &[0xaa, 0xbb, 0xcc, 0xdd]);
    while device.cpu.regs.a != 0xffff {
        device.step();
    }
    for (i, byte) in [0xaa, 0xbb, 0xcc, 0xdd].iter().enumerate() {
        assert_eq!(device.bus().peek(0x02, 0x2000 + i as u16), *byte);
    }
    assert_eq!(device.cpu.regs.x, 0x1004);
    assert_eq!(device.cpu.regs.y, 0x2004);
    assert_eq!(device.cpu.regs.db, 0x02);
    // the stp placeholder keeps the program counter put
    device.step();
    device.step();
    assert_eq!(device.cpu.regs.pc.addr, 0x8003);
}
