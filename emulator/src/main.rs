use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rs816::{bus::Bus, device::Device, mem::Memory};
use std::path::PathBuf;

mod config;

/// Step a W65C816 core over a flat ROM image
#[derive(Parser, Clone)]
#[command(version)]
struct Options {
    /// ROM image to execute
    input: PathBuf,
    /// Maximum number of instructions to execute
    #[arg(short, long)]
    steps: Option<u64>,
    /// Print one line per executed instruction
    #[arg(short, long)]
    trace: bool,
    /// Load the entry point from the reset vector at 00:fffc instead of
    /// the 00:8000 default
    #[arg(long)]
    reset_vector: bool,
    /// Configuration file (TOML); command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the machine state to this file when the run ends
    #[arg(long)]
    save_state: Option<PathBuf>,
    /// Restore a previously saved machine state before running
    #[arg(long)]
    load_state: Option<PathBuf>,
}

fn error<E: std::fmt::Display>(kind: ErrorKind, val: E) -> ! {
    Options::command().error(kind, val.to_string()).exit()
}

fn memory_from_file(path: &std::path::Path) -> Memory {
    let content = std::fs::read(path).unwrap_or_else(|err| {
        error(
            ErrorKind::Io,
            format_args!("could not read file \"{}\" ({})", path.display(), err),
        )
    });
    let mut memory = Memory::new();
    memory.load_rom(content).unwrap_or_else(|err| {
        error(
            ErrorKind::InvalidValue,
            format_args!(
                "failure while loading ROM file \"{}\" ({})",
                path.display(),
                err
            ),
        )
    });
    memory
}

fn main() {
    let opts = Options::parse();
    let cfg = match &opts.config {
        Some(path) => config::Config::from_file(path)
            .unwrap_or_else(|err| error(ErrorKind::InvalidValue, err)),
        None => config::Config::default(),
    };
    let trace = opts.trace || cfg.trace;
    let steps = opts.steps.or(cfg.steps).unwrap_or(u64::MAX);
    let use_reset_vector = opts.reset_vector || cfg.reset_vector;

    let memory = memory_from_file(&opts.input);
    let mut device = Device::new(memory);
    if use_reset_vector {
        device.reset_to_vector();
    } else {
        device.reset();
    }
    if let Some(path) = &opts.load_state {
        let data = std::fs::read(path).unwrap_or_else(|err| {
            error(
                ErrorKind::Io,
                format_args!("could not read state file \"{}\" ({})", path.display(), err),
            )
        });
        device.restore_state(&data);
    }

    let mut executed = 0u64;
    while executed < steps {
        let before = device.snapshot();
        let op = device.bus_mut().read(before.pc);
        let cycles = device.step();
        executed += 1;
        if trace {
            let regs = device.snapshot();
            println!(
                "{} {:02x}  A={:04x} X={:04x} Y={:04x} SP={:04x} P={:02x} E={} ({} cycles)",
                before.pc, op, regs.a, regs.x, regs.y, regs.sp, regs.status, regs.is_emulation as u8, cycles
            );
        }
        // STP and WAI rewind the program counter onto themselves
        if device.snapshot().pc == before.pc && matches!(op, 0xdb | 0xcb) {
            let what = if op == 0xdb { "stopped" } else { "waiting" };
            println!("processor {} at {}", what, before.pc);
            break;
        }
    }
    if let Some(path) = &opts.save_state {
        std::fs::write(path, device.save_state()).unwrap_or_else(|err| {
            error(
                ErrorKind::Io,
                format_args!("could not write state file \"{}\" ({})", path.display(), err),
            )
        });
    }
    println!(
        "executed {} instructions in {} cycles, stopped at {}",
        executed,
        device.total_cycles(),
        device.snapshot().pc
    );
}
