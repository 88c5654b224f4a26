//! Integration tests using Tom Harte's `SingleStepTests` for the 6502.
//!
//! Runs 256 opcode files x 10,000 tests comparing CPU register and memory
//! state after each instruction, and checks that the instruction takes
//! exactly the listed number of cycles.
//!
//! Test data lives in `test-data/65x02/6502/v1/XX.json`.

use emu_core::{Bus, BusError};
use mos_6502::{Mnemonic, Mos6502, Opcode, Status};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Flat 64KB RAM bus for testing.
struct TestBus {
    ram: Vec<u8>,
}

impl TestBus {
    fn new() -> Self {
        Self {
            ram: vec![0; 0x10000],
        }
    }

    fn load_ram(&mut self, entries: &[(u16, u8)]) {
        for &(addr, value) in entries {
            self.ram[usize::from(addr)] = value;
        }
    }
}

impl Bus for TestBus {
    fn read(&mut self, address: u16) -> Result<u8, BusError> {
        Ok(self.ram[usize::from(address)])
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        self.ram[usize::from(address)] = value;
        Ok(())
    }

    fn peek(&self, address: u16) -> Option<u8> {
        Some(self.ram[usize::from(address)])
    }
}

/// JSON test case format.
#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
    cycles: Vec<(u16, u8, String)>,
}

/// JSON CPU state format.
#[derive(Deserialize)]
struct CpuState {
    pc: u16,
    s: u8,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    ram: Vec<(u16, u8)>,
}

/// A CPU past its power-on reset, loaded with the initial test state.
fn setup(bus: &mut TestBus, state: &CpuState) -> Mos6502 {
    let mut cpu = Mos6502::new();
    cpu.step(bus).expect("reset from zeroed RAM");
    bus.load_ram(&state.ram);
    cpu.regs.pc = state.pc;
    cpu.regs.s = state.s;
    cpu.regs.a = state.a;
    cpu.regs.x = state.x;
    cpu.regs.y = state.y;
    cpu.regs.p = Status::from_pulled(state.p);
    cpu
}

/// Compare the CPU/bus state against expected, returning a list of mismatches.
fn compare(cpu: &Mos6502, bus: &TestBus, expected: &CpuState) -> Vec<String> {
    let mut errors = Vec::new();
    let regs = cpu.regs;

    let pairs = [
        ("A", regs.a, expected.a),
        ("X", regs.x, expected.x),
        ("Y", regs.y, expected.y),
        ("S", regs.s, expected.s),
    ];
    if regs.pc != expected.pc {
        errors.push(format!("PC: got ${:04X}, want ${:04X}", regs.pc, expected.pc));
    }
    for (name, got, want) in pairs {
        if got != want {
            errors.push(format!("{name}: got ${got:02X}, want ${want:02X}"));
        }
    }

    // B only exists on the stack; compare the bits the register holds.
    let actual_p = regs.p.bits();
    let expected_p = Status::from_pulled(expected.p).bits();
    if actual_p != expected_p {
        errors.push(format!(
            "P: got ${actual_p:02X} ({actual_p:08b}), want ${expected_p:02X} ({expected_p:08b})"
        ));
    }

    for &(addr, want) in &expected.ram {
        let got = bus.ram[usize::from(addr)];
        if got != want {
            errors.push(format!("RAM[${addr:04X}]: got ${got:02X}, want ${want:02X}"));
        }
    }

    errors
}

#[test]
#[ignore = "requires test-data/65x02, run with --ignored"]
fn run_all() {
    let test_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("parent of crate dir")
        .parent()
        .expect("workspace root")
        .join("test-data/65x02/6502/v1");

    if !test_dir.exists() {
        eprintln!("Test data not found at {}", test_dir.display());
        eprintln!("Skipping SingleStepTests.");
        return;
    }

    let mut total_pass = 0u64;
    let mut total_fail = 0u64;

    for opcode in 0..=0xFF_u8 {
        // Halting opcodes are fatal here, not emulated as a jammed bus.
        if Opcode::decode(opcode).mnemonic == Mnemonic::Kil {
            continue;
        }
        let filename = format!("{opcode:02x}.json");
        let path = test_dir.join(&filename);
        if !path.exists() {
            continue;
        }

        let data = fs::read_to_string(&path).unwrap_or_else(|e| {
            panic!("Failed to read {}: {e}", path.display());
        });
        let tests: Vec<TestCase> = serde_json::from_str(&data).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {e}", path.display());
        });

        let mut file_pass = 0u32;
        let mut file_fail = 0u32;
        let mut first_failures: Vec<String> = Vec::new();

        for test in &tests {
            let mut bus = TestBus::new();
            let mut cpu = setup(&mut bus, &test.initial);

            let mut errors = Vec::new();
            for _ in 0..test.cycles.len() {
                if let Err(e) = cpu.tick(&mut bus) {
                    errors.push(e.to_string());
                    break;
                }
            }
            if !cpu.is_instruction_complete() {
                errors.push(format!("still running after {} cycles", test.cycles.len()));
            }
            errors.extend(compare(&cpu, &bus, &test.final_state));

            if errors.is_empty() {
                file_pass += 1;
            } else {
                file_fail += 1;
                if first_failures.len() < 5 {
                    first_failures.push(format!("  FAIL [{}]: {}", test.name, errors.join(", ")));
                }
            }
        }

        let status = if file_fail == 0 { "PASS" } else { "FAIL" };
        println!(
            "Opcode ${opcode:02X} ({filename}): {status}, {file_pass}/{} passed",
            file_pass + file_fail
        );
        for msg in &first_failures {
            println!("{msg}");
        }

        total_pass += u64::from(file_pass);
        total_fail += u64::from(file_fail);
    }

    println!("=== SingleStepTests: {total_pass} passed, {total_fail} failed ===");
    assert_eq!(total_fail, 0, "{total_fail} tests failed");
}
