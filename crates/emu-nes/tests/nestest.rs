//! Canonical CPU test ROM in automation mode, compared line by line with
//! its reference log.
//!
//! Needs `test-data/nestest.nes` and `test-data/nestest.log` at the
//! workspace root.

use std::path::PathBuf;
use std::sync::mpsc;

use emu_nes::trace::TraceEntry;
use emu_nes::{Nes, NesConfig};

fn test_data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-data")
        .join(name)
}

#[test]
#[ignore = "requires test-data/nestest.nes and nestest.log"]
fn nestest_matches_reference_log() {
    let (Ok(rom_data), Ok(log)) = (
        std::fs::read(test_data("nestest.nes")),
        std::fs::read_to_string(test_data("nestest.log")),
    ) else {
        eprintln!("Skipping: nestest files not found under test-data/");
        return;
    };

    let expected: Vec<TraceEntry> = log
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.parse().expect("reference log line parses"))
        .collect();

    let config = NesConfig::new(rom_data, "nestest.nes").with_entry_point(0xC000);
    let mut nes = Nes::new(&config).expect("nestest.nes loads");
    let (tx, rx) = mpsc::channel();
    nes.set_step_hook(tx);

    let mut matched = 0usize;
    for (line, want) in expected.iter().enumerate() {
        if nes.step().is_err() {
            break;
        }
        let got = rx.try_recv().expect("one trace step per instruction");
        let diff = want.mismatches(&got);
        assert!(
            diff.is_empty(),
            "line {}: {diff:?} differ\n  want: {want}\n  got:  {got}",
            line + 1
        );
        matched += 1;
    }

    assert!(matched >= 1400, "only {matched} lines matched");
    // Official and unofficial result codes
    assert_eq!(nes.bus().peek_ram(0x0002), 0x00, "official opcode failures");
    assert_eq!(nes.bus().peek_ram(0x0003), 0x00, "unofficial opcode failures");
}
