//! Golden-log trace lines.
//!
//! Parses lines of the canonical CPU test log:
//!
//! ```text
//! C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7
//! ```
//!
//! The disassembly and picture-unit columns are ignored; what is kept is
//! exactly what a [`Step`] carries.

use std::fmt;
use std::str::FromStr;

use mos_6502::Step;
use thiserror::Error;

/// Why a log line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceParseError {
    #[error("line too short for a trace entry")]
    TooShort,
    #[error("missing field {0}")]
    Missing(&'static str),
    #[error("bad value {value:?} for field {field}")]
    BadValue { field: &'static str, value: String },
}

/// One instruction of a reference trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub pc: u16,
    /// Opcode and operand bytes.
    pub bytes: Vec<u8>,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub sp: u8,
    pub cycles: u64,
}

impl TraceEntry {
    /// True when registers, PC and cycle count all agree with `step`.
    #[must_use]
    pub fn matches(&self, step: &Step) -> bool {
        self.mismatches(step).is_empty()
    }

    /// Names of the fields that disagree with `step`.
    #[must_use]
    pub fn mismatches(&self, step: &Step) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let mut check = |name: &'static str, equal: bool| {
            if !equal {
                fields.push(name);
            }
        };
        check("PC", self.pc == step.pc);
        check("A", self.a == step.a);
        check("X", self.x == step.x);
        check("Y", self.y == step.y);
        check("P", self.p == step.p);
        check("SP", self.sp == step.s);
        check("CYC", self.cycles == step.cycles);
        check("opcode", self.bytes.first() == Some(&step.opcode));
        fields
    }
}

fn hex_u8(field: &'static str, text: &str) -> Result<u8, TraceParseError> {
    u8::from_str_radix(text, 16).map_err(|_| TraceParseError::BadValue {
        field,
        value: text.to_owned(),
    })
}

fn register<'a>(tokens: &[&'a str], prefix: &'static str) -> Result<&'a str, TraceParseError> {
    tokens
        .iter()
        .find_map(|&token| token.strip_prefix(prefix))
        .ok_or(TraceParseError::Missing(prefix))
}

impl FromStr for TraceEntry {
    type Err = TraceParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let pc_text = line.get(..4).ok_or(TraceParseError::TooShort)?;
        let pc = u16::from_str_radix(pc_text, 16).map_err(|_| TraceParseError::BadValue {
            field: "PC",
            value: pc_text.to_owned(),
        })?;

        // Up to three hex bytes, then the disassembly starts at column 16
        let bytes = line
            .get(6..15)
            .ok_or(TraceParseError::TooShort)?
            .split_whitespace()
            .map(|b| hex_u8("bytes", b))
            .collect::<Result<Vec<_>, _>>()?;
        if bytes.is_empty() {
            return Err(TraceParseError::Missing("bytes"));
        }

        let registers = line
            .find(" A:")
            .map(|at| &line[at + 1..])
            .ok_or(TraceParseError::Missing("A:"))?;
        let tokens: Vec<&str> = registers.split_whitespace().collect();

        let cycles_text = register(&tokens, "CYC:")?;
        let cycles = cycles_text
            .parse()
            .map_err(|_| TraceParseError::BadValue {
                field: "CYC:",
                value: cycles_text.to_owned(),
            })?;

        Ok(Self {
            pc,
            bytes,
            a: hex_u8("A:", register(&tokens, "A:")?)?,
            x: hex_u8("X:", register(&tokens, "X:")?)?,
            y: hex_u8("Y:", register(&tokens, "Y:")?)?,
            p: hex_u8("P:", register(&tokens, "P:")?)?,
            sp: hex_u8("SP:", register(&tokens, "SP:")?)?,
            cycles,
        })
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X} ", self.pc)?;
        for b in &self.bytes {
            write!(f, " {b:02X}")?;
        }
        write!(
            f,
            "  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.a, self.x, self.y, self.p, self.sp, self.cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "C000  4C F5 C5  JMP $C5F5                       \
                         A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7";
    const UNOFFICIAL: &str = "C6BD  04 A9    *NOP $A9 = 00                    \
                              A:AA X:97 Y:4E P:EF SP:F5 PPU: 12,183 CYC:1382";

    #[test]
    fn parses_official_line() {
        let entry: TraceEntry = FIRST.parse().expect("valid line");
        assert_eq!(entry.pc, 0xC000);
        assert_eq!(entry.bytes, [0x4C, 0xF5, 0xC5]);
        assert_eq!((entry.a, entry.x, entry.y), (0, 0, 0));
        assert_eq!(entry.p, 0x24);
        assert_eq!(entry.sp, 0xFD);
        assert_eq!(entry.cycles, 7);
    }

    #[test]
    fn parses_unofficial_line() {
        let entry: TraceEntry = UNOFFICIAL.parse().expect("valid line");
        assert_eq!(entry.bytes, [0x04, 0xA9]);
        assert_eq!(entry.p, 0xEF);
        assert_eq!(entry.sp, 0xF5);
        assert_eq!(entry.cycles, 1382);
    }

    #[test]
    fn picture_unit_columns_do_not_leak_into_registers() {
        let line = "C72C  A9 FF     LDA #$FF                        \
                    A:00 X:00 Y:00 P:27 SP:FB PPU:  4,  2 CYC:44";
        let entry: TraceEntry = line.parse().expect("valid line");
        assert_eq!(entry.p, 0x27);
        assert_eq!(entry.cycles, 44);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("C0".parse::<TraceEntry>(), Err(TraceParseError::TooShort));
        assert_eq!(
            "C000  4C F5 C5  JMP $C5F5".parse::<TraceEntry>(),
            Err(TraceParseError::Missing("A:"))
        );
        assert!(matches!(
            "ZZZZ  4C F5 C5  JMP  A:00".parse::<TraceEntry>(),
            Err(TraceParseError::BadValue { field: "PC", .. })
        ));
    }

    #[test]
    fn compares_against_step() {
        let entry: TraceEntry = FIRST.parse().expect("valid line");
        let mut step = Step {
            pc: 0xC000,
            a: 0,
            x: 0,
            y: 0,
            p: 0x24,
            s: 0xFD,
            opcode: 0x4C,
            operands: [0xF5, 0xC5],
            len: 3,
            cycles: 7,
        };
        assert!(entry.matches(&step));

        step.cycles = 8;
        step.a = 1;
        assert_eq!(entry.mismatches(&step), ["A", "CYC"]);
    }

    #[test]
    fn step_rendering_parses_back() {
        let step = Step {
            pc: 0xC5F5,
            a: 0,
            x: 0,
            y: 0,
            p: 0x24,
            s: 0xFD,
            opcode: 0xA2,
            operands: [0x00, 0x00],
            len: 2,
            cycles: 10,
        };
        let entry: TraceEntry = step.to_string().parse().expect("own format");
        assert!(entry.matches(&step));
        assert_eq!(entry.bytes, [0xA2, 0x00]);
    }
}
