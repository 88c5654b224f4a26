//! Static opcode descriptor table.
//!
//! Every one of the 256 opcode bytes decodes to an operation tag and an
//! addressing-mode tag. The CPU dispatches on these tags; nothing here is
//! allocated at run time.

use std::fmt;

/// Addressing mode of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    /// `(zp,X)`
    IndexedIndirect,
    /// `(zp),Y`
    IndirectIndexed,
    Relative,
}

impl Mode {
    /// Instruction length in bytes, opcode included.
    #[must_use]
    pub const fn len(self) -> u8 {
        match self {
            Self::Implied | Self::Accumulator => 1,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndexedIndirect
            | Self::IndirectIndexed
            | Self::Relative => 2,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 3,
        }
    }
}

/// Operation performed by an opcode, documented and undocumented alike.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    // Undocumented.
    Alr, Anc, Arr, Axs, Dcp, Isc, Kil, Las, Lax, Lxa, Rla, Rra, Sax, Sha,
    Shx, Shy, Slo, Sre, Tas, Xaa,
}

/// How an operation touches its effective address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reads the operand.
    Read,
    /// Writes a value, never reads it.
    Write,
    /// Reads, writes the original back, writes the result.
    Modify,
    /// Stack, jump, branch and halt instructions with their own sequences.
    Control,
}

impl Mnemonic {
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Sta | Self::Stx | Self::Sty | Self::Sax | Self::Sha | Self::Shx | Self::Shy
            | Self::Tas => Access::Write,
            Self::Asl | Self::Lsr | Self::Rol | Self::Ror | Self::Inc | Self::Dec | Self::Slo
            | Self::Rla | Self::Sre | Self::Rra | Self::Dcp | Self::Isc => Access::Modify,
            Self::Brk | Self::Jsr | Self::Rti | Self::Rts | Self::Jmp | Self::Pha | Self::Php
            | Self::Pla | Self::Plp | Self::Bcc | Self::Bcs | Self::Beq | Self::Bmi
            | Self::Bne | Self::Bpl | Self::Bvc | Self::Bvs | Self::Kil => Access::Control,
            _ => Access::Read,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = format!("{self:?}").to_uppercase();
        f.pad(&name)
    }
}

/// Decoded form of one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: Mode,
    /// False for undocumented opcodes.
    pub official: bool,
}

impl Opcode {
    /// Instruction length in bytes, opcode included.
    #[must_use]
    pub const fn len(self) -> u8 {
        self.mode.len()
    }

    /// Look up the descriptor for an opcode byte.
    #[must_use]
    pub const fn decode(byte: u8) -> Self {
        OPCODES[byte as usize]
    }
}

const fn op(mnemonic: Mnemonic, mode: Mode) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        official: true,
    }
}

const fn ill(mnemonic: Mnemonic, mode: Mode) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        official: false,
    }
}

const KIL: Opcode = ill(Mnemonic::Kil, Mode::Implied);

#[allow(clippy::enum_glob_use)]
use Mnemonic::*;
#[allow(clippy::enum_glob_use)]
use Mode::*;

/// Descriptor table indexed by opcode byte.
#[rustfmt::skip]
pub static OPCODES: [Opcode; 256] = [
    // $00
    op(Brk, Implied), op(Ora, IndexedIndirect), KIL, ill(Slo, IndexedIndirect),
    ill(Nop, ZeroPage), op(Ora, ZeroPage), op(Asl, ZeroPage), ill(Slo, ZeroPage),
    op(Php, Implied), op(Ora, Immediate), op(Asl, Accumulator), ill(Anc, Immediate),
    ill(Nop, Absolute), op(Ora, Absolute), op(Asl, Absolute), ill(Slo, Absolute),
    // $10
    op(Bpl, Relative), op(Ora, IndirectIndexed), KIL, ill(Slo, IndirectIndexed),
    ill(Nop, ZeroPageX), op(Ora, ZeroPageX), op(Asl, ZeroPageX), ill(Slo, ZeroPageX),
    op(Clc, Implied), op(Ora, AbsoluteY), ill(Nop, Implied), ill(Slo, AbsoluteY),
    ill(Nop, AbsoluteX), op(Ora, AbsoluteX), op(Asl, AbsoluteX), ill(Slo, AbsoluteX),
    // $20
    op(Jsr, Absolute), op(And, IndexedIndirect), KIL, ill(Rla, IndexedIndirect),
    op(Bit, ZeroPage), op(And, ZeroPage), op(Rol, ZeroPage), ill(Rla, ZeroPage),
    op(Plp, Implied), op(And, Immediate), op(Rol, Accumulator), ill(Anc, Immediate),
    op(Bit, Absolute), op(And, Absolute), op(Rol, Absolute), ill(Rla, Absolute),
    // $30
    op(Bmi, Relative), op(And, IndirectIndexed), KIL, ill(Rla, IndirectIndexed),
    ill(Nop, ZeroPageX), op(And, ZeroPageX), op(Rol, ZeroPageX), ill(Rla, ZeroPageX),
    op(Sec, Implied), op(And, AbsoluteY), ill(Nop, Implied), ill(Rla, AbsoluteY),
    ill(Nop, AbsoluteX), op(And, AbsoluteX), op(Rol, AbsoluteX), ill(Rla, AbsoluteX),
    // $40
    op(Rti, Implied), op(Eor, IndexedIndirect), KIL, ill(Sre, IndexedIndirect),
    ill(Nop, ZeroPage), op(Eor, ZeroPage), op(Lsr, ZeroPage), ill(Sre, ZeroPage),
    op(Pha, Implied), op(Eor, Immediate), op(Lsr, Accumulator), ill(Alr, Immediate),
    op(Jmp, Absolute), op(Eor, Absolute), op(Lsr, Absolute), ill(Sre, Absolute),
    // $50
    op(Bvc, Relative), op(Eor, IndirectIndexed), KIL, ill(Sre, IndirectIndexed),
    ill(Nop, ZeroPageX), op(Eor, ZeroPageX), op(Lsr, ZeroPageX), ill(Sre, ZeroPageX),
    op(Cli, Implied), op(Eor, AbsoluteY), ill(Nop, Implied), ill(Sre, AbsoluteY),
    ill(Nop, AbsoluteX), op(Eor, AbsoluteX), op(Lsr, AbsoluteX), ill(Sre, AbsoluteX),
    // $60
    op(Rts, Implied), op(Adc, IndexedIndirect), KIL, ill(Rra, IndexedIndirect),
    ill(Nop, ZeroPage), op(Adc, ZeroPage), op(Ror, ZeroPage), ill(Rra, ZeroPage),
    op(Pla, Implied), op(Adc, Immediate), op(Ror, Accumulator), ill(Arr, Immediate),
    op(Jmp, Indirect), op(Adc, Absolute), op(Ror, Absolute), ill(Rra, Absolute),
    // $70
    op(Bvs, Relative), op(Adc, IndirectIndexed), KIL, ill(Rra, IndirectIndexed),
    ill(Nop, ZeroPageX), op(Adc, ZeroPageX), op(Ror, ZeroPageX), ill(Rra, ZeroPageX),
    op(Sei, Implied), op(Adc, AbsoluteY), ill(Nop, Implied), ill(Rra, AbsoluteY),
    ill(Nop, AbsoluteX), op(Adc, AbsoluteX), op(Ror, AbsoluteX), ill(Rra, AbsoluteX),
    // $80
    ill(Nop, Immediate), op(Sta, IndexedIndirect), ill(Nop, Immediate), ill(Sax, IndexedIndirect),
    op(Sty, ZeroPage), op(Sta, ZeroPage), op(Stx, ZeroPage), ill(Sax, ZeroPage),
    op(Dey, Implied), ill(Nop, Immediate), op(Txa, Implied), ill(Xaa, Immediate),
    op(Sty, Absolute), op(Sta, Absolute), op(Stx, Absolute), ill(Sax, Absolute),
    // $90
    op(Bcc, Relative), op(Sta, IndirectIndexed), KIL, ill(Sha, IndirectIndexed),
    op(Sty, ZeroPageX), op(Sta, ZeroPageX), op(Stx, ZeroPageY), ill(Sax, ZeroPageY),
    op(Tya, Implied), op(Sta, AbsoluteY), op(Txs, Implied), ill(Tas, AbsoluteY),
    ill(Shy, AbsoluteX), op(Sta, AbsoluteX), ill(Shx, AbsoluteY), ill(Sha, AbsoluteY),
    // $A0
    op(Ldy, Immediate), op(Lda, IndexedIndirect), op(Ldx, Immediate), ill(Lax, IndexedIndirect),
    op(Ldy, ZeroPage), op(Lda, ZeroPage), op(Ldx, ZeroPage), ill(Lax, ZeroPage),
    op(Tay, Implied), op(Lda, Immediate), op(Tax, Implied), ill(Lxa, Immediate),
    op(Ldy, Absolute), op(Lda, Absolute), op(Ldx, Absolute), ill(Lax, Absolute),
    // $B0
    op(Bcs, Relative), op(Lda, IndirectIndexed), KIL, ill(Lax, IndirectIndexed),
    op(Ldy, ZeroPageX), op(Lda, ZeroPageX), op(Ldx, ZeroPageY), ill(Lax, ZeroPageY),
    op(Clv, Implied), op(Lda, AbsoluteY), op(Tsx, Implied), ill(Las, AbsoluteY),
    op(Ldy, AbsoluteX), op(Lda, AbsoluteX), op(Ldx, AbsoluteY), ill(Lax, AbsoluteY),
    // $C0
    op(Cpy, Immediate), op(Cmp, IndexedIndirect), ill(Nop, Immediate), ill(Dcp, IndexedIndirect),
    op(Cpy, ZeroPage), op(Cmp, ZeroPage), op(Dec, ZeroPage), ill(Dcp, ZeroPage),
    op(Iny, Implied), op(Cmp, Immediate), op(Dex, Implied), ill(Axs, Immediate),
    op(Cpy, Absolute), op(Cmp, Absolute), op(Dec, Absolute), ill(Dcp, Absolute),
    // $D0
    op(Bne, Relative), op(Cmp, IndirectIndexed), KIL, ill(Dcp, IndirectIndexed),
    ill(Nop, ZeroPageX), op(Cmp, ZeroPageX), op(Dec, ZeroPageX), ill(Dcp, ZeroPageX),
    op(Cld, Implied), op(Cmp, AbsoluteY), ill(Nop, Implied), ill(Dcp, AbsoluteY),
    ill(Nop, AbsoluteX), op(Cmp, AbsoluteX), op(Dec, AbsoluteX), ill(Dcp, AbsoluteX),
    // $E0
    op(Cpx, Immediate), op(Sbc, IndexedIndirect), ill(Nop, Immediate), ill(Isc, IndexedIndirect),
    op(Cpx, ZeroPage), op(Sbc, ZeroPage), op(Inc, ZeroPage), ill(Isc, ZeroPage),
    op(Inx, Implied), op(Sbc, Immediate), op(Nop, Implied), ill(Sbc, Immediate),
    op(Cpx, Absolute), op(Sbc, Absolute), op(Inc, Absolute), ill(Isc, Absolute),
    // $F0
    op(Beq, Relative), op(Sbc, IndirectIndexed), KIL, ill(Isc, IndirectIndexed),
    ill(Nop, ZeroPageX), op(Sbc, ZeroPageX), op(Inc, ZeroPageX), ill(Isc, ZeroPageX),
    op(Sed, Implied), op(Sbc, AbsoluteY), ill(Nop, Implied), ill(Isc, AbsoluteY),
    ill(Nop, AbsoluteX), op(Sbc, AbsoluteX), op(Inc, AbsoluteX), ill(Isc, AbsoluteX),
];
