//! Operation semantics, separated from bus timing.
//!
//! The addressing helpers in `cpu` decide when the operand is on the bus;
//! everything here is pure register and flag arithmetic.

use crate::flags::{C, D, I, N, V, Z};
use crate::opcodes::Mnemonic;
use crate::Mos6502;

/// Constant ORed into A by the unstable ANE/LXA opcodes. Real chips vary;
/// $EE matches the common reference test suites.
const UNSTABLE_MAGIC: u8 = 0xEE;

impl Mos6502 {
    /// Apply an operation that consumes a read operand.
    pub(crate) fn apply_read(&mut self, mnemonic: Mnemonic, val: u8) {
        match mnemonic {
            Mnemonic::Lda => self.do_lda(val),
            Mnemonic::Ldx => self.do_ldx(val),
            Mnemonic::Ldy => self.do_ldy(val),
            Mnemonic::Ora => self.do_ora(val),
            Mnemonic::And => self.do_and(val),
            Mnemonic::Eor => self.do_eor(val),
            Mnemonic::Adc => self.do_adc(val),
            Mnemonic::Sbc => self.do_sbc(val),
            Mnemonic::Cmp => self.do_compare(self.regs.a, val),
            Mnemonic::Cpx => self.do_compare(self.regs.x, val),
            Mnemonic::Cpy => self.do_compare(self.regs.y, val),
            Mnemonic::Bit => self.do_bit(val),
            Mnemonic::Nop => {}
            Mnemonic::Lax => {
                self.do_lda(val);
                self.regs.x = val;
            }
            Mnemonic::Las => {
                let result = val & self.regs.s;
                self.regs.s = result;
                self.regs.x = result;
                self.do_lda(result);
            }
            Mnemonic::Anc => {
                self.do_and(val);
                self.regs.p.set_if(C, self.regs.a & 0x80 != 0);
            }
            Mnemonic::Alr => {
                self.regs.a &= val;
                self.regs.a = self.do_lsr(self.regs.a);
            }
            Mnemonic::Arr => self.do_arr(val),
            Mnemonic::Axs => {
                let masked = self.regs.a & self.regs.x;
                self.regs.p.set_if(C, masked >= val);
                self.regs.x = masked.wrapping_sub(val);
                self.regs.p.update_nz(self.regs.x);
            }
            Mnemonic::Xaa => {
                self.do_lda((self.regs.a | UNSTABLE_MAGIC) & self.regs.x & val);
            }
            Mnemonic::Lxa => {
                let result = (self.regs.a | UNSTABLE_MAGIC) & val;
                self.regs.x = result;
                self.do_lda(result);
            }
            _ => unreachable!("{mnemonic:?} is not a read operation"),
        }
    }

    /// Apply a read-modify-write operation, returning the byte written back.
    pub(crate) fn apply_modify(&mut self, mnemonic: Mnemonic, val: u8) -> u8 {
        match mnemonic {
            Mnemonic::Asl => self.do_asl(val),
            Mnemonic::Lsr => self.do_lsr(val),
            Mnemonic::Rol => self.do_rol(val),
            Mnemonic::Ror => self.do_ror(val),
            Mnemonic::Inc => self.do_inc(val),
            Mnemonic::Dec => self.do_dec(val),
            Mnemonic::Slo => {
                let result = self.do_asl(val);
                self.do_ora(result);
                result
            }
            Mnemonic::Rla => {
                let result = self.do_rol(val);
                self.do_and(result);
                result
            }
            Mnemonic::Sre => {
                let result = self.do_lsr(val);
                self.do_eor(result);
                result
            }
            Mnemonic::Rra => {
                let result = self.do_ror(val);
                self.do_adc(result);
                result
            }
            Mnemonic::Dcp => {
                let result = val.wrapping_sub(1);
                self.do_compare(self.regs.a, result);
                result
            }
            Mnemonic::Isc => {
                let result = val.wrapping_add(1);
                self.do_sbc(result);
                result
            }
            _ => unreachable!("{mnemonic:?} is not a read-modify-write operation"),
        }
    }

    /// Apply a single-byte instruction (implied or accumulator mode).
    pub(crate) fn apply_implied(&mut self, mnemonic: Mnemonic) {
        match mnemonic {
            Mnemonic::Clc => self.regs.p.clear(C),
            Mnemonic::Cld => self.regs.p.clear(D),
            Mnemonic::Cli => self.regs.p.clear(I),
            Mnemonic::Clv => self.regs.p.clear(V),
            Mnemonic::Sec => self.regs.p.set(C),
            Mnemonic::Sed => self.regs.p.set(D),
            Mnemonic::Sei => self.regs.p.set(I),
            Mnemonic::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
            }
            Mnemonic::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
            }
            Mnemonic::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
            }
            Mnemonic::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
            }
            Mnemonic::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
            }
            // TXS is the one transfer that leaves flags alone.
            Mnemonic::Txs => self.regs.s = self.regs.x,
            Mnemonic::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Mnemonic::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
            }
            Mnemonic::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Mnemonic::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
            }
            Mnemonic::Nop => {}
            Mnemonic::Asl => self.regs.a = self.do_asl(self.regs.a),
            Mnemonic::Lsr => self.regs.a = self.do_lsr(self.regs.a),
            Mnemonic::Rol => self.regs.a = self.do_rol(self.regs.a),
            Mnemonic::Ror => self.regs.a = self.do_ror(self.regs.a),
            _ => unreachable!("{mnemonic:?} is not a single-byte operation"),
        }
    }

    /// Condition tested by a branch opcode.
    pub(crate) fn branch_taken(&self, mnemonic: Mnemonic) -> bool {
        let p = self.regs.p;
        match mnemonic {
            Mnemonic::Bpl => !p.is_set(N),
            Mnemonic::Bmi => p.is_set(N),
            Mnemonic::Bvc => !p.is_set(V),
            Mnemonic::Bvs => p.is_set(V),
            Mnemonic::Bcc => !p.is_set(C),
            Mnemonic::Bcs => p.is_set(C),
            Mnemonic::Bne => !p.is_set(Z),
            Mnemonic::Beq => p.is_set(Z),
            _ => unreachable!("{mnemonic:?} is not a branch"),
        }
    }

    // ========================================================================
    // ALU operations
    // ========================================================================

    fn do_lda(&mut self, val: u8) {
        self.regs.a = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldx(&mut self, val: u8) {
        self.regs.x = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldy(&mut self, val: u8) {
        self.regs.y = val;
        self.regs.p.update_nz(val);
    }

    fn do_ora(&mut self, val: u8) {
        self.regs.a |= val;
        self.regs.p.update_nz(self.regs.a);
    }

    fn do_and(&mut self, val: u8) {
        self.regs.a &= val;
        self.regs.p.update_nz(self.regs.a);
    }

    fn do_eor(&mut self, val: u8) {
        self.regs.a ^= val;
        self.regs.p.update_nz(self.regs.a);
    }

    fn do_adc(&mut self, val: u8) {
        let a = self.regs.a;
        let carry = u16::from(self.regs.p.is_set(C));
        let sum = u16::from(a) + u16::from(val) + carry;
        let result = sum as u8;

        self.regs.p.set_if(C, sum > 0xFF);
        // Overflow when both inputs share a sign the result does not.
        self.regs.p.set_if(V, (a ^ result) & (val ^ result) & 0x80 != 0);
        self.regs.a = result;
        self.regs.p.update_nz(result);
    }

    /// A - M - (1 - C), which is A + !M + C in two's complement.
    fn do_sbc(&mut self, val: u8) {
        self.do_adc(!val);
    }

    fn do_compare(&mut self, reg: u8, val: u8) {
        self.regs.p.set_if(C, reg >= val);
        self.regs.p.update_nz(reg.wrapping_sub(val));
    }

    fn do_bit(&mut self, val: u8) {
        self.regs.p.set_if(Z, self.regs.a & val == 0);
        self.regs.p.set_if(N, val & 0x80 != 0);
        self.regs.p.set_if(V, val & 0x40 != 0);
    }

    fn do_asl(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = val << 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_lsr(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = val >> 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_rol(&mut self, val: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(C));
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = (val << 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }

    fn do_ror(&mut self, val: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(C));
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = (val >> 1) | (carry_in << 7);
        self.regs.p.update_nz(result);
        result
    }

    fn do_inc(&mut self, val: u8) -> u8 {
        let result = val.wrapping_add(1);
        self.regs.p.update_nz(result);
        result
    }

    fn do_dec(&mut self, val: u8) -> u8 {
        let result = val.wrapping_sub(1);
        self.regs.p.update_nz(result);
        result
    }

    /// AND then ROR A, with C and V taken from bits 6 and 5 of the result.
    fn do_arr(&mut self, val: u8) {
        let carry_in = u8::from(self.regs.p.is_set(C));
        let result = ((self.regs.a & val) >> 1) | (carry_in << 7);
        self.regs.a = result;
        self.regs.p.update_nz(result);
        self.regs.p.set_if(C, result & 0x40 != 0);
        self.regs.p.set_if(V, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);
    }
}
