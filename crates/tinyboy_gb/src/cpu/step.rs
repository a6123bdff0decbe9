use crate::config::OpcodePolicy;
use crate::error::CpuError;

use super::{ops, Bus, Cpu};

/// Cost charged for a HALT step or a skipped opcode: one machine cycle.
const IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Run one instruction and return the T-cycles it consumed.
    ///
    /// The sequence is: fetch the opcode at PC, decode it through the opcode
    /// table, execute it, pass the cost to `bus.tick` so every peripheral
    /// advances by exactly the same amount, then run interrupt dispatch.
    ///
    /// While halted no instruction runs, but the step still costs one
    /// machine cycle so time keeps moving. A pending interrupt wakes the
    /// CPU even when IME is clear; it is only dispatched when IME is set.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        if self.halted {
            if !self.pending_interrupts(bus).is_empty() {
                self.halted = false;
            }
            bus.tick(IDLE_CYCLES);
            self.check_interrupts(bus);
            return Ok(IDLE_CYCLES);
        }

        let pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        let cycles = match ops::lookup(opcode) {
            Some(op) => {
                log::trace!("GB CPU 0x{pc:04X}: {op:?} (0x{opcode:02X})");
                self.execute(bus, op)
            }
            None => self.unimplemented_opcode(opcode, pc)?,
        };

        bus.tick(cycles);
        self.check_interrupts(bus);
        Ok(cycles)
    }

    fn unimplemented_opcode(&mut self, opcode: u8, pc: u16) -> Result<u32, CpuError> {
        match self.opcode_policy {
            OpcodePolicy::Halt => {
                log::error!(
                    "GB CPU stopped: unimplemented opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                    sp = self.regs.sp,
                    af = self.regs.af(),
                    bc = self.regs.bc(),
                    de = self.regs.de(),
                    hl = self.regs.hl(),
                );
                // Leave PC on the offending opcode so debuggers see it.
                self.regs.pc = pc;
                let fault = CpuError::UnimplementedOpcode { opcode, pc };
                self.fault = Some(fault);
                Err(fault)
            }
            OpcodePolicy::Nop => {
                log::warn!("GB CPU skipping unimplemented opcode 0x{opcode:02X} at PC=0x{pc:04X}");
                Ok(IDLE_CYCLES)
            }
        }
    }
}
