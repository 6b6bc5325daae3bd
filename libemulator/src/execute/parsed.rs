use libisa::instruction::{kind::InstructionKind, Instruction, Operand};

use crate::{memory::Cell, Emulator};

use super::ExecuteErr;

impl Emulator {
    pub fn execute_parsed_instruction(
        &mut self,
        offset: usize,
        instruction: Instruction,
    ) -> Result<(), ExecuteErr> {
        let value = match instruction.kind {
            InstructionKind::LoadConst => instruction.c,

            InstructionKind::LoadMemory => self.mem_cell(instruction.c, offset)?,

            InstructionKind::StoreMemory => {
                let c = self.mem_cell(instruction.c, offset)?;
                let d = self.mem_cell(operand_d(&instruction), offset)?;

                c.wrapping_add(d)
            }

            InstructionKind::ShiftRight => {
                let c = self.mem_cell(instruction.c, offset)?;
                let d = self.mem_cell(operand_d(&instruction), offset)?;

                shift_right(c, d)
            }

            InstructionKind::ShiftLeft => {
                let c = self.mem_cell(instruction.c, offset)?;
                let d = self.mem_cell(operand_d(&instruction), offset)?;

                shift_left(c, d)
            }
        };

        let dest = self.mem_cell_mut(instruction.b, offset)?;
        *dest = value;

        Ok(())
    }
}

// Decoding always sets D for the kinds that read it.
fn operand_d(instruction: &Instruction) -> Operand {
    instruction.d.unwrap_or_default()
}

/// Logical shift, everything is shifted out once the amount reaches the cell width.
fn shift_right(value: Cell, amount: Cell) -> Cell {
    u32::try_from(amount)
        .ok()
        .and_then(|amount| value.checked_shr(amount))
        .unwrap_or(0)
}

fn shift_left(value: Cell, amount: Cell) -> Cell {
    u32::try_from(amount)
        .ok()
        .and_then(|amount| value.checked_shl(amount))
        .unwrap_or(0)
}
