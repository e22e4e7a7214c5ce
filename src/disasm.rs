// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Disassembler-related functionality
//!
//! See [disassemble] for documentation

use itertools::Itertools;
use std::fmt::Write;

use super::registry;

/// Create disassembly from the memory
///
/// Each line is either an instruction (`ADD a, b, dest`, `MUL a, b, dest` or `HALT`) with its
/// parameters as raw addresses, or a `DATA` line listing words that aren't part of one.
///
/// # Example
///
/// ```
/// use gravity_assist::disasm::disassemble;
/// const EXPECTED_DISASM: &str = r#"
/// ADD 9, 10, 3
/// MUL 3, 11, 0
/// HALT
/// DATA 30, 40, 50
/// "#;
/// assert_eq!(
///     disassemble([1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]),
///     EXPECTED_DISASM.trim_ascii_start()
/// );
/// ```
///
/// # Caveats
///
/// It's ambiguous where an instruction begins, as there's no way to tell whether a word is code or
/// data without running the program. The approach this function uses is to start at the beginning
/// of `mem_iter`, and treat any word that is a known opcode, followed by enough words to hold its
/// parameters, as the start of an instruction. Anything else is grouped into a `DATA` line.
///
/// ```
/// use gravity_assist::disasm::disassemble;
/// // 2 is the opcode of MUL, so the data after HALT is misread as an instruction
/// assert_eq!(
///     disassemble([99, 2, 5, 6, 7, 50]),
///     "HALT\nMUL 5, 6, 7\nDATA 50\n"
/// );
/// ```
///
/// Because programs can modify themselves, this only shows the code as it exists at a specific
/// point in time, and not what an instruction will look like at the time it's executed.
pub fn disassemble(mem_iter: impl IntoIterator<Item = i64>) -> String {
    let mem: Vec<i64> = mem_iter.into_iter().collect();

    let instr_at = |i: usize| {
        registry::lookup(mem[i])
            .ok()
            .filter(|op| i + op.size <= mem.len())
    };

    let mut out = String::new();
    let mut i = 0;
    while i < mem.len() {
        if let Some(op) = instr_at(i) {
            let params = &mem[i + 1..i + op.size];
            let written = if params.is_empty() {
                writeln!(out, "{}", op.opcode)
            } else {
                writeln!(out, "{} {}", op.opcode, params.iter().format(", "))
            };
            written.expect("writing to a String can't fail");
            i += op.size;
        } else {
            let start = i;
            i += 1;
            while i < mem.len() && instr_at(i).is_none() {
                i += 1;
            }
            writeln!(out, "DATA {}", mem[start..i].iter().format(", "))
                .expect("writing to a String can't fail");
        }
    }
    out
}
