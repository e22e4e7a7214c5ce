// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use super::*;
use crate::trace::TracedParams;

impl Interpreter {
    /// Read the opcode at `ip`. Running off the end of memory means the program never halted.
    pub(crate) fn fetch(&self, ip: usize) -> Result<i64, InterpreterError> {
        self.code
            .as_slice()
            .get(ip)
            .copied()
            .ok_or(InterpreterError::Truncated {
                ip,
                len: self.code.len(),
            })
    }

    /// The parameter words of `op`, which starts at the current instruction pointer
    pub(crate) fn params<const N: usize>(&self, op: Operation) -> Result<[i64; N], InterpreterError> {
        debug_assert_eq!(op.param_count(), N);
        let ip = self.index;
        self.code
            .as_slice()
            .get(ip + 1..ip + op.size)
            .and_then(|words| <[i64; N]>::try_from(words).ok())
            .ok_or(InterpreterError::Truncated {
                ip,
                len: self.code.len(),
            })
    }

    /// common logic of the instructions that take 2 source addresses and 1 destination address
    pub(crate) fn op3(&mut self, op_int: i64, op: Operation) -> Result<State, InterpreterError> {
        let ip = self.index;
        let [pa, pb, pdest] = self.params::<3>(op)?;
        let a = self.code.get(pa)?;
        let b = self.code.get(pb)?;
        let dest = self.code.address(pdest)?;
        let val = op.apply(a, b).ok_or(InterpreterError::Overflow { ip })?;
        self.code[dest] = val;
        self.record(
            op_int,
            op.opcode,
            Some(TracedParams {
                a: (pa, a),
                b: (pb, b),
                dest: (pdest, val),
            }),
        );
        self.index += op.size;
        Ok(State::Running)
    }

    /// Add the instruction at the current instruction pointer to the trace, if one is running
    pub(crate) fn record(&mut self, op_int: i64, opcode: OpCode, params: Option<TracedParams>) {
        if let Some(trace) = self.trace.as_mut() {
            let snapshot = self.snapshots.then(|| self.code.clone());
            trace.push(op_int, opcode, self.index, params, snapshot);
        }
    }
}
