// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Opt-in tracing of executed instructions
use std::fmt::{self, Debug, Display};

use super::{Interpreter, Memory, OpCode};

/// Parameters of a traced arithmetic instruction, each as `(parameter word, resolved value)`.
///
/// For `dest` the resolved value is the value that was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TracedParams {
    pub(crate) a: (i64, i64),
    pub(crate) b: (i64, i64),
    pub(crate) dest: (i64, i64),
}

#[derive(Clone)]
/// An opaque type containing information about what instruction was executed, which can be queried
/// with its various methods, or converted into a [String] using its [Display] impl.
pub struct TracedInstr {
    op_int: i64,
    instr_ptr: usize,
    opcode: OpCode,
    params: Option<TracedParams>,
    snapshot: Option<Memory>,
}

impl TracedInstr {
    /// Return the instruction pointer's position when the traced instruction was executed
    pub fn instr_ptr(&self) -> usize {
        self.instr_ptr
    }

    /// Return the actual integer of the traced instruction
    pub fn op_int(&self) -> i64 {
        self.op_int
    }

    /// Return the opcode of the traced instruction
    pub fn op_code(&self) -> OpCode {
        self.opcode
    }

    /// If the instruction read operands, return them as `(address, value)` pairs
    pub fn operands(&self) -> Option<[(i64, i64); 2]> {
        self.params.map(|p| [p.a, p.b])
    }

    /// If the instruction stored a value, return the address and the value
    pub fn stored(&self) -> Option<(i64, i64)> {
        self.params.map(|p| p.dest)
    }

    /// If the instruction stored a value, return that value
    pub fn stored_val(&self) -> Option<i64> {
        self.stored().map(|(_, val)| val)
    }

    /// Memory right after the instruction executed, if the trace was started with
    /// [Interpreter::start_trace_with_snapshots]
    pub fn snapshot(&self) -> Option<&Memory> {
        self.snapshot.as_ref()
    }
}

impl Interpreter {
    /// Begin a [Trace] of executed instructions. If a trace is already running, this replaces that
    /// trace and returns in a [`Some`], otherwise, it returns [`None`].
    ///
    /// # Example
    /// ```
    /// # use gravity_assist::prelude::*;
    /// let mut interp = Interpreter::new([1, 0, 0, 0, 99]);
    /// assert!(interp.start_trace().is_none());
    /// interp.run().unwrap();
    /// let trace = interp.end_trace().unwrap();
    /// assert_eq!(trace.0.len(), 2);
    /// assert_eq!(trace.0[0].stored(), Some((0, 2)));
    /// ```
    pub fn start_trace(&mut self) -> Option<Trace> {
        self.snapshots = false;
        self.trace.replace(Trace::new())
    }

    /// Like [Interpreter::start_trace], but each [TracedInstr] also keeps a copy of memory as it
    /// was right after that instruction ran
    pub fn start_trace_with_snapshots(&mut self) -> Option<Trace> {
        self.snapshots = true;
        self.trace.replace(Trace::new())
    }

    /// Stop tracing executed instructions into a [Trace]. If no trace was active, returns [`None`]
    ///
    /// see [Interpreter::start_trace]
    pub fn end_trace(&mut self) -> Option<Trace> {
        self.snapshots = false;
        self.trace.take()
    }

    /// Get a view of the current trace
    pub fn show_trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }
}

#[derive(Debug, Default, Clone)]
/// A log of instructions that an [Interpreter] has executed since a call to
/// [Interpreter::start_trace]
///
/// see [Interpreter::start_trace]
pub struct Trace(pub Vec<TracedInstr>);

impl Trace {
    pub(crate) fn push(
        &mut self,
        op_int: i64,
        opcode: OpCode,
        instr_ptr: usize,
        params: Option<TracedParams>,
        snapshot: Option<Memory>,
    ) {
        self.0.push(TracedInstr {
            op_int,
            instr_ptr,
            opcode,
            params,
            snapshot,
        })
    }

    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|instr| writeln!(f, "{instr}"))
    }
}

impl Debug for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedInstr")
            .field("op_int", &self.op_int)
            .field("instr_ptr", &self.instr_ptr)
            .field("opcode", &self.opcode)
            .field("params", &self.params)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl Display for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ran instruction at {:0>4}: op int {: <5} | ",
            self.instr_ptr, self.op_int
        )?;
        match self.params {
            Some(TracedParams {
                a: (pa, va),
                b: (pb, vb),
                dest: (dest, stored),
            }) => write!(
                f,
                "[{} {pa} (resolves to {va}), {pb} (resolves to {vb}), {dest} (stored {stored})]",
                self.opcode
            ),
            None => write!(f, "[HALT]"),
        }
    }
}
