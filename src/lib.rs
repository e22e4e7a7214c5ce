// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD
#![warn(missing_docs)]

//! Library providing the minimal Intcode computer from the "1202 Program Alarm" puzzle, and a
//! search over its inputs
//!
//! The computer only knows three [operations]: add, multiply, and halt. All parameters are in
//! position mode, and memory has a fixed size, so any access outside of it is an error rather
//! than growing memory.
//!
//! # Example
//!
//! ```rust
//! use gravity_assist::prelude::*;
//! let mut interpreter = Interpreter::new([1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
//!
//! assert_eq!(interpreter.run(), Ok(3500));
//! assert_eq!(interpreter.state(), State::Halted);
//! ```
//!
//! Searching for the noun and verb that produce a given output is done with [search::find]:
//!
//! ```rust
//! use gravity_assist::prelude::*;
//! // output is mem[noun] + mem[verb]
//! let mut program: Vec<i64> = (0..100).collect();
//! program[..5].copy_from_slice(&[1, 0, 0, 0, 99]);
//!
//! let params = find(&program.into(), 100).unwrap();
//! assert_eq!(params, Params { noun: 0, verb: 4 });
//! assert_eq!(params.answer(), 4);
//! ```
//!
//! [operations]: registry::OPERATIONS

mod internals;
mod memory;

pub mod disasm;
pub mod parse;
pub mod registry;
pub mod search;
pub mod trace;

use std::ops::Index;

pub use memory::Memory;
pub use registry::{OpCode, Operation, UnknownOpcode};
use trace::Trace;

/// A small module that re-exports items needed when working with the interpreter and search
pub mod prelude {
    pub use crate::search::{Params, SearchError, find, find_parallel};
    pub use crate::{Interpreter, InterpreterError, Memory, State};
}

/// The state of the interpreter between steps
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// There are more instructions to execute
    Running,
    /// A `HALT` instruction has been executed. Once it's been returned, no more instructions will
    /// be executed.
    Halted,
}

/// An error occured when executing an instruction
///
/// None of these can be recovered from: once one has been returned, the [Interpreter] is poisoned
/// and every further step returns [`InterpreterError::Poisoned`].
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum InterpreterError {
    /// An opcode that isn't in the [registry] was encountered
    #[error("encountered unrecognized opcode {opcode} at address {ip}")]
    UnknownOpcode {
        /// the offending opcode
        opcode: i64,
        /// where it was found
        ip: usize,
    },
    /// An instruction referenced an address outside of memory
    #[error("address {address} is out of bounds for memory of length {len}")]
    OutOfBounds {
        /// the address as it appeared in memory
        address: i64,
        /// length of memory
        len: usize,
    },
    /// Execution ran off the end of memory, either before a `HALT` was found, or in the middle of
    /// an instruction's parameters
    #[error("program is truncated: instruction at {ip} runs past the end of memory (length {len})")]
    Truncated {
        /// address of the opcode that couldn't be executed
        ip: usize,
        /// length of memory
        len: usize,
    },
    /// The result of an arithmetic instruction doesn't fit in an `i64`
    #[error("arithmetic overflow in instruction at {ip}")]
    Overflow {
        /// address of the instruction that overflowed
        ip: usize,
    },
    /// A previous step already failed
    #[error("interpreter is poisoned by an earlier error")]
    Poisoned,
}

/// An interpreter, which provides optional tracing of instructions executed.
#[derive(Clone)]
pub struct Interpreter {
    index: usize,
    code: Memory,
    halted: bool,
    poisoned: bool,
    trace: Option<Trace>,
    snapshots: bool,
}

// ignore the trace
impl PartialEq for Interpreter {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.halted == other.halted
            && self.poisoned == other.poisoned
            && self.code == other.code
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Interpreter")
            .field("code", &self.code)
            .field("ip", &self.index)
            .field("halted", &self.halted)
            .field("poisoned", &self.poisoned)
            .field("tracing", &self.trace.is_some())
            .finish()
    }
}

impl Index<usize> for Interpreter {
    type Output = i64;

    fn index(&self, i: usize) -> &Self::Output {
        self.code.index(i)
    }
}

impl From<Memory> for Interpreter {
    fn from(code: Memory) -> Self {
        Self {
            index: 0,
            code,
            halted: false,
            poisoned: false,
            trace: None,
            snapshots: false,
        }
    }
}

impl Interpreter {
    /// Create a new interpreter. Collects `code` into the starting memory state.
    pub fn new(code: impl IntoIterator<Item = i64>) -> Self {
        code.into_iter().collect::<Memory>().into()
    }

    /// Manually set a memory location
    #[doc(alias("poke", "write"))]
    pub fn mem_override(&mut self, address: i64, value: i64) -> Result<(), InterpreterError> {
        self.code.set(address, value)
    }

    /// Get the memory at `address`
    #[doc(alias = "peek")]
    pub fn mem_get(&self, address: i64) -> Result<i64, InterpreterError> {
        self.code.get(address)
    }

    /// The address of the next instruction to execute
    pub fn instr_ptr(&self) -> usize {
        self.index
    }

    /// Whether the interpreter is still running or has halted
    pub fn state(&self) -> State {
        if self.halted {
            State::Halted
        } else {
            State::Running
        }
    }

    /// Borrow the current memory
    pub fn memory(&self) -> &Memory {
        &self.code
    }

    /// Copy the current memory, e.g. to inspect an intermediate state between steps
    pub fn snapshot(&self) -> Memory {
        self.code.clone()
    }

    /// Consume the interpreter, returning its memory
    pub fn into_memory(self) -> Memory {
        self.code
    }

    /// The output of the program: the value at address `0`, but only once it's halted
    pub fn output(&self) -> Option<i64> {
        // a halt instruction was read from memory, so it can't be empty
        self.halted.then(|| self.code[0])
    }

    /// Execute a single instruction.
    ///
    /// Once halted, further steps do nothing and keep returning [`State::Halted`]. Once an error
    /// has been returned, further steps return [`InterpreterError::Poisoned`].
    pub fn step(&mut self) -> Result<State, InterpreterError> {
        if self.poisoned {
            return Err(InterpreterError::Poisoned);
        }
        if self.halted {
            return Ok(State::Halted);
        }
        let outcome = self.exec_instruction();
        match outcome {
            Ok(State::Halted) => self.halted = true,
            Ok(State::Running) => (),
            Err(ref e) => {
                tracing::debug!(ip = self.index, error = %e, "interpreter poisoned");
                self.poisoned = true;
            }
        }
        outcome
    }

    /// Execute until the program halts, and return its output.
    ///
    /// On error, it will return an [`InterpreterError`] that reflects the error.
    pub fn run(&mut self) -> Result<i64, InterpreterError> {
        while self.step()? == State::Running {}
        Ok(self.code[0])
    }

    fn exec_instruction(&mut self) -> Result<State, InterpreterError> {
        let ip = self.index;
        let op_int = self.fetch(ip)?;
        let op = registry::lookup(op_int)
            .map_err(|UnknownOpcode(opcode)| InterpreterError::UnknownOpcode { opcode, ip })?;
        tracing::trace!(ip, opcode = %op.opcode, "executing");

        match op.opcode {
            OpCode::Add | OpCode::Mul => self.op3(op_int, op),
            OpCode::Halt => {
                self.record(op_int, op.opcode, None);
                Ok(State::Halted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run `code` to the end, returning the final memory
    fn run_to_end<const N: usize>(code: [i64; N]) -> Memory {
        let mut interp = Interpreter::new(code);
        interp.run().unwrap();
        interp.into_memory()
    }

    #[test]
    fn extended_example() {
        let mut interp = Interpreter::new([1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
        assert_eq!(interp.step(), Ok(State::Running));
        assert_eq!(interp.snapshot(), [1, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]);
        assert_eq!(interp.instr_ptr(), 4);
        assert_eq!(interp.step(), Ok(State::Running));
        assert_eq!(interp.snapshot(), [3500, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]);
        assert_eq!(interp.instr_ptr(), 8);
        assert_eq!(interp.step(), Ok(State::Halted));
        assert_eq!(interp.instr_ptr(), 8);
        assert_eq!(interp.output(), Some(3500));
    }

    #[test]
    fn small_examples() {
        assert_eq!(run_to_end([1, 0, 0, 0, 99]), [2, 0, 0, 0, 99]);
        assert_eq!(run_to_end([2, 3, 0, 3, 99]), [2, 3, 0, 6, 99]);
        assert_eq!(run_to_end([2, 4, 4, 5, 99, 0]), [2, 4, 4, 5, 99, 9801]);
        assert_eq!(
            run_to_end([1, 1, 1, 4, 99, 5, 6, 0, 99]),
            [30, 1, 1, 4, 2, 5, 6, 0, 99]
        );
    }

    #[test]
    fn stepping_after_halt_is_a_no_op() {
        let mut interp = Interpreter::new([99, 5, 7]);
        let before = interp.clone();
        assert_eq!(interp.run(), Ok(99));
        assert_eq!(interp.step(), Ok(State::Halted));
        assert_eq!(interp.memory(), before.memory());
        assert_eq!(interp.instr_ptr(), 0);
    }

    #[test]
    fn unknown_opcode_is_not_halt() {
        let mut interp = Interpreter::new([1, 0, 0, 0, 42, 99]);
        assert_eq!(
            interp.run(),
            Err(InterpreterError::UnknownOpcode { opcode: 42, ip: 4 })
        );
        assert_eq!(interp.output(), None);
        assert_eq!(interp.step(), Err(InterpreterError::Poisoned));
    }

    #[test]
    fn missing_halt() {
        let mut interp = Interpreter::new([1, 0, 0, 0]);
        assert_eq!(
            interp.run(),
            Err(InterpreterError::Truncated { ip: 4, len: 4 })
        );
        // the one complete instruction did run
        assert_eq!(interp.memory(), &Memory::from([2, 0, 0, 0]));

        assert_eq!(
            Interpreter::new([]).run(),
            Err(InterpreterError::Truncated { ip: 0, len: 0 })
        );
    }

    #[test]
    fn truncated_parameters() {
        let mut interp = Interpreter::new([2, 0, 0]);
        assert_eq!(
            interp.run(),
            Err(InterpreterError::Truncated { ip: 0, len: 3 })
        );
        assert_eq!(interp.memory(), &Memory::from([2, 0, 0]));
    }

    #[test]
    fn address_boundary() {
        // writing to the last address is fine
        assert_eq!(run_to_end([1, 0, 0, 5, 99, 0]), [1, 0, 0, 5, 99, 2]);

        // one past it is not
        let mut interp = Interpreter::new([1, 0, 0, 6, 99, 0]);
        assert_eq!(
            interp.run(),
            Err(InterpreterError::OutOfBounds { address: 6, len: 6 })
        );
        assert_eq!(interp.memory(), &Memory::from([1, 0, 0, 6, 99, 0]));

        // same for reads
        assert_eq!(
            Interpreter::new([1, 6, 0, 0, 99, 0]).run(),
            Err(InterpreterError::OutOfBounds { address: 6, len: 6 })
        );
        assert_eq!(
            Interpreter::new([2, 0, -1, 0, 99]).run(),
            Err(InterpreterError::OutOfBounds {
                address: -1,
                len: 5
            })
        );
    }

    #[test]
    fn overflow_is_reported() {
        let mut interp = Interpreter::new([2, 5, 5, 5, 99, i64::MAX]);
        assert_eq!(interp.run(), Err(InterpreterError::Overflow { ip: 0 }));
        assert_eq!(interp[5], i64::MAX);
    }

    #[test]
    fn poke_and_peek() {
        let mut interp = Interpreter::new([1, 0, 0, 0, 99]);
        assert_eq!(interp.mem_override(1, 4), Ok(()));
        assert_eq!(interp.mem_override(2, 4), Ok(()));
        assert_eq!(
            interp.mem_override(5, 0),
            Err(InterpreterError::OutOfBounds { address: 5, len: 5 })
        );
        assert_eq!(interp.run(), Ok(198));
        assert_eq!(interp.mem_get(0), Ok(198));
        assert!(interp.mem_get(-3).is_err());
    }
}
