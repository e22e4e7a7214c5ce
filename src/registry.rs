// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! The fixed set of operations the computer understands
//!
//! There are exactly three: [`ADD`], [`MUL`] and [`HALT`]. Both arithmetic operations take three
//! parameters in position mode: two source addresses and a destination address.
//!
//! ```
//! use gravity_assist::registry::{self, OpCode, UnknownOpcode};
//! assert_eq!(registry::lookup(2).map(|op| op.size), Ok(4));
//! assert_eq!(registry::lookup(99).map(|op| op.opcode), Ok(OpCode::Halt));
//! assert_eq!(registry::lookup(3), Err(UnknownOpcode(3)));
//! ```

use std::fmt::{self, Display};

/// An opcode with a known meaning
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum OpCode {
    /// `dest = a + b`
    Add = 1,
    /// `dest = a * b`
    Mul = 2,
    /// Stop execution
    Halt = 99,
}

/// The opcode wasn't one of the known [`OpCode`]s
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
#[error("unrecognized opcode {0}")]
pub struct UnknownOpcode(pub i64);

impl TryFrom<i64> for OpCode {
    type Error = UnknownOpcode;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            1 => Ok(OpCode::Add),
            2 => Ok(OpCode::Mul),
            99 => Ok(OpCode::Halt),
            _ => Err(UnknownOpcode(i)),
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpCode::Add => "ADD",
            OpCode::Mul => "MUL",
            OpCode::Halt => "HALT",
        })
    }
}

/// Descriptor of an operation
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Operation {
    /// Which operation this is
    pub opcode: OpCode,
    /// Total words consumed, including the opcode itself
    pub size: usize,
}

/// `ADD a, b, dest`
pub const ADD: Operation = Operation {
    opcode: OpCode::Add,
    size: 4,
};

/// `MUL a, b, dest`
pub const MUL: Operation = Operation {
    opcode: OpCode::Mul,
    size: 4,
};

/// `HALT`
pub const HALT: Operation = Operation {
    opcode: OpCode::Halt,
    size: 1,
};

/// Every registered operation, in opcode order
pub const OPERATIONS: [Operation; 3] = [ADD, MUL, HALT];

impl Operation {
    /// Number of parameter words following the opcode
    pub const fn param_count(self) -> usize {
        self.size - 1
    }

    /// Combine the two resolved operands of an arithmetic operation.
    ///
    /// Returns [`None`] for [`HALT`], and on `i64` overflow.
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self.opcode {
            OpCode::Add => a.checked_add(b),
            OpCode::Mul => a.checked_mul(b),
            OpCode::Halt => None,
        }
    }
}

impl From<OpCode> for Operation {
    fn from(opcode: OpCode) -> Self {
        match opcode {
            OpCode::Add => ADD,
            OpCode::Mul => MUL,
            OpCode::Halt => HALT,
        }
    }
}

/// Find the [`Operation`] for `opcode`.
///
/// Unlike the fallback some implementations use, an unrecognized opcode is *not* treated as
/// [`HALT`]; the caller gets an [`UnknownOpcode`] and decides what to do with it.
pub fn lookup(opcode: i64) -> Result<Operation, UnknownOpcode> {
    OpCode::try_from(opcode).map(Operation::from)
}
