// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Decoding program text
//!
//! A program is a single line of comma-separated base-10 integers:
//!
//! ```
//! use gravity_assist::{Memory, parse::parse_program};
//! assert_eq!(parse_program("1,0,0,0,99\n").unwrap(), vec![1, 0, 0, 0, 99]);
//! let mem: Memory = " 2, 3, 0, 3, 99 ".parse().unwrap();
//! assert_eq!(mem, [2, 3, 0, 3, 99]);
//! ```

use std::num::ParseIntError;
use std::str::FromStr;

use super::Memory;

/// The program text could not be decoded
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ParseError {
    /// There was nothing but whitespace
    #[error("program is empty")]
    Empty,
    /// A token was not a valid `i64`
    #[error("error parsing token {index} ({token:?}): {source}")]
    InvalidInt {
        /// zero-based position of the token within the program
        index: usize,
        /// the offending token, with surrounding whitespace removed
        token: Box<str>,
        /// the underlying error
        source: ParseIntError,
    },
}

/// Parse `text` into the integers it contains, in order
pub fn parse_program(text: &str) -> Result<Vec<i64>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    text.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, token)| {
            token.parse().map_err(|source| ParseError::InvalidInt {
                index,
                token: Box::from(token),
                source,
            })
        })
        .collect()
}

impl FromStr for Memory {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_program(s).map(Memory::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_and_padded() {
        assert_eq!(parse_program("\t-1 ,2,\t+3\r\n"), Ok(vec![-1, 2, 3]));
    }

    #[test]
    fn bad_tokens() {
        let Err(ParseError::InvalidInt { index, token, .. }) = parse_program("1,2,x3,4") else {
            panic!("parsed invalid token");
        };
        assert_eq!((index, &*token), (2, "x3"));

        // a trailing comma leaves an empty token
        assert!(matches!(
            parse_program("1,0,0,0,99,"),
            Err(ParseError::InvalidInt { index: 5, .. })
        ));
        assert!(matches!(
            parse_program("99999999999999999999"),
            Err(ParseError::InvalidInt { index: 0, .. })
        ));
    }

    #[test]
    fn empty() {
        assert_eq!(parse_program(""), Err(ParseError::Empty));
        assert_eq!(" \n".parse::<Memory>(), Err(ParseError::Empty));
    }

    #[test]
    fn display_round_trips() {
        let text = "1,9,10,3,2,3,11,0,99,30,40,50";
        assert_eq!(text.parse::<Memory>().unwrap().to_string(), text);
    }
}
