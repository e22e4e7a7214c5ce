// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Searching for the inputs that make a program produce a given output
//!
//! The interpreter is treated as a pure function of `(program, noun, verb)`. Every pair in
//! [`PARAM_RANGE`] × [`PARAM_RANGE`] is tried in row-major order (noun outer, verb inner) on a
//! fresh copy of the program, and the first pair that produces the target wins.

use std::fmt::{self, Display};
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use itertools::iproduct;

use super::{Interpreter, InterpreterError, Memory};

/// Range of values tried for both the noun and the verb
pub const PARAM_RANGE: Range<i64> = 0..100;

/// Address the noun is written to
pub const NOUN_ADDRESS: i64 = 1;

/// Address the verb is written to
pub const VERB_ADDRESS: i64 = 2;

/// The "1202 program alarm" configuration
pub const ALARM_PARAMS: Params = Params { noun: 12, verb: 2 };

/// The output the gravity assist computer needs to produce
#[allow(clippy::unreadable_literal, reason = "from Advent of Code")]
pub const TARGET_OUTPUT: i64 = 19690720;

/// The two inputs of a program
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Params {
    /// written to [`NOUN_ADDRESS`]
    pub noun: i64,
    /// written to [`VERB_ADDRESS`]
    pub verb: i64,
}

impl Params {
    /// `100 * noun + verb`
    pub const fn answer(self) -> i64 {
        100 * self.noun + self.verb
    }

    /// Position of `self` in the row-major scan order of the search space
    #[allow(clippy::cast_sign_loss, reason = "only called on params within PARAM_RANGE")]
    const fn scan_index(self) -> usize {
        let width = PARAM_RANGE.end - PARAM_RANGE.start;
        ((self.noun - PARAM_RANGE.start) * width + (self.verb - PARAM_RANGE.start)) as usize
    }
}

impl Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "noun={}, verb={}", self.noun, self.verb)
    }
}

/// A search ended without an answer
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum SearchError {
    /// Every pair in the search space was tried, and none produced the target
    #[error("no noun and verb in {:?} produce {target}", PARAM_RANGE)]
    NotFound {
        /// the output that was searched for
        target: i64,
    },
    /// Running the program with `params` failed, so the search was aborted
    #[error("program failed with {params}: {source}")]
    Trial {
        /// the inputs of the failed run
        params: Params,
        /// why it failed
        source: InterpreterError,
    },
}

/// Copy `program`, writing the noun and verb into it
pub fn configure(program: &Memory, params: Params) -> Result<Memory, InterpreterError> {
    let mut configured = program.clone();
    configured.set(NOUN_ADDRESS, params.noun)?;
    configured.set(VERB_ADDRESS, params.verb)?;
    Ok(configured)
}

/// Run a fresh copy of `program` configured with `params` to completion, and return its output
pub fn trial(program: &Memory, params: Params) -> Result<i64, InterpreterError> {
    Interpreter::from(configure(program, params)?).run()
}

/// Every pair in the search space, in row-major order
pub fn candidates() -> impl Iterator<Item = Params> {
    iproduct!(PARAM_RANGE, PARAM_RANGE).map(|(noun, verb)| Params { noun, verb })
}

/// Check a single candidate. `Ok(true)` is a match.
fn check(program: &Memory, params: Params, target: i64) -> Result<bool, SearchError> {
    match trial(program, params) {
        Ok(output) => {
            tracing::debug!(%params, output, "trial finished");
            Ok(output == target)
        }
        Err(source) => {
            tracing::warn!(%params, error = %source, "trial failed");
            Err(SearchError::Trial { params, source })
        }
    }
}

/// Find the first [`Params`] in row-major order that make `program` output `target`.
///
/// A trial that fails aborts the search with [`SearchError::Trial`], as rerunning it would fail the
/// same way.
pub fn find(program: &Memory, target: i64) -> Result<Params, SearchError> {
    for params in candidates() {
        if check(program, params, target)? {
            tracing::info!(%params, target, "found parameters");
            return Ok(params);
        }
    }
    tracing::info!(target, "search space exhausted");
    Err(SearchError::NotFound { target })
}

/// Like [`find`], but spreads the trials over `workers` threads.
///
/// The result is always the same as [`find`]'s: the earliest event in row-major order wins,
/// whether it's a match or a failed trial. Worker `w` takes every noun `n` with
/// `n % workers == w`, and scans its nouns in order, so the first event each worker sees is the
/// earliest within its share. Workers skip anything past the earliest event found so far.
pub fn find_parallel(
    program: &Memory,
    target: i64,
    workers: NonZeroUsize,
) -> Result<Params, SearchError> {
    if workers.get() == 1 {
        return find(program, target);
    }

    let nouns: Vec<i64> = PARAM_RANGE.collect();
    let earliest = AtomicUsize::new(usize::MAX);

    let results: Vec<Result<Params, SearchError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers.get())
            .map(|w| {
                let nouns = &nouns;
                let earliest = &earliest;
                scope.spawn(move || {
                    let share = nouns
                        .iter()
                        .copied()
                        .skip(w)
                        .step_by(workers.get())
                        .flat_map(|noun| PARAM_RANGE.map(move |verb| Params { noun, verb }));
                    for params in share {
                        let index = params.scan_index();
                        if index > earliest.load(Ordering::Relaxed) {
                            break;
                        }
                        let event = match check(program, params, target) {
                            Ok(false) => continue,
                            Ok(true) => Ok(params),
                            Err(e) => Err(e),
                        };
                        earliest.fetch_min(index, Ordering::Relaxed);
                        return Some(event);
                    }
                    None
                })
            })
            .collect();
        handles
            .into_iter()
            .filter_map(|h| match h.join() {
                Ok(event) => event,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let first = results.into_iter().min_by_key(|event| match event {
        Ok(params) | Err(SearchError::Trial { params, .. }) => params.scan_index(),
        Err(SearchError::NotFound { .. }) => usize::MAX,
    });
    match first {
        Some(Ok(params)) => {
            tracing::info!(%params, target, "found parameters");
            Ok(params)
        }
        Some(Err(e)) => Err(e),
        None => {
            tracing::info!(target, "search space exhausted");
            Err(SearchError::NotFound { target })
        }
    }
}
