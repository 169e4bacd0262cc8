//! Interactive prompts for the step and worker counts.
//!
//! Values are read as whitespace-separated tokens, so both counts may arrive on one line.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::{InputFault, PiError, Result};

pub const STEPS_PROMPT: &str = "Podaj liczbe podzialow (np. 1000000000): ";
pub const THREADS_PROMPT: &str = "Podaj liczbe watkow: ";

/// The two counts the user asked for, already checked to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub total_steps: u64,
    pub threads: usize,
}

/// Parses a single count. Anything that is not a strictly positive integer is refused.
pub fn parse_count(token: &str) -> Result<u64> {
    let token = token.trim();
    let value: i128 = token
        .parse()
        .map_err(|_| PiError::invalid(InputFault::Malformed(token.to_string())))?;
    if value <= 0 {
        return Err(PiError::invalid(InputFault::NonPositive(token.to_string())));
    }
    u64::try_from(value).map_err(|_| PiError::invalid(InputFault::OutOfRange(token.to_string())))
}

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<Vec<u8>>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompter {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    /// Prints `prompt`, then reads and parses the next token.
    pub fn ask(&mut self, prompt: &str) -> Result<u64> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        let token = self.next_token()?;
        parse_count(&token)
    }

    /// Asks for each count that was not supplied up front, in the fixed order steps then threads.
    ///
    /// Supplied tokens go through the same parsing as typed ones. A bad step count fails before
    /// the thread prompt is shown.
    pub fn request(&mut self, steps: Option<&str>, threads: Option<&str>) -> Result<Request> {
        let total_steps = match steps {
            Some(token) => parse_count(token)?,
            None => self.ask(STEPS_PROMPT)?,
        };
        let threads = match threads {
            Some(token) => parse_count(token)?,
            None => self.ask(THREADS_PROMPT)?,
        };
        let threads = usize::try_from(threads)
            .map_err(|_| PiError::invalid(InputFault::OutOfRange(threads.to_string())))?;
        Ok(Request { total_steps, threads })
    }

    /// Next whitespace-separated token. Bytes that are not UTF-8 make the token malformed.
    fn next_token(&mut self) -> Result<String> {
        loop {
            if let Some(raw) = self.pending.pop_front() {
                return String::from_utf8(raw).map_err(|err| {
                    let lossy = String::from_utf8_lossy(err.as_bytes()).into_owned();
                    PiError::invalid(InputFault::Malformed(lossy))
                });
            }
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Err(PiError::invalid(InputFault::Missing));
            }
            self.pending.extend(
                line.split(|byte| byte.is_ascii_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(<[u8]>::to_vec),
            );
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
