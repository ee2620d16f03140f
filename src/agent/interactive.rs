use std::io::{self, BufRead, Write};

use crate::{
    error::AgentError,
    game::{Board, Move, Token},
};

use super::Agent;

/// A human player answering prompts on a text stream
///
/// Rows and columns are entered 1-indexed. Answers that are not numbers or fall outside the
/// grid are asked again; an occupied cell is passed through so the referee can rule on it.
pub struct Interactive<R, W> {
    input: R,
    output: W,
    name: String,
}

impl Interactive<io::StdinLock<'static>, io::Stdout> {
    /// A player on the process's standard streams
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            name: String::from("human"),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Consume the player, returning its streams
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Prompt until a number in `1..=max` is entered; **returns** it 0-indexed
    fn ask(&mut self, prompt: &str, max: usize) -> Result<usize, AgentError> {
        let mut line = String::new();
        loop {
            write!(self.output, "{prompt}? ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(AgentError::InputClosed);
            }
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "enter a number from 1 to {max}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for Interactive<R, W> {
    fn begin_game(&mut self, token: Token) {
        if let Err(err) = writeln!(self.output, "\nNew game! You play {token}.") {
            log::warn!("could not greet {}: {err}", self.name);
        }
    }

    fn select_move(&mut self, board: &Board) -> Result<Move, AgentError> {
        write!(self.output, "{board}")?;
        let shape = board.shape();
        let row = self.ask("row", shape.rows)?;
        let col = self.ask("column", shape.cols)?;
        Ok(Move::new(row, col))
    }

    fn observe_reward(&mut self, value: f32, _board: &Board) {
        if let Err(err) = writeln!(self.output, "{} rewarded: {value}", self.name) {
            log::warn!("could not report reward to {}: {err}", self.name);
        }
    }
}
