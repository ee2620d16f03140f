use std::fmt;

use super::{Outcome, Token};

/// Running totals of game outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    pub x_forfeits: u32,
    pub o_forfeits: u32,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Token::X) => self.x_wins += 1,
            Outcome::Win(Token::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Forfeit(Token::X) => self.x_forfeits += 1,
            Outcome::Forfeit(Token::O) => self.o_forfeits += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws + self.x_forfeits + self.o_forfeits
    }

    pub fn wins(&self, token: Token) -> u32 {
        match token {
            Token::X => self.x_wins,
            Token::O => self.o_wins,
        }
    }

    /// Fraction of games won by `token`, counting an opponent's forfeit as a win
    pub fn win_rate(&self, token: Token) -> f32 {
        let forfeits_against = match token {
            Token::X => self.o_forfeits,
            Token::O => self.x_forfeits,
        };
        match self.games() {
            0 => 0.0,
            n => (self.wins(token) + forfeits_against) as f32 / n as f32,
        }
    }

    /// Clear the totals, returning them
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: X {} / O {} / draw {} / forfeit X {} O {}",
            self.games(),
            self.x_wins,
            self.o_wins,
            self.draws,
            self.x_forfeits,
            self.o_forfeits
        )
    }
}
