use std::io::{self, Write};

use anyhow::Result;
use sweeper_core::{parse_command, Command, ConfigError, Coord2, GameConfig, MAX_SIZE};
use thiserror::Error;

/// Everything that can be wrong with one board-size line.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SizeError {
    #[error("Number of inputs do not match.")]
    TokenCount,
    #[error("Please input integers.")]
    NotInteger,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parses a "width height mines" line into a validated config.
fn parse_board_size(line: &str) -> Result<GameConfig, SizeError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(SizeError::TokenCount);
    }

    let mut numbers = [0i64; 3];
    for (slot, token) in numbers.iter_mut().zip(&tokens) {
        *slot = token.parse().map_err(|_| SizeError::NotInteger)?;
    }
    let [width, height, mines] = numbers;

    if width < 1 || width > i64::from(MAX_SIZE) || height < 1 || height > i64::from(MAX_SIZE) {
        return Err(ConfigError::DimensionOutOfRange.into());
    }
    if mines < 1 {
        return Err(ConfigError::NoMines.into());
    }
    // anything past u16 is far beyond the largest board anyway
    let mines = mines.min(i64::from(u16::MAX)) as u16;

    Ok(GameConfig::new(width as u8, height as u8, mines)?)
}

pub enum PlayAgain {
    Yes,
    No,
}

/// Blocking line prompts on stdin/stdout. Every malformed answer is
/// reported and asked again; `None` from a prompt means stdin closed.
pub struct Prompter {
    input: io::Stdin,
    line: String,
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            input: io::stdin(),
            line: String::new(),
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim().to_owned()))
    }

    pub fn board_size(&mut self) -> Result<Option<GameConfig>> {
        loop {
            let Some(line) =
                self.ask("Please input width, height and number of mines without comma: ")?
            else {
                return Ok(None);
            };
            match parse_board_size(&line) {
                Ok(config) => return Ok(Some(config)),
                Err(err) => println!("{err}"),
            }
        }
    }

    /// Reads moves until one parses; stdin closing counts as quitting.
    pub fn next_command(&mut self, size: Coord2) -> Result<Command> {
        loop {
            let Some(line) = self.ask("Please input grid position (h for help): ")? else {
                return Ok(Command::Quit);
            };
            match parse_command(&line, size) {
                Ok(command) => return Ok(command),
                Err(err) => println!("{err}\n"),
            }
        }
    }

    pub fn print_help(&self) {
        println!(
            "Input position as [column][row] form. (e.g. A3, aC17)\n\
             To flag or unflag a cell, type [column][row]f. (e.g. h2f)\n\
             Input q to quit, and r to reset.\n"
        );
    }

    pub fn play_again(&mut self, won: bool) -> Result<PlayAgain> {
        let status = if won { "You Win!" } else { "Game Over." };
        loop {
            let prompt = format!("{status} Do you want to play again? (y/n): ");
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(PlayAgain::No);
            };
            match answer.as_str() {
                "y" | "Y" => return Ok(PlayAgain::Yes),
                "n" | "N" => return Ok(PlayAgain::No),
                _ => println!("Please reply only with y or n."),
            }
        }
    }
}
