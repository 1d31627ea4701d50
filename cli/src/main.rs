use anyhow::Result;
use clap::Parser;
use rand::Rng;
use sweeper_core::{Game, GameConfig, Step};

use crate::prompt::{PlayAgain, Prompter};
use crate::render::Screen;

mod prompt;
mod render;

#[derive(Parser, Debug)]
#[command(name = "sweeper", about = "Classic minesweeper in the terminal", version)]
struct Args {
    /// Fixed seed for mine placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

enum RoundEnd {
    Restart,
    Quit,
    Finished { won: bool },
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let mut screen = Screen::new();
    let mut prompter = Prompter::new();
    let mut round_index = 0u64;

    loop {
        screen.clear()?;
        println!();
        let Some(config) = prompter.board_size()? else {
            break;
        };

        // --seed still gives each round its own board
        let seed = match args.seed {
            Some(seed) => seed.wrapping_add(round_index),
            None => rand::rng().random(),
        };
        round_index += 1;
        log::debug!("starting round with seed {seed}");

        match play_round(config, seed, &mut screen, &mut prompter)? {
            RoundEnd::Restart => continue,
            RoundEnd::Quit => break,
            RoundEnd::Finished { won } => match prompter.play_again(won)? {
                PlayAgain::Yes => continue,
                PlayAgain::No => {
                    println!("Goodbye.");
                    break;
                }
            },
        }
    }

    Ok(())
}

fn play_round(
    config: GameConfig,
    seed: u64,
    screen: &mut Screen,
    prompter: &mut Prompter,
) -> Result<RoundEnd> {
    let mut game = Game::new(config, seed);

    loop {
        screen.draw(game.round())?;

        // help re-prompts without redrawing, so the text stays on screen
        let step = loop {
            let command = prompter.next_command(config.size())?;
            match game.apply(command)? {
                Step::Help => prompter.print_help(),
                step => break step,
            }
        };

        match step {
            Step::Ongoing => {}
            Step::Restart => return Ok(RoundEnd::Restart),
            Step::Quit => return Ok(RoundEnd::Quit),
            Step::Lost => {
                screen.draw(game.round())?;
                return Ok(RoundEnd::Finished { won: false });
            }
            Step::Won => {
                screen.draw(game.round())?;
                return Ok(RoundEnd::Finished { won: true });
            }
            Step::Help => unreachable!("help is handled while prompting"),
        }
    }
}
