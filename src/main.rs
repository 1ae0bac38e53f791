use anyhow::Result;

use connect4::from_spec;

mod game;
use game::Game;

/// Player specs: `h[:name]` human, `b[:name]` lookahead, `m[:name]` MCTS.
/// With no arguments a human plays first against the MCTS player.
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let spec_one = args.next().unwrap_or_else(|| "h".to_string());
    let spec_two = args.next().unwrap_or_else(|| "m".to_string());

    println!("Welcome to Connect 4\n");

    let mut game = Game::new(from_spec(&spec_one)?, from_spec(&spec_two)?);
    match game.play()? {
        Some(winner) => println!("{} wins!", winner),
        None => println!("Draw!"),
    }
    Ok(())
}
