//! Left click selects a block, right click connects the selected block to the clicked one.

use sprite_demos::{
    demos::connect_lines::{self, ConnectLines},
    fastrand::Rng,
    Game, Shutdown,
};

fn main() -> miette::Result<()> {
    let config = connect_lines::config().with_overrides_from_env()?;

    let game = ConnectLines::new(&mut Rng::new());

    if game.run(config)? == Shutdown::Requested {
        #[allow(clippy::print_stdout)]
        {
            println!("Good bye!");
        }
    }

    Ok(())
}
