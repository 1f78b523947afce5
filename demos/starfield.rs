//! Fly through the stars with the arrow keys or WASD.

use sprite_demos::{
    demos::starfield::{self, Starfield},
    fastrand::Rng,
    Game, Shutdown,
};

fn main() -> miette::Result<()> {
    let config = starfield::config().with_overrides_from_env()?;

    let game = Starfield::new(&mut Rng::new());

    if game.run(config)? == Shutdown::Requested {
        #[allow(clippy::print_stdout)]
        {
            println!("Good bye!");
        }
    }

    Ok(())
}
