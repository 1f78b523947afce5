//! Click on one of the two sprites to select it, move it with the arrow keys.

use sprite_demos::{
    demos::basic_input::{self, BasicInput},
    Game, Shutdown,
};

fn main() -> miette::Result<()> {
    let config = basic_input::config().with_overrides_from_env()?;

    // A missing image is fatal
    let game = BasicInput::load(&config)?;

    if game.run(config)? == Shutdown::Requested {
        #[allow(clippy::print_stdout)]
        {
            println!("Good bye!");
        }
    }

    Ok(())
}
