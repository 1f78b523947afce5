//! Press 'Space' to end the turn.

use sprite_demos::{
    demos::turns::{self, Turns},
    Game, Shutdown,
};

fn main() -> miette::Result<()> {
    let config = turns::config().with_overrides_from_env()?;

    if Turns::new().run(config)? == Shutdown::Requested {
        #[allow(clippy::print_stdout)]
        {
            println!("Good bye!");
        }
    }

    Ok(())
}
