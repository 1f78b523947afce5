//! Select shapes with the mouse or 'Space', move them with the arrow keys or WASD and rotate them with Q and E.

use sprite_demos::{
    demos::shapes::{self, Shapes},
    Game, Shutdown,
};

fn main() -> miette::Result<()> {
    let config = shapes::config().with_overrides_from_env()?;

    if Shapes::new()?.run(config)? == Shutdown::Requested {
        #[allow(clippy::print_stdout)]
        {
            println!("Good bye!");
        }
    }

    Ok(())
}
