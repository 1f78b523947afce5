//! Polygons generated from triangle fans, controlled like the shapes demo.

use sprite_demos::{
    demos::polygon_making::{self, PolygonMaking},
    Game, Shutdown,
};

fn main() -> miette::Result<()> {
    let config = polygon_making::config().with_overrides_from_env()?;

    if PolygonMaking::new()?.run(config)? == Shutdown::Requested {
        #[allow(clippy::print_stdout)]
        {
            println!("Good bye!");
        }
    }

    Ok(())
}
