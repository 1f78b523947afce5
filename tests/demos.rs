//! Play the demos without a window.

use sprite_demos::{
    context::{KeyCode, MouseButton},
    demos::{
        basic_input::{self, BasicInput},
        connect_lines::{self, ConnectLines},
        polygon_making::{self, PolygonMaking},
        shapes::{self, Shapes},
        starfield::{self, Starfield},
        turns::{self, Turns},
        SCREEN_HEIGHT, SCREEN_WIDTH,
    },
    fastrand::Rng,
    Headless, Rgba, Shutdown,
};

/// Keys that move the active entity.
const MOVE_KEYS: [KeyCode; 8] = [
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
];

/// Hold a random set of movement keys for a random amount of ticks, many times.
fn random_moves<G: sprite_demos::Game>(
    headless: &mut Headless<G>,
    rng: &mut Rng,
    mut check: impl FnMut(&G),
) {
    for _ in 0..200 {
        let held = MOVE_KEYS
            .into_iter()
            .filter(|_| rng.bool())
            .collect::<Vec<_>>();

        for key in &held {
            headless.press_key(*key);
        }

        for _ in 0..rng.usize(1..10) {
            assert_eq!(headless.tick(), None);
            check(headless.game());
        }

        for key in &held {
            headless.release_key(*key);
        }
    }
}

#[test]
fn basic_input_select_and_move() {
    let config = basic_input::config();
    let mut headless = Headless::new(BasicInput::load(&config).unwrap(), config);
    assert_eq!(headless.game().active_sprite().id, "0");

    // Opaque pixel of the second sprite
    assert_eq!(headless.click(MouseButton::Left, 132, 134), None);
    assert_eq!(headless.game().active_sprite().id, "1");

    // Transparent corner of the second sprite doesn't select anything
    assert_eq!(headless.click(MouseButton::Left, 100, 100), None);
    assert_eq!(headless.game().active_sprite().id, "1");

    // Opaque pixel of the first sprite
    assert_eq!(headless.click(MouseButton::Left, 32, 34), None);
    assert_eq!(headless.game().active_sprite().id, "0");

    // Move the first sprite to the bottom-right corner
    headless.press_key(KeyCode::ArrowRight);
    headless.press_key(KeyCode::ArrowDown);
    assert_eq!(headless.tick_times(100), None);
    headless.release_key(KeyCode::ArrowRight);
    headless.release_key(KeyCode::ArrowDown);

    let sprite = headless.game().active_sprite();
    assert_eq!((sprite.x, sprite.y), (640 - 64, 480 - 64));

    // WASD doesn't move sprites in this demo
    headless.press_key(KeyCode::KeyW);
    assert_eq!(headless.tick(), None);
    headless.release_key(KeyCode::KeyW);
    assert_eq!(headless.game().active_sprite().y, 480 - 64);

    // The sprite is drawn at the new position
    let frame = headless.render();
    assert_ne!(frame.at(640 - 64 + 32, 480 - 64 + 34), Rgba::BLACK);
    assert_eq!(frame.at(32, 34), Rgba::BLACK);

    headless.press_key(KeyCode::Escape);
    assert_eq!(headless.tick(), Some(Shutdown::Requested));
}

#[test]
fn basic_input_missing_image_is_an_error() {
    let config = basic_input::config().with_assets_dir("this/directory/does/not/exist");

    assert!(BasicInput::load(&config).is_err());
}

#[test]
fn basic_input_stays_on_screen() {
    let config = basic_input::config();
    let mut headless = Headless::new(BasicInput::load(&config).unwrap(), config);

    random_moves(&mut headless, &mut Rng::with_seed(1), |game| {
        for sprite in game.sprites() {
            assert!((0..=640 - 64).contains(&sprite.x));
            assert!((0..=480 - 64).contains(&sprite.y));
        }
    });
}

#[test]
fn shapes_select_rotate_and_move() {
    let mut headless = Headless::new(Shapes::new().unwrap(), shapes::config());

    // Cycle with space, holding it only counts once
    headless.press_key(KeyCode::Space);
    assert_eq!(headless.tick_times(5), None);
    headless.release_key(KeyCode::Space);
    assert_eq!(headless.tick(), None);
    assert_eq!(headless.game().active_shape().id, "Pentagon");

    // Pick the circle
    assert_eq!(headless.click(MouseButton::Left, 300, 300), None);
    assert_eq!(headless.game().active_shape().id, "Circle");

    // Empty space keeps the selection
    assert_eq!(headless.click(MouseButton::Left, 600, 20), None);
    assert_eq!(headless.game().active_shape().id, "Circle");

    // Rotate clockwise for ten ticks
    headless.press_key(KeyCode::KeyE);
    assert_eq!(headless.tick_times(10), None);
    headless.release_key(KeyCode::KeyE);
    assert!((headless.game().active_shape().theta - 0.5).abs() < 1e-4);

    // And back
    headless.press_key(KeyCode::KeyQ);
    assert_eq!(headless.tick_times(10), None);
    headless.release_key(KeyCode::KeyQ);
    assert!(headless.game().active_shape().theta.abs() < 1e-4);

    // Move against the top-left corner
    headless.press_key(KeyCode::KeyA);
    headless.press_key(KeyCode::ArrowUp);
    assert_eq!(headless.tick_times(100), None);

    let circle = headless.game().active_shape();
    assert_eq!((circle.x, circle.y), (30, 30));

    let frame = headless.render();
    assert_eq!(frame.at(30, 30), Rgba::GREEN);
}

#[test]
fn shapes_stay_on_screen() {
    let mut headless = Headless::new(Shapes::new().unwrap(), shapes::config());
    let mut rng = Rng::with_seed(2);

    for _ in 0..4 {
        random_moves(&mut headless, &mut rng, |game| {
            let shape = game.active_shape();
            let (width, height) = shape.image().size();
            let (half_width, half_height) = ((width / 2) as i32, (height / 2) as i32);

            assert!((half_width..=SCREEN_WIDTH as i32 - half_width).contains(&shape.x));
            assert!((half_height..=SCREEN_HEIGHT as i32 - half_height).contains(&shape.y));
        });

        // Next shape
        headless.press_key(KeyCode::Space);
        assert_eq!(headless.tick(), None);
        headless.release_key(KeyCode::Space);
    }
}

#[test]
fn polygon_making_select_and_clamp() {
    let mut headless = Headless::new(PolygonMaking::new().unwrap(), polygon_making::config());
    assert_eq!(headless.game().active_polygon().id, "Triangle");

    assert_eq!(headless.click(MouseButton::Left, 100, 100), None);
    assert_eq!(headless.game().active_polygon().id, "Circle");

    assert_eq!(headless.click(MouseButton::Left, 50, 50), None);
    assert_eq!(headless.game().active_polygon().id, "Pentagon");

    headless.press_key(KeyCode::ArrowRight);
    headless.press_key(KeyCode::KeyS);
    assert_eq!(headless.tick_times(100), None);
    headless.release_key(KeyCode::ArrowRight);
    headless.release_key(KeyCode::KeyS);

    let pentagon = headless.game().active_polygon();
    assert_eq!(
        (pentagon.x, pentagon.y),
        (SCREEN_WIDTH as i32 - 20, SCREEN_HEIGHT as i32 - 20)
    );

    let frame = headless.render();
    assert_eq!(
        frame.at(SCREEN_WIDTH as i32 - 20, SCREEN_HEIGHT as i32 - 20),
        Rgba::RED
    );

    random_moves(&mut headless, &mut Rng::with_seed(3), |game| {
        let polygon = game.active_polygon();

        assert!((20..=SCREEN_WIDTH as i32 - 20).contains(&polygon.x));
        assert!((20..=SCREEN_HEIGHT as i32 - 20).contains(&polygon.y));
    });
}

#[test]
fn connect_lines_select_and_connect() {
    let demo = ConnectLines::new(&mut Rng::with_seed(4));

    // Find blocks that don't overlap with any other block
    let isolated = (0..demo.blocks().len())
        .filter(|&index| {
            let block = &demo.blocks()[index];

            demo.blocks()
                .iter()
                .enumerate()
                .all(|(other, other_block)| other == index || !other_block.contains(block.x, block.y))
        })
        .take(2)
        .collect::<Vec<_>>();
    let (first, second) = (isolated[0], isolated[1]);
    let (first_x, first_y) = (demo.blocks()[first].x, demo.blocks()[first].y);
    let (second_x, second_y) = (demo.blocks()[second].x, demo.blocks()[second].y);

    let mut headless = Headless::new(demo, connect_lines::config());

    assert_eq!(headless.click(MouseButton::Left, first_x, first_y), None);
    assert_eq!(headless.game().selected(), first);

    // Connecting to itself does nothing
    assert_eq!(headless.click(MouseButton::Right, first_x, first_y), None);
    assert!(headless.game().connections().is_empty());

    assert_eq!(headless.click(MouseButton::Right, second_x, second_y), None);
    assert_eq!(headless.game().connections(), [(first, second)]);

    // Connecting twice doesn't add another line
    assert_eq!(headless.click(MouseButton::Right, second_x, second_y), None);
    assert_eq!(headless.game().connections().len(), 1);

    let frame = headless.render();
    assert_eq!(frame.at(first_x, first_y), Rgba::GREEN);
    assert_eq!(frame.at(second_x, second_y), Rgba::WHITE);
}

#[test]
fn connect_lines_stays_on_screen() {
    let mut headless = Headless::new(
        ConnectLines::new(&mut Rng::with_seed(5)),
        connect_lines::config(),
    );

    random_moves(&mut headless, &mut Rng::with_seed(6), |game| {
        let block = &game.blocks()[game.selected()];

        assert!((0..=SCREEN_WIDTH as i32 - 3).contains(&block.x));
        assert!((0..=SCREEN_HEIGHT as i32 - 3).contains(&block.y));
    });
}

#[test]
fn starfield_scrolls_and_wraps() {
    let mut headless = Headless::new(Starfield::new(&mut Rng::with_seed(8)), starfield::config());

    let before = headless.game().near()[0].x;
    headless.press_key(KeyCode::ArrowRight);
    assert_eq!(headless.tick(), None);
    headless.release_key(KeyCode::ArrowRight);
    let after = headless.game().near()[0].x;
    assert!(after == before + 3 || after == 0);

    random_moves(&mut headless, &mut Rng::with_seed(9), |game| {
        for star in game.near().iter().chain(game.far()) {
            assert!((0..=SCREEN_WIDTH as i32).contains(&star.x));
            assert!((0..=SCREEN_HEIGHT as i32).contains(&star.y));
        }
    });

    let frame = headless.render();
    assert!(frame.pixels().contains(&Rgba::WHITE));
}

#[test]
fn turns_count_press_edges() {
    let mut headless = Headless::new(Turns::new(), turns::config());
    assert_eq!(headless.game().turn(), 0);

    // Holding down for many ticks is a single turn
    headless.press_key(KeyCode::Space);
    assert_eq!(headless.tick_times(30), None);
    assert_eq!(headless.game().turn(), 1);

    headless.release_key(KeyCode::Space);
    assert_eq!(headless.tick_times(5), None);
    assert_eq!(headless.game().turn(), 1);

    for _ in 0..3 {
        headless.press_key(KeyCode::Space);
        assert_eq!(headless.tick(), None);
        headless.release_key(KeyCode::Space);
        assert_eq!(headless.tick(), None);
    }
    assert_eq!(headless.game().turn(), 4);

    // Small buffer with the counter in the top-left
    let frame = headless.render();
    assert_eq!(frame.size(), (320, 240));
    assert!(frame.pixels()[..8 * 320].contains(&Rgba::WHITE));

    headless.press_key(KeyCode::Escape);
    assert_eq!(headless.tick(), Some(Shutdown::Requested));
}

#[test]
fn turns_count_taps_between_ticks() {
    let mut headless = Headless::new(Turns::new(), turns::config());

    // Pressed and released before the next update tick
    headless.press_key(KeyCode::Space);
    headless.release_key(KeyCode::Space);
    assert_eq!(headless.tick(), None);
    assert_eq!(headless.game().turn(), 1);

    // Consumed by that tick
    assert_eq!(headless.tick_times(3), None);
    assert_eq!(headless.game().turn(), 1);
}

#[test]
fn fullscreen_toggles_on_edge() {
    let mut headless = Headless::new(Turns::new(), turns::config());

    headless.press_key(KeyCode::KeyF);
    assert_eq!(headless.tick_times(10), None);
    assert!(headless.context().is_fullscreen());

    headless.release_key(KeyCode::KeyF);
    assert_eq!(headless.tick(), None);
    headless.press_key(KeyCode::KeyF);
    assert_eq!(headless.tick(), None);
    assert!(!headless.context().is_fullscreen());
}
