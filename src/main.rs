use stardrift::prelude::*;

fn main() -> Result<(), RunError> {
    env_logger::init();

    Starfield::new()
        .with_num_points(2_000)
        .with_tick_observer(|stats| {
            if stats.frame % 250 == 0 {
                log::info!(
                    "tick {} took {:?} ({:.1} fps)",
                    stats.frame,
                    stats.tick_duration,
                    stats.fps
                );
            }
        })
        .run()
}
