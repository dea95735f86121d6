//! Headless demo: plays a short sequence of view states through a
//! [`FrameEngine`](viewstate::animation::FrameEngine) and logs where the
//! view ends up. Pass a TOML options file to override the defaults.

use std::{path::Path, sync::Arc};

use viewstate::{
    animation::{FrameEngine, MemorySink},
    options::Options,
    state::{Composition, PropertyGoal, ViewId, ViewState, Visibility},
    util::frame_timing::FrameTiming,
    ViewStateController, ViewStateError,
};
use web_time::Instant;

const HELLO: ViewId = ViewId(1);

fn state(visibility: Visibility, goals: [(&str, f32); 2]) -> Composition {
    Composition::from(ViewState::new(
        HELLO,
        visibility,
        goals.map(|(property, value)| PropertyGoal::new(property, value)),
    ))
}

fn load_options() -> Result<Options, ViewStateError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading options from {path}");
            Options::load(Path::new(&path))
        }
        None => {
            let mut options = Options::default();
            options.transition.duration_ms = 400;
            options.transition.apply_state_visibility = true;
            Ok(options)
        }
    }
}

fn run() -> Result<(), ViewStateError> {
    let options = load_options()?;
    let sink = Arc::new(MemorySink::new());
    let engine = Arc::new(FrameEngine::new(Arc::clone(&sink)));

    let controller = ViewStateController::builder("TestController", "zero")
        .state(
            "zero",
            state(
                Visibility::Visible,
                [("translationX", 40.0), ("translationY", 100.0)],
            ),
        )
        .state(
            "one",
            state(Visibility::Visible, [("alpha", 0.2), ("translationY", 50.0)]),
        )
        .state(
            "two",
            state(Visibility::Gone, [("alpha", 1.0), ("translationX", 0.0)]),
        )
        .options(options)
        .build(engine.clone())?;

    for target in ["zero", "one", "two", "one", "two", "zero"] {
        controller.show(target);
    }

    let mut timing = FrameTiming::new(60);
    while engine.tick(Instant::now()) {
        timing.end_frame();
        std::thread::sleep(timing.until_next_frame());
    }

    log::info!(
        "{} settled in '{}' after {} frames ({:.0} fps)",
        controller.name(),
        controller.current_state().as_deref().unwrap_or("?"),
        timing.frames(),
        timing.fps()
    );
    for property in ["alpha", "translationX", "translationY"] {
        if let Some(value) = sink.get(HELLO, property) {
            log::info!("  {HELLO}.{property} = {:.2}", value.as_f32());
        }
    }
    log::info!("  {HELLO} visibility = {:?}", sink.visibility(HELLO));
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
