/*
Program Details: <Poker chip drop animation>

Nine chips fall, bounce and settle into a row along the bottom of the
window. Optional first argument: path to a JSON settings file.
*/

use chip_drop::modules::chip_sprite::ChipSprite;
use chip_drop::modules::frame_driver::{DriverState, FrameDriver, TickOutcome};
use chip_drop::modules::settings::Settings;
use macroquad::prelude::*;
use std::path::PathBuf;
use std::sync::OnceLock;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Settings are needed by `window_conf`, which runs before `main`
fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| {
        #[cfg(not(target_arch = "wasm32"))]
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let path = std::env::args().nth(1).map(PathBuf::from);
        Settings::load_or_default(path.as_deref())
    })
}

/// Set up window settings before the app runs
fn window_conf() -> Conf {
    let screen = &settings().screen;
    Conf {
        window_title: "Token Animation".to_string(),
        window_width: screen.window_width,
        window_height: screen.window_height,
        fullscreen: false,
        window_resizable: true,
        sample_count: 4, // MSAA
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let settings = settings();
    log::info!("Chip drop starting with {} chips", settings.chip_count);

    // Image is resolved once here and shared by every chip
    let sprite = ChipSprite::load(&settings.asset_path, settings.screen.sprite_size).await;
    if !sprite.is_loaded() {
        log::warn!("Chips will not be drawn");
    }

    let mut driver = FrameDriver::new(settings);
    let step = settings.timeline.step();
    let max_substeps = settings.timeline.max_substeps.max(1);
    let mut accumulator = 0.0;

    loop {
        clear_background(WHITE);

        // ---- Fixed-rate driver ticks ----
        if driver.state() == DriverState::Armed {
            accumulator += get_frame_time();
            let mut substeps = 0;
            while accumulator >= step && substeps < max_substeps {
                if driver.tick(screen_height()) == TickOutcome::Disarmed {
                    accumulator = 0.0;
                    break;
                }
                accumulator -= step;
                substeps += 1;
            }
            // Drop the backlog after a long stall instead of fast-forwarding
            if substeps == max_substeps {
                accumulator = 0.0;
            }
        }

        sprite.draw(driver.lanes());

        next_frame().await;
    }
}
