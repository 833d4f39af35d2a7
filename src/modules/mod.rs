pub mod chip_sprite;
pub mod chip_world;
pub mod frame_driver;
pub mod screen_map;
pub mod settings;
pub mod spawn_plan;
