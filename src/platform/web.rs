// Browser bootstrap: console_log and hardcoded tuning

use std::path::PathBuf;
use wasm_bindgen::prelude::*;

use crate::app;
use crate::config::PidginConfig;

/// Entry point invoked when the wasm module loads.
#[wasm_bindgen(start)]
pub fn start() {
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(err) = app::run(PidginConfig::default(), PathBuf::from("assets")) {
        log::error!("fatal: {err:#}");
    }
}
