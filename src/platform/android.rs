// Android bootstrap: android_logger and hardcoded tuning

use std::path::PathBuf;
use winit::event_loop::EventLoopBuilder;
use winit::platform::android::activity::AndroidApp;
use winit::platform::android::EventLoopBuilderExtAndroid;

use crate::app;
use crate::config::PidginConfig;

/// Entry point registered by android-activity.
#[no_mangle]
pub fn android_main(android_app: AndroidApp) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("pidgin"),
    );

    let event_loop = match EventLoopBuilder::new().with_android_app(android_app).build() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("event loop creation failed: {err}");
            return;
        }
    };

    // Mobile uses the hardcoded tuning
    if let Err(err) =
        app::run_with_event_loop(event_loop, PidginConfig::default(), PathBuf::from("assets"))
    {
        log::error!("fatal: {err:#}");
    }
}
