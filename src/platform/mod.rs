// Per-platform bootstrap shims: logger, config source, event loop

#[cfg(target_os = "android")]
pub mod android;
#[cfg(not(any(target_os = "android", target_arch = "wasm32")))]
pub mod desktop;
#[cfg(target_arch = "wasm32")]
pub mod web;
