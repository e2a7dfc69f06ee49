#[cfg(not(any(target_os = "android", target_arch = "wasm32")))]
fn main() -> anyhow::Result<()> {
    pidgin::platform::desktop::run()
}

// Android and the browser enter through the cdylib instead
#[cfg(any(target_os = "android", target_arch = "wasm32"))]
fn main() {}
