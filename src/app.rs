// Shared application loop, driven by winit on every platform

use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use crate::config::PidginConfig;
use crate::engine::game_loop::FrameClock;
use crate::engine::input::InputState;
use crate::engine::renderer::Renderer;
use crate::game::{GameSession, SpriteSet};

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 480;

/// Build a default event loop and run the game on it.
pub fn run(config: PidginConfig, assets_dir: PathBuf) -> Result<()> {
    let event_loop = EventLoop::new()?;
    run_with_event_loop(event_loop, config, assets_dir)
}

/// Run the game on a platform-provided event loop.
pub fn run_with_event_loop(
    event_loop: EventLoop<()>,
    config: PidginConfig,
    assets_dir: PathBuf,
) -> Result<()> {
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Pidgin")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)?,
    );

    #[cfg(target_arch = "wasm32")]
    attach_canvas(&window)?;

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let mut session = GameSession::new(&config, &assets_dir)?;
    let sprites = SpriteSet::load(&mut renderer, &assets_dir, session.map().tile_width())?;
    let mut input = InputState::new();
    let mut clock = FrameClock::new();

    info!("starting pidgin on map {:?}", config.map);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                info!("close requested, shutting down");
                elwt.exit();
            }
            WindowEvent::Resized(size) => renderer.resize(size),
            WindowEvent::KeyboardInput { event, .. } => input.process_keyboard_event(&event),
            WindowEvent::Touch(touch) => {
                input.process_touch(&touch, renderer.size().width as f64)
            }
            WindowEvent::RedrawRequested => {
                let ticks = clock.begin_frame();
                for _ in 0..ticks {
                    session.update(&input, renderer.camera_mut());
                    input.end_update();
                }

                let draw = session.build_draw_list(&sprites);
                if let Err(err) = renderer.render(&draw) {
                    log::error!("render failed: {err:#}");
                    elwt.exit();
                }

                clock.throttle();
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}

/// Put the winit canvas into the page.
#[cfg(target_arch = "wasm32")]
fn attach_canvas(window: &winit::window::Window) -> Result<()> {
    use winit::platform::web::WindowExtWebSys;

    let canvas = window
        .canvas()
        .ok_or_else(|| anyhow::anyhow!("window has no canvas"))?;
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|body| body.append_child(&canvas).ok())
        .ok_or_else(|| anyhow::anyhow!("could not attach canvas to document body"))?;
    Ok(())
}
