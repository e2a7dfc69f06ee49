// Pidgin: a side-scrolling platformer demo. Physics is rapier2d, rendering
// is wgpu, windowing is winit; this crate is the glue plus a tile-collision
// edge merger.

pub mod app;
pub mod config;
pub mod engine;
pub mod game;
pub mod map;
pub mod platform;
