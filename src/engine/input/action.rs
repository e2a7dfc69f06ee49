// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// All in-game actions, including the debug tuning keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    Crouch,

    // Debug controls
    Reset,
    BackOffX,
    BackOffY,
    ToggleAutoRun,

    // Tuning adjustments, applied every tick while held
    GravityUp,
    GravityDown,
    JumpVelocityUp,
    JumpVelocityDown,
    WidthUp,
    WidthDown,
    HeightUp,
    HeightDown,
    DensityUp,
    DensityDown,
    SpeedUp,
    SpeedDown,
}

/// Default keyboard bindings. Arrows move, the letter rows adjust tuning.
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::ArrowUp, Action::Jump),
        (KeyCode::ArrowDown, Action::Crouch),
        (KeyCode::KeyQ, Action::Reset),
        (KeyCode::KeyA, Action::BackOffX),
        (KeyCode::KeyW, Action::BackOffY),
        (KeyCode::KeyM, Action::ToggleAutoRun),
        (KeyCode::KeyE, Action::GravityUp),
        (KeyCode::KeyS, Action::GravityDown),
        (KeyCode::KeyR, Action::JumpVelocityUp),
        (KeyCode::KeyD, Action::JumpVelocityDown),
        (KeyCode::KeyT, Action::WidthUp),
        (KeyCode::KeyF, Action::WidthDown),
        (KeyCode::KeyY, Action::HeightUp),
        (KeyCode::KeyG, Action::HeightDown),
        (KeyCode::KeyU, Action::DensityUp),
        (KeyCode::KeyH, Action::DensityDown),
        (KeyCode::KeyI, Action::SpeedUp),
        (KeyCode::KeyJ, Action::SpeedDown),
    ]
}
