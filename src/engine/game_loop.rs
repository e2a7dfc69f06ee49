/// Frame timing: fixed-timestep updates with a best-effort frame throttle.
///
/// Physics and game logic advance at a fixed rate regardless of render
/// cadence; leftover frame time carries over in the accumulator.
use std::time::{Duration, Instant};

/// Fixed update rate, 60 ticks per second
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Cap on catch-up ticks per frame to prevent a spiral of death
const MAX_CATCH_UP_TICKS: u32 = 5;

/// Target wall-clock frame budget for the throttle (~33 fps)
const FRAME_BUDGET: Duration = Duration::from_millis(30);

pub struct FrameClock {
    accumulator: Duration,
    last_frame: Instant,
    frame_start: Instant,
    frame_count: u64,
    tick_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame: now,
            frame_start: now,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Begin a frame; returns how many fixed ticks to run.
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        self.frame_start = now;
        self.accumulator += now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_CATCH_UP_TICKS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop unpayable debt so a long stall doesn't replay later
        if ticks == MAX_CATCH_UP_TICKS {
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Best-effort frame-rate throttle: sleep away whatever remains of the
    /// frame budget. The browser paces frames itself, so this is a no-op on
    /// wasm.
    pub fn throttle(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let elapsed = self.frame_start.elapsed();
            if elapsed < FRAME_BUDGET {
                std::thread::sleep(FRAME_BUDGET - elapsed);
            }
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.tick_count(), 0);
    }

    #[test]
    fn test_fixed_timestep_value() {
        let clock = FrameClock::new();
        assert!((clock.fixed_timestep() - 1.0 / 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_frame_counting() {
        let mut clock = FrameClock::new();
        clock.begin_frame();
        clock.begin_frame();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_ticks_accumulate_with_elapsed_time() {
        let mut clock = FrameClock::new();
        thread::sleep(FIXED_TIMESTEP_DURATION * 2);
        let ticks = clock.begin_frame();
        assert!(ticks >= 1);
        assert!(ticks <= MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut clock = FrameClock::new();
        // A 300 ms stall would owe 18 ticks without the cap
        thread::sleep(Duration::from_millis(300));
        let ticks = clock.begin_frame();
        assert_eq!(ticks, MAX_CATCH_UP_TICKS);
        // Debt was dropped, not carried
        let ticks = clock.begin_frame();
        assert!(ticks <= 1);
    }

    #[test]
    fn test_throttle_spends_frame_budget() {
        let mut clock = FrameClock::new();
        clock.begin_frame();
        clock.throttle();
        assert!(clock.frame_start.elapsed() >= FRAME_BUDGET);
    }
}
