//! The render / step / sleep / poll loop and the state it owns

use crate::grid::Grid;
use crate::input::{InputController, KeySource, Keypress};
use crate::life;
use crate::terminal::{self, Glyphs};
use std::io::{self, Write};
use std::time::Duration;

pub const INITIAL_DELAY: Duration = Duration::from_millis(500);
pub const MIN_DELAY: Duration = Duration::from_millis(100);
pub const DELAY_STEP: Duration = Duration::from_millis(100);
/// How long each generation waits for a key, on top of the delay
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminated,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    Shutdown,
}

pub struct SimulationState {
    pub grid: Grid,
    pub delay: Duration,
    pub phase: Phase,
    pub generation: u64,
}

impl SimulationState {
    pub fn new(grid: Grid, delay: Duration) -> Self {
        Self {
            grid,
            delay: delay.max(MIN_DELAY),
            phase: Phase::Running,
            generation: 0,
        }
    }

    /// Apply one interpreted keypress. Returns true if the delay changed.
    pub fn apply(&mut self, key: Keypress) -> bool {
        let before = self.delay;
        match key {
            Keypress::IncreaseSpeed => {
                self.delay = self.delay.saturating_sub(DELAY_STEP).max(MIN_DELAY);
            }
            Keypress::DecreaseSpeed => {
                self.delay = self.delay.saturating_add(DELAY_STEP);
            }
            Keypress::Quit => self.phase = Phase::Terminated,
            Keypress::None => {}
        }
        self.delay != before
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn status_line(&self) -> String {
        format!(
            "generation {}  delay {}ms  population {}",
            self.generation,
            self.delay.as_millis(),
            self.grid.population()
        )
    }
}

/// Drives a [`SimulationState`] until Quit or an external shutdown request
pub struct RenderLoop<W, S> {
    out: W,
    input: InputController<S>,
    glyphs: Glyphs,
    poll_timeout: Duration,
    stop_requested: fn() -> bool,
}

impl<W: Write, S: KeySource> RenderLoop<W, S> {
    pub fn new(out: W, input: InputController<S>, glyphs: Glyphs) -> Self {
        Self {
            out,
            input,
            glyphs,
            poll_timeout: POLL_TIMEOUT,
            stop_requested: terminal::shutdown_requested,
        }
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Replace the check for out-of-band shutdown (signals by default)
    pub fn with_stop_check(mut self, check: fn() -> bool) -> Self {
        self.stop_requested = check;
        self
    }

    /// Run until terminated. Rendering or input errors end the run early.
    pub fn run(&mut self, state: &mut SimulationState) -> io::Result<StopReason> {
        while state.is_running() {
            if (self.stop_requested)() {
                state.phase = Phase::Terminated;
                log::info!("shutdown requested after {} generations", state.generation);
                return Ok(StopReason::Shutdown);
            }

            terminal::render_frame(&mut self.out, &state.grid, &state.status_line(), self.glyphs)?;
            let next = life::next(&state.grid);
            terminal::sleep(state.delay);

            let key = self.input.poll(self.poll_timeout)?;
            if state.apply(key) {
                log::debug!("delay now {}ms", state.delay.as_millis());
            }

            state.grid = next;
            state.generation += 1;
        }

        log::info!("quit after {} generations", state.generation);
        Ok(StopReason::Quit)
    }
}
