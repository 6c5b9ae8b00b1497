use crate::error::LifeError;
use crate::grid::{Cell, Grid};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub const TITLE: &str = "Game of Life";
pub const HELP_FOOTER: &str = "Press '+' to increase speed, '-' to decrease speed, 'q' to quit.";

/// Raw, unechoed input on the alternate screen for as long as this value lives.
///
/// Dropping it (normal return, `?` propagation or a panic unwinding through the
/// owner) puts the terminal back. Call [`Terminal::restore`] to observe errors.
pub struct Terminal {
    active: bool,
}

impl Terminal {
    /// Switch the terminal into raw mode and the alternate screen
    pub fn enter() -> Result<Self, LifeError> {
        enable_raw_mode().map_err(LifeError::Terminal)?;
        // From here on the guard exists, so a failing execute! still restores
        let term = Self { active: true };
        execute!(stdout(), EnterAlternateScreen, Hide).map_err(LifeError::Terminal)?;
        Ok(term)
    }

    /// Undo everything `enter` did, reporting the first failure
    pub fn restore(mut self) -> Result<(), LifeError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), LifeError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = execute!(stdout(), Show, LeaveAlternateScreen);
        // Raw mode is dropped even when leaving the alternate screen failed
        let raw = disable_raw_mode();
        screen.and(raw).map_err(LifeError::Terminal)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        report_restore(self.release());
    }
}

/// Log a failed restore without stopping the caller. Returns true on success.
pub fn report_restore(result: Result<(), LifeError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("failed to restore terminal: {}", e);
            false
        }
    }
}

/// Glyphs used to draw cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub alive: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self { alive: '#', dead: '.' }
    }
}

/// One grid row as space separated glyphs
pub fn format_row(row: &[Cell], glyphs: Glyphs) -> String {
    let mut line = String::with_capacity(row.len() * 2);
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push(if cell.is_alive() { glyphs.alive } else { glyphs.dead });
    }
    line
}

/// Clear the screen and draw a full frame: status line, grid, help footer.
///
/// Every line is positioned with `MoveTo`, since raw mode does not turn `\n`
/// into a carriage return.
pub fn render_frame<W: Write>(out: &mut W, grid: &Grid, status: &str, glyphs: Glyphs) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print(TITLE))?;
    if !status.is_empty() {
        queue!(out, Print("  "), Print(status))?;
    }

    let mut y: u16 = 1;
    for r in 0..grid.rows() {
        queue!(out, MoveTo(0, y), Print(format_row(grid.row(r), glyphs)))?;
        y = y.saturating_add(1);
    }

    queue!(out, MoveTo(0, y.saturating_add(1)), Print(HELP_FOOTER))?;
    out.flush()
}

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

pub fn shutdown_requested() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

#[cfg(unix)]
extern "C" fn on_signal(_signum: libc::c_int) {
    // Only an atomic store: async-signal-safe
    SHUTDOWN.store(true, Ordering::SeqCst);
}

/// Route SIGINT, SIGTERM and SIGHUP to the shutdown flag so that an external
/// kill still goes through the normal terminal restore path
#[cfg(unix)]
pub fn install_signal_handlers() {
    let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
    for signum in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
        let previous = unsafe { libc::signal(signum, handler) };
        if previous == libc::SIG_ERR {
            log::warn!("could not install handler for signal {}", signum);
        }
    }
}

#[cfg(not(unix))]
pub fn install_signal_handlers() {}

/// Sleep in short slices so a shutdown request cuts the wait short
pub fn sleep(duration: Duration) {
    const SLICE: Duration = Duration::from_millis(20);
    let mut remaining = duration;
    while !remaining.is_zero() && !shutdown_requested() {
        let step = remaining.min(SLICE);
        std::thread::sleep(step);
        remaining -= step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_row_is_space_separated() {
        let row = [Cell::Alive, Cell::Dead, Cell::Alive];
        assert_eq!(format_row(&row, Glyphs::default()), "# . #");
    }

    #[test]
    fn format_row_uses_custom_glyphs() {
        let glyphs = Glyphs { alive: 'o', dead: ' ' };
        assert_eq!(format_row(&[Cell::Dead, Cell::Alive], glyphs), "  o");
    }

    #[test]
    fn render_frame_contains_grid_and_footer() {
        let grid = Grid::parse("10\n01\n").unwrap();
        let mut buf = Vec::new();
        render_frame(&mut buf, &grid, "generation 3", Glyphs::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains(TITLE));
        assert!(text.contains("generation 3"));
        assert!(text.contains("# ."));
        assert!(text.contains(". #"));
        assert!(text.contains(HELP_FOOTER));
        // Footer comes after the last grid row
        assert!(text.find(". #").unwrap() < text.find(HELP_FOOTER).unwrap());
    }

    #[test]
    fn restore_failure_is_reported_not_raised() {
        assert!(report_restore(Ok(())));
        let err = LifeError::Terminal(io::Error::new(io::ErrorKind::Other, "tty gone"));
        assert!(!report_restore(Err(err)));
    }

    const SIGNAL_CHILD_ENV: &str = "TERMLIFE_SIGNAL_CHILD";

    /// Runs only inside the child process spawned below, so the global
    /// shutdown flag never leaks into the other tests
    #[cfg(unix)]
    #[test]
    fn raised_sigterm_sets_shutdown_flag() {
        if std::env::var_os(SIGNAL_CHILD_ENV).is_none() {
            return;
        }
        assert!(!shutdown_requested());
        install_signal_handlers();
        let rc = unsafe { libc::raise(libc::SIGTERM) };
        assert_eq!(rc, 0);
        assert!(shutdown_requested());

        // A set flag cuts sleeps short
        let start = std::time::Instant::now();
        sleep(Duration::from_secs(5));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[cfg(unix)]
    #[test]
    fn signal_handler_runs_in_child_process() {
        if std::env::var_os(SIGNAL_CHILD_ENV).is_some() {
            return;
        }
        let exe = std::env::current_exe().unwrap();
        let output = std::process::Command::new(exe)
            .args(["--exact", "terminal::tests::raised_sigterm_sets_shutdown_flag", "--test-threads=1"])
            .env(SIGNAL_CHILD_ENV, "1")
            .output()
            .unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success(), "child failed: {}{}", stdout, String::from_utf8_lossy(&output.stderr));
        assert!(stdout.contains("1 passed"), "child ran no test: {}", stdout);
    }

    #[test]
    fn sleep_returns_after_duration() {
        let start = std::time::Instant::now();
        sleep(Duration::from_millis(50));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
