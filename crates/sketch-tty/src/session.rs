#![forbid(unsafe_code)]

//! Puts the terminal into drawing mode for the sketch and gets it back out.
//!
//! While a [`TerminalSession`] is alive the terminal is raw, shows the
//! alternate screen, reports mouse motion and hides the cursor. Dropping the
//! session undoes those modes innermost first: mouse reporting goes before
//! the cursor comes back, the main screen returns before raw mode ends.
//!
//! Panics and (on unix) SIGINT/SIGTERM take the same `restore` path without
//! knowing which modes were entered, so every step there tolerates failure.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::event::Event;
use tracing::{info, warn};

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Terminal modes to enable.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer.
    pub alternate_screen: bool,
    /// Report mouse presses, drags and plain motion.
    pub mouse_capture: bool,
}

impl SessionOptions {
    /// Everything the sketch needs.
    pub fn fullscreen() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: true,
        }
    }
}

/// Owner of the terminal modes; one per process.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode, then enable the requested modes and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if any mode cannot be enabled. Modes enabled before
    /// the failure are restored.
    pub fn new(options: &SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        info!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen_enabled: false,
            mouse_enabled: false,
            #[cfg(unix)]
            signal_guard: None,
        };
        #[cfg(unix)]
        {
            session.signal_guard = Some(SignalGuard::new()?);
        }

        let mut stdout = io::stdout();

        if options.alternate_screen {
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            session.alternate_screen_enabled = true;
            info!("alternate screen enabled");
        }

        if options.mouse_capture {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
            session.mouse_enabled = true;
            info!("mouse capture enabled");
        }

        crossterm::execute!(stdout, crossterm::cursor::Hide)?;
        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for an event.
    ///
    /// Returns `Ok(true)` if an event is available, `Ok(false)` on timeout.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event (blocking until available).
    pub fn read_event(&self) -> io::Result<Event> {
        crossterm::event::read()
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        restore(self.mouse_enabled, self.alternate_screen_enabled);
        info!(
            mouse = self.mouse_enabled,
            alternate_screen = self.alternate_screen_enabled,
            "terminal restored"
        );
        self.mouse_enabled = false;
        self.alternate_screen_enabled = false;
    }
}

/// Leave the sketch's terminal modes, ignoring individual failures.
fn restore(mouse: bool, alternate_screen: bool) {
    let mut stdout = io::stdout();
    if mouse {
        let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
    }
    let _ = crossterm::execute!(stdout, crossterm::style::ResetColor, crossterm::cursor::Show);
    if alternate_screen {
        let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    }
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore(true, true);
            previous(info);
        }));
    });
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                if matches!(signal, SIGINT | SIGTERM) {
                    warn!(signal, "termination signal received, cleaning up");
                    restore(true, true);
                    std::process::exit(128 + signal);
                }
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
