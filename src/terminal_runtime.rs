use std::io;
use std::panic;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{error, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::game::Game;
use crate::renderer;
use crate::ui::hud::HudInfo;

type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Set while raw mode and the alternate screen are ours to undo.
static SCREEN_TAKEN: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// The game's drawing surface for one play session.
///
/// Entering takes over the terminal and installs a panic hook that gives it
/// back. Restoration runs once, whichever of [`TerminalSession::leave`], drop,
/// or the panic hook gets there first.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(chain_panic_hook);

        enable_raw_mode()?;
        SCREEN_TAKEN.store(true, Ordering::SeqCst);

        match Self::open_screen() {
            Ok(terminal) => {
                info!("terminal session entered");
                Ok(Self { terminal })
            }
            Err(setup_error) => {
                if let Err(restore_error) = restore() {
                    warn!("rolling back terminal setup failed: {restore_error}");
                }
                Err(setup_error)
            }
        }
    }

    fn open_screen() -> io::Result<AppTerminal> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        execute!(terminal.backend_mut(), EnterAlternateScreen, Hide)?;
        terminal.clear()?;
        Ok(terminal)
    }

    /// Draws one frame of `game`.
    pub fn draw(&mut self, game: &Game, hud: &HudInfo<'_>) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, game, hud))
            .map(|_| ())
    }

    /// Hands the terminal back, reporting failures that drop would only log.
    pub fn leave(self) -> io::Result<()> {
        let result = restore();
        info!("terminal session left");
        result
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = restore() {
            warn!("failed to restore terminal: {error}");
        }
    }
}

fn chain_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}

fn restore() -> io::Result<()> {
    if !SCREEN_TAKEN.swap(false, Ordering::SeqCst) {
        return Ok(());
    }

    let raw_mode = disable_raw_mode();
    let screen = execute!(io::stdout(), Show, LeaveAlternateScreen);
    raw_mode.and(screen)
}
