use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{LevelFilter, error, info};
use toroid_snake::config::{self, AppConfig, Overrides};
use toroid_snake::error::AppError;
use toroid_snake::game::{Game, GameStatus};
use toroid_snake::input::{GameInput, poll_input};
use toroid_snake::logging::init_file_logger;
use toroid_snake::scheduler::{Clock, FrameScheduler, SystemClock};
use toroid_snake::terminal_runtime::TerminalSession;
use toroid_snake::theme::{self, Theme};
use toroid_snake::ui::hud::HudInfo;

/// How long the loop waits for input while no frame is scheduled.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells along each side of the square, wrapping field.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Tick interval of a fresh run in milliseconds.
    #[arg(long)]
    base_speed_ms: Option<u64>,

    /// Target visual frame rate.
    #[arg(long)]
    render_hz: Option<u32>,

    /// Color theme: classic, ocean, or neon.
    #[arg(long)]
    theme: Option<String>,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file. Defaults to the platform data directory.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, or trace.
    #[arg(long)]
    log_level: Option<LevelFilter>,

    /// Show frame and tick counters under the HUD.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("toroid-snake: {error}");
            let mut source = error.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let file_settings = config::load_file_settings(cli.config.as_deref())?;
    let app_config = AppConfig::resolve(
        file_settings,
        Overrides {
            grid_size: cli.grid_size,
            base_speed_ms: cli.base_speed_ms,
            render_hz: cli.render_hz,
            theme: cli.theme,
            seed: cli.seed,
            log_level: cli.log_level,
        },
    )?;

    let log_path = cli.log_file.unwrap_or_else(config::default_log_path);
    init_file_logger(&log_path, app_config.log_level)?;
    info!(
        "starting: grid {}x{}, base speed {} ms, frame interval {:?}",
        app_config.game.grid.side(),
        app_config.game.grid.side(),
        app_config.game.base_speed_ms,
        app_config.frame_interval
    );

    let mut game = match app_config.seed {
        Some(seed) => Game::new_with_seed(app_config.game, seed),
        None => Game::new(app_config.game),
    };
    game.set_score_listener(|score| log::debug!("score is now {score}"));

    let mut session = TerminalSession::enter()?;
    let result = event_loop(
        &mut session,
        &mut game,
        app_config.frame_interval,
        app_config.theme,
        cli.debug,
    );
    let restored = session.leave();

    info!("exiting with best score {}", game.best_score());
    result?;
    restored?;
    Ok(())
}

fn event_loop(
    session: &mut TerminalSession,
    game: &mut Game,
    frame_interval: Duration,
    mut active_theme: &'static Theme,
    debug: bool,
) -> Result<(), AppError> {
    let clock = SystemClock;
    let mut scheduler = FrameScheduler::new(frame_interval);

    loop {
        let timeout = scheduler
            .time_until_next_frame(clock.now())
            .unwrap_or(IDLE_POLL_INTERVAL);

        if let Some(input) = poll_input(timeout)? {
            match input {
                GameInput::Quit => {
                    scheduler.cancel();
                    return Ok(());
                }
                GameInput::Direction(direction) => game.set_intent(direction),
                GameInput::Pause | GameInput::Confirm => match game.status() {
                    GameStatus::Playing if input == GameInput::Pause => {
                        game.pause();
                        scheduler.cancel();
                    }
                    GameStatus::Playing => {}
                    GameStatus::Ready | GameStatus::Paused => {
                        game.start();
                        scheduler.arm(clock.now());
                    }
                },
                GameInput::Reset => game.reset(),
                GameInput::CycleTheme => active_theme = theme::next(active_theme),
            }
        }

        let hud_info = HudInfo {
            theme: active_theme,
            debug_line: debug.then(|| debug_line(&scheduler)),
        };

        if scheduler.is_idle() {
            session.draw(game, &hud_info)?;
            continue;
        }

        if scheduler.is_due(clock.now()) {
            scheduler.run_frame(&clock, game, |game| session.draw(game, &hud_info))?;
        }
    }
}

fn debug_line(scheduler: &FrameScheduler) -> String {
    let stats = scheduler.stats();
    format!(
        "frames {}  ticks {}  catch-up {}  frame budget {:?}",
        stats.frames,
        stats.ticks,
        stats.last_catch_up,
        scheduler.frame_interval()
    )
}
