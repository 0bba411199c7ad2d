//! Terminal tile-matching client (default binary).
//!
//! Mouse clicks (or the keyboard cursor) select tiles; adjacent pairs are sent
//! to the board engine and the result is animated on a framebuffer renderer.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use tui_match::adapter::RemoteEngine;
use tui_match::config::AppConfig;
use tui_match::core::{BoardEngine, ClickOutcome, EngineClient};
use tui_match::engine::LocalEngine;
use tui_match::input::{map_event, Cursor, InputAction};
use tui_match::logging;
use tui_match::orchestrator::{CycleOutcome, Game, Stage, StageHandle};
use tui_match::term::{BoardView, FrameBuffer, Renderer, TerminalRenderer, Viewport};
use tui_match::types::{Coord, FRAME_MS};

type MatchGame = Game<Box<dyn BoardEngine>, StageHandle>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        logging::init_file(path, &config.log_filter)?;
    }

    let engine: Box<dyn BoardEngine> = match &config.engine_addr {
        Some(addr) => {
            info!(%addr, "using remote engine");
            Box::new(RemoteEngine::new(addr.clone(), config.engine_timeout))
        }
        None => {
            info!(seed = config.seed, "using local engine");
            Box::new(LocalEngine::new(config.engine, config.seed))
        }
    };

    let stage = StageHandle::new(Stage::blank(config.timings));
    let client = Arc::new(EngineClient::new(engine));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = match start(&mut term, client, &stage).await {
        Ok(Some(game)) => run(&mut term, game, stage).await,
        Ok(None) => Ok(()),
        Err(err) => Err(err),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Generate the first board. Engine failures are shown on screen and retried
/// with `n`; `None` means the player quit before a board arrived.
async fn start(
    term: &mut TerminalRenderer,
    client: Arc<EngineClient<Box<dyn BoardEngine>>>,
    stage: &StageHandle,
) -> Result<Option<MatchGame>> {
    let view = BoardView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut events = EventStream::new();

    loop {
        match Game::start(Arc::clone(&client), stage.clone(), Renderer::default()).await {
            Ok(game) => return Ok(Some(game)),
            Err(err) => warn!(%err, "could not generate a board"),
        }

        let mut scene = stage.scene(Instant::now());
        scene.status = "engine error, n to retry".to_string();
        view.render_into(&scene, viewport(), &mut fb);
        term.present(&fb)?;

        loop {
            let Some(event) = events.next().await else {
                return Ok(None);
            };
            let event = event?;
            if let Event::Resize(..) = event {
                term.invalidate();
                view.render_into(&scene, viewport(), &mut fb);
                term.present(&fb)?;
                continue;
            }
            match map_event(&event) {
                Some(InputAction::Quit) => return Ok(None),
                Some(InputAction::NewGame) => break,
                _ => {}
            }
        }
    }
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

async fn run(term: &mut TerminalRenderer, mut game: MatchGame, stage: StageHandle) -> Result<()> {
    let view = BoardView::new();
    let (columns, rows) = game.board_size();
    let mut cursor = Cursor::new(columns, rows);
    let mut show_cursor = false;
    let mut status = String::new();
    let mut fb = FrameBuffer::new(0, 0);

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(FRAME_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                stage.advance(now);

                let mut scene = stage.scene(now);
                scene.cursor = show_cursor.then(|| cursor.position());
                scene.pending = game.is_pending();
                scene.status.clone_from(&status);
                view.render_into(&scene, viewport(), &mut fb);
                term.present(&fb)?;
            }
            outcome = game.settled() => {
                status = describe(&outcome).to_string();
            }
            event = events.next() => {
                let Some(event) = event else {
                    return Ok(());
                };
                let event = event?;
                if let Event::Resize(..) = event {
                    term.invalidate();
                    continue;
                }
                let Some(action) = map_event(&event) else {
                    continue;
                };

                match action {
                    InputAction::Quit => return Ok(()),
                    InputAction::Click { column, row } => {
                        let scene = stage.scene(Instant::now());
                        let hit = view
                            .to_board_cell(&scene, viewport(), column, row)
                            .and_then(|(x, y)| stage.lock().frame().hit_test(x, y));
                        if let Some(at) = hit {
                            show_cursor = false;
                            cursor.place(at);
                            click(&mut game, at, &mut status);
                        }
                    }
                    InputAction::Cursor(dir) => {
                        show_cursor = true;
                        cursor.step(dir);
                    }
                    InputAction::Activate => {
                        show_cursor = true;
                        click(&mut game, cursor.position(), &mut status);
                    }
                    InputAction::NewGame => match game.new_game().await {
                        Ok(true) => {
                            let (columns, rows) = game.board_size();
                            cursor.resize(columns, rows);
                            status = "new game".to_string();
                        }
                        Ok(false) => status = "busy".to_string(),
                        Err(err) => {
                            warn!(%err, "could not start a new game");
                            status = "engine error".to_string();
                        }
                    },
                }
            }
        }
    }
}

fn click(game: &mut MatchGame, at: Coord, status: &mut String) {
    match game.click(at) {
        ClickOutcome::Locked => *status = "busy".to_string(),
        ClickOutcome::Move(_) | ClickOutcome::Selected(_) => status.clear(),
        ClickOutcome::Deselected | ClickOutcome::Ignored => {}
    }
}

fn describe(outcome: &CycleOutcome) -> &'static str {
    match outcome {
        CycleOutcome::Applied { .. } => "",
        CycleOutcome::Rejected => "no match",
        CycleOutcome::Failed(_) => "engine error",
    }
}
