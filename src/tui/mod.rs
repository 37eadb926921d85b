//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (welcome page, loading spinner): draws every ~80ms.
//! - **Idle** (a settled list): sleeps up to 500ms, only redraws on events,
//!   finished background tasks or terminal resize.
//!
//! ## Error Boundary
//!
//! Each draw runs under `catch_unwind`. A panic while rendering is logged by
//! the panic hook and the loop switches to the recovery screen, where Enter
//! resets the whole app and `q` quits. Network errors never get this far:
//! they are values in the page state.

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

use log::{debug, error, info, warn};
use std::io::stdout;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::Hide;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::layout::Rect;

use crate::api::{ApiClient, CatalogSource, ResourceKind};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::download::DownloadRequest;
use crate::core::fetch::FetchRequest;
use crate::core::page::{Page, page_title};
use crate::core::prefs::{self, Preferences};
use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{Recovery, hit_test};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Last known mouse position, drives the card tilt.
    pub pointer: Option<(u16, u16)>,
    // Hit rectangles written by the last draw
    pub list_hits: Vec<(Rect, usize)>,
    pub tab_hits: Vec<(Rect, ResourceKind)>,
    /// Cards the list area fit on the last draw.
    pub page_capacity: Option<usize>,
    /// A render panicked; show the recovery screen until reset.
    pub crashed: bool,
    /// Title last sent to the terminal emulator.
    pub window_title: String,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            pointer: None,
            list_hits: Vec::new(),
            tab_hits: Vec::new(),
            page_capacity: None,
            crashed: false,
            window_title: String::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Puts the terminal back even when a panic escapes the loop.
struct RestoreGuard;

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Build the catalog gateway from a resolved config.
pub fn build_catalog(config: &ResolvedConfig) -> std::io::Result<Arc<dyn CatalogSource>> {
    let client = ApiClient::new(config.base_url.clone(), config.timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!(
        "Catalog client ready: {} (timeout {:?})",
        client.base_url(),
        config.timeout
    );
    Ok(Arc::new(client))
}

pub fn run(config: ResolvedConfig, prefs: Preferences) -> std::io::Result<()> {
    let catalog = build_catalog(&config)?;
    let downloader = crate::api::download::download_client()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let mut app = App::from_config(catalog, &config, prefs);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _restore_guard = RestoreGuard;
    // Replaces ratatui's hook: a caught render panic must not leave the
    // alternate screen, and stderr is not visible while we own the terminal.
    std::panic::set_hook(Box::new(|info| {
        error!("Panic: {}", info);
    }));
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Only the latest fetch matters; older ones are aborted
    let mut active_fetch: Option<tokio::task::AbortHandle> = None;

    if config.start_route != Route::Welcome {
        let effect = update(
            &mut app,
            Action::Navigate {
                route: config.start_route.clone(),
                label: None,
            },
        );
        if let Effect::Fetch(request) = effect {
            active_fetch = Some(spawn_fetch(app.catalog.clone(), request, tx.clone()));
        }
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating =
            !tui.crashed && (app.page.is_loading() || matches!(app.page, Page::Welcome));
        if animating {
            needs_redraw = true;
        }

        let title = page_title(&app.page);
        if title != tui.window_title {
            if let Err(e) = execute!(stdout(), SetTitle(&title)) {
                warn!("Failed to set window title: {}", e);
            }
            tui.window_title = title;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if tui.crashed {
                let palette = Palette::for_prefs(&app.prefs);
                terminal.draw(|f| Recovery { palette }.render(f, f.area()))?;
            } else {
                let drawn = catch_unwind(AssertUnwindSafe(|| {
                    terminal
                        .draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))
                        .map(|_| ())
                }));
                match drawn {
                    Ok(result) => result?,
                    Err(_) => {
                        error!("Render panicked on {}; showing recovery screen", app.route());
                        tui.crashed = true;
                        terminal.clear()?;
                        continue;
                    }
                }
                if let Some(rows) = tui.page_capacity
                    && app.page_capacity != Some(rows)
                {
                    update(&mut app, Action::FitPage(rows));
                }
            }
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let actions: Vec<Action> = match event {
                TuiEvent::Resize => continue,
                TuiEvent::MouseMove(col, row) => {
                    tui.pointer = Some((col, row));
                    continue;
                }
                TuiEvent::MouseClick(col, row) if !tui.crashed => {
                    tui.pointer = Some((col, row));
                    click_actions(&tui, col, row)
                }
                _ if tui.crashed => recovery_action(event).into_iter().collect(),
                _ => key_action(event).into_iter().collect(),
            };

            for action in actions {
                if matches!(action, Action::Reset) {
                    if let Some(handle) = active_fetch.take() {
                        handle.abort();
                    }
                    tui.crashed = false;
                }
                debug!("Dispatching {:?}", action);
                match update(&mut app, action) {
                    Effect::Quit => should_quit = true,
                    effect => {
                        carry_out(effect, &app, &downloader, &mut active_fetch, &tx);
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            carry_out(effect, &app, &downloader, &mut active_fetch, &tx);
        }
    }

    if let Some(handle) = active_fetch.take() {
        handle.abort();
    }
    info!("Shutting down");
    Ok(())
}

/// Key bindings for the normal screens.
fn key_action(event: TuiEvent) -> Option<Action> {
    let action = match event {
        TuiEvent::ForceQuit | TuiEvent::Char('q') => Action::Quit,
        TuiEvent::Enter | TuiEvent::Char('l') => Action::Open,
        TuiEvent::Escape | TuiEvent::Backspace | TuiEvent::Char('h') => Action::Back,
        TuiEvent::Up | TuiEvent::Char('k') => Action::CursorUp,
        TuiEvent::Down | TuiEvent::Char('j') => Action::CursorDown,
        TuiEvent::Right | TuiEvent::PageDown | TuiEvent::Char('n') => Action::NextPage,
        TuiEvent::Left | TuiEvent::PageUp | TuiEvent::Char('p') => Action::PrevPage,
        TuiEvent::Tab => Action::NextTab,
        TuiEvent::BackTab => Action::PrevTab,
        TuiEvent::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            Action::SelectTab(ResourceKind::ALL[index])
        }
        TuiEvent::Char('r') => Action::Retry,
        TuiEvent::Home | TuiEvent::Char('g') => Action::Home,
        TuiEvent::Char('t') => Action::ToggleTheme,
        TuiEvent::Char('b') => Action::CycleBackground,
        _ => return None,
    };
    Some(action)
}

/// Only two ways out of the recovery screen.
fn recovery_action(event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Enter => Some(Action::Reset),
        TuiEvent::ForceQuit | TuiEvent::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// A click on a card selects and opens it; a click on a tab switches to it.
fn click_actions(tui: &TuiState, col: u16, row: u16) -> Vec<Action> {
    if let Some(index) = hit_test(&tui.list_hits, col, row) {
        return vec![Action::Select(index), Action::Open];
    }
    if let Some(kind) = hit_test(&tui.tab_hits, col, row) {
        return vec![Action::SelectTab(kind)];
    }
    Vec::new()
}

fn carry_out(
    effect: Effect,
    app: &App,
    downloader: &reqwest::Client,
    active_fetch: &mut Option<tokio::task::AbortHandle>,
    tx: &mpsc::Sender<Action>,
) {
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::Fetch(request) => {
            if let Some(handle) = active_fetch.take() {
                handle.abort();
            }
            *active_fetch = Some(spawn_fetch(app.catalog.clone(), request, tx.clone()));
        }
        Effect::Download(request) => {
            spawn_download(downloader.clone(), request, app.download_dir.clone());
        }
        Effect::SavePreferences => {
            if let Err(e) = prefs::save(&app.prefs) {
                warn!("Failed to save preferences: {}", e);
            }
        }
    }
}

fn spawn_fetch(
    catalog: Arc<dyn CatalogSource>,
    request: FetchRequest,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!(
        "Spawning fetch {:?} (generation {}) via {}",
        request.query,
        request.generation,
        catalog.name()
    );
    let handle = tokio::spawn(async move {
        let result = request.query.run(catalog.as_ref()).await;
        match &result {
            Ok(payload) => debug!(
                "Fetch generation {} returned {} items",
                request.generation,
                payload.len()
            ),
            Err(e) => info!("Fetch generation {} failed: {}", request.generation, e),
        }
        if tx
            .send(Action::Fetched {
                generation: request.generation,
                result,
            })
            .is_err()
        {
            warn!(
                "Failed to send fetch result for generation {}: receiver dropped",
                request.generation
            );
        }
    });
    handle.abort_handle()
}

/// Fire and forget: success and failure only reach the log.
fn spawn_download(client: reqwest::Client, request: DownloadRequest, dir: PathBuf) {
    tokio::spawn(async move {
        match crate::api::download::download(&client, &request, &dir).await {
            Ok(path) => info!("Saved {}", path.display()),
            Err(e) => warn!("Download of {} failed: {}", request.url, e),
        }
    });
}
