//! Application controller
//!
//! Owns the favorites store on behalf of the frontends and applies their
//! commands, received through a single crossbeam channel, one at a time.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use photos::favorites::FavoritesStore;
use photos::model::Photo;

use super::state::{AppCommand, AppSnapshot};
use crate::config::controller::COMMAND_QUEUE;

pub struct AppController {
    cmd_rx: Receiver<AppCommand>,
    store: Arc<FavoritesStore>,
    shared_state: Arc<Mutex<AppSnapshot>>,
}

/// Frontend side of a spawned controller
pub struct AppHandle {
    pub commands: Sender<AppCommand>,
    pub state: Arc<Mutex<AppSnapshot>>,
    thread: JoinHandle<()>,
}

impl AppHandle {
    /// Current state
    pub fn snapshot(&self) -> AppSnapshot {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Ask the controller to stop and wait for it
    pub fn shutdown(self) {
        let _ = self.commands.send(AppCommand::Shutdown);
        if self.thread.join().is_err() {
            log::error!("controller thread panicked");
        }
    }
}

impl AppController {
    pub fn new(
        cmd_rx: Receiver<AppCommand>,
        store: Arc<FavoritesStore>,
        shared_state: Arc<Mutex<AppSnapshot>>,
    ) -> Self {
        Self {
            cmd_rx,
            store,
            shared_state,
        }
    }

    /// Start a controller on its own thread
    pub fn spawn(store: Arc<FavoritesStore>) -> std::io::Result<AppHandle> {
        let (tx, rx) = crossbeam_channel::bounded(COMMAND_QUEUE);
        let state = Arc::new(Mutex::new(AppSnapshot::default()));
        let mut controller = AppController::new(rx, store, state.clone());

        let thread = thread::Builder::new()
            .name("photos-controller".into())
            .spawn(move || controller.run())?;

        Ok(AppHandle {
            commands: tx,
            state,
            thread,
        })
    }

    /// Run the controller loop (blocking, call from a dedicated thread)
    ///
    /// Returns on `Shutdown` or when every sender is gone.
    pub fn run(&mut self) {
        self.refresh_count();

        while let Ok(cmd) = self.cmd_rx.recv() {
            if self.handle_command(cmd) {
                break;
            }
        }
        log::debug!("controller stopped");
    }

    /// Handle a single command. Returns true if the loop should exit.
    fn handle_command(&mut self, cmd: AppCommand) -> bool {
        let result = match cmd {
            AppCommand::Shutdown => return true,

            AppCommand::InvertFavorite(photo) => self
                .store
                .invert_favorite(&photo)
                .map(|favorite| status(&photo, favorite)),
            AppCommand::SetFavorite(photo, favorite) => self
                .store
                .set_favorite(&photo, favorite)
                .map(|()| status(&photo, favorite)),
            AppCommand::ClearFavorites => self
                .store
                .clear()
                .map(|removed| format!("Removed {} favorites", removed)),
        };

        {
            let mut state = self.shared_state.lock().unwrap_or_else(|e| e.into_inner());
            state.handled += 1;
            match result {
                Ok(text) => {
                    state.last_error = None;
                    state.status_text = text.into();
                }
                Err(e) => {
                    log::warn!("command failed: {}", e);
                    state.status_text = format!("Error: {}", e).into();
                    state.last_error = Some(e.to_string());
                }
            }
        }
        self.refresh_count();
        false
    }

    fn refresh_count(&self) {
        match self.store.count() {
            Ok(count) => {
                self.shared_state
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .favorites_count = count;
            }
            Err(e) => log::warn!("could not count favorites: {}", e),
        }
    }
}

fn status(photo: &Photo, favorite: bool) -> String {
    if favorite {
        format!("Added {} to favorites", photo.key())
    } else {
        format!("Removed {} from favorites", photo.key())
    }
}
