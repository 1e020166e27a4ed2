//! The sandbox session driver.
//!
//! [`Session`] owns one simulation instance: its board history, playback
//! flag, settings, and pattern library. A presentation layer drives it
//! through discrete calls (a timer tick, a click, a form submit); every
//! method is `&mut self`, so ticks can never race manual history moves.

use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vivarium_core::{
    next_generation, randomized, Board, EdgeMode, History, SandboxConfig, MAX_GRID_SCALE,
    MAX_GRID_SIZE, MIN_GRID_SCALE, MIN_GRID_SIZE,
};
use vivarium_io::{load_or, store_value, IoError, KeyValueStore, PatternLibrary, SavedState};

const KEY_GRID_SIZE: &str = "grid_size";
const KEY_GRID_SCALE: &str = "grid_scale";
const KEY_RANDOMIZE_CHANCE: &str = "randomize_chance";
const KEY_WRAP_EDGES: &str = "wrap_edges";
const KEY_PATTERNS: &str = "saved_patterns";

/// One running sandbox: board history, playback state, settings, and the
/// saved-pattern library, all persisted through an opaque key-value store.
pub struct Session {
    config: SandboxConfig,
    history: History<Board>,
    playing: bool,
    generation: u64,
    grid_scale: f64,
    randomize_chance: f64,
    wrap_edges: bool,
    patterns: PatternLibrary,
    store: Box<dyn KeyValueStore>,
    rng: ChaCha8Rng,
}

impl Session {
    /// Builds a session, restoring persisted settings and patterns from
    /// `store` and falling back to `config` defaults for anything missing
    /// or unreadable.
    pub fn new(config: SandboxConfig, store: Box<dyn KeyValueStore>) -> Result<Self> {
        Self::build(config, store, ChaCha8Rng::from_entropy())
    }

    /// Like [`Session::new`] but with a deterministic random source.
    pub fn with_seed(
        config: SandboxConfig,
        store: Box<dyn KeyValueStore>,
        seed: u64,
    ) -> Result<Self> {
        Self::build(config, store, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(config: SandboxConfig, store: Box<dyn KeyValueStore>, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;

        let mut size = load_or(store.as_ref(), KEY_GRID_SIZE, || config.grid.size);
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            tracing::warn!(size, "stored grid size out of bounds, using configured default");
            size = config.grid.size;
        }
        let grid_scale = load_or(store.as_ref(), KEY_GRID_SCALE, || config.grid.scale)
            .clamp(MIN_GRID_SCALE, MAX_GRID_SCALE);
        let randomize_chance = load_or(store.as_ref(), KEY_RANDOMIZE_CHANCE, || {
            config.simulation.randomize_chance
        })
        .clamp(0.0, 1.0);
        let wrap_edges = load_or(store.as_ref(), KEY_WRAP_EDGES, || config.simulation.wrap_edges);
        let patterns = load_or(store.as_ref(), KEY_PATTERNS, PatternLibrary::new);

        let board = Board::new(size)?;
        let history = History::new(board, config.simulation.history_capacity);

        Ok(Self {
            config,
            history,
            playing: false,
            generation: 0,
            grid_scale,
            randomize_chance,
            wrap_edges,
            patterns,
            store,
            rng,
        })
    }

    // === Simulation ===

    /// Advances one generation and records it in the undo history.
    ///
    /// Playback auto-pauses when the new generation is identical to the
    /// current one (stall) or contains no live cell. Stall detection looks
    /// exactly one generation back, so longer oscillation cycles keep
    /// playing.
    pub fn tick(&mut self) {
        let next = next_generation(self.history.current(), self.edge_mode());
        let stalled = next == *self.history.current();
        let alive = next.any_alive();
        self.history.push(next);
        self.generation += 1;

        if stalled || !alive {
            if self.playing {
                tracing::debug!(
                    generation = self.generation,
                    stalled,
                    alive,
                    "auto-pausing playback"
                );
            }
            self.playing = false;
        }
    }

    /// Inverts a single cell, recording the change in the undo history.
    ///
    /// # Errors
    /// [`vivarium_core::EngineError::OutOfBounds`] for coordinates off the
    /// board. A caller bug, never swallowed.
    pub fn toggle_cell(&mut self, row: u16, col: u16) -> vivarium_core::Result<()> {
        let next = self.history.current().toggled(row, col)?;
        self.history.push(next);
        Ok(())
    }

    /// Re-seeds the board randomly using the configured probability.
    pub fn randomize(&mut self) {
        let next = randomized(self.history.current(), self.randomize_chance, &mut self.rng);
        self.history.push(next);
    }

    /// Stops playback and pushes an all-dead board. Undoable.
    pub fn clear(&mut self) {
        self.playing = false;
        let cleared = self.history.current().cleared();
        self.history.push(cleared);
    }

    /// Switches to a fresh board of the given size, discarding the undo
    /// history, and persists the new size.
    ///
    /// # Errors
    /// `InvalidSize` for sizes outside policy bounds; nothing changes.
    pub fn resize(&mut self, size: u16) -> Result<()> {
        let board = Board::new(size)?;
        self.playing = false;
        self.history.reset(board);
        self.generation = 0;
        store_value(self.store.as_mut(), KEY_GRID_SIZE, &size)?;
        tracing::info!(size, "grid resized");
        Ok(())
    }

    // === History ===

    /// Steps back one board state. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        self.history.back()
    }

    /// Steps forward one board state. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        self.history.forward()
    }

    // === Playback ===

    /// Starts playback. A board with no live cells stays paused.
    pub fn play(&mut self) {
        self.playing = self.history.current().any_alive();
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_playing(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    // === Patterns ===

    /// Saves the current board under `name`, replacing any same-named
    /// pattern, and persists the library.
    pub fn save_pattern(&mut self, name: &str) -> Result<()> {
        let state = SavedState::from_board(self.history.current());
        self.patterns.save(name, state)?;
        self.persist_patterns()?;
        tracing::info!(name, "pattern saved");
        Ok(())
    }

    /// Loads a saved pattern, adopting its size and resetting the undo
    /// history.
    pub fn load_pattern(&mut self, name: &str) -> Result<()> {
        let state = self
            .patterns
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("no saved pattern named {name:?}"))?
            .state
            .clone();
        self.load_state(&state)?;
        tracing::info!(name, "pattern loaded");
        Ok(())
    }

    /// Deletes one saved pattern; missing names are a no-op.
    pub fn delete_pattern(&mut self, name: &str) -> Result<()> {
        if self.patterns.remove(name) {
            self.persist_patterns()?;
        }
        Ok(())
    }

    /// Deletes every saved pattern.
    pub fn clear_patterns(&mut self) -> Result<()> {
        self.patterns.clear();
        self.persist_patterns()
    }

    // === Import / export ===

    /// Validates an exported token and loads it. On failure the board,
    /// history, and settings are left untouched.
    pub fn import_token(&mut self, token: &str) -> Result<()> {
        let state = vivarium_io::import_token(token).map_err(IoError::from)?;
        self.load_state(&state)?;
        tracing::info!(size = state.size, cells = state.cells.len(), "token imported");
        Ok(())
    }

    /// The current board as a copy-pasteable token.
    pub fn export_token(&self) -> Result<String> {
        let state = SavedState::from_board(self.history.current());
        Ok(vivarium_io::export_token(&state)?)
    }

    // === Settings ===

    pub fn set_wrap_edges(&mut self, wrap: bool) -> Result<()> {
        self.wrap_edges = wrap;
        store_value(self.store.as_mut(), KEY_WRAP_EDGES, &wrap)?;
        Ok(())
    }

    pub fn set_randomize_chance(&mut self, chance: f64) -> Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&chance),
            "Randomize chance must be a probability in 0..=1"
        );
        self.randomize_chance = chance;
        store_value(self.store.as_mut(), KEY_RANDOMIZE_CHANCE, &chance)?;
        Ok(())
    }

    pub fn set_grid_scale(&mut self, scale: f64) -> Result<()> {
        anyhow::ensure!(
            (MIN_GRID_SCALE..=MAX_GRID_SCALE).contains(&scale),
            "Grid scale must lie in {}..={}",
            MIN_GRID_SCALE,
            MAX_GRID_SCALE
        );
        self.grid_scale = scale;
        store_value(self.store.as_mut(), KEY_GRID_SCALE, &scale)?;
        Ok(())
    }

    // === Observables ===

    #[must_use]
    pub fn playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_go_back()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_go_forward()
    }

    #[must_use]
    pub fn any_alive(&self) -> bool {
        self.history.current().any_alive()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.history.current()
    }

    /// Ticks since the last reset (startup, resize, or load).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    #[must_use]
    pub fn wrap_edges(&self) -> bool {
        self.wrap_edges
    }

    #[must_use]
    pub fn randomize_chance(&self) -> f64 {
        self.randomize_chance
    }

    #[must_use]
    pub fn grid_scale(&self) -> f64 {
        self.grid_scale
    }

    #[must_use]
    pub fn edge_mode(&self) -> EdgeMode {
        if self.wrap_edges {
            EdgeMode::Wrap
        } else {
            EdgeMode::Bounded
        }
    }

    #[must_use]
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Hands the backing store back to the caller, e.g. to rebuild a
    /// session over the same persisted state.
    #[must_use]
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    fn load_state(&mut self, state: &SavedState) -> Result<()> {
        let board = state.to_board()?;
        self.playing = false;
        self.history.reset(board);
        self.generation = 0;
        store_value(self.store.as_mut(), KEY_GRID_SIZE, &state.size)?;
        Ok(())
    }

    fn persist_patterns(&mut self) -> Result<()> {
        store_value(self.store.as_mut(), KEY_PATTERNS, &self.patterns)?;
        Ok(())
    }
}
