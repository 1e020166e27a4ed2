use vivarium_core::SandboxConfig;
use vivarium_io::MemoryStore;
use vivarium_lib::Session;

/// Builds sessions backed by an in-memory store with a fixed seed.
#[allow(dead_code)]
pub struct SessionBuilder {
    config: SandboxConfig,
    seed: u64,
    cells: Vec<(u16, u16)>,
}

#[allow(dead_code)]
impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: SandboxConfig::default(),
            seed: 42,
            cells: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: u16) -> Self {
        self.config.grid.size = size;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.config.simulation.wrap_edges = wrap;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.simulation.history_capacity = capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SandboxConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Cells toggled alive after construction, in order.
    pub fn with_cells(mut self, cells: &[(u16, u16)]) -> Self {
        self.cells.extend_from_slice(cells);
        self
    }

    pub fn build(self) -> Session {
        let mut session = Session::with_seed(self.config, Box::new(MemoryStore::new()), self.seed)
            .expect("Failed to build session");
        for (row, col) in self.cells {
            session
                .toggle_cell(row, col)
                .expect("builder cell within bounds");
        }
        session
    }
}
