// Library surface for headless/integration tests and reuse.
// Terminal setup and the CLI live in main.rs.
pub mod app;
pub mod clock;
pub mod config;
pub mod field;
pub mod game;
pub mod runtime;
pub mod stats;
pub mod target;
pub mod ui;
pub mod util;
