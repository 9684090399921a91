// TUI module for the interactive catalog browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::App;
use terminal::TerminalGuard;

use crate::loader::Catalog;

/// Run the interactive TUI over a loaded catalog
pub fn run_interactive(catalog: Catalog) -> Result<()> {
    let mut guard = TerminalGuard::acquire()?;

    let mut app = App::new(catalog);
    let res = app.run(guard.terminal_mut());

    guard.release()?;
    res
}
