//! Interactive region editor.

mod app;
mod canvas;
mod keymap;
mod theme;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use app::AppState;
use textorizer::{DetectOptions, ExportOptions};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the interactive view until the user quits.
///
/// Failures to open `pdf` or load `regions` are shown inside the view.
pub fn run(
    pdf: Option<&Path>,
    regions: Option<&Path>,
    detect: DetectOptions,
    export: ExportOptions,
) -> io::Result<()> {
    let mut app = AppState::new(detect, export);
    if let Some(pdf) = pdf {
        match app.open_pdf(pdf) {
            Ok(()) => {
                if let Some(regions) = regions {
                    if let Err(e) = app.load_regions(regions) {
                        app.error(e);
                    }
                }
            }
            Err(e) => app.error(e),
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal, TICK_RATE);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
