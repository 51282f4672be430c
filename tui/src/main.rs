//! Terminal editor for the ClawWorld game data: one tab per editor plus a map canvas.
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use app::App;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind,
};
use crossterm::execute;
use env_logger::Env;
use gamedata::ApplicationRuntimeBuilder;
use log::{debug, info};
use ratatui::DefaultTerminal;

mod app;
mod ui;

#[derive(Parser)]
#[command(author, version, about)]
struct Opts {
    /// Directory holding the CSV files, overrides the configuration file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log filter written to clawedit-tui.log in the temp directory
    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

fn configure_logging(opts: &Opts) -> Result<(), Box<dyn Error>> {
    let mut log_file = env::temp_dir();
    log_file.push("clawedit-tui.log");

    // The terminal belongs to the UI, so the log always goes to a file
    let target = Box::new(File::create(&log_file)?);
    env_logger::Builder::from_env(Env::default().default_filter_or(opts.verbosity.as_str()))
        .target(env_logger::Target::Pipe(target))
        .init();
    debug!("Logging to {}", log_file.display());
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<(), Box<dyn Error>> {
    while !app.should_quit() {
        terminal.draw(|frame| ui::draw(frame, &app))?;
        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (left, top) = ui::map_grid_origin(terminal.get_frame().area());
                if let (Some(column), Some(row)) =
                    (mouse.column.checked_sub(left), mouse.row.checked_sub(top))
                {
                    app.click_cell(column, row);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let opts = Opts::parse();
    configure_logging(&opts)?;

    let mut builder = ApplicationRuntimeBuilder::new();
    if let Some(data_dir) = opts.data_dir {
        builder = builder.with_data_dir(data_dir);
    }
    let runtime = builder.build()?;
    info!(
        "Editing game data in {}",
        runtime
            .data_dir()
            .map_or_else(|| "memory".to_string(), |d| d.display().to_string())
    );

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(stdout(), EnableMouseCapture)?;
    let app_result = run(terminal, App::new(runtime));
    let released = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    released?;
    app_result
}
