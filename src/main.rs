use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

mod columns;
mod controller;
mod dataset;
mod domain;
mod drag;
mod inputter;
mod loader;
mod logging;
mod model;
mod paths;
mod session;
mod sorting;
mod storage;
mod ui;

use controller::Controller;
use dataset::Dataset;
use domain::{TVConfig, TVError};
use model::{Model, Status};
use session::Session;
use storage::{FileStore, KeyValueStore, MemoryStore};
use ui::TableUI;

#[derive(Debug, Parser)]
#[command(version, about = "A tui table with sortable, reorderable columns")]
struct Args {
    /// Data file (csv, parquet or arrow). A generated sample is shown if omitted.
    data: Option<String>,

    /// Rows of the generated sample
    #[arg(long, default_value_t = 100)]
    rows: usize,

    /// Seed of the generated sample
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory where the column layout is saved
    #[arg(long, value_name = "DIR")]
    store: Option<String>,

    /// Start logged in, unlocking column reordering
    #[arg(long, value_name = "IDENTIFIER")]
    login: Option<String>,

    /// Initial sort column, e.g. registeredDate
    #[arg(long, value_name = "COLUMN")]
    sort: Option<String>,

    #[arg(long, default_value_t = 15)]
    initial_rows: usize,

    #[arg(long, default_value_t = 10)]
    page_size: usize,

    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_file = match args.log_file.as_deref().map(expand_path).transpose() {
        Ok(path) => path
            .or_else(paths::log_file)
            .unwrap_or_else(|| PathBuf::from("tvgrid.log")),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init_tracing(&log_file) {
        eprintln!("Warning: logging disabled, {e}");
    }

    match run(args) {
        Err(e) => {
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn expand_path(path: &str) -> Result<PathBuf, TVError> {
    Ok(PathBuf::from(shellexpand::full(path)?.into_owned()))
}

fn open_store(dir: Option<&str>) -> Result<Box<dyn KeyValueStore>, TVError> {
    let dir = match dir {
        Some(dir) => Some(expand_path(dir)?),
        None => paths::store_dir(),
    };
    Ok(match dir {
        Some(dir) => {
            let store = FileStore::new(dir);
            info!("Column layouts are stored in {}", store.dir().display());
            Box::new(store)
        }
        None => {
            warn!("No home directory, column layouts will not outlive this session");
            Box::new(MemoryStore::new())
        }
    })
}

fn run(args: Args) -> Result<(), TVError> {
    let dataset = match args.data.as_deref() {
        Some(path) => Dataset::load(&expand_path(path)?)?,
        None => Dataset::generate(args.rows, args.seed),
    };
    if dataset.is_empty() {
        warn!("Dataset {} has no rows", dataset.name());
    }

    let cfg = TVConfig::default()
        .with_initial_rows(args.initial_rows.max(1))
        .with_page_size(args.page_size.max(1));
    let store = open_store(args.store.as_deref())?;
    let session = match args.login {
        Some(identifier) => Session::logged_in(identifier),
        None => Session::default(),
    };

    let mut terminal = ratatui::init();
    let height = terminal.size().map(|s| s.height as usize).unwrap_or(24);
    let mut model = Model::init(&cfg, dataset, store, session, height);
    if let Some(column) = args.sort.as_deref() {
        model.sort_by_name(column);
    }
    let mut ui = TableUI::new(&cfg);
    let controller = Controller::new(&cfg);

    let result = event_loop(&mut terminal, &mut model, &mut ui, &controller);
    ratatui::restore();
    info!("Bye!");
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    model: &mut Model,
    ui: &mut TableUI,
    controller: &Controller,
) -> Result<(), TVError> {
    while model.status != Status::Quitting {
        // Render the current view
        terminal.draw(|f| ui.draw(model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event(model)?;
        model.update(message)?;
    }
    Ok(())
}
