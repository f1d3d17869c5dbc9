//! Quadrilateral explorer
//!
//! Reads one command per line on stdin, applies it to the shape model and
//! prints what changed. Type `help` for the command list.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use quadrilateral::config::AppConfig;
use quadrilateral::input::{InputMapper, HELP};
use quadrilateral::systems::{report, SimulationResult, SimulationSystem};
use quadrilateral_core::ShapeModel;

fn main() {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting quadrilateral explorer");

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut model = ShapeModel::new(config.to_shape_model_config())?;
    let mut simulation = SimulationSystem::new(config.vertex_controller(), config.tangible_adapter());
    simulation.set_mode(&mut model, config.start_mode()?);

    // Change lines collected by the listener, printed after each command
    let changes = Rc::new(RefCell::new(Vec::new()));
    if config.debug.report_changes {
        let sink = Rc::clone(&changes);
        model.add_change_listener(move |event| {
            sink.borrow_mut().push(report::describe_change(event));
        });
    }

    println!("{}", report::describe(model.snapshot(), config.debug.show_conditions));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match InputMapper::map_line(&line) {
            Ok(None) => {}
            Ok(Some(action)) => match simulation.apply(&mut model, &action) {
                SimulationResult::Applied | SimulationResult::Ignored => {}
                SimulationResult::Rejected { vertex, blocked } => {
                    println!("{}", report::describe_blocked(vertex, blocked));
                }
                SimulationResult::Show => {
                    println!("{}", report::describe(model.snapshot(), config.debug.show_conditions));
                }
                SimulationResult::Dump => {
                    let pretty = ron::ser::PrettyConfig::default();
                    println!("{}", ron::ser::to_string_pretty(model.snapshot(), pretty)?);
                }
                SimulationResult::Help => println!("{}", HELP),
                SimulationResult::Exit => break,
            },
            Err(e) => println!("{}", e),
        }

        for change in changes.borrow_mut().drain(..) {
            println!("{}", change);
        }
        print!("> ");
        stdout.flush()?;
    }

    log::info!("Exiting with a {}", model.shape_name());
    Ok(())
}
