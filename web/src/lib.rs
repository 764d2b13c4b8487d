use clap::Parser;
use memento_core::Difficulty;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod runtime;
pub mod storage;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Board size to start with
    #[arg(short, long)]
    difficulty: Option<Difficulty>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        log::error!("Ignoring location hash: {}", err);
    }
    log::debug!("seed: {:?}, difficulty: {:?}", args.seed, args.difficulty);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    let props = app::AppProps {
        seed: args.seed,
        difficulty: args.difficulty,
    };

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, props).render();
}
