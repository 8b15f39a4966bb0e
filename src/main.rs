use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use ask::cli::{Command, USAGE};
use ask::context::ContextStore;
use ask::error::Result;
use ask::llama::LlamaEngine;
use ask::settings::Settings;
use ask::turn::run_turn;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("An error occurred: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    match Command::parse(args) {
        Command::Usage => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Clear => {
            let settings = Settings::load()?;
            ContextStore::new(&settings.context_file_path).clear()?;
            println!("Context cleared");
            Ok(())
        }
        Command::Ask(question) => {
            let settings = Settings::load()?;
            let store = ContextStore::new(&settings.context_file_path);
            let mut engine = LlamaEngine::open(Path::new(&settings.model_path))?;
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            run_turn(&mut engine, &settings, &store, &question, &mut sink)?;
            sink.flush()?;
            Ok(())
        }
    }
}
