use std::process::ExitCode;

use clap::Parser;

use command::Cli;
use common::logging::init_logger;

mod comm;
mod command;
mod common;
mod data;
mod model;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    //We have to keep the worker_guard alive
    let _worker_guard = init_logger(cli.log_level, &cli.log_file);

    let command = cli.into_command();

    match command::run(&command).await {
        Ok(message) => {
            println!("✅ {message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("🛑 {err:#}");
            ExitCode::FAILURE
        }
    }
}
