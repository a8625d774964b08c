use std::error::Error;
use log::info;
use config::Config;

mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    info!("Starting randrounds v{}", env!("CARGO_PKG_VERSION"));

    let settings = Config::builder()
        .set_default("hashing.initial_rounds", 1024i64)?
        .set_default("hashing.max_rounds", 2048i64)?
        .add_source(config::File::with_name("config/config").required(false))
        .build()?;

    cli::process_commands(&settings)?;

    Ok(())
}
