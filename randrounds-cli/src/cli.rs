use std::error::Error;
use clap::Parser;
use config::Config;
use randrounds::RoundsHasher;

#[derive(Parser, Debug)]
#[command(name = "randrounds")]
#[command(about = "Password hashing with a random round count", long_about = None)]
enum Cli {
    /// Hash a password
    Hash {
        password: String,
        salt: String,
        /// Rounds every hash always pays (defaults to config)
        initial_rounds: Option<u32>,
        /// Upper bound on rounds, exclusive (defaults to config)
        max_rounds: Option<u32>,
    },
    /// Check a password against a stored hash
    Check {
        password: String,
        salt: String,
        hash: String,
        initial_rounds: Option<u32>,
        max_rounds: Option<u32>,
    },
}

pub fn process_commands(settings: &Config) -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    match args {
        Cli::Hash { password, salt, initial_rounds, max_rounds } => {
            let hasher = build_hasher(settings, initial_rounds, max_rounds)?;
            println!("{}", hasher.hash(&password, &salt));
        }
        Cli::Check { password, salt, hash, initial_rounds, max_rounds } => {
            let hasher = build_hasher(settings, initial_rounds, max_rounds)?;
            println!("{}", hasher.check(&password, &salt, &hash));
        }
    }

    Ok(())
}

// Command-line bounds win over the config file; either can be omitted.
fn build_hasher(
    settings: &Config,
    initial_rounds: Option<u32>,
    max_rounds: Option<u32>,
) -> Result<RoundsHasher, Box<dyn Error>> {
    if initial_rounds.is_none() && max_rounds.is_none() {
        return RoundsHasher::from_settings(settings);
    }
    let initial = match initial_rounds {
        Some(value) => value,
        None => settings.get::<u32>("hashing.initial_rounds")?,
    };
    let max = match max_rounds {
        Some(value) => value,
        None => settings.get::<u32>("hashing.max_rounds")?,
    };
    Ok(RoundsHasher::new(initial, max)?)
}
