use std::fs::File;
use std::io;
use std::path::PathBuf;

use env_logger::{Env, Target};

/// Log file name in the system temp dir
pub const LOG_FILE: &str = "charger-map.log";

/// Send logs to a file so they never draw over the terminal UI.
/// Level defaults to `info`; `RUST_LOG` overrides it.
pub fn init_logging() -> io::Result<PathBuf> {
    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(&path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(path)
}
