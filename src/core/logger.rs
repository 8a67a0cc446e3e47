use crate::core::config::LoggingConfig;
use crate::core::dirs::get_log_file_path;
use colored::Colorize;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Initialize the process-wide logger.
///
/// `--debug` forces `Debug` for this crate, otherwise the configured level applies.
/// Dependencies only log warnings and errors.
pub fn setup_logging(debug: bool, config: &LoggingConfig) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };

    let mut builder = Builder::from_default_env();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        _ => "ERROR".red(),
                    };
                    let path = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, path, record.args())
                }
                _ => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        });

    let mut file_error = None;
    if config.to_file {
        match get_log_file_path().and_then(|path| open_log_file(&path).map_err(Into::into)) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(Tee {
                    primary: std::io::stderr(),
                    secondary: file,
                })));
            }
            Err(e) => file_error = Some(e),
        }
    }

    // A second init (tests, embedding) keeps the first logger
    if builder.try_init().is_err() {
        return;
    }

    if let Some(e) = file_error {
        log::warn!("cannot open log file, logging to stderr error={e}");
    }
}

/// Writes every record to both sinks. The secondary sink is still written when the
/// primary one fails.
struct Tee<A: Write, B: Write> {
    primary: A,
    secondary: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let primary = self.primary.write_all(buf);
        self.secondary.write_all(buf)?;
        primary.map(|()| buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let primary = self.primary.flush();
        self.secondary.flush()?;
        primary
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
