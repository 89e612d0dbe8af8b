use std::path::PathBuf;

use clap::Parser;

use caller_format::config::{load_config, LoggerConfig};
use caller_format::{
    facade, log_debug, log_error, log_fatal, log_info, log_panic, log_trace, log_warn, Level,
};

#[derive(Parser)]
#[command(name = "caller-format")]
#[command(about = "Write log lines through the caller-aware template formatter", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum level written (overrides the config)
    #[arg(short, long)]
    level: Option<Level>,

    /// Append to this file instead of the configured stream
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Line template, e.g. "%level% %function% %msg%\n"
    #[arg(short, long)]
    template: Option<String>,

    /// strftime layout for %time%
    #[arg(long)]
    time_format: Option<String>,

    /// Level the message is emitted at
    #[arg(long, default_value = "info")]
    at: Level,

    /// Message to log
    #[arg(default_value = "caller-format started")]
    message: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    if let Some(level) = cli.level {
        config.output.level = level;
    }
    if let Some(template) = cli.template {
        config.format.line_template = template;
    }
    if let Some(time_format) = cli.time_format {
        config.format.timestamp_format = time_format;
    }

    facade::init(config)?;
    if let Some(path) = &cli.log_file {
        facade::set_file_logging(path)?;
    }

    emit(cli.at, &cli.message);
    log_debug!(
        debug_enabled = facade::is_debug_enabled(),
        source = "cli",
        "Emitted one line at {}",
        cli.at
    );

    if cli.log_file.is_some() {
        facade::close()?;
    }
    Ok(())
}

fn emit(level: Level, message: &str) {
    match level {
        Level::Trace => log_trace!("{}", message),
        Level::Debug => log_debug!("{}", message),
        Level::Info => log_info!("{}", message),
        Level::Warn => log_warn!("{}", message),
        Level::Error => log_error!("{}", message),
        Level::Fatal => log_fatal!("{}", message),
        Level::Panic => log_panic!("{}", message),
    }
}
