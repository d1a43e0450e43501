use std::io;
use std::io::Write;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{info, LevelFilter};

use pocsag::{Encoder, StreamTransmitter, Transmitter};

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match pocsagenc() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn pocsagenc() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    // create the encoder; rates are validated here
    let encoder = Encoder::new(args.rate, args.baud).map_err(anyhow::Error::from)?;

    // file setup: locks stdin in case we need it
    let stdin = io::stdin();
    let stdin_handle = stdin.lock();
    let input = file_setup(&args, stdin_handle)?;

    // audio goes to stdout; refuse to spray samples at a human
    let stdout = io::stdout();
    let mut transmitter = output_setup(stdout.lock())?;

    if let Some(hz) = args.carrier {
        transmitter
            .set_carrier_frequency(hz)
            .context("unable to tune transmitter")
            .map_err(CliError::from)?;
    }

    // processing: encode a transmission per input line
    app::run(&args, &encoder, input, &mut transmitter)?;

    transmitter
        .into_inner()
        .flush()
        .context("unable to flush output")
        .map_err(CliError::from)?;

    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("pocsag", log_filter)
            .filter_module("pocsagenc", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

fn file_setup<'stdin>(
    args: &Args,
    stdin: std::io::StdinLock<'stdin>,
) -> Result<Box<dyn io::BufRead + 'stdin>, anyhow::Error> {
    if args.input_is_stdin() {
        info!("POCSAG encoder reading pages from standard input");
        Ok(Box::new(stdin))
    } else {
        info!("POCSAG encoder reading pages from file: \"{}\"", &args.file);
        Ok(Box::new(io::BufReader::new(
            std::fs::File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}

fn output_setup(
    stdout: io::StdoutLock<'_>,
) -> Result<StreamTransmitter<io::BufWriter<io::StdoutLock<'_>>>, anyhow::Error> {
    if is_terminal(&std::io::stdout()) {
        Err(anyhow!(
            "cowardly refusing to write audio samples to a terminal.

Pipe this program's output into sox, aplay, a file, or a
baseband-input transmitter."
        ))
    } else {
        Ok(StreamTransmitter::new(io::BufWriter::new(stdout)))
    }
}

#[cfg(not(target_os = "windows"))]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::fd::AsRawFd,
{
    terminal_size::terminal_size_using_fd(stream.as_raw_fd()).is_some()
}

#[cfg(target_os = "windows")]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::windows::io::AsRawHandle,
{
    terminal_size::terminal_size_using_handle(stream.as_raw_handle()).is_some()
}
