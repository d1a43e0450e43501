use std::fmt::Display;

use clap::{error::ErrorKind, CommandFactory, Parser};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
This program reads pager messages, one per line, in the format `<address>:<message>`, encodes each as a POCSAG transmission, and writes raw PCM samples in signed 16-bit (i16) little-endian format, at the given sampling --rate, to standard output. A fixed block of silence separates messages.

See --help for more details.

ALWAYS TEST INTO A DUMMY LOAD!
"#;

const USAGE_LONG: &str = r#"
This program reads pager messages, one per line, in the format `<address>:<message>`, encodes each as a POCSAG transmission, and writes raw PCM samples in signed 16-bit (i16) little-endian format, at the given sampling --rate, to standard output. A fixed block of silence separates messages.

Addresses are decimal and at most 2097151 (21 bits). The message is everything after the first colon and may be empty. A line without any colon, or with an out-of-range address, stops the program with an error and a nonzero exit status. Blank lines are skipped.

You can store a page as an audio file with sox

    printf '1234567:TEST PAGE\n' \
        | pocsagenc -r 22050 \
        | sox -t raw -r 22.05k -e signed -b 16 -c 1 - page.wav

or feed it straight to a baseband-input transmitter

    pocsagenc -r 22050 --file pages.txt \
        | pat-transmit --rate 22050

The output is audio-frequency baseband, not a radio signal: whatever radiates it must apply its own FSK deviation and carrier. Transmitting on paging frequencies generally requires a license.

ALWAYS TEST INTO A DUMMY LOAD!
"#;

const ADVANCED: &str = "Advanced Output Options";

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING except the output samples
    #[arg(short, long)]
    pub quiet: bool,

    /// Output sampling rate (Hz)
    ///
    /// Set to the sampling rate your playback or transmit chain
    /// expects. If feeding a sound card, use the card's native
    /// rate—usually 44100 or 48000.
    #[arg(short, long, default_value_t = pocsag::DEFAULT_SAMPLE_RATE)]
    pub rate: u32,

    /// Transmitted baud rate (bit/s)
    ///
    /// Must match the pager. Standard POCSAG rates are 512, 1200,
    /// and 2400.
    #[arg(short, long, default_value_t = pocsag::DEFAULT_BAUD_RATE)]
    pub baud: u32,

    /// Input file of pages (or "-" for stdin)
    ///
    /// One page per line, `<address>:<message>`.
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Inter-message silence (seconds)
    #[arg(long, default_value_t = 1)]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub silence: u32,

    /// Carrier frequency (Hz), forwarded to the transmitter
    ///
    /// Stream outputs have no carrier and ignore this.
    #[arg(long)]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub carrier: Option<u32>,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pocsagenc"]);
        assert!(args.input_is_stdin());
        assert_eq!(args.rate, 22050);
        assert_eq!(args.baud, 512);
        assert_eq!(args.silence, 1);
        assert_eq!(args.carrier, None);
    }
}
