//! Per-line drive loop
//!
//! Reads `<address>:<message>` lines and emits one encoded
//! transmission, then a fixed silence block, for each. Encoding
//! carries no state between pages, so the loop is a straight
//! read-parse-encode-transmit cycle. Bad input data is fatal: a
//! malformed line or an out-of-range address is not something a
//! retry can fix, so the loop stops and reports it.

use std::io::BufRead;

use anyhow::Context;
use log::info;

use pocsag::{Encoder, Page, Transmitter};

use crate::cli::Args;

/// Run the encoder loop
///
/// Encodes every page in `input` through `encoder` and hands the
/// audio to `transmitter`, until the input is exhausted or a line
/// fails to parse. Blank lines are skipped. Line endings (`\n`,
/// `\r\n`) are stripped before parsing.
pub fn run<R, T>(
    args: &Args,
    encoder: &Encoder,
    input: R,
    transmitter: &mut T,
) -> Result<(), anyhow::Error>
where
    R: BufRead,
    T: Transmitter,
{
    // The inter-message gap is a fixed length of silence; the
    // duration is never randomized.
    let gap = encoder.silence(args.silence);

    for line in input.lines() {
        let line = line.context("unable to read page input")?;
        if line.is_empty() {
            continue;
        }

        let page: Page = line
            .parse()
            .with_context(|| format!("unable to parse input line \"{}\"", line))?;

        info!(
            "page {}: {} characters",
            page.address(),
            page.message().len()
        );

        transmitter
            .transmit(&encoder.encode_pcm(&page))
            .context("unable to write transmission audio")?;
        transmitter
            .transmit(&gap)
            .context("unable to write inter-message silence")?;
    }

    Ok(())
}
