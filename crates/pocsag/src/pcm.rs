//! PCM synthesis of encoded transmissions
//!
//! Codewords become a two-level FSK baseband waveform: a fixed
//! positive level for zero bits and the matching negative level for
//! one bits. The waveform is built at a fixed internal symbol rate,
//! with each bit repeated enough times for the requested baud rate,
//! then decimated to the output sampling rate by nearest-neighbor
//! selection and serialized as little-endian signed 16-bit samples.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::codeword::Codeword;

/// Internal synthesis rate (Hz)
///
/// The waveform is first generated at this rate and then resampled.
/// Baud rates must divide it evenly; the common POCSAG rates of 512,
/// 1200, and 2400 bit/s all do.
pub const SYMBOL_RATE: u32 = 38400;

// Baseband level for a zero bit: half of full scale. One bits are
// sent at the negated level.
const LEVEL: i16 = i16::MAX / 2;

/// Exact byte length of a synthesized transmission
///
/// Computes the output size of
/// [`pcm_encode_transmission()`] for a transmission of `word_count`
/// codewords: 32 bits per word, `sample_rate / baud_rate` samples
/// per bit, two bytes per sample. Integer division happens in that
/// order, and the encoder reproduces it exactly.
pub fn pcm_transmission_length(sample_rate: u32, baud_rate: u32, word_count: usize) -> usize {
    word_count * 32 * sample_rate as usize / baud_rate as usize * 2
}

/// Synthesize a transmission into a PCM sample buffer
///
/// Returns mono 16-bit signed samples, little-endian, at
/// `sample_rate`. The output length always equals
/// [`pcm_transmission_length()`] for the same arguments.
///
/// `baud_rate` must be nonzero and no greater than [`SYMBOL_RATE`].
pub fn pcm_encode_transmission(sample_rate: u32, baud_rate: u32, words: &[Codeword]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pcm_transmission_length(sample_rate, baud_rate, words.len()));
    pcm_write_transmission(sample_rate, baud_rate, words, &mut out)
        .expect("writes to a Vec are infallible");
    out
}

/// Synthesize a transmission into a writer
///
/// Like [`pcm_encode_transmission()`], but streams the samples into
/// `out` instead of materializing them.
pub fn pcm_write_transmission<W>(
    sample_rate: u32,
    baud_rate: u32,
    words: &[Codeword],
    out: &mut W,
) -> io::Result<()>
where
    W: io::Write,
{
    let repeats = (SYMBOL_RATE / baud_rate) as usize;
    debug_assert!(repeats > 0);

    // bilevel waveform at the fixed symbol rate, each bit stretched
    // to the baud duration, most significant bit first
    let mut symbols: Vec<i16> = Vec::with_capacity(words.len() * 32 * repeats);
    for word in words {
        let bits = word.bits();
        for bit in (0..32).rev() {
            let level = if (bits >> bit) & 1 == 0 { LEVEL } else { -LEVEL };
            symbols.resize(symbols.len() + repeats, level);
        }
    }

    // nearest-neighbor decimation to the output rate; the index
    // never runs past the waveform, even for baud rates that do not
    // divide the symbol rate
    let num_samples = pcm_transmission_length(sample_rate, baud_rate, words.len()) / 2;
    let last = symbols.len().saturating_sub(1);
    for index in 0..num_samples {
        let symbol = symbols[usize::min(index * SYMBOL_RATE as usize / sample_rate as usize, last)];
        out.write_i16::<LittleEndian>(symbol)?;
    }

    Ok(())
}

/// A block of silence
///
/// Zero-valued samples in the output format, `seconds` long at
/// `sample_rate`. Sent between transmissions so receivers see a
/// carrier gap.
pub fn silence(sample_rate: u32, seconds: u32) -> Vec<u8> {
    vec![0u8; sample_rate as usize * seconds as usize * 2]
}
