//! Configured page encoder

#[cfg(not(test))]
use log::info;

#[cfg(test)]
use std::println as info;

use thiserror::Error;

use crate::codeword::Codeword;
use crate::page::Page;
use crate::pcm::{self, SYMBOL_RATE};
use crate::transmission;

/// Default output sampling rate (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Default transmitted baud rate (bit/s)
pub const DEFAULT_BAUD_RATE: u32 = 512;

/// Encodes pages into codewords and PCM audio
///
/// An `Encoder` fixes the output sampling rate and the transmitted
/// baud rate once, at construction, where they are validated. The
/// per-page operations are then total: any page encodes.
///
/// ```
/// use pocsag::{Encoder, Page};
///
/// let encoder = Encoder::new(22050, 512).expect("audio rates");
/// let page: Page = "1300500:RESPOND PRIORITY 2".parse().expect("page");
///
/// let audio = encoder.encode_pcm(&page);
/// assert!(!audio.is_empty());
/// ```
///
/// Encoding holds no state between pages: each call computes one
/// transmission from scratch, and an `Encoder` may be shared freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoder {
    sample_rate: u32,
    baud_rate: u32,
}

impl Encoder {
    /// New encoder with the given output rates
    ///
    /// `sample_rate` is the PCM output rate in Hz, and `baud_rate`
    /// the on-air bit rate. The baud rate may not exceed the
    /// internal [`SYMBOL_RATE`] of 38400 Hz.
    pub fn new(sample_rate: u32, baud_rate: u32) -> Result<Encoder, EncoderError> {
        if sample_rate == 0 {
            return Err(EncoderError::ZeroSampleRate);
        }
        match baud_rate {
            0 => Err(EncoderError::ZeroBaudRate),
            r if r > SYMBOL_RATE => Err(EncoderError::BaudTooFast(baud_rate)),
            _ => Ok(Encoder {
                sample_rate,
                baud_rate,
            }),
        }
    }

    /// Output sampling rate (Hz)
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Transmitted baud rate (bit/s)
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Encode one page as protocol codewords
    pub fn encode_words(&self, page: &Page) -> Vec<Codeword> {
        transmission::encode_transmission(page.address(), page.message())
    }

    /// Encode one page as PCM audio
    ///
    /// Mono little-endian signed 16-bit samples at this encoder's
    /// sampling rate.
    pub fn encode_pcm(&self, page: &Page) -> Vec<u8> {
        let words = self.encode_words(page);
        let audio = pcm::pcm_encode_transmission(self.sample_rate, self.baud_rate, &words);

        info!(
            "page {}: {} words, {} bytes of audio",
            page.address(),
            words.len(),
            audio.len()
        );

        audio
    }

    /// A silence block in this encoder's output format
    pub fn silence(&self, seconds: u32) -> Vec<u8> {
        pcm::silence(self.sample_rate, seconds)
    }
}

impl Default for Encoder {
    fn default() -> Encoder {
        Encoder {
            sample_rate: DEFAULT_SAMPLE_RATE,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Error constructing an [`Encoder`]
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderError {
    /// The sample rate is zero
    #[error("sample rate must be nonzero")]
    ZeroSampleRate,

    /// The baud rate is zero
    #[error("baud rate must be nonzero")]
    ZeroBaudRate,

    /// The baud rate exceeds the internal symbol rate
    #[error("baud rate {0} exceeds the {SYMBOL_RATE} Hz symbol rate")]
    BaudTooFast(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::page::Address;
    use crate::pcm::pcm_transmission_length;
    use crate::transmission::text_message_length;

    #[test]
    fn test_rate_validation() {
        assert!(Encoder::new(22050, 512).is_ok());
        assert!(Encoder::new(22050, SYMBOL_RATE).is_ok());
        assert_eq!(Encoder::new(0, 512), Err(EncoderError::ZeroSampleRate));
        assert_eq!(Encoder::new(22050, 0), Err(EncoderError::ZeroBaudRate));
        assert_eq!(
            Encoder::new(22050, SYMBOL_RATE + 1),
            Err(EncoderError::BaudTooFast(SYMBOL_RATE + 1))
        );

        let encoder = Encoder::default();
        assert_eq!(encoder.sample_rate(), DEFAULT_SAMPLE_RATE);
        assert_eq!(encoder.baud_rate(), DEFAULT_BAUD_RATE);
    }

    #[test]
    fn test_encode_lengths_agree() {
        let encoder = Encoder::new(22050, 512).unwrap();
        let page = Page::new(Address::new(99).unwrap(), "LUNCH?");

        let words = encoder.encode_words(&page);
        assert_eq!(words.len(), text_message_length(page.address(), 6));

        let audio = encoder.encode_pcm(&page);
        assert_eq!(audio.len(), pcm_transmission_length(22050, 512, words.len()));

        assert_eq!(encoder.silence(1).len(), 22050 * 2);
    }
}
