//! # pocsag: POCSAG paging transmission encoder
//!
//! This crate encodes text messages into
//! [POCSAG](https://en.wikipedia.org/wiki/POCSAG) radio-paging
//! transmissions. Given a pager address and a message, it produces
//! the exact sequence of 32-bit protocol codewords a pager expects
//! and, from those, a two-level FSK baseband waveform as raw PCM
//! audio, ready for a transmitter's baseband input or an audio file.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these
//! licenses carefully as they may affect your rights.
//!
//! Transmitting on paging frequencies generally requires a license
//! or other authorization. Radiating the output of this crate
//! without one may be a crime in your jurisdiction. Know your local
//! regulations before connecting anything to an antenna.
//!
//! ## Example
//!
//! ```
//! use pocsag::{Encoder, Page};
//!
//! // output sampling rate and on-air baud rate, checked once
//! let encoder = Encoder::new(22050, 512).expect("audio rates");
//!
//! // pages use the line format `address:message`
//! let page: Page = "1300500:RESPOND PRIORITY 2".parse().expect("page");
//!
//! // mono signed 16-bit little-endian samples at 22050 Hz
//! let audio = encoder.encode_pcm(&page);
//! assert_eq!(audio.len() % 2, 0);
//! ```
//!
//! Pipe the output of the bundled `pocsagenc` program to `sox` or
//! `aplay` to hear it, or to a baseband-input transmitter to send
//! it.
//!
//! The lower-level pipeline is public too. Each stage pairs an
//! encoding function with a length function that predicts its exact
//! output size, so callers can size buffers up front:
//!
//! ```
//! use pocsag::{
//!     encode_transmission, pcm_encode_transmission, pcm_transmission_length,
//!     text_message_length, Address,
//! };
//!
//! let address = Address::new(7).expect("21-bit address");
//!
//! let words = encode_transmission(address, "A");
//! assert_eq!(words.len(), text_message_length(address, 1));
//!
//! let audio = pcm_encode_transmission(22050, 512, &words);
//! assert_eq!(audio.len(), pcm_transmission_length(22050, 512, words.len()));
//! ```
//!
//! ## Background
//!
//! POCSAG transmits 32-bit codewords, each carrying 21 payload bits
//! protected by a ten-bit CRC and an even-parity bit. Codewords are
//! grouped into *batches* of sixteen, every batch led by a fixed
//! SYNC word, and the whole transmission is led by 576 bits of an
//! alternating preamble. A pager's 21-bit address is split: the
//! upper 18 bits travel in the address codeword, while the low three
//! select which of the batch's eight two-word *frames* the address
//! word occupies. Message text follows the address word as 7-bit
//! characters, sent low bit first, packed twenty bits to a codeword.
//!
//! This crate implements the transmit direction only. Decoding,
//! and the numeric message type, are out of scope.

mod codeword;
mod encoder;
mod page;
mod pcm;
mod transmission;
mod transmitter;

pub use codeword::{crc, parity, Codeword, CRC_GENERATOR};
pub use encoder::{Encoder, EncoderError, DEFAULT_BAUD_RATE, DEFAULT_SAMPLE_RATE};
pub use page::{Address, AddressRangeErr, Page, PageParseErr, MAX_ADDRESS};
pub use pcm::{
    pcm_encode_transmission, pcm_transmission_length, pcm_write_transmission, silence, SYMBOL_RATE,
};
pub use transmission::{
    encode_transmission, text_message_length, BATCH_WORDS, FRAME_WORDS, PREAMBLE_WORDS,
};
pub use transmitter::{StreamTransmitter, Transmitter};
