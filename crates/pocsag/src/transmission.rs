//! POCSAG transmission assembly
//!
//! A transmission is a preamble followed by *batches*: one
//! [`SYNC`](Codeword::SYNC) word and sixteen payload words each. The
//! address word must land at the word offset selected by the low
//! three address bits, with idle words filling the gap, and the
//! message text is packed seven bits per character across the
//! remaining 20-bit data words. The last batch is padded out with
//! idles.
//!
//! [`text_message_length()`] computes the exact word count
//! [`encode_transmission()`] will produce, so callers can size
//! buffers before encoding.

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use crate::codeword::Codeword;
use crate::page::Address;

/// Payload words per batch
pub const BATCH_WORDS: usize = 16;

/// Words per frame: each batch holds eight two-word frames
pub const FRAME_WORDS: usize = 2;

/// Preamble length, in words
///
/// 576 bits of the alternating `1010…` pattern, sent ahead of the
/// first batch so receivers can synchronize.
pub const PREAMBLE_WORDS: usize = 576 / 32;

// Every character contributes its low seven bits
const TEXT_BITS_PER_CHAR: usize = 7;

// Data bits per message codeword
const TEXT_BITS_PER_WORD: usize = 20;

/// Encode a complete text-page transmission
///
/// Produces, in order: the preamble, the first SYNC, idle padding up
/// to the address frame, the address word, the packed message text
/// (with further SYNC words at every batch boundary), one idle word
/// terminating the text, and idle padding to the end of the batch.
///
/// The word count always equals
/// [`text_message_length(address, text.len())`](text_message_length),
/// and the portion after the preamble is a multiple of seventeen
/// words.
pub fn encode_transmission(address: Address, text: &str) -> Vec<Codeword> {
    let mut words = Vec::with_capacity(text_message_length(address, text.len()));

    words.resize(PREAMBLE_WORDS, Codeword::PREAMBLE);

    // first batch
    let start = words.len();
    words.push(Codeword::SYNC);

    // the low three address bits are carried by frame position, not
    // by the address word itself
    for _ in 0..address.offset() {
        words.push(Codeword::IDLE);
    }
    words.push(Codeword::address(address));

    pack_text(address.offset() + 1, text, &mut words);

    // an idle word marks the end of the message text
    words.push(Codeword::IDLE);

    // pad out the final batch
    let since_sync = words.len() - start;
    let padding = (BATCH_WORDS + 1) - since_sync % (BATCH_WORDS + 1);
    for _ in 0..padding {
        words.push(Codeword::IDLE);
    }

    debug_assert_eq!(words.len(), text_message_length(address, text.len()));
    debug!(
        "encoded page to {}: {} characters, {} words",
        address,
        text.len(),
        words.len()
    );

    words
}

/// Exact word count of a text-page transmission
///
/// Computes the length [`encode_transmission()`] will produce for a
/// page to `address` with `num_chars` characters of text, without
/// encoding anything. The two functions advance in lock step; a
/// change to the layout rules must change both.
pub fn text_message_length(address: Address, num_chars: usize) -> usize {
    // idle padding, then the address word itself
    let mut words = address.offset() + 1;

    // seven bits per character packed into 20-bit words, rounding up
    words += (num_chars * TEXT_BITS_PER_CHAR + TEXT_BITS_PER_WORD - 1) / TEXT_BITS_PER_WORD;

    // idle word terminating the text
    words += 1;

    // idle padding to fill the last batch
    words += BATCH_WORDS - words % BATCH_WORDS;

    // one sync word heads every sixteen payload words
    words += words / BATCH_WORDS;

    words + PREAMBLE_WORDS
}

// Packs message text into data codewords
//
// Tracks the batch position so a SYNC word lands after every
// sixteenth payload word, continuing the count the assembler started.
struct TextPacker<'a> {
    words: &'a mut Vec<Codeword>,
    batch_position: usize,
    written: usize,
}

impl TextPacker<'_> {
    fn push_data(&mut self, payload: u32) {
        self.words.push(Codeword::message(payload));
        self.written += 1;

        self.batch_position += 1;
        if self.batch_position == BATCH_WORDS {
            self.words.push(Codeword::SYNC);
            self.written += 1;
            self.batch_position = 0;
        }
    }
}

// Pack text into data codewords, appending to `words`
//
// Characters are seven bits each, sent least-significant bit first,
// filling each 20-bit data payload from the most significant bit
// down. A final partial payload is padded with low zero bits.
// `initial_offset` is the batch position of the first word written.
// Returns the number of words written, SYNC words included. Empty
// text writes nothing.
fn pack_text(initial_offset: usize, text: &str, words: &mut Vec<Codeword>) -> usize {
    let mut packer = TextPacker {
        words,
        batch_position: initial_offset,
        written: 0,
    };

    let mut payload = 0u32;
    let mut bits = 0;

    for byte in text.bytes() {
        for position in 0..TEXT_BITS_PER_CHAR {
            payload = (payload << 1) | ((byte >> position) as u32 & 1);
            bits += 1;
            if bits == TEXT_BITS_PER_WORD {
                packer.push_data(payload);
                payload = 0;
                bits = 0;
            }
        }
    }

    // pad the remainder out to a full word
    if bits > 0 {
        payload <<= TEXT_BITS_PER_WORD - bits;
        packer.push_data(payload);
    }

    packer.written
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::page::MAX_ADDRESS;

    // Recover the message text from an encoded transmission by
    // undoing the packer's bit order: data payload bits are read
    // most-significant first, and every run of seven is reversed
    // back into a character.
    fn decode_text(words: &[Codeword]) -> String {
        let mut bits = Vec::new();
        for word in &words[PREAMBLE_WORDS..] {
            if *word == Codeword::SYNC {
                continue;
            }
            if *word == Codeword::IDLE {
                if !bits.is_empty() {
                    break;
                }
                continue;
            }
            if !word.is_message() {
                // address word
                continue;
            }
            let payload = word.payload() & 0xF_FFFF;
            for bit in (0..TEXT_BITS_PER_WORD).rev() {
                bits.push(((payload >> bit) & 1) as u8);
            }
        }

        let mut text = String::new();
        for chunk in bits.chunks_exact(TEXT_BITS_PER_CHAR) {
            let mut c = 0u8;
            for (position, bit) in chunk.iter().enumerate() {
                c |= bit << position;
            }
            if c != 0 {
                text.push(c as char);
            }
        }
        text
    }

    fn non_preamble(words: &[Codeword]) -> &[Codeword] {
        assert!(words[..PREAMBLE_WORDS]
            .iter()
            .all(|w| *w == Codeword::PREAMBLE));
        &words[PREAMBLE_WORDS..]
    }

    #[test]
    fn test_empty_message() {
        // address 0, empty text: sync + address + terminating idle,
        // then idles out to exactly one batch
        let address = Address::new(0).unwrap();
        let words = encode_transmission(address, "");
        assert_eq!(words.len(), PREAMBLE_WORDS + 17);
        assert_eq!(words.len(), text_message_length(address, 0));

        let batch = non_preamble(&words);
        assert_eq!(batch[0], Codeword::SYNC);
        assert_eq!(batch[1], Codeword::address(address));
        assert!(batch[2..].iter().all(|w| *w == Codeword::IDLE));
    }

    #[test]
    fn test_address_frame_placement() {
        // address 7 occupies frame 7: fourteen idles precede the
        // address word, which lands at batch position 14
        let address = Address::new(7).unwrap();
        let words = encode_transmission(address, "A");
        let batch = non_preamble(&words);

        assert_eq!(batch[0], Codeword::SYNC);
        assert!(batch[1..15].iter().all(|w| *w == Codeword::IDLE));
        assert_eq!(batch[15], Codeword::address(address));

        // the single packed character lands at batch position 15,
        // completing the batch; a SYNC follows, then the terminator
        assert_eq!(batch[16].bits(), 0xC100_057F);
        assert_eq!(batch[17], Codeword::SYNC);
        assert_eq!(batch[18], Codeword::IDLE);

        assert_eq!(words.len(), text_message_length(address, 1));
        assert_eq!(batch.len() % (BATCH_WORDS + 1), 0);
    }

    #[test]
    fn test_batch_sync_insertion() {
        // a message long enough to spill over two batch boundaries
        // gets a SYNC word at the start of every batch it touches
        let address = Address::new(0).unwrap();
        let text = "The quick brown fox jumps over the lazy dog!";
        let words = encode_transmission(address, text);
        let batch = non_preamble(&words);

        assert_eq!(batch[0], Codeword::SYNC);
        assert_eq!(batch[17], Codeword::SYNC);
        assert!(batch[1..17].iter().all(|w| *w != Codeword::SYNC));

        assert_eq!(words.len(), text_message_length(address, text.len()));
        assert_eq!(decode_text(&words), text);
    }

    #[test]
    fn test_full_batch_pads_another() {
        // forty characters fill payload words exactly through batch
        // position 15; the terminating idle then opens a second
        // batch-length run of idles, reproducing the reference
        // encoder's literal padding rule
        let address = Address::new(0).unwrap();
        let text = "x".repeat(40);
        let words = encode_transmission(address, &text);
        let batch = non_preamble(&words);

        assert_eq!(batch.len(), 34);
        assert_eq!(words.len(), text_message_length(address, 40));
        assert!(batch[17..].iter().all(|w| *w == Codeword::IDLE));
    }

    #[test]
    fn test_length_agreement() {
        // the length calculator and the assembler must agree exactly
        for addr in [0u32, 1, 2, 7, 8, 15, 4095, MAX_ADDRESS] {
            let address = Address::new(addr).unwrap();
            for num_chars in [0usize, 1, 2, 3, 5, 19, 20, 21, 40, 41, 42, 43, 100] {
                let text = "x".repeat(num_chars);
                let words = encode_transmission(address, &text);
                assert_eq!(
                    words.len(),
                    text_message_length(address, num_chars),
                    "address {} with {} characters",
                    addr,
                    num_chars
                );
                assert_eq!((words.len() - PREAMBLE_WORDS) % (BATCH_WORDS + 1), 0);
            }
        }
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "",
            "A",
            "HELLO",
            "This is a test of the paging system.",
            "punctuation: [a-z]{7,20} (+/-)?",
        ] {
            for addr in [0u32, 3, 7, 1234567] {
                let address = Address::new(addr).unwrap();
                let words = encode_transmission(address, text);
                assert_eq!(decode_text(&words), text, "address {}", addr);
            }
        }
    }

    #[test]
    fn test_pack_text_empty() {
        let mut words = Vec::new();
        assert_eq!(pack_text(0, "", &mut words), 0);
        assert!(words.is_empty());
    }

    #[test]
    fn test_pack_text_counts() {
        // five characters is 35 bits: two words, no sync crossing
        let mut words = Vec::new();
        assert_eq!(pack_text(1, "abcde", &mut words), 2);
        assert_eq!(words.len(), 2);
        assert!(words.iter().all(Codeword::is_message));

        // starting at batch position 15, the first word completes
        // the batch and drags a SYNC in behind it
        let mut words = Vec::new();
        assert_eq!(pack_text(15, "abcde", &mut words), 3);
        assert_eq!(words[1], Codeword::SYNC);
    }
}
