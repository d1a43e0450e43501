//! Pager addresses and page requests

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Largest representable pager address (21 bits)
pub const MAX_ADDRESS: u32 = (1 << 21) - 1;

/// A 21-bit pager address
///
/// POCSAG addresses range from 0 to 2 097 151. Only the upper 18 bits
/// travel in the address codeword itself; the low 3 bits select which
/// of the eight two-word *frames* of a batch carries the address
/// word, so a receiver recovers them from position.
///
/// Construct with [`new()`](Address::new) or `TryFrom<u32>`, both of
/// which reject out-of-range values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(u32);

impl Address {
    /// New address, if `value` fits in 21 bits
    pub fn new(value: u32) -> Result<Address, AddressRangeErr> {
        if value > MAX_ADDRESS {
            Err(AddressRangeErr(value))
        } else {
            Ok(Address(value))
        }
    }

    /// The full 21-bit address value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Frame index within a batch (0…7)
    pub fn frame(&self) -> u32 {
        self.0 & 0x7
    }

    /// Words which must precede the address word in its batch
    ///
    /// Address words occupy even word boundaries: the word offset is
    /// twice the frame index. The preceding words are sent as idles
    /// when no other page occupies them.
    pub fn offset(&self) -> usize {
        self.frame() as usize * 2
    }
}

impl TryFrom<u32> for Address {
    type Error = AddressRangeErr;

    fn try_from(value: u32) -> Result<Address, AddressRangeErr> {
        Address::new(value)
    }
}

impl From<Address> for u32 {
    fn from(address: Address) -> u32 {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An address which does not fit in 21 bits
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[error("address {0} exceeds the 21-bit maximum of 2097151")]
pub struct AddressRangeErr(pub u32);

/// One page request: an address and its message text
///
/// `Page` parses from the line-oriented input format,
/// `<address>:<message>`: a decimal address, a colon, and the message
/// text. The message is everything after the *first* colon, so it may
/// itself contain colons, and it may be empty. Line endings must be
/// stripped before parsing.
///
/// ```
/// use pocsag::Page;
///
/// let page: Page = "1234567:JOIN US AT 7:30".parse().expect("parse");
/// assert_eq!(page.address().value(), 1234567);
/// assert_eq!(page.message(), "JOIN US AT 7:30");
/// ```
///
/// Message text has 7-bit character semantics on the air: only the
/// low seven bits of each byte are transmitted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Page {
    address: Address,
    message: String,
}

impl Page {
    /// New page for `address` with the given message text
    pub fn new<S>(address: Address, message: S) -> Page
    where
        S: Into<String>,
    {
        Page {
            address,
            message: message.into(),
        }
    }

    /// Destination pager address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Message text
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl FromStr for Page {
    type Err = PageParseErr;

    fn from_str(line: &str) -> Result<Page, PageParseErr> {
        let (address, message) = line.split_once(':').ok_or(PageParseErr::MissingDelimiter)?;

        let address: u32 = address.parse().map_err(|_| PageParseErr::InvalidAddress)?;

        Ok(Page {
            address: Address::new(address)?,
            message: message.to_owned(),
        })
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.message)
    }
}

/// Error parsing a `Page` from its line format
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PageParseErr {
    /// No colon between address and message
    #[error("invalid page: no `:' delimiter between address and message")]
    MissingDelimiter,

    /// The address field is not a decimal number
    #[error("invalid page: address is not a decimal number")]
    InvalidAddress,

    /// The address field exceeds 21 bits
    #[error("invalid page: {0}")]
    AddressRange(#[from] AddressRangeErr),
}
