#![forbid(unsafe_code)]

//! Draw-record codec.
//!
//! A record is the text form of one draw instruction:
//!
//! ```text
//! 003|0|-2
//! ^^^ ^ ^^
//!  |  |  second argument (dx)
//!  |  first argument (dy)
//!  three-digit opcode, then `|`-separated arguments
//! ```
//!
//! Decoding is a read-only view over the record: [`Command::parse`] borrows
//! the text and never writes to it, so a stored record is byte-for-byte the
//! same after any number of replays. Encoding goes through `Display`, so
//! producers build a [`Command`] instead of formatting strings by hand.
//!
//! Empty tokens are dropped, so `002||3|4` decodes like `002|3|4`.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::DecodeError;

/// Field delimiter between opcode and arguments.
pub const DELIMITER: char = '|';

/// [`DELIMITER`] as text, as printed by [`Opcode::Delimiter`].
pub const DELIMITER_STR: &str = "|";

/// Width of the opcode prefix in bytes.
pub const OPCODE_WIDTH: usize = 3;

/// Draw operations, keyed by their three-digit record code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    /// Print the field delimiter.
    Delimiter = 0,
    /// Alias of [`Opcode::Delimiter`].
    DelimiterAlt = 1,
    /// Move to `(y, x)`.
    Move = 2,
    /// Move by `(dy, dx)` from the cursor.
    MoveRelative = 3,
    /// Move to `(py, px)` percent of the surface.
    MovePercent = 4,
    /// Do nothing.
    Nop = 10,
    /// Print text.
    PrintText = 11,
    /// Print an integer.
    PrintInt = 12,
    /// Print a float.
    PrintFloat = 13,
    /// Box the whole surface.
    Border = 20,
    /// Vertical run of a glyph.
    VLine = 21,
    /// Horizontal run of a glyph.
    HLine = 22,
}

impl Opcode {
    /// Numeric record code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Look up an opcode by record code.
    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0 => Self::Delimiter,
            1 => Self::DelimiterAlt,
            2 => Self::Move,
            3 => Self::MoveRelative,
            4 => Self::MovePercent,
            10 => Self::Nop,
            11 => Self::PrintText,
            12 => Self::PrintInt,
            13 => Self::PrintFloat,
            20 => Self::Border,
            21 => Self::VLine,
            22 => Self::HLine,
            _ => return None,
        })
    }

    /// Short lowercase name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Delimiter | Self::DelimiterAlt => "delimiter",
            Self::Move => "move",
            Self::MoveRelative => "move_relative",
            Self::MovePercent => "move_percent",
            Self::Nop => "nop",
            Self::PrintText => "print_text",
            Self::PrintInt => "print_int",
            Self::PrintFloat => "print_float",
            Self::Border => "border",
            Self::VLine => "vline",
            Self::HLine => "hline",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split a record into its numeric opcode and the argument text after it.
///
/// The opcode is `100*d0 + 10*d1 + d2` over the first three ASCII digits.
/// The argument text excludes the delimiter that follows the opcode.
pub fn split_opcode(record: &str) -> Result<(u16, &str), DecodeError> {
    let bytes = record.as_bytes();
    if bytes.len() < OPCODE_WIDTH || !bytes[..OPCODE_WIDTH].iter().all(u8::is_ascii_digit) {
        return Err(DecodeError::MalformedRecord);
    }
    let code = bytes[..OPCODE_WIDTH]
        .iter()
        .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));
    let rest = &record[OPCODE_WIDTH..];
    if rest.is_empty() {
        return Ok((code, rest));
    }
    match rest.strip_prefix(DELIMITER) {
        Some(args) => Ok((code, args)),
        None => Err(DecodeError::MalformedRecord),
    }
}

/// A decoded draw instruction, borrowing from its record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    /// Opcodes 0 and 1.
    Delimiter,
    /// Opcode 2.
    Move { row: i32, col: i32 },
    /// Opcode 3.
    MoveRelative { dy: i32, dx: i32 },
    /// Opcode 4. Percentages are validated at replay time.
    MovePercent { py: f64, px: f64 },
    /// Opcode 10.
    Nop,
    /// Opcode 11. The text is the first argument token; a missing one prints
    /// nothing.
    PrintText(&'a str),
    /// Opcode 12.
    PrintInt(i64),
    /// Opcode 13.
    PrintFloat(f64),
    /// Opcode 20.
    Border,
    /// Opcode 21.
    VLine { ch: char, len: u16 },
    /// Opcode 22.
    HLine { ch: char, len: u16 },
}

impl<'a> Command<'a> {
    /// Decode a record.
    pub fn parse(record: &'a str) -> Result<Self, DecodeError> {
        let (code, rest) = split_opcode(record)?;
        let opcode = Opcode::from_code(code).ok_or(DecodeError::InvalidOpcode(code))?;
        let args = Args::new(opcode, rest);
        Ok(match opcode {
            Opcode::Delimiter | Opcode::DelimiterAlt => Self::Delimiter,
            Opcode::Move => Self::Move {
                row: args.number(0)?,
                col: args.number(1)?,
            },
            Opcode::MoveRelative => Self::MoveRelative {
                dy: args.number(0)?,
                dx: args.number(1)?,
            },
            Opcode::MovePercent => Self::MovePercent {
                py: args.number(0)?,
                px: args.number(1)?,
            },
            Opcode::Nop => Self::Nop,
            Opcode::PrintText => Self::PrintText(args.token(0).unwrap_or_default()),
            Opcode::PrintInt => Self::PrintInt(args.number(0)?),
            Opcode::PrintFloat => Self::PrintFloat(args.number(0)?),
            Opcode::Border => Self::Border,
            Opcode::VLine => Self::VLine {
                ch: args.glyph(0)?,
                len: args.number(1)?,
            },
            Opcode::HLine => Self::HLine {
                ch: args.glyph(0)?,
                len: args.number(1)?,
            },
        })
    }

    /// The opcode this command encodes to.
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::Delimiter => Opcode::Delimiter,
            Self::Move { .. } => Opcode::Move,
            Self::MoveRelative { .. } => Opcode::MoveRelative,
            Self::MovePercent { .. } => Opcode::MovePercent,
            Self::Nop => Opcode::Nop,
            Self::PrintText(_) => Opcode::PrintText,
            Self::PrintInt(_) => Opcode::PrintInt,
            Self::PrintFloat(_) => Opcode::PrintFloat,
            Self::Border => Opcode::Border,
            Self::VLine { .. } => Opcode::VLine,
            Self::HLine { .. } => Opcode::HLine,
        }
    }

    /// Whether the encoded text decodes back to this command.
    ///
    /// Text or a line glyph containing the delimiter would be split by the
    /// tokenizer, and non-finite floats have no stable text form.
    pub fn is_encodable(&self) -> bool {
        match self {
            Self::VLine { ch, .. } | Self::HLine { ch, .. } => *ch != DELIMITER,
            Self::PrintText(text) => !text.contains(DELIMITER),
            Self::MovePercent { py, px } => py.is_finite() && px.is_finite(),
            Self::PrintFloat(v) => v.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const D: char = DELIMITER;
        write!(f, "{:03}", self.opcode().code())?;
        match self {
            Self::Delimiter | Self::Nop | Self::Border => Ok(()),
            Self::Move { row, col } => write!(f, "{D}{row}{D}{col}"),
            Self::MoveRelative { dy, dx } => write!(f, "{D}{dy}{D}{dx}"),
            Self::MovePercent { py, px } => write!(f, "{D}{py}{D}{px}"),
            Self::PrintText(text) => write!(f, "{D}{text}"),
            Self::PrintInt(n) => write!(f, "{D}{n}"),
            Self::PrintFloat(v) => write!(f, "{D}{v}"),
            Self::VLine { ch, len } | Self::HLine { ch, len } => write!(f, "{D}{ch}{D}{len}"),
        }
    }
}

/// Non-empty argument tokens of one record.
struct Args<'a> {
    opcode: Opcode,
    tokens: SmallVec<[&'a str; 4]>,
}

impl<'a> Args<'a> {
    fn new(opcode: Opcode, rest: &'a str) -> Self {
        Self {
            opcode,
            tokens: rest.split(DELIMITER).filter(|t| !t.is_empty()).collect(),
        }
    }

    fn token(&self, position: usize) -> Result<&'a str, DecodeError> {
        self.tokens
            .get(position)
            .copied()
            .ok_or(DecodeError::MissingArgument {
                opcode: self.opcode,
                position,
            })
    }

    fn number<T: FromStr>(&self, position: usize) -> Result<T, DecodeError> {
        let token = self.token(position)?;
        token
            .trim()
            .parse()
            .map_err(|_| DecodeError::InvalidArgument {
                opcode: self.opcode,
                position,
                token: token.to_owned(),
            })
    }

    fn glyph(&self, position: usize) -> Result<char, DecodeError> {
        let token = self.token(position)?;
        token.chars().next().ok_or(DecodeError::MissingArgument {
            opcode: self.opcode,
            position,
        })
    }
}
