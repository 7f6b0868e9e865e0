//! Program normalization.
//!
//! User input mixes raw encodings, comments and mnemonic text. Before a program is sent
//! to the engine each line is reduced to one 32-bit word:
//! - blank lines and lines starting with `//` or `#` are dropped;
//! - `0x`-prefixed text, or exactly eight hex digits, is an encoding;
//! - anything else (mnemonics the engine cannot assemble) becomes the no-op.

use crate::common::constants::NOP_ENCODING;
use crate::common::error::ProgramError;

/// Normalizes `source` into encoded words.
///
/// # Errors
///
/// `ProgramError::Empty` when no instruction line remains.
pub fn normalize(source: &str) -> Result<Vec<u32>, ProgramError> {
    Program::parse(source).map(|p| p.words)
}

/// A normalized program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    words: Vec<u32>,
    substituted: usize,
}

impl Program {
    /// Normalizes `source`.
    ///
    /// # Errors
    ///
    /// `ProgramError::Empty` when no instruction line remains.
    pub fn parse(source: &str) -> Result<Self, ProgramError> {
        let mut words = Vec::new();
        let mut substituted = 0;
        for line in source.lines().map(str::trim) {
            if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
                continue;
            }
            match parse_word(line) {
                Some(word) => words.push(word),
                None => {
                    substituted += 1;
                    words.push(NOP_ENCODING);
                }
            }
        }
        if words.is_empty() {
            return Err(ProgramError::Empty);
        }
        Ok(Self { words, substituted })
    }

    /// Encoded words in program order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Lines that were replaced by the no-op.
    pub const fn substituted(&self) -> usize {
        self.substituted
    }

    /// One eight-digit lower-case hex word per line, as the engine expects.
    pub fn to_hex_listing(&self) -> String {
        self.words
            .iter()
            .map(|w| format!("{w:08x}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_word(line: &str) -> Option<u32> {
    let digits = if let Some(hex) = line.strip_prefix("0x") {
        hex
    } else if line.len() == 8 && line.bytes().all(|b| b.is_ascii_hexdigit()) {
        line
    } else {
        return None;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
