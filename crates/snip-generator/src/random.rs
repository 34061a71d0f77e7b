use crate::error::GeneratorError;
use crate::Generator;
use snip_core::shortcode::{self, ShortCode};

/// The 64-symbol URL-safe alphabet used by nanoid.
pub const DEFAULT_ALPHABET: &str =
    "useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

pub const DEFAULT_LENGTH: usize = 7;

/// A generator that draws each symbol uniformly at random from an alphabet.
///
/// With the default 64-symbol alphabet and length 7 the code space holds
/// 64^7 (about 4.4 * 10^12) values.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator for `length`-symbol codes over `alphabet`.
    ///
    /// Every symbol must be valid in a [`ShortCode`] and appear once, and
    /// `length` must fall within the short code length bounds.
    pub fn new(alphabet: &str, length: usize) -> Result<Self, GeneratorError> {
        if alphabet.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }

        let mut symbols: Vec<char> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !ShortCode::is_valid_char(c) {
                return Err(GeneratorError::InvalidSymbol(c));
            }
            if symbols.contains(&c) {
                return Err(GeneratorError::DuplicateSymbol(c));
            }
            symbols.push(c);
        }

        if !(shortcode::MIN_LENGTH..=shortcode::MAX_LENGTH).contains(&length) {
            return Err(GeneratorError::InvalidLength {
                length,
                min: shortcode::MIN_LENGTH,
                max: shortcode::MAX_LENGTH,
            });
        }

        Ok(Self {
            alphabet: symbols,
            length,
        })
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code: String = std::iter::repeat_with(|| {
            self.alphabet[rand::random_range(0..self.alphabet.len())]
        })
        .take(self.length)
        .collect();
        ShortCode::new_unchecked(code)
    }
}
