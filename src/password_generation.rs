//! Utilities for generating passwords.
//!
//! Two flavours are offered: [`generate_random_password`], which samples every character, and
//! [`generate_password_from_hint`], which keeps a user-supplied hint at the front and pads it with
//! random characters. Both take the random source as an argument; callers should pass something
//! like `rand::thread_rng()`, which panics rather than falling back to a weaker source if the OS
//! cannot provide entropy.
//!
//! Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
//! generate a value that is within the given range (or really, a multiple of the range), it
//! re-samples. The same sampler drives the Fisher-Yates shuffle in [`SliceRandom::shuffle`].

use std::fmt;

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

/// The fixed alphabets a password is composed from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digits,
    Symbols,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Digits,
        CharacterClass::Symbols,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "abcdefghijklmnopqrstuvwxyz",
            CharacterClass::Uppercase => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharacterClass::Digits => "0123456789",
            CharacterClass::Symbols => "!@#$%^&*()_+-=[]{}|;:,.<>?",
        }
    }

    pub fn contains(self, ch: char) -> bool {
        self.alphabet().contains(ch)
    }

    /// Draw a single character from this class's own alphabet.
    fn pick<R>(self, rng: &mut R) -> char
    where
        R: Rng + CryptoRng,
    {
        // Every alphabet is ASCII, so indexing bytes is indexing characters.
        let alphabet = self.alphabet().as_bytes();
        char::from(alphabet[rng.gen_range(0..alphabet.len())])
    }

    /// How long a hint's random suffix must be before this class is guaranteed a slot in it.
    fn suffix_gate(self) -> usize {
        match self {
            CharacterClass::Lowercase | CharacterClass::Uppercase => 0,
            CharacterClass::Digits => 1,
            CharacterClass::Symbols => 2,
        }
    }
}

/// Which optional character classes are switched on. Lowercase letters are always in play.
///
/// Fields missing from a serialized form default to `true`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub uppercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for GenerationOptions {
    fn default() -> GenerationOptions {
        GenerationOptions {
            uppercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl GenerationOptions {
    /// The optional classes that are enabled, in the order they join the pool.
    pub fn enabled_classes(self) -> impl Iterator<Item = CharacterClass> {
        [
            (CharacterClass::Uppercase, self.uppercase),
            (CharacterClass::Digits, self.numbers),
            (CharacterClass::Symbols, self.symbols),
        ]
        .into_iter()
        .filter_map(|(class, enabled)| enabled.then_some(class))
    }

    /// Every character a filler position may be drawn from.
    pub fn pool(self) -> Vec<char> {
        let mut pool = CharacterClass::Lowercase.alphabet().chars().collect::<Vec<_>>();
        for class in self.enabled_classes() {
            pool.extend(class.alphabet().chars());
        }
        pool
    }
}

/// How a password was produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Random,
    Hint,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Random => f.write_str("random"),
            Mode::Hint => f.write_str("hint"),
        }
    }
}

/// Everything needed to produce one password.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GenerationRequest {
    pub length: usize,
    #[serde(default)]
    pub options: GenerationOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl GenerationRequest {
    /// A non-empty hint selects hint-seeded generation.
    pub fn mode(&self) -> Mode {
        match self.hint.as_deref() {
            Some(hint) if !hint.is_empty() => Mode::Hint,
            _ => Mode::Random,
        }
    }

    pub fn generate<R>(&self, rng: &mut R) -> Result<crate::Secret, GenerationError>
    where
        R: Rng + CryptoRng,
    {
        match self.hint.as_deref() {
            Some(hint) if !hint.is_empty() => {
                generate_password_from_hint(rng, hint, self.length, self.options)
            }
            _ => generate_random_password(rng, self.length, self.options),
        }
    }
}

/// Generate a password of exactly `len` characters by randomly sampling the enabled classes.
///
/// At least one lowercase letter is always included, as is one character from each enabled class.
/// If `len` is too short to hold all of those, the guarantees are dropped in the order symbols,
/// numbers, uppercase; lowercase goes last.
pub fn generate_random_password<R>(
    rng: &mut R,
    len: usize,
    options: GenerationOptions,
) -> Result<crate::Secret, GenerationError>
where
    R: Rng + CryptoRng,
{
    if len == 0 {
        return Err(GenerationErrorRepr::ZeroLength.into());
    }

    // Highest priority first, so truncating drops the least important guarantees.
    let mut guaranteed = vec![CharacterClass::Lowercase];
    guaranteed.extend(options.enabled_classes());
    if guaranteed.len() > len {
        log::debug!(
            "length {} cannot cover {} character classes; dropping guarantees for {:?}",
            len,
            guaranteed.len(),
            &guaranteed[len..],
        );
        guaranteed.truncate(len);
    }

    let mut chars = guaranteed
        .iter()
        .map(|class| class.pick(rng))
        .collect::<Vec<_>>();
    fill_from_pool(rng, &options.pool(), &mut chars, len);
    chars.shuffle(rng);
    Ok(crate::Secret(chars.into_iter().collect()))
}

/// Generate a password that starts with `hint` (minus its whitespace), padded to `len` characters
/// with a shuffled random suffix.
///
/// If the stripped hint already has `len` characters or more, it is simply cut to length and no
/// randomness is used. Otherwise the suffix includes an uppercase letter when it has room for one
/// character, a digit when it has room for two, and a symbol when it has room for three, each only
/// if enabled. Unlike [`generate_random_password`], lowercase is not guaranteed.
pub fn generate_password_from_hint<R>(
    rng: &mut R,
    hint: &str,
    len: usize,
    options: GenerationOptions,
) -> Result<crate::Secret, GenerationError>
where
    R: Rng + CryptoRng,
{
    if len == 0 {
        return Err(GenerationErrorRepr::ZeroLength.into());
    }

    let clean_hint = hint
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<Vec<_>>();
    if clean_hint.len() >= len {
        log::debug!("hint fills the requested length; skipping random generation");
        return Ok(crate::Secret(clean_hint[..len].iter().collect()));
    }

    let suffix_len = len - clean_hint.len();
    let mut suffix = options
        .enabled_classes()
        .filter(|class| suffix_len > class.suffix_gate())
        .map(|class| class.pick(rng))
        .collect::<Vec<_>>();
    fill_from_pool(rng, &options.pool(), &mut suffix, suffix_len);
    suffix.shuffle(rng);

    let mut password = String::with_capacity(len);
    password.extend(clean_hint);
    password.extend(suffix);
    Ok(crate::Secret(password))
}

fn fill_from_pool<R>(rng: &mut R, pool: &[char], chars: &mut Vec<char>, len: usize)
where
    R: Rng + CryptoRng,
{
    while chars.len() < len {
        chars.push(pool[rng.gen_range(0..pool.len())]);
    }
}

/// The requested password could not be generated with the given settings.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct GenerationError(GenerationErrorRepr);

impl From<GenerationErrorRepr> for GenerationError {
    fn from(err: GenerationErrorRepr) -> GenerationError {
        GenerationError(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum GenerationErrorRepr {
    #[error("password length must be at least 1")]
    ZeroLength,
}
