//! # Random Generators
//!
//! Uniform draws from fixed pools or ranges. Every generator takes the RNG
//! as an argument so callers decide between a seeded `StdRng` (tests,
//! `--seed`) and the thread RNG.
//!
//! None of this is suitable for secrets: passwords come from a general
//! purpose PRNG and "strength" only describes character-set coverage.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// =============================================================================
// PASSWORD
// =============================================================================

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordOptions {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl PasswordOptions {
    /// Characters eligible under the enabled classes.
    pub fn pool(&self) -> Vec<char> {
        [
            (self.lowercase, LOWERCASE),
            (self.uppercase, UPPERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, chars)| chars.chars())
        .collect()
    }

    pub fn class_count(&self) -> usize {
        [self.lowercase, self.uppercase, self.digits, self.symbols]
            .iter()
            .filter(|enabled| **enabled)
            .count()
    }
}

/// Each character is drawn independently and uniformly from the union of
/// the enabled classes.
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R, options: &PasswordOptions) -> CalcResult<String> {
    let pool = options.pool();
    if pool.is_empty() {
        return Err(CalcError::invalid_input(
            "lowercase",
            "",
            "Enable at least one character type",
        ));
    }
    Ok((0..options.length)
        .map(|_| pool[rng.random_range(0..pool.len())])
        .collect())
}

/// Coverage label: how many character types are enabled, and whether the
/// password reaches eight characters.
pub fn password_strength(options: &PasswordOptions) -> &'static str {
    match (options.class_count(), options.length) {
        (0, _) => "None",
        (_, len) if len < 8 => "Weak",
        (1, _) => "Weak",
        (2, _) => "Fair",
        (3, _) => "Strong",
        _ => "Very strong",
    }
}

// =============================================================================
// NUMBERS & COLORS
// =============================================================================

/// `count` integers in `[min, max]`. With `unique`, no value repeats.
pub fn random_integers<R: Rng + ?Sized>(
    rng: &mut R,
    min: i64,
    max: i64,
    count: usize,
    unique: bool,
) -> CalcResult<Vec<i64>> {
    if min > max {
        return Err(CalcError::calculation_failed("random number", "Minimum must not exceed maximum"));
    }
    let span = (max as i128 - min as i128 + 1) as u128;
    if unique && count as u128 > span {
        return Err(CalcError::calculation_failed(
            "random number",
            format!("Only {} distinct values exist in that range", span),
        ));
    }

    let mut drawn: Vec<i64> = Vec::with_capacity(count);
    while drawn.len() < count {
        let n = rng.random_range(min..=max);
        if unique && drawn.contains(&n) {
            continue;
        }
        drawn.push(n);
    }
    Ok(drawn)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb {
        r: rng.random(),
        g: rng.random(),
        b: rng.random(),
    }
}

// =============================================================================
// NAMES & LOREM IPSUM
// =============================================================================

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Ben", "Carmen", "Chen", "Dmitri", "Elena", "Farah", "Grace",
    "Hiro", "Ines", "Jonas", "Kofi", "Lena", "Mateo", "Nadia", "Omar", "Priya", "Quinn",
    "Rosa", "Sven", "Tariq", "Uma", "Victor", "Wen", "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Abara", "Becker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Haddad", "Ito",
    "Jensen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Petrov", "Rossi",
    "Santos", "Tanaka", "Varga", "Walsh", "Yilmaz", "Zhang",
];

pub fn random_names<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .filter_map(|_| {
            let first = FIRST_NAMES.choose(rng)?;
            let last = LAST_NAMES.choose(rng)?;
            Some(format!("{} {}", first, last))
        })
        .collect()
}

const LOREM_OPENING: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint",
    "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia", "deserunt",
    "mollit", "anim", "id", "est", "laborum",
];

fn lorem_sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(6..=14);
    let words: Vec<&str> = (0..len).filter_map(|_| LOREM_WORDS.choose(rng).copied()).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get(0..1) {
        let upper = first.to_uppercase();
        sentence.replace_range(0..1, &upper);
    }
    sentence.push('.');
    sentence
}

/// Paragraphs of placeholder text. The first always opens with the
/// traditional "Lorem ipsum dolor sit amet" sentence.
pub fn lorem_ipsum<R: Rng + ?Sized>(rng: &mut R, paragraphs: usize, sentences: usize) -> Vec<String> {
    (0..paragraphs)
        .map(|p| {
            let mut body: Vec<String> = Vec::with_capacity(sentences);
            if p == 0 && sentences > 0 {
                body.push(LOREM_OPENING.to_string());
            }
            while body.len() < sentences {
                body.push(lorem_sentence(rng));
            }
            body.join(" ")
        })
        .collect()
}

// =============================================================================
// PICKS, DICE, COINS
// =============================================================================

pub fn pick_choice<'a, R: Rng + ?Sized>(rng: &mut R, options: &'a [String]) -> CalcResult<&'a str> {
    options
        .choose(rng)
        .map(String::as_str)
        .ok_or_else(|| CalcError::calculation_failed("choice picker", "Enter at least one option"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub rolls: Vec<u32>,
    pub total: u32,
}

pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R, count: u32, sides: u32) -> CalcResult<DiceRoll> {
    if sides < 2 {
        return Err(CalcError::calculation_failed("dice", "A die needs at least two sides"));
    }
    let rolls: Vec<u32> = (0..count).map(|_| rng.random_range(1..=sides)).collect();
    Ok(DiceRoll {
        total: rolls.iter().sum(),
        rolls,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinFlips {
    /// "H"/"T" per flip, in order
    pub sequence: Vec<String>,
    pub heads: usize,
    pub tails: usize,
}

pub fn flip_coins<R: Rng + ?Sized>(rng: &mut R, count: usize) -> CoinFlips {
    let sequence: Vec<String> = (0..count)
        .map(|_| (if rng.random_bool(0.5) { "H" } else { "T" }).to_string())
        .collect();
    let heads = sequence.iter().filter(|s| *s == "H").count();
    CoinFlips {
        tails: count - heads,
        heads,
        sequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn all_classes(length: usize) -> PasswordOptions {
        PasswordOptions {
            length,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }

    #[test]
    fn test_password_scenario() {
        let options = all_classes(16);
        let pool = options.pool();
        let password = generate_password(&mut rng(), &options).unwrap();
        assert_eq!(password.chars().count(), 16);
        assert!(password.chars().all(|c| pool.contains(&c)));
    }

    #[test]
    fn test_password_respects_classes() {
        let options = PasswordOptions {
            length: 64,
            lowercase: false,
            uppercase: false,
            digits: true,
            symbols: false,
        };
        let password = generate_password(&mut rng(), &options).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_password_no_classes() {
        let options = PasswordOptions {
            length: 16,
            lowercase: false,
            uppercase: false,
            digits: false,
            symbols: false,
        };
        let err = generate_password(&mut rng(), &options).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(&all_classes(16)), "Very strong");
        assert_eq!(password_strength(&all_classes(6)), "Weak");
    }

    #[test]
    fn test_random_integers() {
        let mut r = rng();
        let values = random_integers(&mut r, 1, 6, 100, false).unwrap();
        assert!(values.iter().all(|v| (1..=6).contains(v)));

        let mut unique = random_integers(&mut r, 1, 10, 10, true).unwrap();
        unique.sort();
        assert_eq!(unique, (1..=10).collect::<Vec<_>>());

        assert!(random_integers(&mut r, 1, 3, 4, true).is_err());
        assert!(random_integers(&mut r, 5, 1, 1, false).is_err());
        assert_eq!(random_integers(&mut r, 7, 7, 3, false).unwrap(), vec![7, 7, 7]);
    }

    #[test]
    fn test_color_format() {
        let c = Rgb { r: 255, g: 0, b: 128 };
        assert_eq!(c.hex(), "#FF0080");
        assert_eq!(c.css(), "rgb(255, 0, 128)");
        let hex = random_color(&mut rng()).hex();
        assert_eq!(hex.len(), 7);
    }

    #[test]
    fn test_seeded_draws_repeat() {
        assert_eq!(random_names(&mut rng(), 5), random_names(&mut rng(), 5));
        assert_eq!(random_names(&mut rng(), 3).len(), 3);
    }

    #[test]
    fn test_lorem_ipsum() {
        let paragraphs = lorem_ipsum(&mut rng(), 3, 4);
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[0].starts_with("Lorem ipsum dolor sit amet"));
        for p in &paragraphs {
            assert_eq!(p.matches('.').count(), 4);
            assert!(p.chars().next().unwrap().is_uppercase());
        }
    }

    #[test]
    fn test_choice_dice_coins() {
        let mut r = rng();
        let options = vec!["tea".to_string(), "coffee".to_string()];
        let pick = pick_choice(&mut r, &options).unwrap();
        assert!(options.iter().any(|o| o == pick));
        assert!(pick_choice(&mut r, &[]).is_err());

        let roll = roll_dice(&mut r, 3, 6).unwrap();
        assert_eq!(roll.rolls.len(), 3);
        assert!(roll.rolls.iter().all(|n| (1..=6).contains(n)));
        assert_eq!(roll.total, roll.rolls.iter().sum::<u32>());
        assert!(roll_dice(&mut r, 1, 1).is_err());

        let flips = flip_coins(&mut r, 20);
        assert_eq!(flips.sequence.len(), 20);
        assert_eq!(flips.heads + flips.tails, 20);
    }
}
