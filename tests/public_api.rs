use autopass::strength::score;
use autopass::{
    generate_password_from_hint, generate_random_password, CharacterClass, GenerationOptions,
    History, HistoryEntry, Mode, StrengthLabel,
};
use rand::{CryptoRng, RngCore};

/// A random source that fails the test if anything asks it for randomness.
struct NoEntropy;

impl RngCore for NoEntropy {
    fn next_u32(&mut self) -> u32 {
        panic!("randomness was consumed");
    }

    fn next_u64(&mut self) -> u64 {
        panic!("randomness was consumed");
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("randomness was consumed");
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        panic!("randomness was consumed");
    }
}

impl CryptoRng for NoEntropy {}

fn has(password: &str, class: CharacterClass) -> bool {
    password.chars().any(|ch| class.contains(ch))
}

#[test]
fn sixteen_characters_with_every_class() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let pw = generate_random_password(&mut rng, 16, GenerationOptions::default()).unwrap();
        let pw = pw.as_str();
        assert_eq!(pw.chars().count(), 16);
        for class in CharacterClass::ALL {
            assert!(has(pw, class), "{:?} missing", class);
        }
    }
}

#[test]
fn every_option_combination_is_covered() {
    let mut rng = rand::thread_rng();
    for bits in 0..8u8 {
        let options = GenerationOptions {
            uppercase: bits & 1 != 0,
            numbers: bits & 2 != 0,
            symbols: bits & 4 != 0,
        };
        for len in [4, 8, 32] {
            let pw = generate_random_password(&mut rng, len, options).unwrap();
            let pw = pw.as_str();
            assert_eq!(pw.chars().count(), len);
            assert!(has(pw, CharacterClass::Lowercase));
            assert_eq!(has(pw, CharacterClass::Uppercase), options.uppercase);
            assert_eq!(has(pw, CharacterClass::Digits), options.numbers);
            assert_eq!(has(pw, CharacterClass::Symbols), options.symbols);
        }
    }
}

#[test]
fn hint_scenario() {
    let mut rng = rand::thread_rng();
    let pw = generate_password_from_hint(&mut rng, "my dog", 10, GenerationOptions::default())
        .unwrap();
    let pw = pw.as_str();
    assert_eq!(pw.chars().count(), 10);
    assert_eq!(&pw[..5], "mydog");
}

#[test]
fn hint_prefix_is_preserved_for_every_length() {
    let mut rng = rand::thread_rng();
    let hint = "blue  moon\t42";
    for len in 1..=30 {
        let pw = generate_password_from_hint(&mut rng, hint, len, GenerationOptions::default())
            .unwrap();
        let pw = pw.as_str();
        assert_eq!(pw.chars().count(), len);
        let prefix = "bluemoon42".chars().take(len).collect::<String>();
        assert!(pw.starts_with(&prefix), "{:?} does not start with {:?}", pw, prefix);
    }
}

#[test]
fn long_hint_consumes_no_randomness() {
    let pw = generate_password_from_hint(
        &mut NoEntropy,
        "a very long hint indeed",
        6,
        GenerationOptions::default(),
    )
    .unwrap();
    assert_eq!(pw.as_str(), "averyl");
}

#[test]
fn hint_characters_are_counted_not_bytes() {
    let pw = generate_password_from_hint(
        &mut NoEntropy,
        "héllo wörld",
        7,
        GenerationOptions::default(),
    )
    .unwrap();
    assert_eq!(pw.as_str(), "héllowö");
}

#[test]
fn scoring_scenarios() {
    let empty = score("");
    assert_eq!((empty.score, empty.label), (0, StrengthLabel::Weak));

    let repeated = score("aaaaaaaaaa");
    assert_eq!((repeated.score, repeated.label), (32, StrengthLabel::Fair));

    assert_eq!(score("Password1!"), score("Password1!"));
}

#[test]
fn generated_passwords_score_well() {
    let mut rng = rand::thread_rng();
    let pw = generate_random_password(&mut rng, 16, GenerationOptions::default()).unwrap();
    // Full length and variety alone are worth 70 points; at most 10 can be lost to runs.
    assert!(score(pw.as_str()).score >= 60);
}

#[test]
fn history_round_trip_through_json() {
    let mut rng = rand::thread_rng();
    let mut history = History::new();
    let pw = generate_random_password(&mut rng, 12, GenerationOptions::default()).unwrap();
    history.record(HistoryEntry::new(pw.clone(), Mode::Random));

    let json = serde_json::to_string(&history).unwrap();
    let decoded: History = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.entries()[0].password, pw);
    assert_eq!(decoded.entries()[0].mode, Mode::Random);
}

#[test]
fn secret_debug_is_opaque() {
    let mut rng = rand::thread_rng();
    let pw = generate_random_password(&mut rng, 20, GenerationOptions::default()).unwrap();
    assert!(!format!("{:?}", pw).contains(pw.as_str()));
}
