use rand::Rng;

/// Characters a generated seed is drawn from.
pub const SEED_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of seeds generated when the player does not supply one.
pub const SEED_LEN: usize = 6;

/// 31-multiplier string hash over UTF-16 code units with 32-bit wrapping, bit-compatible with seeds saved by the
/// browser build.
pub fn seed_hash(material: &str) -> i32 {
    material.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    })
}

/// Maps seed material to a value in `[0, 1)`. Stateless: callers salt the seed with a position to get a new draw.
pub fn seeded_value(material: &str) -> f64 {
    let x = f64::from(seed_hash(material)).sin() * 10000.0;
    x - x.floor()
}

/// Fresh lowercase alphanumeric seed, the only non-deterministic step of board creation.
pub fn random_seed<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SEED_LEN)
        .map(|_| char::from(SEED_ALPHABET[rng.random_range(0..SEED_ALPHABET.len())]))
        .collect()
}
