use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed seed for reproducibility.
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// The stock canonicalization rules, most specific first. Order matters:
/// the date shape must win over the bare integer shape.
pub fn stock_rules() -> Vec<(&'static str, &'static str)> {
    vec![
        ("__date__", r"\d{2}.\d{2}.\d{4}|\d{2}.\d{2}"),
        ("__time__", r"\d{1,2}:\d{2}"),
        ("__number__", r"-?\d+"),
        ("__math_operator__", r"\+|\-|\*|\/"),
    ]
}

pub fn generate_random_whitespace(rng: &mut StdRng) -> String {
    let length = rng.random_range(1..5);
    (0..length).map(|_| ' ').collect()
}
