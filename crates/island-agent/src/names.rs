//! Random team names for players started without one.

use rand::Rng;
use rand::seq::IndexedRandom;

const ADJECTIVES: &[&str] = &[
    "Bouncy", "Cheeky", "Clumsy", "Dizzy", "Fluffy", "Fuzzy", "Giddy", "Grumpy", "Hungry",
    "Jolly", "Lazy", "Lucky", "Mighty", "Nimble", "Noisy", "Peppy", "Plucky", "Sleepy", "Sneaky",
    "Speedy", "Wobbly", "Zany",
];

const NOUNS: &[&str] = &[
    "Baboon", "Capuchin", "Chimp", "Coconut", "Gibbon", "Gorilla", "Lemur", "Macaque",
    "Mandrill", "Marmoset", "Orangutan", "Parrot", "Pineapple", "Tamarin", "Toucan", "Turtle",
];

/// A random name such as `SneakyGibbon`.
pub fn generate() -> String {
    generate_with(&mut rand::rng())
}

/// A random name drawn from `rng`.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Silly");
    let noun = NOUNS.choose(rng).copied().unwrap_or("Monkey");
    format!("{adjective}{noun}")
}
