//! Room codes and mock player names

use crate::types::{PlayerName, RoomCode};
use rand::Rng;

const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const CODE_LENGTH: usize = 4;

pub const ADJECTIVES: [&str; 20] = [
    "Silly", "Wacky", "Sneaky", "Brave", "Funky", "Zany", "Goofy", "Wild", "Clever", "Jolly",
    "Bouncy", "Nimble", "Quirky", "Chill", "Spooky", "Dizzy", "Lucky", "Peppy", "Rowdy", "Snazzy",
];

pub const ANIMALS: [&str; 20] = [
    "Penguin", "Giraffe", "Otter", "Llama", "Moose", "Panda", "Sloth", "Tiger", "Frog", "Monkey",
    "Goose", "Ferret", "Koala", "Yak", "Bison", "Corgi", "Hawk", "Mole", "Shark", "Toad",
];

/// Generate a room code (4 uppercase letters, no uniqueness check)
pub fn generate_room_code<R: Rng>(rng: &mut R) -> RoomCode {
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// Generate an "<adjective> <animal>" player name. Collisions are possible.
pub fn generate_player_name<R: Rng>(rng: &mut R) -> PlayerName {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let animal = ANIMALS[rng.random_range(0..ANIMALS.len())];
    format!("{} {}", adjective, animal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_room_code_is_four_uppercase_letters() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let code = generate_room_code(&mut rng);
            assert_eq!(code.len(), 4);
            assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{}", code);
        }
    }

    #[test]
    fn test_player_name_is_adjective_space_animal() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let name = generate_player_name(&mut rng);
            let (adjective, animal) = name.split_once(' ').expect("name has a space");
            assert!(ADJECTIVES.contains(&adjective), "{}", name);
            assert!(ANIMALS.contains(&animal), "{}", name);
            assert!(!animal.contains(' '));
        }
    }

    #[test]
    fn test_player_names_vary() {
        let mut rng = StdRng::seed_from_u64(3);
        let names: std::collections::HashSet<_> =
            (0..50).map(|_| generate_player_name(&mut rng)).collect();
        assert!(names.len() > 10);
    }
}
