use alloc::string::String;

/// Candidate topics handed to the generator.
pub const TOPICS: &[&str] = &[
    "Famous Movie Quotes",
    "Rock Band Names",
    "Kitchen Disasters",
    "Sci-Fi Technology",
    "Ancient Myths",
    "Things You Find in a Pocket",
    "Circus Acts",
    "Under the Ocean",
    "Time Travel",
    "Detective Noire",
    "Superstitions",
    "Breakfast Foods",
    "Medieval Weaponry",
    "Office Buzzwords",
    "Haunted House Items",
    "Retro Video Games",
    "Space Exploration",
    "Extreme Weather",
    "Fairy Tale Villains",
    "Wild West Slang",
    "Astronaut Food",
    "Secret Agent Gadgets",
    "Shakespearean Insults",
    "Coffee Shop Orders",
    "Pirate Lingo",
];

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TopicChoice {
    /// Uniformly random pick from [`TOPICS`] on every round.
    #[default]
    Random,
    Fixed(String),
}

impl TopicChoice {
    pub fn from_option(topic: Option<String>) -> Self {
        match topic {
            Some(topic) if !topic.trim().is_empty() => Self::Fixed(topic),
            _ => Self::Random,
        }
    }

    pub fn pick(&self, seed: u64) -> &str {
        use rand::prelude::*;

        match self {
            Self::Random => {
                let mut rng = SmallRng::seed_from_u64(seed);
                TOPICS[rng.random_range(0..TOPICS.len())]
            }
            Self::Fixed(topic) => topic,
        }
    }
}
