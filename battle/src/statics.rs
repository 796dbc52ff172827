lazy_static::lazy_static! {
    pub static ref HAND_SIZE: usize = 5;
    pub static ref MAX_DECK_SIZE: usize = 20;
    pub static ref STARTING_HEALTH: u32 = 100;
    pub static ref STARTING_MANA: u32 = 3;
    pub static ref EXPERIENCE_PER_LEVEL: u32 = 100;
    pub static ref LEVEL_UP_HEALTH: u32 = 10;
    pub static ref LEVEL_UP_MANA: u32 = 1;
    pub static ref VITALITY_HEALTH_BONUS: u32 = 5;
    pub static ref STARTER_CARDS: Vec<&'static str> = vec!["strike", "defend", "first_aid", "quick_draw"];
}
