use models::StatusKind;

/// A status effect attached to a combatant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: StatusKind,
    pub magnitude: u32,
    pub duration: u32,
    /// Turn number the effect was first applied on; it does not tick
    /// during that turn.
    pub applied_turn: u32,
}

impl std::fmt::Display for ActiveEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({}t)", self.kind, self.magnitude, self.duration)
    }
}
