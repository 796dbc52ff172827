/// A clamped `(current, max)` counter used for health and mana.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pool(u32, u32);

impl Pool {
    pub fn full(max: u32) -> Self {
        Self(max, max)
    }

    pub fn new(current: u32, max: u32) -> Self {
        Self(current.min(max), max)
    }

    pub fn max(&self) -> u32 {
        self.1
    }

    pub fn current(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn refill(&mut self) {
        self.0 = self.1;
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current(), self.max())
    }
}

impl std::ops::Add<u32> for Pool {
    type Output = Self;

    fn add(self, other: u32) -> Self::Output {
        Self(std::cmp::min(self.1, self.0.saturating_add(other)), self.1)
    }
}

impl std::ops::Sub<u32> for Pool {
    type Output = Self;

    fn sub(self, other: u32) -> Self::Output {
        Self(self.0.saturating_sub(other), self.1)
    }
}

impl std::ops::AddAssign<u32> for Pool {
    fn add_assign(&mut self, other: u32) {
        *self = *self + other;
    }
}

impl std::ops::SubAssign<u32> for Pool {
    fn sub_assign(&mut self, other: u32) {
        *self = *self - other;
    }
}
