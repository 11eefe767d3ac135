use crate::domain::dimensions::Dimensions;

/// A requested window size change. Carries no identity beyond its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub width: u32,
    pub height: u32,
}

impl ResizeEvent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn target(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

impl From<[u32; 2]> for ResizeEvent {
    fn from([width, height]: [u32; 2]) -> Self {
        Self::new(width, height)
    }
}
