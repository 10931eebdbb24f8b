/// Block materials the synthesizer emits.
///
/// Air is zero so a freshly allocated volume is empty space.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockType {
    #[default]
    Air = 0,
    Bedrock = 1,
    Grass = 2,
    Water = 3,
}

impl BlockType {
    /// Returns `true` for blocks that terrain is made of (not air or water).
    pub const fn is_solid(self) -> bool {
        matches!(self, BlockType::Bedrock | BlockType::Grass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_volume_is_air() {
        let volume = vec![BlockType::default(); 4];
        assert!(volume.iter().all(|&b| b == BlockType::Air && !b.is_solid()));
        assert!(BlockType::Bedrock.is_solid());
        assert!(BlockType::Grass.is_solid());
        assert!(!BlockType::Water.is_solid());
    }
}
