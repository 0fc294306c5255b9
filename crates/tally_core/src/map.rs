use crate::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedPair {
    pub key: Token,
    pub unit: u64,
}

/// Turns one token into one keyed pair. Implementations must be pure so the
/// engine can run them on any worker in any order.
pub trait Mapper: Send + Sync {
    fn map(&self, token: Token) -> MappedPair;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnitMapper;

impl Mapper for UnitMapper {
    fn map(&self, token: Token) -> MappedPair {
        MappedPair {
            key: token,
            unit: 1,
        }
    }
}
