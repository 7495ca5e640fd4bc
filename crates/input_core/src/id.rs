//! Identifier for text controls inside an [`InputValueStore`](crate::InputValueStore).

/// Opaque, copyable key for one text control.
///
/// The raw value carries no meaning inside this crate. The page host derives
/// it from its DOM node id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputId(u64);

impl InputId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u32> for InputId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(raw as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn node_ids_widen_losslessly() {
        let id = InputId::from(u32::MAX);
        assert_eq!(id.as_raw(), u32::MAX as u64);
    }

    #[test]
    fn equal_raw_values_hash_together() {
        let mut set = HashSet::new();
        set.insert(InputId::from_raw(7));
        set.insert(InputId::from(7u32));
        assert_eq!(set.len(), 1);
    }
}
