use serde::Serialize;

/// Where a read result came from.
///
/// The contracts only store state (status, approval, version, existence),
/// so a `Chain` record is a catalog record with those fields overlaid from
/// the contract. Descriptive text such as titles and budgets always comes
/// from the catalog. `Fallback` means nothing was read from the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Contract state overlaid onto the catalog records.
    Chain,
    /// Served from the built-in sample dataset.
    Fallback,
}

impl Provenance {
    /// A result built from several reads is only on-chain if all of them were.
    pub fn combine(self, other: Provenance) -> Provenance {
        match (self, other) {
            (Self::Chain, Self::Chain) => Self::Chain,
            _ => Self::Fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Sourced<T> {
    pub fn chain(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Chain,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            value: f(self.value),
            provenance: self.provenance,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_provenance() {
        let mapped = Sourced::fallback(vec![1, 2, 3]).map(|v| v.len());
        assert_eq!(mapped, Sourced::fallback(3));
    }

    #[test]
    fn any_fallback_taints_combination() {
        assert_eq!(Provenance::Chain.combine(Provenance::Chain), Provenance::Chain);
        assert_eq!(Provenance::Chain.combine(Provenance::Fallback), Provenance::Fallback);
        assert_eq!(Provenance::Fallback.combine(Provenance::Chain), Provenance::Fallback);
    }
}
