//! Ordering of the Attacker's angular firing offsets.
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Angular offsets (degrees) tried around a firing candidate, in canonical
/// order before arrangement.
pub const FIRING_OFFSETS: [f64; 7] = [0.0, 60.0, -60.0, 40.0, -40.0, 20.0, -20.0];

/// Permutes the firing offsets before the Attacker tries them.
///
/// Injected into the squad so tests can pin the order.
pub trait OffsetOrder: Send {
    fn arrange(&mut self, offsets: &mut [f64]);
}

/// Uniform random permutation.
pub struct ShuffledOrder {
    rng: StdRng,
}

impl ShuffledOrder {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl OffsetOrder for ShuffledOrder {
    fn arrange(&mut self, offsets: &mut [f64]) {
        offsets.shuffle(&mut self.rng);
    }
}

/// Leaves the canonical order untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedOrder;

impl OffsetOrder for FixedOrder {
    fn arrange(&mut self, _offsets: &mut [f64]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_shuffle_is_reproducible_permutation() {
        let mut first = FIRING_OFFSETS;
        let mut second = FIRING_OFFSETS;
        ShuffledOrder::seeded(7).arrange(&mut first);
        ShuffledOrder::seeded(7).arrange(&mut second);
        assert_eq!(first, second);

        let mut sorted = first;
        sorted.sort_by(f64::total_cmp);
        let mut canonical = FIRING_OFFSETS;
        canonical.sort_by(f64::total_cmp);
        assert_eq!(sorted, canonical);
    }

    #[test]
    fn fixed_order_is_identity() {
        let mut offsets = FIRING_OFFSETS;
        FixedOrder.arrange(&mut offsets);
        assert_eq!(offsets, FIRING_OFFSETS);
    }
}
