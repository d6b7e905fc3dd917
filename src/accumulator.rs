//! Exponent-bucketed floating point summation.
//!
//! Every value is kept in the slot of its binary exponent. When a slot is
//! already taken, the two values of equal magnitude are added (which is
//! exact or nearly so) and the sum is placed again, cascading upwards. Sums
//! of tens of thousands of small increments lose far less precision than
//! with a running total.

const SLOTS: usize = 2048;
// Exponent of infinities and NaN
const SPECIAL: usize = SLOTS - 1;

#[derive(Clone)]
pub struct Accumulator {
    slots: Box<[f64; SLOTS]>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            slots: Box::new([0.0; SLOTS]),
        }
    }

    // Biased IEEE-754 exponent, bits 52-62
    fn slot(x: f64) -> usize {
        ((x.to_bits() >> 52) & 0x7ff) as usize
    }

    pub fn add(&mut self, mut x: f64) {
        loop {
            let i = Accumulator::slot(x);

            if i == SPECIAL {
                // Non-finite values are kept apart so that they cannot
                // cancel or corrupt finite slots.
                self.slots[i] += x;
                return;
            }

            if self.slots[i] == 0.0 {
                self.slots[i] = x;
                return;
            }

            x += self.slots[i];
            self.slots[i] = 0.0;
        }
    }

    pub fn total(&self) -> f64 {
        self.slots.iter().sum()
    }

    pub fn clear(&mut self) {
        self.slots.fill(0.0);
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Accumulator {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.slots.iter().filter(|s| **s != 0.0).count();
        write!(formatter, "Accumulator {{ total: {}, slots used: {} }}",
               self.total(), used)
    }
}

impl Extend<f64> for Accumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<f64> for Accumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Accumulator::new();
        acc.extend(iter);
        acc
    }
}
