/// Mulberry32 stream.
///
/// Small 32-bit state generator with a fully specified integer pipeline, so a given seed yields
/// the same sequence on every platform. Every random decision in layout generation draws from an
/// instance of this type; sampling and builder micro-randomization own separate instances.
#[derive(Clone, Debug)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    const INCREMENT: u32 = 0x6d2b_79f5;

    /// Create a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut x = self.state;
        x = (x ^ (x >> 15)).wrapping_mul(x | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        x ^ (x >> 14)
    }

    /// Uniform `f64` in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform integer in the inclusive range spanned by `a` and `b` (order-insensitive).
    pub fn range_inclusive(&mut self, a: i64, b: i64) -> i64 {
        let lo = a.min(b);
        let hi = a.max(b);
        let span = (hi - lo + 1) as f64;
        lo + (self.next_f64() * span).floor() as i64
    }

    /// Pick one element, or `None` for an empty slice.
    pub fn pick_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.range_inclusive(0, items.len() as i64 - 1);
        items.get(idx as usize)
    }

    /// Draw up to `count` distinct elements without replacement, in draw order.
    pub fn pick_some<T: Clone>(&mut self, items: &[T], count: i64) -> Vec<T> {
        let mut pool = items.to_vec();
        let n = count.clamp(0, pool.len() as i64) as usize;
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let idx = self.range_inclusive(0, pool.len() as i64 - 1) as usize;
            out.push(pool.remove(idx));
        }
        out
    }

    /// Like [`Self::pick_some`], but the returned subset is sorted.
    pub fn pick_some_sorted<T: Clone + Ord>(&mut self, items: &[T], count: i64) -> Vec<T> {
        let mut out = self.pick_some(items, count);
        out.sort();
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
