//! Cuboid shapes and the closed-form size of their concentric layers.
//!
//! Growing a cuboid outward by one unit in every direction adds a shell of
//! unit cubes. Layer `n` of an `a * b * c` cuboid holds
//!
//! ```text
//! 4n² + 4n(a+b+c-3) + (a+b-2)(2c-4) + 2ab
//! ```
//!
//! cubes. The polynomial has a negative term when `c == 1`, so it is
//! evaluated here in the equivalent form
//! `2(ab+bc+ca) + 4(a+b+c)(n-1) + 4(n-1)(n-2)`, which stays non-negative
//! for every positive argument.

/// An integer box with sides held in non-increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cuboid {
    pub a: u64,
    pub b: u64,
    pub c: u64,
}

impl Cuboid {
    /// Create a cuboid, sorting the sides so that `a >= b >= c`.
    pub fn new(x: u64, y: u64, z: u64) -> Self {
        let mut sides = [x, y, z];
        sides.sort_unstable_by(|l, r| r.cmp(l));
        Self {
            a: sides[0],
            b: sides[1],
            c: sides[2],
        }
    }

    /// Number of cubes in layer `n` (1-based) grown around this cuboid.
    #[inline]
    pub fn layer_size(&self, n: u64) -> u64 {
        layer_size(self.a, self.b, self.c, n)
    }

    /// Layer sizes for `n = 1, 2, ...` up to (excluding) `bound`.
    pub fn layers_below(&self, bound: u64) -> LayersBelow {
        LayersBelow {
            cuboid: *self,
            next: 1,
            bound,
        }
    }
}

/// Number of cubes in layer `n` of an `a * b * c` cuboid.
///
/// All arguments are expected to be at least 1.
#[inline]
pub fn layer_size(a: u64, b: u64, c: u64, n: u64) -> u64 {
    debug_assert!(a >= 1 && b >= 1 && c >= 1 && n >= 1);
    let k = n - 1;
    2 * (a * b + b * c + c * a) + 4 * (a + b + c) * k + 4 * k * k.saturating_sub(1)
}

/// Iterator over the layer sizes of one cuboid that stay below a bound.
///
/// Terminates because the layer size is strictly increasing in `n`.
#[derive(Debug, Clone)]
pub struct LayersBelow {
    cuboid: Cuboid,
    next: u64,
    bound: u64,
}

impl Iterator for LayersBelow {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let size = self.cuboid.layer_size(self.next);
        if size >= self.bound {
            return None;
        }
        self.next += 1;
        Some(size)
    }
}
