//! Island name pool
//!
//! Names come from a newline-delimited list; a `$` inside an entry marks a
//! forced line break in the rendered label. Draws are uniform over the whole
//! pool with a redraw on collision, so assignment order depends only on the
//! RNG stream — but the draw is bounded: once every name is taken the pool
//! reports exhaustion instead of spinning.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// The name list shipped with the crate.
pub const BUILTIN_NAMES: &str = include_str!("../assets/names.txt");

pub struct NamePool {
    names: Vec<String>,
    taken: Vec<bool>,
    remaining: usize,
}

impl NamePool {
    /// Parse a newline-delimited name list. Blank lines are skipped and `$`
    /// becomes a line break.
    pub fn parse(text: &str) -> Self {
        let names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.replace('$', "\n"))
            .collect();
        let len = names.len();
        Self {
            names,
            taken: vec![false; len],
            remaining: len,
        }
    }

    pub fn builtin() -> Self {
        Self::parse(BUILTIN_NAMES)
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names not yet assigned in this run.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Draw a name nobody has been given yet.
    ///
    /// Uniform over the full pool, redrawing on collision; errors out when
    /// the pool has nothing left to give.
    pub fn draw_unique(&mut self, rng: &mut ChaCha8Rng) -> Result<String, PoolExhausted> {
        if self.remaining == 0 {
            return Err(PoolExhausted {
                pool_size: self.names.len(),
            });
        }
        loop {
            let idx = rng.gen_range(0..self.names.len());
            if !self.taken[idx] {
                self.taken[idx] = true;
                self.remaining -= 1;
                return Ok(self.names[idx].clone());
            }
        }
    }
}

/// Every name in the pool has already been assigned this run.
#[derive(Debug)]
pub struct PoolExhausted {
    pub pool_size: usize,
}

impl fmt::Display for PoolExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name pool exhausted: all {} names are already assigned; provide a longer name list",
            self.pool_size
        )
    }
}

impl Error for PoolExhausted {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_parse_skips_blanks_and_expands_breaks() {
        let pool = NamePool::parse("Skull Rock\n\nIsle of$Broken Masts\n  \nLast Light\n");
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.names[1], "Isle of\nBroken Masts");
    }

    #[test]
    fn test_builtin_pool_is_well_formed() {
        let pool = NamePool::builtin();
        assert!(pool.len() >= 60, "builtin pool too small: {}", pool.len());
        let mut sorted = pool.names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), pool.len(), "builtin pool has duplicates");
    }

    #[test]
    fn test_draws_never_repeat() {
        let mut pool = NamePool::parse("a\nb\nc\nd\ne");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = Vec::new();
        for _ in 0..5 {
            let name = pool.draw_unique(&mut rng).unwrap();
            assert!(!seen.contains(&name));
            seen.push(name);
        }
    }

    #[test]
    fn test_exhaustion_is_an_error_not_a_hang() {
        let mut pool = NamePool::parse("first\nsecond");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..2 {
            pool.draw_unique(&mut rng).unwrap();
        }
        assert_eq!(pool.remaining(), 0);
        let err = pool.draw_unique(&mut rng).unwrap_err();
        assert_eq!(err.pool_size, 2);
    }

    #[test]
    fn test_same_seed_same_assignment_order() {
        let draw_all = || {
            let mut pool = NamePool::parse("a\nb\nc\nd\ne\nf");
            let mut rng = ChaCha8Rng::seed_from_u64(99);
            (0..6)
                .map(|_| pool.draw_unique(&mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw_all(), draw_all());
    }
}
