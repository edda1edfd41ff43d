use std::{cmp::Ordering, fmt, ops::{Index, IndexMut}};

use crate::layer::Theme;

/// An unordered pair of distinct thematic layers, stored in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerPair {
    first: Theme,
    second: Theme,
}

impl LayerPair {
    /// All six pairs, in canonical order.
    pub const ALL: [LayerPair; 6] = [
        LayerPair { first: Theme::Zrc, second: Theme::Resguardo },
        LayerPair { first: Theme::Zrc, second: Theme::ConsejoComunitario },
        LayerPair { first: Theme::Zrc, second: Theme::ConflictZone },
        LayerPair { first: Theme::Resguardo, second: Theme::ConsejoComunitario },
        LayerPair { first: Theme::Resguardo, second: Theme::ConflictZone },
        LayerPair { first: Theme::ConsejoComunitario, second: Theme::ConflictZone },
    ];

    /// Build the pair {a, b}; `None` when a == b.
    pub fn new(a: Theme, b: Theme) -> Option<Self> {
        match a.cmp(&b) {
            Ordering::Less => Some(Self { first: a, second: b }),
            Ordering::Greater => Some(Self { first: b, second: a }),
            Ordering::Equal => None,
        }
    }

    #[inline] pub fn first(self) -> Theme { self.first }

    #[inline] pub fn second(self) -> Theme { self.second }

    /// Position of the pair in `LayerPair::ALL`.
    #[inline]
    pub fn index(self) -> usize {
        let (i, j) = (self.first.index(), self.second.index());
        i * (7 - i) / 2 + (j - i - 1)
    }

    #[inline] pub fn contains(self, theme: Theme) -> bool { self.first == theme || self.second == theme }

    /// Output column name, e.g. `area_zrc_res_km2`.
    pub fn column(self) -> String {
        format!("area_{}_{}_km2", self.first.key(), self.second.key())
    }
}

impl fmt::Display for LayerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.first.key(), self.second.key())
    }
}

/// One value per layer pair, indexed by `LayerPair`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerPair<T>(pub [T; 6]);

impl<T> PerPair<T> {
    pub fn from_fn(mut f: impl FnMut(LayerPair) -> T) -> Self {
        Self(LayerPair::ALL.map(|pair| f(pair)))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PerPair<U> { PerPair(self.0.map(f)) }

    pub fn iter(&self) -> impl Iterator<Item = (LayerPair, &T)> {
        LayerPair::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<LayerPair> for PerPair<T> {
    type Output = T;

    #[inline] fn index(&self, pair: LayerPair) -> &T { &self.0[pair.index()] }
}

impl<T> IndexMut<LayerPair> for PerPair<T> {
    #[inline] fn index_mut(&mut self, pair: LayerPair) -> &mut T { &mut self.0[pair.index()] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_distinct_pairs_without_self_pairs() {
        let mut seen = Vec::new();
        for a in Theme::ALL {
            for b in Theme::ALL {
                match LayerPair::new(a, b) {
                    None => assert_eq!(a, b),
                    Some(pair) => {
                        assert_ne!(pair.first(), pair.second());
                        if !seen.contains(&pair) { seen.push(pair) }
                    }
                }
            }
        }
        seen.sort();
        assert_eq!(seen, LayerPair::ALL.to_vec());
    }

    #[test]
    fn pairs_are_symmetric() {
        for a in Theme::ALL {
            for b in Theme::ALL {
                assert_eq!(LayerPair::new(a, b), LayerPair::new(b, a));
            }
        }
    }

    #[test]
    fn index_matches_canonical_position() {
        for (i, pair) in LayerPair::ALL.into_iter().enumerate() {
            assert_eq!(pair.index(), i);
        }
    }

    #[test]
    fn column_names_follow_canonical_order() {
        let columns = LayerPair::ALL.map(|pair| pair.column());
        assert_eq!(columns, [
            "area_zrc_res_km2", "area_zrc_cc_km2", "area_zrc_cfa_km2",
            "area_res_cc_km2", "area_res_cfa_km2", "area_cc_cfa_km2",
        ]);
        let pair = LayerPair::new(Theme::ConflictZone, Theme::Resguardo).unwrap();
        assert_eq!(pair.to_string(), "res_cfa");
        assert!(pair.contains(Theme::Resguardo) && !pair.contains(Theme::Zrc));
    }
}
