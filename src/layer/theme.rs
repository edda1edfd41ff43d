use std::{fmt, ops::{Index, IndexMut}};

/// One of the four territorial designation layers being compared.
///
/// Declaration order is the canonical order used for column layout and for
/// enumerating layer pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Theme {
    /// Zonas de Reserva Campesina (peasant reserve zones).
    Zrc,
    /// Resguardos indígenas (indigenous reserves).
    Resguardo,
    /// Consejos comunitarios (collective land titles).
    ConsejoComunitario,
    /// Municipalities affected by armed conflict.
    ConflictZone,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Zrc, Theme::Resguardo, Theme::ConsejoComunitario, Theme::ConflictZone];

    #[inline] pub const fn index(self) -> usize { self as usize }

    /// Short key used in column names, e.g. `n_res`, `area_res_km2`.
    pub const fn key(self) -> &'static str {
        match self {
            Theme::Zrc => "zrc",
            Theme::Resguardo => "res",
            Theme::ConsejoComunitario => "cc",
            Theme::ConflictZone => "cfa",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Theme::Zrc => "ZRC",
            Theme::Resguardo => "Resguardo",
            Theme::ConsejoComunitario => "ConsejoComunitario",
            Theme::ConflictZone => "ConflictZone",
        }
    }

    /// Look up a theme by its short key.
    pub fn from_key(key: &str) -> Option<Self> {
        Theme::ALL.into_iter().find(|theme| theme.key() == key)
    }

    #[inline] pub fn count_column(self) -> String { format!("n_{}", self.key()) }

    #[inline] pub fn area_column(self) -> String { format!("area_{}_km2", self.key()) }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// One value per thematic layer, indexed by `Theme`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerTheme<T>(pub [T; 4]);

impl<T> PerTheme<T> {
    pub fn from_fn(mut f: impl FnMut(Theme) -> T) -> Self {
        Self(Theme::ALL.map(|theme| f(theme)))
    }

    pub fn try_from_fn<E>(mut f: impl FnMut(Theme) -> Result<T, E>) -> Result<Self, E> {
        let [a, b, c, d] = Theme::ALL;
        Ok(Self([f(a)?, f(b)?, f(c)?, f(d)?]))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PerTheme<U> { PerTheme(self.0.map(f)) }

    pub fn as_ref(&self) -> PerTheme<&T> { PerTheme(self.0.each_ref()) }

    pub fn iter(&self) -> impl Iterator<Item = (Theme, &T)> {
        Theme::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Theme> for PerTheme<T> {
    type Output = T;

    #[inline] fn index(&self, theme: Theme) -> &T { &self.0[theme.index()] }
}

impl<T> IndexMut<Theme> for PerTheme<T> {
    #[inline] fn index_mut(&mut self, theme: Theme) -> &mut T { &mut self.0[theme.index()] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_key(theme.key()), Some(theme));
        }
        assert_eq!(Theme::from_key("departments"), None);
    }

    #[test]
    fn column_names() {
        assert_eq!(Theme::Zrc.count_column(), "n_zrc");
        assert_eq!(Theme::ConflictZone.area_column(), "area_cfa_km2");
    }

    #[test]
    fn per_theme_indexing_follows_declaration_order() {
        let mut values = PerTheme::from_fn(|theme| theme.index() * 10);
        assert_eq!(values[Theme::ConsejoComunitario], 20);
        values[Theme::Zrc] = 7;
        assert_eq!(values.0, [7, 10, 20, 30]);
        let keys = values.iter().map(|(theme, _)| theme.key()).collect::<Vec<_>>();
        assert_eq!(keys, ["zrc", "res", "cc", "cfa"]);
    }
}
