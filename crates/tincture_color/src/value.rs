//! Values that may still be waiting on resolution

/// A themeable value: either explicit, or `Auto` (derive from context)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolvable<T> {
    /// Not set; resolved through the fallback chain
    Auto,
    /// Explicitly set
    Value(T),
}

impl<T> Default for Resolvable<T> {
    fn default() -> Self {
        Self::Auto
    }
}

impl<T> Resolvable<T> {
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn as_ref(&self) -> Resolvable<&T> {
        match self {
            Self::Auto => Resolvable::Auto,
            Self::Value(v) => Resolvable::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolvable<U> {
        match self {
            Self::Auto => Resolvable::Auto,
            Self::Value(v) => Resolvable::Value(f(v)),
        }
    }

    /// Explicit value, if any
    pub fn value(self) -> Option<T> {
        match self {
            Self::Auto => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Explicit value, or the supplied fallback
    pub fn unwrap_or(self, fallback: T) -> T {
        self.value().unwrap_or(fallback)
    }

    /// Explicit value, or a lazily computed fallback
    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        self.value().unwrap_or_else(fallback)
    }

    /// This value if explicit, otherwise `other`
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Auto => other,
            value => value,
        }
    }
}

impl<T> From<T> for Resolvable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for Resolvable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Auto, Self::Value)
    }
}
