//! Modifier sets.
//!
//! A [`Mods`] value is a bit set of the target language's declaration
//! modifiers. Every declaration kind accepts only a subset, checked through
//! [`Mods::check`] when the declaration is created.

use crate::error::{Error, Result};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit set of declaration modifiers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Mods(u32);

impl Mods {
    /// No modifiers.
    pub const NONE: Mods = Mods(0);
    /// `public`
    pub const PUBLIC: Mods = Mods(0x001);
    /// `protected`
    pub const PROTECTED: Mods = Mods(0x002);
    /// `private`
    pub const PRIVATE: Mods = Mods(0x004);
    /// `final`
    pub const FINAL: Mods = Mods(0x008);
    /// `static`
    pub const STATIC: Mods = Mods(0x010);
    /// `abstract`
    pub const ABSTRACT: Mods = Mods(0x020);
    /// `native`
    pub const NATIVE: Mods = Mods(0x040);
    /// `synchronized`
    pub const SYNCHRONIZED: Mods = Mods(0x080);
    /// `transient`
    pub const TRANSIENT: Mods = Mods(0x100);
    /// `volatile`
    pub const VOLATILE: Mods = Mods(0x200);

    const VISIBILITY: Mods = Mods(0x007);

    /// Rendering order of the modifier keywords.
    const KEYWORDS: [(Mods, &'static str); 10] = [
        (Mods::PUBLIC, "public"),
        (Mods::PROTECTED, "protected"),
        (Mods::PRIVATE, "private"),
        (Mods::FINAL, "final"),
        (Mods::STATIC, "static"),
        (Mods::ABSTRACT, "abstract"),
        (Mods::NATIVE, "native"),
        (Mods::SYNCHRONIZED, "synchronized"),
        (Mods::TRANSIENT, "transient"),
        (Mods::VOLATILE, "volatile"),
    ];

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no modifier is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Sets or clears `flag`.
    pub fn set(&mut self, flag: Mods, on: bool) {
        if on {
            self.0 |= flag.0;
        } else {
            self.0 &= !flag.0;
        }
    }

    /// Makes the set `private`, clearing any other visibility.
    pub fn set_private(&mut self, on: bool) {
        self.set_visibility(Mods::PRIVATE, on);
    }

    /// Makes the set `protected`, clearing any other visibility.
    pub fn set_protected(&mut self, on: bool) {
        self.set_visibility(Mods::PROTECTED, on);
    }

    /// Makes the set `public`, clearing any other visibility.
    pub fn set_public(&mut self, on: bool) {
        self.set_visibility(Mods::PUBLIC, on);
    }

    /// Sets or clears `final`.
    pub fn set_final(&mut self, on: bool) {
        self.set(Mods::FINAL, on);
    }

    /// Sets or clears `synchronized`.
    pub fn set_synchronized(&mut self, on: bool) {
        self.set(Mods::SYNCHRONIZED, on);
    }

    fn set_visibility(&mut self, flag: Mods, on: bool) {
        if on {
            self.0 &= !Mods::VISIBILITY.0;
        }
        self.set(flag, on);
    }

    /// `abstract`?
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        self.contains(Mods::ABSTRACT)
    }

    /// `native`?
    #[must_use]
    pub const fn is_native(self) -> bool {
        self.contains(Mods::NATIVE)
    }

    /// `synchronized`?
    #[must_use]
    pub const fn is_synchronized(self) -> bool {
        self.contains(Mods::SYNCHRONIZED)
    }

    /// `static`?
    #[must_use]
    pub const fn is_static(self) -> bool {
        self.contains(Mods::STATIC)
    }

    /// Iterates the keywords of this set in rendering order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        Self::KEYWORDS
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, keyword)| keyword)
    }

    /// Verifies that the set only uses modifiers legal for `kind`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModifiers`] when an illegal modifier is present.
    pub fn check(self, kind: ModKind) -> Result<Self> {
        if self.0 & !kind.allowed().0 != 0 {
            return Err(Error::InvalidModifiers {
                mods: self.to_string(),
                kind: kind.to_string(),
            });
        }
        Ok(self)
    }
}

impl BitOr for Mods {
    type Output = Mods;

    fn bitor(self, rhs: Mods) -> Mods {
        Mods(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mods {
    fn bitor_assign(&mut self, rhs: Mods) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for keyword in self.keywords() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(keyword)?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mods({self})")
    }
}

/// Declaration kinds with distinct modifier rules.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ModKind {
    /// Interfaces, annotation types.
    Interface,
    /// Classes and enums.
    Class,
    /// Methods and constructors.
    Method,
    /// Fields.
    Field,
    /// Local variables and parameters.
    Var,
}

impl ModKind {
    /// Modifiers allowed for this kind.
    #[must_use]
    pub fn allowed(self) -> Mods {
        match self {
            Self::Interface => Mods::PUBLIC,
            Self::Class => {
                Mods::PUBLIC
                    | Mods::PRIVATE
                    | Mods::PROTECTED
                    | Mods::STATIC
                    | Mods::FINAL
                    | Mods::ABSTRACT
            }
            Self::Method => {
                Mods::PUBLIC
                    | Mods::PRIVATE
                    | Mods::PROTECTED
                    | Mods::FINAL
                    | Mods::ABSTRACT
                    | Mods::STATIC
                    | Mods::NATIVE
                    | Mods::SYNCHRONIZED
            }
            Self::Field => {
                Mods::PUBLIC
                    | Mods::PRIVATE
                    | Mods::PROTECTED
                    | Mods::STATIC
                    | Mods::FINAL
                    | Mods::TRANSIENT
                    | Mods::VOLATILE
            }
            Self::Var => Mods::FINAL,
        }
    }
}

impl fmt::Display for ModKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interface => "interface",
            Self::Class => "class",
            Self::Method => "method",
            Self::Field => "field",
            Self::Var => "variable",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_order() {
        let mods = Mods::STATIC | Mods::FINAL | Mods::PUBLIC;
        assert_eq!(mods.to_string(), "public final static");
    }

    #[test]
    fn test_check_rejects_illegal() {
        let err = (Mods::PUBLIC | Mods::STATIC)
            .check(ModKind::Interface)
            .expect_err("static interface accepted");
        assert!(err.to_string().contains("illegal modifiers for interface"));
        assert!(Mods::FINAL.check(ModKind::Var).is_ok());
        assert!(Mods::VOLATILE.check(ModKind::Method).is_err());
    }

    #[test]
    fn test_visibility_is_exclusive() {
        let mut mods = Mods::PUBLIC | Mods::FINAL;
        mods.set_private(true);
        assert!(mods.contains(Mods::PRIVATE));
        assert!(!mods.contains(Mods::PUBLIC));
        assert!(mods.contains(Mods::FINAL));

        mods.set_final(false);
        assert_eq!(mods, Mods::PRIVATE);
    }
}
