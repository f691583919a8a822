// Tue Jan 20 2026 - Alex

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Package,
    Private,
}

impl Visibility {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Visibility::Public => Some("public"),
            Visibility::Protected => Some("protected"),
            Visibility::Package => None,
            Visibility::Private => Some("private"),
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ModifierFlags: u8 {
        const STATIC = 0b0001;
        const FINAL = 0b0010;
        const ABSTRACT = 0b0100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub flags: ModifierFlags,
}

impl Modifiers {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            flags: ModifierFlags::empty(),
        }
    }

    pub fn public() -> Self {
        Self::new(Visibility::Public)
    }

    pub fn private() -> Self {
        Self::new(Visibility::Private)
    }

    pub fn package() -> Self {
        Self::new(Visibility::Package)
    }

    pub fn with_static(mut self) -> Self {
        self.flags |= ModifierFlags::STATIC;
        self
    }

    pub fn with_final(mut self) -> Self {
        self.flags |= ModifierFlags::FINAL;
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(ModifierFlags::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(ModifierFlags::FINAL)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<&str> = Vec::new();
        if let Some(keyword) = self.visibility.keyword() {
            words.push(keyword);
        }
        if self.flags.contains(ModifierFlags::ABSTRACT) {
            words.push("abstract");
        }
        if self.is_static() {
            words.push("static");
        }
        if self.is_final() {
            words.push("final");
        }
        write!(f, "{}", words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_order() {
        let modifiers = Modifiers::public().with_final().with_static();
        assert_eq!(modifiers.to_string(), "public static final");
        assert_eq!(Modifiers::package().with_final().to_string(), "final");
    }
}
