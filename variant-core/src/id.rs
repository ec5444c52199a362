//! Strongly-typed hardware identifiers
//!
//! Pins and timers are field-less `#[repr(u8)]` enums. The raw value of a
//! variant is its index into the variant's tables, so a lookup can never
//! name a pin or timer the variant does not have.

/// A dense, `u8`-backed hardware identifier
///
/// Implemented through [`identifiers!`](crate::identifiers). `ALL` lists the
/// identifiers in declaration order, which is also raw-value order.
pub trait Identifier: Copy + Eq + core::fmt::Debug + 'static {
    /// Every identifier, in raw-value order
    const ALL: &'static [Self];

    /// Number of identifiers
    const COUNT: usize = Self::ALL.len();

    /// Raw ABI value
    fn raw(self) -> u8;

    /// Symbol name, e.g. `"PA5"` or `"TIMER2"`
    fn name(self) -> &'static str;

    /// Index into the variant's tables
    fn index(self) -> usize {
        self.raw() as usize
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn from_raw(raw: u8) -> Option<Self> {
        Self::from_index(raw as usize)
    }

    /// Look up an identifier by symbol name, case-insensitive
    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}

/// Declare an identifier enum
///
/// Usage:
/// ```ignore
/// variant_core::identifiers! {
///     /// Timers on this variant
///     pub enum Timer { TIMER1, TIMER2 }
/// }
/// ```
#[macro_export]
macro_rules! identifiers {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::Identifier for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];

            fn raw(self) -> u8 {
                self as u8
            }

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }
        }
    };
}
