//! Field conversions for the per-structure wrappers
//!
//! Every wrapper holds a copy of its C struct and exposes one getter and one
//! setter per field. [`RawField`] converts between the C representation of
//! a field and the type the accessor presents.

use libc::{c_char, c_int, c_uint, c_ulong};

use crate::types::*;

/// Conversion between a C field and its Rust-side type
pub trait RawField<R>: Sized {
    fn from_field(raw: R) -> Self;
    fn into_field(self) -> R;
}

impl<T> RawField<T> for T {
    fn from_field(raw: T) -> Self {
        raw
    }

    fn into_field(self) -> T {
        self
    }
}

macro_rules! id_fields {
    ($($ty:ident),* $(,)?) => {
        $(
            impl RawField<c_ulong> for $ty {
                fn from_field(raw: c_ulong) -> Self {
                    $ty(raw)
                }

                fn into_field(self) -> c_ulong {
                    self.0
                }
            }
        )*
    };
}

id_fields!(Window, Pixmap, Drawable, Colormap, Cursor, Font, Atom, Timestamp, VisualId, KeySym);

impl RawField<c_int> for bool {
    fn from_field(raw: c_int) -> Self {
        from_bool(raw)
    }

    fn into_field(self) -> c_int {
        to_bool(self)
    }
}

impl RawField<c_char> for bool {
    fn from_field(raw: c_char) -> Self {
        raw != 0
    }

    fn into_field(self) -> c_char {
        self as c_char
    }
}

impl RawField<c_uint> for KeyCode {
    fn from_field(raw: c_uint) -> Self {
        KeyCode(raw as u8)
    }

    fn into_field(self) -> c_uint {
        self.0 as c_uint
    }
}

/// Getters, setters and a `Debug` impl for a wrapper whose C struct lives
/// in a field named `raw`. Each entry is `field, setter: Type;`.
macro_rules! accessors {
    (
        $name:ident {
            $( $(#[$meta:meta])* $field:ident, $setter:ident : $ty:ty; )*
        }
    ) => {
        impl $name {
            $(
                $(#[$meta])*
                pub fn $field(&self) -> $ty {
                    <$ty as $crate::field::RawField<_>>::from_field(self.raw.$field)
                }

                pub fn $setter(&mut self, value: $ty) {
                    self.raw.$field = <$ty as $crate::field::RawField<_>>::into_field(value);
                }
            )*
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    $(.field(stringify!($field), &self.$field()))*
                    .finish()
            }
        }
    };
}

pub(crate) use accessors;

/// Declares a wrapper struct around a copy of a C struct
macro_rules! raw_wrapper {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($raw:ty) {
            $( $(#[$fmeta:meta])* $field:ident, $setter:ident : $ty:ty; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default)]
        pub struct $name {
            raw: $raw,
        }

        impl $name {
            pub fn from_raw(raw: $raw) -> Self {
                $name { raw }
            }

            pub fn as_raw(&self) -> &$raw {
                &self.raw
            }

            pub fn into_raw(self) -> $raw {
                self.raw
            }
        }

        impl From<$raw> for $name {
            fn from(raw: $raw) -> Self {
                $name { raw }
            }
        }

        $crate::field::accessors!($name {
            $( $(#[$fmeta])* $field, $setter : $ty; )*
        });
    };
}

pub(crate) use raw_wrapper;

/// Accessors for a value-list struct whose fields only count when their
/// bit is set in a mask. Setters and `with_*` builders set the bit. Each
/// entry is `field, setter, builder: Type = BIT;`.
macro_rules! masked_accessors {
    (
        $name:ident, mask: $mty:ty = $($mask:ident).+ {
            $( $(#[$meta:meta])* $field:ident, $setter:ident, $builder:ident : $ty:ty = $bit:expr; )*
        }
    ) => {
        impl $name {
            /// Bits of the fields that have been set
            pub fn mask(&self) -> $mty {
                self.$($mask).+
            }

            fn mask_mut(&mut self) -> &mut $mty {
                &mut self.$($mask).+
            }

            pub fn is_set(&self, bit: $mty) -> bool {
                self.mask() & bit == bit
            }

            $(
                $(#[$meta])*
                pub fn $field(&self) -> $ty {
                    <$ty as $crate::field::RawField<_>>::from_field(self.raw.$field)
                }

                pub fn $setter(&mut self, value: $ty) {
                    self.raw.$field = <$ty as $crate::field::RawField<_>>::into_field(value);
                    *self.mask_mut() |= $bit;
                }

                pub fn $builder(mut self, value: $ty) -> Self {
                    self.$setter(value);
                    self
                }
            )*
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut s = f.debug_struct(stringify!($name));
                s.field("mask", &self.mask());
                $(
                    if self.mask() & $bit != 0 {
                        s.field(stringify!($field), &self.$field());
                    }
                )*
                s.finish()
            }
        }
    };
}

pub(crate) use masked_accessors;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_field_conversion() {
        let w: Window = RawField::from_field(0x200001 as c_ulong);
        assert_eq!(w, Window(0x200001));
        let raw: c_ulong = Atom::WM_NAME.into_field();
        assert_eq!(raw, 39);
    }

    #[test]
    fn test_bool_field_conversion() {
        let b: bool = RawField::<c_int>::from_field(7);
        assert!(b);
        let raw: c_int = RawField::<c_int>::into_field(false);
        assert_eq!(raw, 0);
    }
}
