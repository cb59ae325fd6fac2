//! Leaf values: scalars, enumerations, and unions.
//!
//! Generated code declares one Rust enum per YANG enumeration or identity
//! (see [`yang_enum!`](crate::yang_enum)) and one closed sum type per union
//! (see [`yang_union!`](crate::yang_union)). All of them convert into the
//! erased [`Leaf`] through [`ToLeaf`].

use crate::error::{TypeError, TypeResult};
use crate::scalar::Scalar;

/// Whether an enumerated type came from a YANG `enumeration` or an
/// `identity` hierarchy. Identities are module-qualified in some JSON
/// outputs; enumerations never are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnumKind {
    Enumeration,
    Identity,
}

/// One row of an enum type's static lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumEntry {
    pub number: i64,
    /// The name as it appears in the schema.
    pub name: &'static str,
    /// The module defining this value.
    pub module: &'static str,
}

/// An enum value together with its type's lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: &'static str,
    pub kind: EnumKind,
    pub number: i64,
    table: &'static [EnumEntry],
}

impl EnumValue {
    pub const fn new(
        type_name: &'static str,
        kind: EnumKind,
        table: &'static [EnumEntry],
        number: i64,
    ) -> Self {
        Self {
            type_name,
            kind,
            number,
            table,
        }
    }

    /// Zero is reserved for "not set".
    pub fn is_unset(&self) -> bool {
        self.number == 0
    }

    /// Look the value up in its type's table.
    pub fn entry(&self) -> TypeResult<&'static EnumEntry> {
        self.table
            .iter()
            .find(|e| e.number == self.number)
            .ok_or(TypeError::UnknownEnum {
                type_name: self.type_name,
                number: self.number,
            })
    }

    /// The schema name of the value.
    pub fn name(&self) -> TypeResult<&'static str> {
        self.entry().map(|e| e.name)
    }
}

/// Implemented by generated enum types.
pub trait YangEnum {
    fn enum_value(&self) -> EnumValue;
}

/// A leaf as held in the tree, before enum and union resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf {
    Scalar(Scalar),
    Enum(EnumValue),
    /// The selected member of a union.
    Union(Box<Leaf>),
}

impl Leaf {
    /// Wrap the selected member of a union. Nested unions collapse into one.
    pub fn union(selected: Leaf) -> Self {
        match selected {
            Self::Union(_) => selected,
            other => Self::Union(Box::new(other)),
        }
    }

    /// The leaf with any union wrapper removed.
    pub fn selected(&self) -> &Leaf {
        match self {
            Self::Union(inner) => inner.selected(),
            other => other,
        }
    }

    /// Returns `true` for an enum (possibly inside a union) holding the
    /// reserved unset value.
    pub fn is_unset(&self) -> bool {
        matches!(self.selected(), Self::Enum(e) if e.is_unset())
    }

    /// Resolve to a primitive: enums become their schema name, unions their
    /// selected member.
    pub fn resolve(&self) -> TypeResult<Scalar> {
        match self {
            Self::Scalar(s) => Ok(s.clone()),
            Self::Enum(e) => Ok(Scalar::String(e.name()?.to_string())),
            Self::Union(inner) => inner.resolve(),
        }
    }

    /// Canonical string form used for list keys.
    pub fn to_key_string(&self) -> TypeResult<String> {
        match self {
            Self::Scalar(s) => s.to_key_string(),
            Self::Enum(e) => Ok(e.name()?.to_string()),
            Self::Union(inner) => inner.to_key_string(),
        }
    }
}

impl From<Scalar> for Leaf {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

/// The YANG `empty` type: present when `true`, absent otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Empty(pub bool);

/// Conversion of a field's Rust type into a leaf. `None` means absent.
pub trait ToLeaf {
    fn to_leaf(&self) -> Option<Leaf>;
}

macro_rules! scalar_to_leaf {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToLeaf for $ty {
                fn to_leaf(&self) -> Option<Leaf> {
                    Some(Leaf::Scalar(Scalar::$variant(self.clone())))
                }
            }
        )*
    };
}

scalar_to_leaf! {
    String => String,
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Vec<u8> => Binary,
}

impl ToLeaf for Empty {
    fn to_leaf(&self) -> Option<Leaf> {
        self.0.then_some(Leaf::Scalar(Scalar::Empty))
    }
}

impl<T: ToLeaf> ToLeaf for Option<T> {
    fn to_leaf(&self) -> Option<Leaf> {
        self.as_ref().and_then(ToLeaf::to_leaf)
    }
}

/// Declare a YANG enumeration or identity type with its static lookup table.
///
/// The generated type has an implicit `Unset` variant numbered zero.
///
/// ```
/// ywire_types::yang_enum! {
///     pub enum Color: Enumeration {
///         Red = 1 => ("RED", "example"),
///         Blue = 2 => ("BLUE", "example"),
///     }
/// }
/// use ywire_types::ToLeaf;
/// let leaf = Color::Red.to_leaf().unwrap();
/// assert_eq!(leaf.to_key_string().unwrap(), "RED");
/// ```
#[macro_export]
macro_rules! yang_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $( $variant:ident = $num:literal => ($yname:literal, $module:literal) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            #[default]
            Unset,
            $( $variant ),*
        }

        impl $name {
            const ENTRIES: &'static [$crate::EnumEntry] = &[
                $( $crate::EnumEntry { number: $num, name: $yname, module: $module } ),*
            ];

            /// The numeric value; zero when unset.
            pub fn number(&self) -> i64 {
                match self {
                    Self::Unset => 0,
                    $( Self::$variant => $num ),*
                }
            }
        }

        impl $crate::YangEnum for $name {
            fn enum_value(&self) -> $crate::EnumValue {
                $crate::EnumValue::new(
                    stringify!($name),
                    $crate::EnumKind::$kind,
                    Self::ENTRIES,
                    self.number(),
                )
            }
        }

        impl $crate::ToLeaf for $name {
            fn to_leaf(&self) -> ::std::option::Option<$crate::Leaf> {
                ::std::option::Option::Some($crate::Leaf::Enum(
                    $crate::YangEnum::enum_value(self),
                ))
            }
        }
    };
}

/// Declare a closed union type. Each member wraps a type implementing
/// [`ToLeaf`]; the selected member resolves through [`Leaf::Union`].
#[macro_export]
macro_rules! yang_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident ( $ty:ty ) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis enum $name {
            $( $variant($ty) ),*
        }

        impl $crate::ToLeaf for $name {
            fn to_leaf(&self) -> ::std::option::Option<$crate::Leaf> {
                match self {
                    $( Self::$variant(v) => $crate::ToLeaf::to_leaf(v).map($crate::Leaf::union) ),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::yang_enum! {
        enum Proto: Identity {
            Bgp = 1 => ("BGP", "policy-types"),
            Ospf = 2 => ("OSPF", "policy-types"),
        }
    }

    crate::yang_union! {
        enum Port {
            Number(u16),
            Named(Proto),
        }
    }

    #[test]
    fn enum_resolves_through_table() {
        let leaf = Proto::Ospf.to_leaf().unwrap();
        assert_eq!(leaf.resolve().unwrap(), Scalar::String("OSPF".into()));
        let Leaf::Enum(e) = leaf else { panic!("expected enum") };
        assert_eq!(e.entry().unwrap().module, "policy-types");
        assert_eq!(e.kind, EnumKind::Identity);
    }

    #[test]
    fn unset_enum() {
        let leaf = Proto::Unset.to_leaf().unwrap();
        assert!(leaf.is_unset());
        assert!(matches!(leaf.resolve(), Err(TypeError::UnknownEnum { number: 0, .. })));
    }

    #[test]
    fn unknown_enum_number() {
        let value = EnumValue::new("Proto", EnumKind::Identity, Proto::ENTRIES, 42);
        assert_eq!(
            Leaf::Enum(value).to_key_string().unwrap_err(),
            TypeError::UnknownEnum {
                type_name: "Proto",
                number: 42
            }
        );
    }

    #[test]
    fn union_resolves_selected_member() {
        let leaf = Port::Number(179).to_leaf().unwrap();
        assert!(matches!(leaf, Leaf::Union(_)));
        assert_eq!(leaf.resolve().unwrap(), Scalar::Uint16(179));
        let leaf = Port::Named(Proto::Bgp).to_leaf().unwrap();
        assert_eq!(leaf.to_key_string().unwrap(), "BGP");
        assert!(matches!(leaf.selected(), Leaf::Enum(_)));
    }

    #[test]
    fn nested_unions_collapse() {
        let inner = Leaf::union(Leaf::Scalar(Scalar::Bool(true)));
        let outer = Leaf::union(inner.clone());
        assert_eq!(outer, inner);
    }

    #[test]
    fn empty_and_options() {
        assert_eq!(Empty(false).to_leaf(), None);
        assert_eq!(Empty(true).to_leaf(), Some(Leaf::Scalar(Scalar::Empty)));
        assert_eq!(None::<String>.to_leaf(), None);
        assert_eq!(
            Some(vec![1u8, 2]).to_leaf(),
            Some(Leaf::Scalar(Scalar::Binary(vec![1, 2])))
        );
    }
}
