//! Human-readable descriptions for fieldless enums.
//!
//! ```
//! pairwise::describe_enum! {
//!     pub enum Shade {
//!         Light => "Light theme",
//!         Dark => "Dark theme",
//!         System,
//!     }
//! }
//!
//! use pairwise::describe::Describe;
//! assert_eq!(Shade::Dark.description(), "Dark theme");
//! assert_eq!(Shade::System.description(), "System");
//! ```

pub trait Describe: Sized + Copy + 'static {
    /// Every variant in declaration order
    const ALL: &'static [Self];

    fn description(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDescription<E> {
    pub value: E,
    pub description: &'static str,
}

pub fn values_and_descriptions<E: Describe>(mut filter: impl FnMut(&E) -> bool) -> Vec<ValueDescription<E>> {
    E::ALL
        .iter()
        .filter(|value| filter(value))
        .map(|value| ValueDescription {
            value: *value,
            description: value.description(),
        })
        .collect()
}

/// Declare a fieldless enum together with its [`Describe`] impl. A variant
/// without `=> "text"` is described by its own name. The enum derives
/// `Debug, Clone, Copy, PartialEq, Eq, Hash`.
#[macro_export]
macro_rules! describe_enum {
    (@text $variant:ident, $desc:literal) => {
        $desc
    };
    (@text $variant:ident) => {
        stringify!($variant)
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident $(=> $desc:literal)? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),*
        }

        impl $crate::describe::Describe for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),*];

            fn description(&self) -> &'static str {
                match self {
                    $( $name::$variant => $crate::describe_enum!(@text $variant $(, $desc)?) ),*
                }
            }
        }
    };
}
