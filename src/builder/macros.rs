//! Macros for declaring workflow vocabularies.

/// Generate a state enum with `Symbol` and `State` implementations.
///
/// States listed under `final:` are terminal. The enum also gets a
/// `VARIANTS` slice, handy for declaring every state on a builder.
///
/// # Example
///
/// ```
/// use parcelflow::state_enum;
/// use parcelflow::core::{State, Symbol};
///
/// state_enum! {
///     pub enum TicketState {
///         Open,
///         Resolved,
///         Closed,
///     }
///     final: [Closed]
/// }
///
/// assert_eq!(TicketState::Resolved.name(), "Resolved");
/// assert!(TicketState::Closed.is_final());
/// assert_eq!(TicketState::VARIANTS.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $crate::symbol_enum! {
            $(#[$meta])*
            $vis enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant
                ),*
            }
        }

        impl $crate::core::State for $name {
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}

/// Generate an enum of symbols (events, roles) with a `Symbol` implementation.
///
/// # Example
///
/// ```
/// use parcelflow::symbol_enum;
/// use parcelflow::core::Symbol;
///
/// symbol_enum! {
///     pub enum TicketEvent {
///         Resolve,
///         Close,
///     }
/// }
///
/// assert_eq!(TicketEvent::Close.name(), "Close");
/// ```
#[macro_export]
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const VARIANTS: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::Symbol for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
