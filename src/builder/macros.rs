//! Macros for ergonomic automaton construction.

/// Generate a fieldless state enum and its `State` implementation.
///
/// The generated enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
/// `Debug` and serde's `Serialize`/`Deserialize`, so the calling crate must
/// depend on `serde`.
///
/// # Example
///
/// ```
/// use effect_automaton::core::State;
/// use effect_automaton::state_enum;
///
/// state_enum! {
///     pub enum AuthState {
///         LoggedOut,
///         LoggingIn,
///         LoggedIn,
///         LoggingOut,
///     }
/// }
///
/// assert_eq!(AuthState::LoggingIn.name(), "LoggingIn");
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

        impl $crate::core::State for $name {
            fn name(&self) -> ::std::borrow::Cow<'_, str> {
                match self {
                    $(Self::$variant => ::std::borrow::Cow::Borrowed(stringify!($variant))),*
                }
            }
        }
    };
}
