//! Static capability declarations
//!
//! `declare_capabilities!` implements [`Capable`](crate::capability::Capable)
//! for a type from a list of its method names. Each name is also resolved as
//! a path (`<Type>::name`) inside a never-called function, so a misspelled or
//! removed method is a compile error rather than a runtime violation.
//!
//! Only non-generic methods can be declared this way. Generic methods, or
//! subjects whose operations are only known at runtime, should build a
//! [`CapabilitySet`](crate::capability::CapabilitySet) directly.

/// Implement `Capable` for a type and check its methods exist at compile time
///
/// ```
/// use cap_contract::{declare_capabilities, Capable};
///
/// struct ClientStore;
///
/// impl ClientStore {
///     fn get_client(&self, _id: u64) -> Option<String> { None }
///     fn report_client(&mut self, _host: &str) {}
/// }
///
/// declare_capabilities!(ClientStore { get_client, report_client });
///
/// assert!(ClientStore.responds_to("get_client"));
/// assert!(!ClientStore.responds_to("find_or_create_client"));
/// ```
#[macro_export]
macro_rules! declare_capabilities {
    ($ty:ty {}) => {
        impl $crate::capability::Capable for $ty {
            fn capabilities(&self) -> $crate::capability::CapabilitySet {
                $crate::capability::CapabilitySet::new(::std::stringify!($ty))
            }
        }
    };
    ($ty:ty { $($op:ident),+ $(,)? }) => {
        const _: () = {
            #[allow(dead_code, clippy::let_underscore_untyped)]
            fn operations_resolve() {
                $( let _ = <$ty>::$op; )+
            }
        };

        impl $crate::capability::Capable for $ty {
            fn capabilities(&self) -> $crate::capability::CapabilitySet {
                let mut set = $crate::capability::CapabilitySet::new(::std::stringify!($ty));
                $( set.declare_method(::std::stringify!($op)); )+
                set
            }
        }
    };
}
