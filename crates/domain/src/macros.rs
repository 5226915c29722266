//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Several small enums travel as lowercase strings (grant types, transport
//! error kinds). This macro keeps their string form in one place.
//!
//! # Example
//!
//! ```rust
//! use easemob_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Presence {
//!     Online,
//!     Offline,
//! }
//!
//! impl_domain_status_conversions!(Presence {
//!     Online => "online",
//!     Offline => "offline",
//! });
//!
//! assert_eq!(Presence::Online.to_string(), "online");
//! assert_eq!("OFFLINE".parse::<Presence>().unwrap(), Presence::Offline);
//! ```

/// Implements Display and FromStr traits for string-coded enums
///
/// - Display writes the mapped string verbatim
/// - FromStr parses case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err(::std::format!(
                        "Invalid {}: {}",
                        ::std::stringify!($enum_name),
                        s
                    )),
                }
            }
        }
    };
}
