#[macro_export]
macro_rules! agg_mod {
    [ $( $name:ident $(,)? )+ ] => {
        $(
            pub mod $name;
        )+
    };
}

/// Case-insensitive `FromStr` over the variant names; `$err` is a tuple struct
/// wrapping the rejected input.
#[macro_export]
macro_rules! impl_from_str_for_enum {
    ($enum_name:ident, $err:ident, $( $variant:ident ),*) => {
        impl std::str::FromStr for $enum_name {
            type Err = $err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case(stringify!($variant)) {
                        return Ok($enum_name::$variant);
                    }
                )*
                Err($err(s.to_string()))
            }
        }
    };
}

#[macro_export]
macro_rules! impl_display_for_enum {
    ($enum_name:ident, $( $variant:ident ),*) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let name = match self {
                    $( $enum_name::$variant => stringify!($variant), )*
                };
                f.write_str(name)
            }
        }
    };
}
