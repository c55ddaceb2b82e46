#![macro_use]

macro_rules! typestate {
    ($name:ident, $doc:expr) => {
        paste::paste! {
            #[doc = "[Typestate] for " $doc "."]
            ///
            /// [Typestate]: https://docs.rust-embedded.org/book/static-guarantees/typestate-programming.html
            #[derive(Debug, PartialEq, Eq, Clone, Copy)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub struct $name {
                _priv: (),
            }
        }

        impl $name {
            #[allow(dead_code)]
            pub(crate) const fn new() -> Self {
                Self { _priv: () }
            }
        }
    };
}

// Checked unwrap, used only where the error value is unreachable.
// Routes through defmt when available for a smaller panic message.
#[cfg(feature = "defmt")]
macro_rules! unwrap {
    ($($args:tt)*) => {
        ::defmt::unwrap!($($args)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! unwrap {
    ($expr:expr) => {
        match $expr {
            ::core::result::Result::Ok(val) => val,
            ::core::result::Result::Err(_) => ::core::panic!("unwrap failed"),
        }
    };
}

// Driver parameter validation.
// With the `param-assert` feature this is a real assertion; without it the
// expression is not evaluated at all, the expansion is empty.
#[cfg(feature = "param-assert")]
macro_rules! param_assert {
    ($($args:tt)*) => {
        ::core::assert!($($args)*)
    };
}

#[cfg(not(feature = "param-assert"))]
macro_rules! param_assert {
    ($($args:tt)*) => {};
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg_attr(feature = "param-assert", should_panic)]
    fn param_assert_elision() {
        // evaluated only when the feature is on
        #[allow(dead_code)]
        fn check(n: u32) -> bool {
            n < 4
        }
        param_assert!(check(9), "out of range");
    }
}
