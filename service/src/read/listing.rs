//! [`Listing`]-related read definitions.

#[cfg(doc)]
use crate::domain::Listing;

pub mod list {
    //! [`Listing`] list definitions.

    use std::str::FromStr as _;

    use derive_more::{Display, Error};
    use rust_decimal::Decimal;

    #[cfg(doc)]
    use crate::domain::Listing;
    use crate::read::Predicate;

    /// Validated filter of a [`Listing`] list query.
    ///
    /// Every field is independently optional: [`None`] means "no
    /// constraint" for that field, not a default value.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Availability flag a [`Listing`] must match exactly.
        pub available: Option<bool>,

        /// Inclusive lower bound of a [`Listing`] price.
        pub min_price: Option<Decimal>,

        /// Inclusive upper bound of a [`Listing`] price.
        pub max_price: Option<Decimal>,
    }

    impl Filter {
        /// Parses and validates a [`Filter`] out of its raw inputs.
        ///
        /// Absent and empty price strings are equivalent and mean "no
        /// constraint". Price text is parsed as an exact decimal, never as
        /// a binary float.
        ///
        /// # Errors
        ///
        /// - [`ParseError::InvalidMinPrice`] and
        ///   [`ParseError::InvalidMaxPrice`] if the corresponding bound is
        ///   non-empty and not a decimal number;
        /// - [`ParseError::MinExceedsMax`] if both bounds are supplied and
        ///   contradict each other. A single bound alone is never invalid.
        pub fn parse(
            available: Option<bool>,
            min_price: Option<&str>,
            max_price: Option<&str>,
        ) -> Result<Self, ParseError> {
            use ParseError as E;

            let min_price =
                parse_price(min_price).ok_or(E::InvalidMinPrice)?;
            let max_price =
                parse_price(max_price).ok_or(E::InvalidMaxPrice)?;

            if let (Some(min), Some(max)) = (min_price, max_price) {
                if min > max {
                    return Err(E::MinExceedsMax { min, max });
                }
            }

            Ok(Self {
                available,
                min_price,
                max_price,
            })
        }

        /// Composes this [`Filter`] into a single conjunctive
        /// [`Predicate`].
        ///
        /// Every absent sub-filter contributes the identity predicate, so
        /// the composition is always total over the fixed filter set and an
        /// empty [`Filter`] yields a [`Predicate`] matching every
        /// [`Listing`].
        #[must_use]
        pub fn to_predicate(self) -> Predicate {
            let Self {
                available,
                min_price,
                max_price,
            } = self;

            [
                available.map(Predicate::available),
                min_price.map(Predicate::min_price),
                max_price.map(Predicate::max_price),
            ]
            .into_iter()
            .map(|p| p.unwrap_or(Predicate::All))
            .fold(Predicate::All, Predicate::and)
        }
    }

    /// Parses an optional price bound, treating empty input as absent.
    ///
    /// [`None`] is returned if the input is non-empty and not a decimal
    /// number.
    fn parse_price(raw: Option<&str>) -> Option<Option<Decimal>> {
        match raw.map(str::trim) {
            None | Some("") => Some(None),
            Some(s) => Decimal::from_str(s).ok().map(Some),
        }
    }

    /// Error of parsing a [`Filter`].
    #[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
    pub enum ParseError {
        /// Minimum price is not a decimal number.
        #[display("minimum price must be a decimal number")]
        InvalidMinPrice,

        /// Maximum price is not a decimal number.
        #[display("maximum price must be a decimal number")]
        InvalidMaxPrice,

        /// Both price bounds are supplied and contradict each other.
        #[display("minimum price cannot exceed maximum price")]
        MinExceedsMax {
            /// Supplied lower bound.
            min: Decimal,

            /// Supplied upper bound.
            max: Decimal,
        },
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::list::{Filter, ParseError};
    use crate::read::Predicate;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn absent_and_empty_inputs_mean_no_constraint() {
        for raw in [None, Some(""), Some("   ")] {
            let filter = Filter::parse(None, raw, raw).unwrap();

            assert_eq!(filter, Filter::default());
            assert_eq!(filter.to_predicate(), Predicate::All);
        }
    }

    #[test]
    fn parses_exact_decimal_bounds() {
        let filter =
            Filter::parse(Some(true), Some("80000"), Some("200000.50"))
                .unwrap();

        assert_eq!(filter.available, Some(true));
        assert_eq!(filter.min_price, Some(decimal("80000")));
        assert_eq!(filter.max_price, Some(decimal("200000.50")));
    }

    #[test]
    fn rejects_non_numeric_bounds() {
        assert_eq!(
            Filter::parse(None, Some("cheap"), None),
            Err(ParseError::InvalidMinPrice),
        );
        assert_eq!(
            Filter::parse(None, None, Some("12,5")),
            Err(ParseError::InvalidMaxPrice),
        );
    }

    #[test]
    fn rejects_contradictory_bounds() {
        assert_eq!(
            Filter::parse(None, Some("300000"), Some("100000")),
            Err(ParseError::MinExceedsMax {
                min: decimal("300000"),
                max: decimal("100000"),
            }),
        );
    }

    #[test]
    fn single_bound_is_never_invalid() {
        assert!(Filter::parse(None, Some("300000"), None).is_ok());
        assert!(Filter::parse(None, None, Some("-5")).is_ok());
        assert!(Filter::parse(None, Some("-100"), None).is_ok());
    }

    #[test]
    fn equal_bounds_are_valid() {
        let filter =
            Filter::parse(None, Some("100000"), Some("100000")).unwrap();

        assert_eq!(filter.min_price, filter.max_price);
    }

    #[test]
    fn parsing_is_idempotent() {
        let inputs = (Some(false), Some("99.99"), Some("1000"));

        assert_eq!(
            Filter::parse(inputs.0, inputs.1, inputs.2).unwrap(),
            Filter::parse(inputs.0, inputs.1, inputs.2).unwrap(),
        );
    }
}
