//! [`Predicate`] definitions.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::domain::Listing;

/// Composable boolean condition over [`Listing`] fields.
///
/// A [`Predicate`] is a small tree of [`Comparison`] leaves combined by
/// logical nodes. A storage implementation either evaluates it directly
/// against its records via [`Predicate::matches()`], or translates it into
/// its native query language.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Identity [`Predicate`] matching every [`Listing`].
    All,

    /// Single [`Comparison`] of a [`Listing`] field against a value.
    Comparison(Comparison),

    /// Conjunction: both sub-predicates must match.
    And(Box<Predicate>, Box<Predicate>),

    /// Disjunction: either sub-predicate must match.
    Or(Box<Predicate>, Box<Predicate>),

    /// Negation: the sub-predicate must not match.
    Not(Box<Predicate>),
}

impl Predicate {
    /// [`Predicate`] matching [`Listing`]s whose availability flag equals
    /// the provided `value` exactly.
    #[must_use]
    pub fn available(value: bool) -> Self {
        Self::Comparison(Comparison {
            field: Field::Available,
            op: Operator::Eq,
            value: Value::Bool(value),
        })
    }

    /// [`Predicate`] matching [`Listing`]s priced not below `min`.
    #[must_use]
    pub fn min_price(min: Decimal) -> Self {
        Self::Comparison(Comparison {
            field: Field::Price,
            op: Operator::Ge,
            value: Value::Decimal(min),
        })
    }

    /// [`Predicate`] matching [`Listing`]s priced not above `max`.
    #[must_use]
    pub fn max_price(max: Decimal) -> Self {
        Self::Comparison(Comparison {
            field: Field::Price,
            op: Operator::Le,
            value: Value::Decimal(max),
        })
    }

    /// Combines two [`Predicate`]s conjunctively.
    ///
    /// [`Predicate::All`] is the neutral element of the conjunction, and
    /// the conjunction itself is commutative and associative, so the order
    /// of composition never affects which [`Listing`]s match.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::All, p) | (p, Self::All) => p,
            (a, b) => Self::And(Box::new(a), Box::new(b)),
        }
    }

    /// Checks whether the provided [`Listing`] matches this [`Predicate`].
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Self::All => true,
            Self::Comparison(cmp) => cmp.matches(listing),
            Self::And(a, b) => a.matches(listing) && b.matches(listing),
            Self::Or(a, b) => a.matches(listing) || b.matches(listing),
            Self::Not(p) => !p.matches(listing),
        }
    }
}

/// Comparison of a single [`Listing`] [`Field`] against a [`Value`].
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    /// [`Field`] of a [`Listing`] to compare.
    pub field: Field,

    /// [`Operator`] to compare with.
    pub op: Operator,

    /// [`Value`] to compare against.
    pub value: Value,
}

impl Comparison {
    /// Checks whether the provided [`Listing`] satisfies this
    /// [`Comparison`].
    ///
    /// A type-mismatched comparison never matches.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        let actual = self.field.of(listing);
        match self.op {
            Operator::Eq => actual == self.value,
            Operator::Ge => matches!(
                actual.partial_cmp(&self.value),
                Some(Ordering::Greater | Ordering::Equal),
            ),
            Operator::Le => matches!(
                actual.partial_cmp(&self.value),
                Some(Ordering::Less | Ordering::Equal),
            ),
        }
    }
}

/// [`Listing`] field a [`Comparison`] may address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    /// Availability flag of a [`Listing`].
    Available,

    /// Price amount of a [`Listing`].
    Price,
}

impl Field {
    /// Extracts the [`Value`] of this [`Field`] from the provided
    /// [`Listing`].
    fn of(self, listing: &Listing) -> Value {
        match self {
            Self::Available => Value::Bool(listing.available),
            Self::Price => Value::Decimal(listing.price.amount()),
        }
    }
}

/// Operator of a [`Comparison`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
    /// Exact equality.
    Eq,

    /// Greater than or equal to.
    Ge,

    /// Less than or equal to.
    Le,
}

/// Value a [`Listing`] field is compared against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Boolean value.
    Bool(bool),

    /// Exact-decimal value.
    Decimal(Decimal),
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.partial_cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => a.partial_cmp(b),
            (Self::Bool(_), Self::Decimal(_))
            | (Self::Decimal(_), Self::Bool(_)) => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{listing, Listing};

    use super::Predicate;

    fn listing(price: &str, available: bool) -> Listing {
        let now = DateTime::now();
        Listing {
            id: listing::Id::new(),
            title: listing::Title::new("Departamento Centro").unwrap(),
            description: listing::Description::new(
                "Hermoso departamento en el centro",
            )
            .unwrap(),
            price: listing::Price::new(Money {
                amount: price.parse().unwrap(),
                currency: Currency::Ars,
            })
            .unwrap(),
            area: listing::Area::new("75.5".parse().unwrap()).unwrap(),
            address: listing::Address::new("Calle Principal 123").unwrap(),
            available,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn identity_matches_every_listing() {
        assert!(Predicate::All.matches(&listing("100000", true)));
        assert!(Predicate::All.matches(&listing("200000", false)));
    }

    #[test]
    fn identity_is_neutral_element_of_conjunction() {
        let p = Predicate::available(true);

        assert_eq!(Predicate::All.and(p.clone()), p);
        assert_eq!(p.clone().and(Predicate::All), p);
        assert_eq!(Predicate::All.and(Predicate::All), Predicate::All);
    }

    #[test]
    fn availability_is_exact_match_only() {
        let wants_available = Predicate::available(true);
        let wants_unavailable = Predicate::available(false);

        assert!(wants_available.matches(&listing("100000", true)));
        assert!(!wants_available.matches(&listing("100000", false)));
        assert!(wants_unavailable.matches(&listing("100000", false)));
        assert!(!wants_unavailable.matches(&listing("100000", true)));
    }

    #[test]
    fn price_bounds_form_closed_interval() {
        let range = Predicate::min_price(decimal("80000"))
            .and(Predicate::max_price(decimal("200000")));

        assert!(!range.matches(&listing("70000", true)));
        assert!(range.matches(&listing("80000", true)));
        assert!(range.matches(&listing("150000", true)));
        assert!(range.matches(&listing("200000", true)));
        assert!(!range.matches(&listing("200000.01", true)));
    }

    #[test]
    fn conjunction_is_commutative() {
        let a = Predicate::available(true);
        let b = Predicate::min_price(decimal("100000"));

        let ab = a.clone().and(b.clone());
        let ba = b.and(a);

        for l in [
            listing("100000", true),
            listing("100000", false),
            listing("50000", true),
        ] {
            assert_eq!(ab.matches(&l), ba.matches(&l));
        }
    }

    #[test]
    fn negation_and_disjunction_invert_and_widen() {
        let available = Predicate::available(true);
        let not_available = Predicate::Not(Box::new(available.clone()));
        let either = Predicate::Or(
            Box::new(available),
            Box::new(Predicate::min_price(decimal("150000"))),
        );

        assert!(not_available.matches(&listing("100000", false)));
        assert!(!not_available.matches(&listing("100000", true)));
        assert!(either.matches(&listing("100000", true)));
        assert!(either.matches(&listing("150000", false)));
        assert!(!either.matches(&listing("100000", false)));
    }
}
