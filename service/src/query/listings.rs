//! Queries of [`Listing`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::Listing,
    infra::{database, Database},
    read::{self, Predicate},
    Service,
};

use super::{DatabaseQuery, Query};

/// [`Query`] of all the [`Listing`]s, in insertion order.
pub type All = DatabaseQuery<By<Vec<Listing>, ()>>;

/// [`Query`] of [`Listing`]s matching the provided raw filtering
/// parameters.
///
/// Parameters are validated and normalized before any [`Database`]
/// interaction happens, so malformed input never reaches the storage.
#[derive(Clone, Debug, Default)]
pub struct List {
    /// Availability the [`Listing`]s should have, if any.
    pub available: Option<bool>,

    /// Raw lower bound of the [`Listing`]s price, if any.
    pub min_price: Option<String>,

    /// Raw upper bound of the [`Listing`]s price, if any.
    pub max_price: Option<String>,
}

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Listing>, Predicate>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        type E = ExecutionError;

        let filter = read::listing::list::Filter::parse(
            query.available,
            query.min_price.as_deref(),
            query.max_price.as_deref(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        tracing::debug!(?filter, "listing `Listing`s");

        self.database()
            .execute(Select(By::new(filter.to_predicate())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Possible error of [`List`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] operation failed.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Filtering parameters are invalid.
    #[display("invalid `Filter`: {_0}")]
    Filter(read::listing::list::ParseError),
}
