//! [`Listing`]-related definitions.

use axum::{
    extract::{OriginalUri, Path, Query},
    Extension, Json,
};
use common::{money::Currency, Handler as _};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{command, domain, query};

use crate::{define_error, error::Rejection, AsError as _, Service};

/// An apartment listing, as represented in API responses.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique identifier of this [`Listing`].
    pub id: String,

    /// Title of this [`Listing`].
    pub title: String,

    /// Description of this [`Listing`].
    pub description: String,

    /// Price amount of this [`Listing`].
    pub price: Decimal,

    /// [`Currency`] the price of this [`Listing`] is expressed in.
    pub currency: Currency,

    /// Area of this [`Listing`], in square meters.
    pub area: Decimal,

    /// Address of this [`Listing`].
    pub address: String,

    /// Indicator whether this [`Listing`] is available.
    pub available: bool,

    /// Moment when this [`Listing`] was created, as an [RFC 3339] string
    /// on the wire.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: domain::listing::CreationDateTime,

    /// Moment when this [`Listing`] was last updated, as an [RFC 3339]
    /// string on the wire.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub updated_at: domain::listing::UpdateDateTime,
}

impl From<domain::Listing> for Listing {
    fn from(listing: domain::Listing) -> Self {
        Self {
            id: listing.id.to_string(),
            title: listing.title.into(),
            description: listing.description.into(),
            price: listing.price.amount(),
            currency: listing.price.currency(),
            area: listing.area.into(),
            address: listing.address.into(),
            available: listing.available,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// Body of a [`Listing`] creation or update request.
///
/// Every field is optional on the wire, so that a missing one can be
/// reported with a meaningful message instead of a bare deserialization
/// failure.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    /// Title of the [`Listing`].
    pub title: Option<String>,

    /// Description of the [`Listing`].
    pub description: Option<String>,

    /// Price amount of the [`Listing`].
    pub price: Option<Decimal>,

    /// [`Currency`] code the price is expressed in.
    pub currency: Option<String>,

    /// Area of the [`Listing`], in square meters.
    pub area: Option<Decimal>,

    /// Address of the [`Listing`].
    pub address: Option<String>,

    /// Indicator whether the [`Listing`] is available.
    #[serde(default)]
    pub available: bool,
}

define_error! {
    enum PayloadError {
        #[code = "validation.error"]
        #[status = BAD_REQUEST]
        #[message = "id must be a valid UUID"]
        InvalidId,

        #[code = "validation.error"]
        #[status = BAD_REQUEST]
        #[message = "title is required and must be at most 150 characters"]
        InvalidTitle,

        #[code = "validation.error"]
        #[status = BAD_REQUEST]
        #[message = "description is required and must be at most 500 \
                     characters"]
        InvalidDescription,

        #[code = "validation.error"]
        #[status = BAD_REQUEST]
        #[message = "price must be a positive decimal number"]
        InvalidPrice,

        #[code = "validation.error"]
        #[status = BAD_REQUEST]
        #[message = "currency is required and must be one of: ARS, USD"]
        InvalidCurrency,

        #[code = "validation.error"]
        #[status = BAD_REQUEST]
        #[message = "area must be a positive decimal number"]
        InvalidArea,

        #[code = "validation.error"]
        #[status = BAD_REQUEST]
        #[message = "address is required and must be at most 500 characters"]
        InvalidAddress,

        #[code = "validation.error"]
        #[status = BAD_REQUEST]
        #[message = "available must be either true or false"]
        InvalidAvailability,
    }
}

/// Validated fields of a [`ListingPayload`].
#[derive(Clone, Debug)]
struct Fields {
    /// Validated title.
    title: domain::listing::Title,

    /// Validated description.
    description: domain::listing::Description,

    /// Validated price.
    price: domain::listing::Price,

    /// Validated area.
    area: domain::listing::Area,

    /// Validated address.
    address: domain::listing::Address,

    /// Availability indicator.
    available: bool,
}

impl TryFrom<ListingPayload> for Fields {
    type Error = PayloadError;

    fn try_from(payload: ListingPayload) -> Result<Self, Self::Error> {
        use PayloadError as E;

        let ListingPayload {
            title,
            description,
            price,
            currency,
            area,
            address,
            available,
        } = payload;

        let currency = currency
            .ok_or(E::InvalidCurrency)?
            .parse::<Currency>()
            .map_err(|_| E::InvalidCurrency)?;

        Ok(Self {
            title: title
                .and_then(domain::listing::Title::new)
                .ok_or(E::InvalidTitle)?,
            description: description
                .and_then(domain::listing::Description::new)
                .ok_or(E::InvalidDescription)?,
            price: price
                .and_then(|amount| {
                    domain::listing::Price::new(common::Money {
                        amount,
                        currency,
                    })
                })
                .ok_or(E::InvalidPrice)?,
            area: area
                .and_then(domain::listing::Area::new)
                .ok_or(E::InvalidArea)?,
            address: address
                .and_then(domain::listing::Address::new)
                .ok_or(E::InvalidAddress)?,
            available,
        })
    }
}

/// Filtering parameters of a [`list`] request.
///
/// Every parameter arrives as raw text, so that a blank value can be
/// treated as absent instead of being bounced by the deserializer.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Raw availability the [`Listing`]s should have.
    pub available: Option<String>,

    /// Raw lower bound of the [`Listing`]s price.
    pub min_price: Option<String>,

    /// Raw upper bound of the [`Listing`]s price.
    pub max_price: Option<String>,
}

/// `GET /api/listings` handler.
///
/// Returns [`Listing`]s matching the provided filtering parameters, or all
/// of them if no parameters are provided.
pub async fn list(
    Extension(service): Extension<Service>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Listing>>, Rejection> {
    let ListParams {
        available,
        min_price,
        max_price,
    } = params;

    let available = match available.as_deref().map(str::trim) {
        None | Some("") => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => {
            return Err(Rejection::new(
                PayloadError::InvalidAvailability.into(),
                uri.path(),
            ));
        }
    };

    let found = service
        .execute(query::listings::List {
            available,
            min_price,
            max_price,
        })
        .await
        .map_err(|e| Rejection::new(e.into_error(), uri.path()))?;

    Ok(Json(found.into_iter().map(Listing::from).collect()))
}

/// `POST /api/listings` handler.
///
/// Accepts the new [`Listing`] for persistence and returns it with its
/// assigned ID and timestamps.
pub async fn create(
    Extension(service): Extension<Service>,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<ListingPayload>,
) -> Result<(http::StatusCode, Json<Listing>), Rejection> {
    let Fields {
        title,
        description,
        price,
        area,
        address,
        available,
    } = Fields::try_from(payload)
        .map_err(|e| Rejection::new(e.into(), uri.path()))?;

    let created = service
        .execute(command::CreateListing {
            title,
            description,
            price,
            area,
            address,
            available,
        })
        .await
        .map_err(|e| Rejection::new(e.into_error(), uri.path()))?;

    Ok((http::StatusCode::ACCEPTED, Json(created.into())))
}

/// `PUT /api/listings/:id` handler.
///
/// Replaces all the mutable fields of the identified [`Listing`].
pub async fn update(
    Extension(service): Extension<Service>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    Json(payload): Json<ListingPayload>,
) -> Result<Json<Listing>, Rejection> {
    let id = id.parse::<domain::listing::Id>().map_err(|_| {
        Rejection::new(PayloadError::InvalidId.into(), uri.path())
    })?;

    let Fields {
        title,
        description,
        price,
        area,
        address,
        available,
    } = Fields::try_from(payload)
        .map_err(|e| Rejection::new(e.into(), uri.path()))?;

    let updated = service
        .execute(command::UpdateListing {
            id,
            title,
            description,
            price,
            area,
            address,
            available,
        })
        .await
        .map_err(|e| Rejection::new(e.into_error(), uri.path()))?;

    Ok(Json(updated.into()))
}
