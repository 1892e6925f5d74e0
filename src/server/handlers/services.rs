use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use super::api_types::ApiError;
use crate::currency::{resolve, CurrencyConfig};
use crate::models::{catalog, PricedService, Service};

#[derive(Debug, Deserialize)]
pub struct ServicesQuery {
    /// Country code whose currency prices are shown in. Unknown codes
    /// price in the default currency.
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ServiceList {
    Reference(Vec<Service>),
    Priced(Vec<PricedService>),
}

#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub services: ServiceList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<&'static CurrencyConfig>,
}

/// GET /api/services[?currency=CC]
pub async fn list_services(
    query: Result<Query<ServicesQuery>, QueryRejection>,
) -> Result<Json<ServicesResponse>, ApiError> {
    let Query(query) = query?;
    let services = catalog();

    let response = match query.currency.as_deref().filter(|c| !c.trim().is_empty()) {
        None => ServicesResponse {
            services: ServiceList::Reference(services),
            currency: None,
        },
        Some(code) => {
            let config = resolve(code);
            ServicesResponse {
                services: ServiceList::Priced(
                    services.iter().map(|s| s.priced_in(config)).collect(),
                ),
                currency: Some(config),
            }
        }
    };
    Ok(Json(response))
}
