//! Service catalog.

use serde::Serialize;

use crate::currency::{convert, format, CurrencyConfig};

/// A bookable offering. `price` is in the reference currency (USD).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub duration_minutes: u32,
}

/// A service with its price shown in a display currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedService {
    #[serde(flatten)]
    pub service: Service,
    pub currency: &'static str,
    pub local_price: f64,
    pub formatted_price: String,
}

impl Service {
    pub fn priced_in(&self, config: &'static CurrencyConfig) -> PricedService {
        let local_price = convert(self.price, config.code);
        PricedService {
            service: self.clone(),
            currency: config.code,
            local_price,
            formatted_price: format(local_price, config),
        }
    }
}

/// The static catalog.
pub fn catalog() -> Vec<Service> {
    vec![
        Service {
            id: "svc_home_nursing",
            name: "Home Nursing Visit",
            category: "nursing",
            description: "A registered nurse visits for wound care, injections or vitals monitoring.",
            price: 45.0,
            duration_minutes: 60,
        },
        Service {
            id: "svc_gp_consult",
            name: "General Practitioner Consultation",
            category: "consultation",
            description: "In-person or video consultation with a licensed GP.",
            price: 30.0,
            duration_minutes: 30,
        },
        Service {
            id: "svc_lab_sample",
            name: "Lab Sample Collection",
            category: "laboratory",
            description: "Blood or urine sample collected at home and delivered to a partner lab.",
            price: 25.0,
            duration_minutes: 20,
        },
        Service {
            id: "svc_physiotherapy",
            name: "Physiotherapy Session",
            category: "rehabilitation",
            description: "Guided rehabilitation session with a certified physiotherapist.",
            price: 55.0,
            duration_minutes: 45,
        },
        Service {
            id: "svc_elder_care",
            name: "Elderly Care (Half Day)",
            category: "caregiving",
            description: "Four hours of companionship, medication reminders and mobility help.",
            price: 80.0,
            duration_minutes: 240,
        },
    ]
}
