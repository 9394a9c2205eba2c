// src/models/shipping.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::outlet::Outlet;

// POST /api/calculate-shipping
// Sem validação de faixa: coordenadas fora de [-90, 90] / [-180, 180]
// produzem um resultado matematicamente válido, porém sem sentido.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRequest {
    pub outlet_id: Uuid,
    #[schema(example = -6.2088)]
    pub latitude: f64,
    #[schema(example = 106.8456)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    #[schema(example = 5.87)]
    pub distance: f64,
    #[schema(example = 17610.0)]
    pub cost: f64,
    pub outlet: Outlet,
    #[schema(example = 3000)]
    pub price_per_km: i64,
}
