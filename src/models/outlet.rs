// src/models/outlet.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ---
// Outlet (a filial física da lavanderia)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Outlet {
    pub id: Uuid,
    #[schema(example = "Laundry Kemang")]
    pub name: String,
    #[schema(example = "Jl. Kemang Raya No. 10, Jakarta")]
    pub address: String,
    #[schema(example = "021-7190000")]
    pub phone: Option<String>,

    // Sem coordenadas o outlet não pode calcular frete
    #[schema(example = -6.2607)]
    pub latitude: Option<f64>,
    #[schema(example = 106.8137)]
    pub longitude: Option<f64>,

    // Tarifa de entrega por quilômetro (unidades inteiras de moeda)
    #[schema(example = 3000)]
    pub price_per_km: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Outlet {
    /// Coordenadas configuradas, se latitude e longitude existirem.
    pub fn location(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

// O mesmo payload serve para criar e atualizar
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_coordinates_pair"))]
pub struct OutletPayload {
    #[validate(length(min = 1, max = 100, message = "Nama outlet wajib diisi."))]
    pub name: String,
    #[validate(length(min = 1, message = "Alamat wajib diisi."))]
    pub address: String,
    #[validate(length(max = 20, message = "Nomor telepon terlalu panjang."))]
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 0, message = "Tarif per km tidak boleh negatif."))]
    #[serde(default)]
    pub price_per_km: i64,
}

// Latitude e longitude andam juntas: ou as duas, ou nenhuma.
fn validate_coordinates_pair(payload: &OutletPayload) -> Result<(), ValidationError> {
    if payload.latitude.is_some() != payload.longitude.is_some() {
        let mut err = ValidationError::new("coordinates");
        err.message = Some("Latitude dan longitude harus diisi bersamaan.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(latitude: Option<f64>, longitude: Option<f64>, price_per_km: i64) -> OutletPayload {
        OutletPayload {
            name: "Laundry Depok".into(),
            address: "Jl. Margonda 1".into(),
            phone: None,
            latitude,
            longitude,
            price_per_km,
        }
    }

    #[test]
    fn coordinates_must_come_in_pairs() {
        assert!(payload(Some(-6.4), None, 2000).validate().is_err());
        assert!(payload(None, Some(106.8), 2000).validate().is_err());
        assert!(payload(Some(-6.4), Some(106.8), 2000).validate().is_ok());
        assert!(payload(None, None, 2000).validate().is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(payload(None, None, -1).validate().is_err());
    }
}
