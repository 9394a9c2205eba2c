// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- ENUMS ---

// Mapeia o CREATE TYPE package_unit do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "package_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PackageUnit {
    Kg,
    Pcs,
    Meter,
}

// ---
// 1. Jenis Paket (categoria global: Kiloan, Selimut, Bed Cover...)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageType {
    pub id: Uuid,
    #[schema(example = "Kiloan")]
    pub name: String,
    #[schema(example = "Cuci + setrika per kilogram")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageTypePayload {
    #[validate(length(min = 1, max = 100, message = "Nama jenis paket wajib diisi."))]
    pub name: String,
    pub description: Option<String>,
}

// ---
// 2. Paket (preço por outlet)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    pub outlet_id: Uuid,
    pub package_type_id: Uuid,
    #[schema(example = "Cuci Kering Setrika")]
    pub name: String,
    pub unit: PackageUnit,
    #[schema(example = 7000.0)]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackagePayload {
    pub outlet_id: Uuid,
    pub package_type_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Nama paket wajib diisi."))]
    pub name: String,
    pub unit: PackageUnit,
    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PackageFilter {
    pub outlet_id: Option<Uuid>,
    pub package_type_id: Option<Uuid>,
}

pub(crate) fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Nilai tidak boleh negatif.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_fails_validation() {
        let payload = PackagePayload {
            outlet_id: Uuid::new_v4(),
            package_type_id: Uuid::new_v4(),
            name: "Express".into(),
            unit: PackageUnit::Kg,
            price: Decimal::new(-1, 0),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn zero_is_a_valid_price() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(1250050, 2)).is_ok());
    }
}
