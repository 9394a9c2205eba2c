// src/models/crm.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Mapeia o CREATE TYPE gender do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "gender", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    L,
    P,
}

// --- CLIENTE (pelanggan / member) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    #[schema(example = "Ahmad Fauzi")]
    pub name: String,
    #[schema(example = "081234567890")]
    pub phone: String,
    pub address: Option<String>,
    pub gender: Option<Gender>,

    // Destino padrão para entregas
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn location(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(length(min = 1, max = 100, message = "Nama pelanggan wajib diisi."))]
    pub name: String,
    #[validate(length(min = 6, max = 20, message = "Nomor telepon tidak valid."))]
    pub phone: String,
    pub address: Option<String>,
    pub gender: Option<Gender>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude tidak valid."))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude tidak valid."))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerFilter {
    /// Busca por nome ou telefone
    pub search: Option<String>,
}
