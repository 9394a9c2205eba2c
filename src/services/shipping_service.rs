// src/services/shipping_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OutletRepository,
    models::{outlet::Outlet, shipping::ShippingQuote},
};

/// Raio médio da Terra em km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const OUTLET_LOCATION_NOT_CONFIGURED: &str = "Outlet location not configured";

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Distância do grande círculo (Haversine, forma asin/sqrt), em km com 2 casas.
/// Entradas em graus decimais, sem validação de faixa.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    round2(EARTH_RADIUS_KM * c)
}

pub fn cost(distance_km: f64, price_per_km: i64) -> f64 {
    round2(distance_km * price_per_km as f64)
}

/// Cotação a partir de um outlet já carregado (ou ausente).
pub fn quote(outlet: Option<Outlet>, latitude: f64, longitude: f64) -> Result<ShippingQuote, AppError> {
    let outlet = outlet.ok_or_else(|| AppError::NotFound("Outlet tidak ditemukan.".to_string()))?;

    let (outlet_lat, outlet_lng) = outlet
        .location()
        .ok_or_else(|| AppError::Precondition(OUTLET_LOCATION_NOT_CONFIGURED.to_string()))?;

    let distance = distance_km(outlet_lat, outlet_lng, latitude, longitude);
    let price_per_km = outlet.price_per_km;

    Ok(ShippingQuote {
        distance,
        cost: cost(distance, price_per_km),
        price_per_km,
        outlet,
    })
}

#[derive(Clone)]
pub struct ShippingService {
    outlet_repo: OutletRepository,
}

impl ShippingService {
    pub fn new(outlet_repo: OutletRepository) -> Self {
        Self { outlet_repo }
    }

    /// Busca o outlet e calcula distância e custo até o destino.
    pub async fn shipping_for(
        &self,
        outlet_id: Uuid,
        latitude: f64,
        longitude: f64,
    ) -> Result<ShippingQuote, AppError> {
        let outlet = self.outlet_repo.find_by_id(outlet_id).await?;
        let quote = quote(outlet, latitude, longitude)?;

        tracing::debug!(
            %outlet_id,
            distance_km = quote.distance,
            cost = quote.cost,
            "frete calculado"
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn outlet(latitude: Option<f64>, longitude: Option<f64>, price_per_km: i64) -> Outlet {
        Outlet {
            id: Uuid::new_v4(),
            name: "Laundry Kemang".into(),
            address: "Jl. Kemang Raya 10".into(),
            phone: None,
            latitude,
            longitude,
            price_per_km,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn identical_points_are_zero_km_apart() {
        assert_eq!(distance_km(-6.2607, 106.8137, -6.2607, 106.8137), 0.0);
        assert_eq!(distance_km(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            ((-6.2607, 106.8137), (-6.2088, 106.8456)),
            ((51.5074, -0.1278), (48.8566, 2.3522)),
            ((-33.8688, 151.2093), (35.6762, 139.6503)),
        ];
        for ((a_lat, a_lon), (b_lat, b_lon)) in pairs {
            assert_eq!(
                distance_km(a_lat, a_lon, b_lat, b_lon),
                distance_km(b_lat, b_lon, a_lat, a_lon)
            );
        }
    }

    #[test]
    fn equator_antipode_is_half_circumference() {
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - 20015.09).abs() <= 0.01, "got {d}");
        let d = distance_km(0.0, 45.0, 0.0, 225.0);
        assert!((d - 20015.09).abs() <= 0.01, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.19).abs() <= 0.1, "got {d}");
    }

    #[test]
    fn result_has_two_decimals() {
        let d = distance_km(-6.2607, 106.8137, -6.2088, 106.8456);
        assert_eq!(d, (d * 100.0).round() / 100.0);
    }

    #[test]
    fn out_of_range_input_is_not_rejected() {
        let d = distance_km(120.0, 0.0, 0.0, 0.0);
        assert!(d.is_finite());
    }

    #[test]
    fn cost_is_rounded_product() {
        assert_eq!(cost(0.0, 5000), 0.0);
        assert_eq!(cost(5.87, 3000), 17610.0);
        assert_eq!(cost(12.34, 0), 0.0);
        let d = 7.77;
        assert_eq!(cost(d, 2500), ((d * 2500.0) * 100.0_f64).round() / 100.0);
    }

    #[test]
    fn missing_outlet_is_not_found() {
        assert!(matches!(quote(None, 0.0, 0.0), Err(AppError::NotFound(_))));
    }

    #[test]
    fn outlet_without_coordinates_fails_precondition() {
        for o in [
            outlet(None, None, 3000),
            outlet(Some(-6.26), None, 3000),
            outlet(None, Some(106.81), 3000),
        ] {
            match quote(Some(o), -6.2, 106.8) {
                Err(AppError::Precondition(msg)) => assert_eq!(msg, OUTLET_LOCATION_NOT_CONFIGURED),
                other => panic!("esperado Precondition, veio {other:?}"),
            }
        }
    }

    #[test]
    fn configured_outlet_yields_distance_times_rate() {
        let o = outlet(Some(-6.2607), Some(106.8137), 3000);
        let q = quote(Some(o.clone()), -6.2088, 106.8456).unwrap();
        assert_eq!(q.distance, distance_km(-6.2607, 106.8137, -6.2088, 106.8456));
        assert_eq!(q.cost, ((q.distance * 3000.0) * 100.0_f64).round() / 100.0);
        assert_eq!(q.price_per_km, 3000);
        assert_eq!(q.outlet.id, o.id);
    }
}
