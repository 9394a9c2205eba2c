// src/services/transaction_service.rs

use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate, Utc};
use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        transaction_repo::{NewTransaction, NewTransactionItem},
        CatalogRepository, CrmRepository, OutletRepository, TransactionRepository,
    },
    models::{
        auth::Actor,
        transaction::{
            CreateTransactionPayload, PaymentStatus, Transaction, TransactionDetail,
            TransactionFilter, TransactionStatus,
        },
    },
    services::{
        access_control::{OutletScope, KASIR_WITHOUT_OUTLET},
        shipping_service,
    },
};

/// Arredonda valores monetários para 2 casas (meio para longe do zero).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Código de fatura: INV-AAAAMMDD-NNNN, sequência diária começando em 1.
pub fn invoice_code(date: NaiveDate, sequence: i64) -> String {
    format!("INV-{}-{:04}", date.format("%Y%m%d"), sequence)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub additional_cost: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
}

/// subtotal − desconto + imposto + biaya tambahan + frete.
/// O imposto incide sobre o subtotal já descontado.
pub fn compute_totals(
    line_subtotals: &[Decimal],
    discount: Decimal,
    tax_percent: Decimal,
    additional_cost: Decimal,
    shipping_cost: Decimal,
) -> Result<Totals, AppError> {
    let subtotal: Decimal = line_subtotals.iter().copied().sum();

    if discount > subtotal {
        return Err(AppError::BadRequest(
            "Diskon tidak boleh melebihi subtotal.".to_string(),
        ));
    }

    let tax = round_money((subtotal - discount) * tax_percent / Decimal::ONE_HUNDRED);
    let total = subtotal - discount + tax + additional_cost + shipping_cost;

    Ok(Totals {
        subtotal,
        discount,
        tax,
        additional_cost,
        shipping_cost,
        total,
    })
}

/// Em qual outlet a transação será registrada.
/// Quem tem escopo restrito fica preso ao próprio outlet.
pub fn resolve_outlet(actor: &Actor, requested: Option<Uuid>) -> Result<Uuid, AppError> {
    match (OutletScope::of(actor), requested) {
        (OutletScope::Only(own), None) => Ok(own),
        (OutletScope::Only(own), Some(id)) if id == own => Ok(own),
        (OutletScope::Only(_), Some(_)) => Err(AppError::Unauthorized(
            "Anda tidak memiliki akses ke outlet ini.".to_string(),
        )),
        (OutletScope::All, Some(id)) => Ok(id),
        (OutletScope::All, None) => Err(AppError::BadRequest("Outlet wajib dipilih.".to_string())),
        (OutletScope::Nothing, _) => Err(AppError::Unauthorized(KASIR_WITHOUT_OUTLET.to_string())),
    }
}

#[derive(Clone)]
pub struct TransactionService {
    repo: TransactionRepository,
    catalog_repo: CatalogRepository,
    crm_repo: CrmRepository,
    outlet_repo: OutletRepository,
    pool: PgPool,
    // Fuso do calendário da loja (data da fatura e filtros de período)
    offset: FixedOffset,
}

impl TransactionService {
    pub fn new(
        repo: TransactionRepository,
        catalog_repo: CatalogRepository,
        crm_repo: CrmRepository,
        outlet_repo: OutletRepository,
        pool: PgPool,
        offset: FixedOffset,
    ) -> Self {
        Self { repo, catalog_repo, crm_repo, outlet_repo, pool, offset }
    }

    pub async fn create_transaction(
        &self,
        actor: &Actor,
        payload: &CreateTransactionPayload,
    ) -> Result<TransactionDetail, AppError> {
        let outlet_id = resolve_outlet(actor, payload.outlet_id)?;
        let outlet = self.outlet_repo.find_by_id(outlet_id).await?;

        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Cliente
        let customer = self
            .crm_repo
            .find_customer(&mut *tx, payload.customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pelanggan tidak ditemukan.".to_string()))?;

        // 3. Pacotes: todos precisam existir e pertencer ao outlet
        let package_ids: Vec<Uuid> = payload.items.iter().map(|i| i.package_id).collect();
        let packages: HashMap<Uuid, _> = self
            .catalog_repo
            .find_packages(&mut *tx, &package_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut lines = Vec::with_capacity(payload.items.len());
        for item in &payload.items {
            let package = packages
                .get(&item.package_id)
                .ok_or_else(|| AppError::NotFound(format!("Paket {} tidak ditemukan.", item.package_id)))?;
            if package.outlet_id != outlet_id {
                return Err(AppError::BadRequest(format!(
                    "Paket '{}' bukan milik outlet ini.",
                    package.name
                )));
            }
            lines.push(NewTransactionItem {
                package_id: package.id,
                quantity: item.quantity,
                unit_price: package.price,
                subtotal: round_money(item.quantity * package.price),
                notes: item.notes.as_deref(),
            });
        }

        // 4. Frete (só para entrega): destino explícito ou coordenadas do cliente
        let (shipping_distance, shipping_cost) = if payload.delivery {
            let destination = payload
                .destination_latitude
                .zip(payload.destination_longitude)
                .or_else(|| customer.location())
                .ok_or_else(|| {
                    AppError::Precondition("Lokasi tujuan pengiriman belum diisi.".to_string())
                })?;
            let quote = shipping_service::quote(outlet, destination.0, destination.1)?;
            let cost = Decimal::from_f64(quote.cost)
                .map(round_money)
                .ok_or_else(|| anyhow::anyhow!("custo de frete inválido: {}", quote.cost))?;
            (Some(quote.distance), cost)
        } else {
            if outlet.is_none() {
                return Err(AppError::NotFound("Outlet tidak ditemukan.".to_string()));
            }
            (None, Decimal::ZERO)
        };

        // 5. Totais
        let line_subtotals: Vec<Decimal> = lines.iter().map(|l| l.subtotal).collect();
        let totals = compute_totals(
            &line_subtotals,
            payload.discount,
            payload.tax_percent,
            payload.additional_cost,
            shipping_cost,
        )?;

        // 6. Código da fatura
        let now = Utc::now();
        let local_day = now.with_timezone(&self.offset).date_naive();
        let sequence = self.repo.next_invoice_sequence(&mut *tx, local_day).await?;
        let code = invoice_code(local_day, sequence);

        // 7. Grava cabeçalho e itens
        let transaction = self
            .repo
            .insert_transaction(
                &mut *tx,
                &NewTransaction {
                    outlet_id,
                    customer_id: customer.id,
                    user_id: actor.id,
                    invoice_code: &code,
                    transaction_date: now,
                    due_date: payload.due_date,
                    subtotal: totals.subtotal,
                    discount: totals.discount,
                    tax: totals.tax,
                    additional_cost: totals.additional_cost,
                    is_delivery: payload.delivery,
                    shipping_distance,
                    shipping_cost: totals.shipping_cost,
                    total: totals.total,
                    notes: payload.notes.as_deref(),
                },
            )
            .await?;

        for line in &lines {
            self.repo.insert_item(&mut *tx, transaction.id, line).await?;
        }

        // 8. Commit
        tx.commit().await?;

        tracing::info!(
            transaction_id = %transaction.id,
            invoice = %transaction.invoice_code,
            %outlet_id,
            total = %transaction.total,
            "transação registrada"
        );

        self.detail(transaction).await
    }

    pub async fn list_transactions(
        &self,
        actor: &Actor,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, AppError> {
        let scope = OutletScope::of(actor).narrow(filter.outlet_id)?;
        self.repo.list(scope.as_filter(), filter, self.offset).await
    }

    pub async fn get_transaction(&self, actor: &Actor, id: Uuid) -> Result<TransactionDetail, AppError> {
        let transaction = self.find_scoped(actor, id).await?;
        self.detail(transaction).await
    }

    pub async fn update_status(
        &self,
        actor: &Actor,
        id: Uuid,
        next: TransactionStatus,
    ) -> Result<Transaction, AppError> {
        let current = self.find_scoped(actor, id).await?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::InvalidStatusTransition {
                from: current.status,
                to: next,
            });
        }

        let updated = self
            .repo
            .update_status(id, current.status, next)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Status transaksi baru saja diubah, muat ulang data.".to_string())
            })?;
        tracing::info!(
            transaction_id = %id,
            from = current.status.as_str(),
            to = next.as_str(),
            "status alterado"
        );
        Ok(updated)
    }

    pub async fn pay(&self, actor: &Actor, id: Uuid) -> Result<Transaction, AppError> {
        let current = self.find_scoped(actor, id).await?;

        if current.payment_status == PaymentStatus::Dibayar {
            return Err(AppError::Conflict("Transaksi sudah lunas.".to_string()));
        }
        if current.status == TransactionStatus::Batal {
            return Err(AppError::Conflict("Transaksi yang dibatalkan tidak dapat dibayar.".to_string()));
        }

        // Outra requisição pode ter pago ou cancelado depois da leitura acima
        let updated = self
            .repo
            .mark_paid(id, Utc::now())
            .await?
            .ok_or_else(|| AppError::Conflict("Transaksi sudah lunas atau dibatalkan.".to_string()))?;
        tracing::info!(transaction_id = %id, total = %updated.total, "pagamento registrado");
        Ok(updated)
    }

    pub async fn delete_transaction(&self, actor: &Actor, id: Uuid) -> Result<(), AppError> {
        self.find_scoped(actor, id).await?;
        self.repo.delete(id).await?;
        tracing::info!(transaction_id = %id, "transação removida");
        Ok(())
    }

    async fn find_scoped(&self, actor: &Actor, id: Uuid) -> Result<Transaction, AppError> {
        self.repo
            .find_by_id(id, OutletScope::of(actor).as_filter())
            .await?
            .ok_or_else(|| AppError::NotFound("Transaksi tidak ditemukan.".to_string()))
    }

    async fn detail(&self, transaction: Transaction) -> Result<TransactionDetail, AppError> {
        let names = self.repo.find_names(transaction.id).await?;
        let items = self.repo.list_items(transaction.id).await?;
        Ok(TransactionDetail {
            transaction,
            customer_name: names.customer_name,
            outlet_name: names.outlet_name,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rbac::Role;

    fn d(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    #[test]
    fn invoice_code_is_zero_padded_per_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(invoice_code(date, 1), "INV-20240115-0001");
        assert_eq!(invoice_code(date, 42), "INV-20240115-0042");
        assert_eq!(invoice_code(date, 12345), "INV-20240115-12345");
    }

    #[test]
    fn totals_without_extras_equal_subtotal() {
        let t = compute_totals(
            &[d(21_000, 0), d(35_000, 0)],
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(t.subtotal, d(56_000, 0));
        assert_eq!(t.total, d(56_000, 0));
        assert_eq!(t.tax, Decimal::ZERO);
    }

    #[test]
    fn tax_applies_after_discount() {
        // (100.000 - 10.000) * 11% = 9.900
        let t = compute_totals(
            &[d(100_000, 0)],
            d(10_000, 0),
            d(11, 0),
            d(5_000, 0),
            d(17_610, 0),
        )
        .unwrap();
        assert_eq!(t.tax, d(9_900, 0));
        assert_eq!(t.total, d(100_000 - 10_000 + 9_900 + 5_000 + 17_610, 0));
    }

    #[test]
    fn tax_is_rounded_half_away_from_zero() {
        // 10,05 * 5% = 0,5025 -> 0,50 ; 10,10 * 5% = 0,505 -> 0,51
        let t = compute_totals(&[d(1005, 2)], Decimal::ZERO, d(5, 0), Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(t.tax, d(50, 2));
        let t = compute_totals(&[d(1010, 2)], Decimal::ZERO, d(5, 0), Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(t.tax, d(51, 2));
    }

    #[test]
    fn discount_above_subtotal_is_rejected() {
        let err = compute_totals(&[d(10_000, 0)], d(10_001, 0), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn money_rounding() {
        assert_eq!(round_money(d(12345, 3)), d(1235, 2));
        assert_eq!(round_money(d(-12345, 3)), d(-1235, 2));
        assert_eq!(round_money(d(7000, 0)), d(7000, 0));
    }

    #[test]
    fn kasir_is_pinned_to_own_outlet() {
        let own = Uuid::new_v4();
        let kasir = Actor::new(Uuid::new_v4(), vec![Role::Kasir], Some(own));
        assert_eq!(resolve_outlet(&kasir, None).unwrap(), own);
        assert_eq!(resolve_outlet(&kasir, Some(own)).unwrap(), own);
        assert!(matches!(
            resolve_outlet(&kasir, Some(Uuid::new_v4())),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn global_actor_must_pick_outlet() {
        let admin = Actor::new(Uuid::new_v4(), vec![Role::Admin], None);
        let target = Uuid::new_v4();
        assert_eq!(resolve_outlet(&admin, Some(target)).unwrap(), target);
        assert!(matches!(resolve_outlet(&admin, None), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn kasir_without_outlet_cannot_resolve() {
        let kasir = Actor::new(Uuid::new_v4(), vec![Role::Kasir], None);
        match resolve_outlet(&kasir, None) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, KASIR_WITHOUT_OUTLET),
            other => panic!("esperado Unauthorized, veio {other:?}"),
        }
    }
}
