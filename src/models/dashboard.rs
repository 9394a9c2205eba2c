// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Os cards do topo, sempre restritos aos outlets visíveis ao usuário
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub revenue_today: Decimal,     // Soma do total das transações de hoje
    pub transactions_today: i64,    // Quantidade de transações de hoje
    pub unpaid_transactions: i64,   // Ainda não pagas (qualquer data)
    pub in_progress: i64,           // Status baru ou proses
    pub outlet_count: i64,          // Outlets visíveis
}
