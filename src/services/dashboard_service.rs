// src/services/dashboard_service.rs

use chrono::{DateTime, FixedOffset, Utc};

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{auth::Actor, dashboard::DashboardSummary, transaction::local_midnight},
    services::access_control::OutletScope,
};

/// Intervalo `[meia-noite de hoje, meia-noite de amanhã)` no fuso local, em UTC.
pub fn day_bounds(now: DateTime<Utc>, offset: FixedOffset) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let today = now.with_timezone(&offset).date_naive();
    let start = local_midnight(today, offset)?;
    let end = local_midnight(today.succ_opt()?, offset)?;
    Some((start, end))
}

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    offset: FixedOffset,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, offset: FixedOffset) -> Self {
        Self { repo, offset }
    }

    /// Números do painel, sempre recortados pelo escopo de outlet do ator.
    pub async fn get_summary(&self, actor: &Actor) -> Result<DashboardSummary, AppError> {
        let scope = OutletScope::of(actor);
        if scope == OutletScope::Nothing {
            return Ok(DashboardSummary::default());
        }
        let today = day_bounds(Utc::now(), self.offset)
            .ok_or_else(|| anyhow::anyhow!("data fora do intervalo suportado"))?;
        self.repo.get_summary(scope.as_filter(), today).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_follows_local_calendar() {
        let wib = FixedOffset::east_opt(7 * 3600).unwrap();
        // 23:30 UTC de 05/03 já é 06/03 em WIB
        let now = DateTime::parse_from_rfc3339("2024-03-05T23:30:00Z").unwrap().with_timezone(&Utc);
        let (start, end) = day_bounds(now, wib).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-03-05T17:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-03-06T17:00:00+00:00");
        assert!(start <= now && now < end);
    }
}
