// src/services/report_service.rs

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use crate::{
    common::error::AppError,
    db::{OutletRepository, ReportRepository},
    models::{
        auth::Actor,
        report::{ReportRow, ReportSummary, TransactionReport},
        transaction::TransactionFilter,
    },
    services::access_control::OutletScope,
};

pub const REPORT_TITLE: &str = "LAPORAN TRANSAKSI LAUNDRY";
const COLUMNS: [&str; 8] = [
    "No",
    "Kode Invoice",
    "Tanggal",
    "Pelanggan",
    "Outlet",
    "Status",
    "Pembayaran",
    "Total",
];
const COLUMN_WIDTHS: [f64; 8] = [6.0, 22.0, 18.0, 28.0, 24.0, 12.0, 14.0, 16.0];
const TABLE_HEADER_ROW: u32 = 5;

fn fmt_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn period_label(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("Periode: {} - {}", fmt_date(s), fmt_date(e)),
        (Some(s), None) => format!("Periode: sejak {}", fmt_date(s)),
        (None, Some(e)) => format!("Periode: s/d {}", fmt_date(e)),
        (None, None) => "Periode: Semua".to_string(),
    }
}

pub fn outlet_label(outlet_name: Option<&str>) -> String {
    format!("Outlet: {}", outlet_name.unwrap_or("Semua Outlet"))
}

/// Bloco de cabeçalho da planilha (título, período, outlet, data de geração).
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub period: String,
    pub outlet: String,
    pub generated_at: String,
}

impl ReportHeader {
    pub fn new(
        filter: &TransactionFilter,
        outlet_name: Option<&str>,
        generated_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            period: period_label(filter.start_date, filter.end_date),
            outlet: outlet_label(outlet_name),
            generated_at: format!("Dicetak: {}", generated_at.format("%d/%m/%Y %H:%M")),
        }
    }
}

fn money(value: rust_decimal::Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Monta o .xlsx em memória.
pub fn build_workbook(
    header: &ReportHeader,
    rows: &[ReportRow],
    summary: &ReportSummary,
    offset: FixedOffset,
) -> Result<Vec<u8>, XlsxError> {
    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center);
    let info_format = Format::new().set_italic();
    let head_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(0xD9E1F2));
    let cell_format = Format::new().set_border(FormatBorder::Thin);
    let number_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let money_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_num_format("#,##0");
    let label_format = Format::new().set_bold();
    let total_format = Format::new().set_bold().set_num_format("#,##0");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Laporan")?;

    let last_col = (COLUMNS.len() - 1) as u16;

    // Cabeçalho fixo
    sheet.merge_range(0, 0, 0, last_col, REPORT_TITLE, &title_format)?;
    sheet.write_string_with_format(1, 0, &header.period, &info_format)?;
    sheet.write_string_with_format(2, 0, &header.outlet, &info_format)?;
    sheet.write_string_with_format(3, 0, &header.generated_at, &info_format)?;

    // Tabela
    for (col, (name, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        sheet.write_string_with_format(TABLE_HEADER_ROW, col as u16, *name, &head_format)?;
        sheet.set_column_width(col as u16, width)?;
    }

    let mut row_idx = TABLE_HEADER_ROW;
    for (i, row) in rows.iter().enumerate() {
        row_idx += 1;
        let date = row
            .transaction_date
            .with_timezone(&offset)
            .format("%d/%m/%Y %H:%M")
            .to_string();

        sheet.write_number_with_format(row_idx, 0, (i + 1) as f64, &number_format)?;
        sheet.write_string_with_format(row_idx, 1, &row.invoice_code, &cell_format)?;
        sheet.write_string_with_format(row_idx, 2, &date, &cell_format)?;
        sheet.write_string_with_format(row_idx, 3, &row.customer_name, &cell_format)?;
        sheet.write_string_with_format(row_idx, 4, &row.outlet_name, &cell_format)?;
        sheet.write_string_with_format(row_idx, 5, row.status_label(), &cell_format)?;
        sheet.write_string_with_format(row_idx, 6, row.payment_label(), &cell_format)?;
        sheet.write_number_with_format(row_idx, 7, money(row.total), &money_format)?;
    }

    // Resumo, uma linha em branco depois da tabela
    let summary_row = row_idx + 2;
    sheet.write_string_with_format(summary_row, 0, "Total Pendapatan", &label_format)?;
    sheet.write_number_with_format(summary_row, 7, money(summary.total_revenue), &total_format)?;
    sheet.write_string_with_format(summary_row + 1, 0, "Jumlah Transaksi", &label_format)?;
    sheet.write_number(summary_row + 1, 7, summary.transaction_count as f64)?;
    sheet.write_string_with_format(summary_row + 2, 0, "Lunas", &label_format)?;
    sheet.write_number(summary_row + 2, 7, summary.paid_count as f64)?;
    sheet.write_string_with_format(summary_row + 3, 0, "Belum Lunas", &label_format)?;
    sheet.write_number(summary_row + 3, 7, summary.unpaid_count as f64)?;

    workbook.save_to_buffer()
}

#[derive(Clone)]
pub struct ReportService {
    repo: ReportRepository,
    outlet_repo: OutletRepository,
    offset: FixedOffset,
}

impl ReportService {
    pub fn new(repo: ReportRepository, outlet_repo: OutletRepository, offset: FixedOffset) -> Self {
        Self { repo, outlet_repo, offset }
    }

    pub async fn transaction_report(
        &self,
        actor: &Actor,
        filter: &TransactionFilter,
    ) -> Result<TransactionReport, AppError> {
        let scope = OutletScope::of(actor).narrow(filter.outlet_id)?;
        let rows = self.repo.transaction_rows(scope.as_filter(), filter, self.offset).await?;
        let summary = ReportSummary::from_rows(&rows);
        Ok(TransactionReport { rows, summary })
    }

    /// Gera a planilha e devolve (nome do arquivo, bytes).
    pub async fn export_transactions(
        &self,
        actor: &Actor,
        filter: &TransactionFilter,
    ) -> Result<(String, Vec<u8>), AppError> {
        let scope = OutletScope::of(actor).narrow(filter.outlet_id)?;
        let rows = self.repo.transaction_rows(scope.as_filter(), filter, self.offset).await?;
        let summary = ReportSummary::from_rows(&rows);

        let outlet_name = match scope {
            OutletScope::Only(id) => self.outlet_repo.find_by_id(id).await?.map(|o| o.name),
            _ => None,
        };

        let now = Utc::now().with_timezone(&self.offset);
        let header = ReportHeader::new(filter, outlet_name.as_deref(), now);
        let bytes = build_workbook(&header, &rows, &summary, self.offset)?;

        tracing::info!(
            actor_id = %actor.id,
            rows = rows.len(),
            bytes = bytes.len(),
            "relatório exportado"
        );

        let filename = format!("laporan-transaksi-{}.xlsx", now.format("%Y%m%d%H%M"));
        Ok((filename, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn row(invoice: &str, status: &str, payment_status: &str, total: i64) -> ReportRow {
        ReportRow {
            id: Uuid::new_v4(),
            invoice_code: invoice.into(),
            transaction_date: Utc::now(),
            customer_name: "Dewi".into(),
            outlet_name: "Laundry Kemang".into(),
            status: status.into(),
            payment_status: payment_status.into(),
            total: Decimal::new(total, 0),
        }
    }

    #[test]
    fn period_label_variants() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(period_label(Some(jan1), Some(jan31)), "Periode: 01/01/2024 - 31/01/2024");
        assert_eq!(period_label(Some(jan1), None), "Periode: sejak 01/01/2024");
        assert_eq!(period_label(None, Some(jan31)), "Periode: s/d 31/01/2024");
        assert_eq!(period_label(None, None), "Periode: Semua");
    }

    #[test]
    fn outlet_label_defaults_to_all() {
        assert_eq!(outlet_label(Some("Laundry Depok")), "Outlet: Laundry Depok");
        assert_eq!(outlet_label(None), "Outlet: Semua Outlet");
    }

    #[test]
    fn header_uses_local_generation_time() {
        let generated = DateTime::parse_from_rfc3339("2024-03-05T14:07:00+07:00").unwrap();
        let header = ReportHeader::new(&TransactionFilter::default(), None, generated);
        assert_eq!(header.generated_at, "Dicetak: 05/03/2024 14:07");
        assert_eq!(header.period, "Periode: Semua");
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let rows = vec![
            row("INV-20240305-0001", "selesai", "dibayar", 56_000),
            row("INV-20240305-0002", "ditunda", "belum_dibayar", 21_000),
        ];
        let summary = ReportSummary::from_rows(&rows);
        let header = ReportHeader::new(&TransactionFilter::default(), Some("Laundry Kemang"), Utc::now().with_timezone(&wib()));

        let bytes = build_workbook(&header, &rows, &summary, wib()).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_report_still_builds() {
        let header = ReportHeader::new(&TransactionFilter::default(), None, Utc::now().with_timezone(&wib()));
        let bytes = build_workbook(&header, &[], &ReportSummary::default(), wib()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
