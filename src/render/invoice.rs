use crate::errors::{AppError, AppResult};
use crate::models::record::WorkRecord;
use crate::render::DocumentRenderer;
use crate::render::pdf::{PAGE_H, PAGE_W, PdfCanvas};
use crate::utils::formatting::{hours, money_whole};
use crate::utils::{date, time};

const LEFT: f32 = 40.0;
const RIGHT_COL: f32 = 400.0;
const VALUE_COL: f32 = 480.0;

/// Timesheet invoice laid out at fixed offsets on a single Letter page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfInvoiceRenderer;

impl PdfInvoiceRenderer {
    fn draw_metadata(pdf: &mut PdfCanvas, rec: &WorkRecord) {
        let rows = [
            ("Date:", date::to_us(&rec.created)),
            ("Invoice:", rec.number.clone()),
            ("Payment Terms:", format!("Net {}", rec.payment_terms)),
            ("Due Date:", date::to_us(&rec.due)),
        ];

        let mut y = PAGE_H - 50.0;
        for (label, value) in rows {
            pdf.text(RIGHT_COL, y, 11.0, true, label);
            pdf.text(VALUE_COL, y, 11.0, false, &value);
            y -= 20.0;
        }
    }

    fn draw_addresses(pdf: &mut PdfCanvas, rec: &WorkRecord) {
        let p = &rec.parties;

        let mut y = PAGE_H - 180.0;
        pdf.text(LEFT, y, 12.0, true, "FROM:");
        y -= 20.0;
        pdf.text(LEFT, y, 11.0, false, &p.payee);
        y -= 20.0;
        pdf.text(LEFT, y, 11.0, false, &p.payee_address);

        let mut y = PAGE_H - 180.0;
        pdf.text(RIGHT_COL, y, 12.0, true, "TO:");
        y -= 20.0;
        pdf.text(RIGHT_COL, y, 11.0, false, &p.payor);
        for line in p.payor_address.split(',') {
            y -= 20.0;
            pdf.text(RIGHT_COL, y, 11.0, false, line.trim());
        }
        y -= 20.0;
        pdf.text(RIGHT_COL, y, 11.0, false, &p.payor_phone);
    }

    /// Work table plus totals row; returns the y just below the table.
    fn draw_table(pdf: &mut PdfCanvas, rec: &WorkRecord) -> f32 {
        let right_edge = PAGE_W - LEFT;
        let amount_x = PAGE_W - 45.0;

        let mut y = PAGE_H - 320.0;
        pdf.hline(LEFT, right_edge, y + 5.0);

        let headers = [
            (45.0, "In"),
            (90.0, "Out"),
            (140.0, "Description"),
            (340.0, "Hrs Worked"),
            (430.0, "Unit Price"),
            (520.0, "Line Total"),
        ];
        for (x, label) in headers {
            pdf.text(x, y - 10.0, 10.0, true, label);
        }
        pdf.hline(LEFT, right_edge, y - 18.0);

        y -= 35.0;
        for day in rec.days.iter().flatten() {
            pdf.text(45.0, y, 10.0, false, &time::to_db(&day.time_in));
            pdf.text(90.0, y, 10.0, false, &time::to_db(&day.time_out));
            pdf.text(140.0, y, 10.0, false, &day.description());
            pdf.text(340.0, y, 10.0, false, &hours(day.hours));
            pdf.text(430.0, y, 10.0, false, &format!("[${:.0}/hr]", day.unit_price));
            pdf.text_right(amount_x, y, 10.0, false, &money_whole(day.line_total));
            y -= 20.0;
        }

        pdf.hline(LEFT, right_edge, y + 5.0);
        y -= 20.0;

        pdf.text(340.0, y, 11.0, true, &hours(rec.total_hours));
        pdf.text(430.0, y, 11.0, true, "Total");
        pdf.text_right(amount_x, y, 11.0, true, &money_whole(rec.total_amount));
        pdf.hline(LEFT, right_edge, y - 8.0);

        y
    }

    fn draw_footer(pdf: &mut PdfCanvas, rec: &WorkRecord, mut y: f32) {
        y -= 50.0;
        pdf.text(LEFT, y, 10.0, true, "Instructions:");

        let instructions = format!(
            "All timesheets need to be submitted weekly by Monday for the previous week. \
             Please save your timesheet as a PDF or send us a copy as an attachment to {}.",
            rec.parties.payor
        );
        y -= 15.0;
        for line in textwrap::wrap(&instructions, 100) {
            pdf.text(LEFT, y, 9.0, false, &line);
            y -= 12.0;
        }

        let mut status = Vec::new();
        if rec.submitted {
            status.push("SUBMITTED");
        }
        if rec.paid {
            status.push("PAID");
        }
        if !status.is_empty() {
            y -= 28.0;
            pdf.set_gray(0.5);
            pdf.text(LEFT, y, 8.0, false, &status.join(" | "));
        }
    }
}

impl DocumentRenderer for PdfInvoiceRenderer {
    fn render(&self, rec: &WorkRecord) -> AppResult<Vec<u8>> {
        if rec.days.iter().all(Option::is_none) {
            return Err(AppError::Render(format!("{} has no work days", rec.number)));
        }

        let mut pdf = PdfCanvas::new();

        pdf.set_gray(0.2);
        pdf.text(LEFT, PAGE_H - 60.0, 36.0, true, "INVOICE");
        pdf.set_gray(0.0);

        Self::draw_metadata(&mut pdf, rec);
        Self::draw_addresses(&mut pdf, rec);
        let y = Self::draw_table(&mut pdf, rec);
        Self::draw_footer(&mut pdf, rec, y);

        Ok(pdf.finish())
    }

    fn file_name(&self, rec: &WorkRecord) -> String {
        format!("invoice_{}.pdf", rec.number)
    }
}
