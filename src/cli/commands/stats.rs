use crate::cli::commands::open_db;
use crate::config::Config;
use crate::db::stats::summary_stats;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::{formatting, money};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_db(cfg)?;
    let s = summary_stats(&pool.conn)?;

    messages::header(formatting::bold("INVOICE STATISTICS"));

    if s.total_count == 0 {
        messages::info("No invoices yet.");
        return Ok(());
    }

    let line = |label: &str, color: &str, count: i64, amount: f64| {
        println!(
            "{CYAN}{label:<12}{RESET}{color}{count:>5}{RESET}  ({:>5.1}%)  {:>14}",
            s.percent(count),
            money(amount)
        );
    };

    line("Total", GREEN, s.total_count, s.total_amount);
    line("Submitted", YELLOW, s.submitted_count, s.submitted_amount);
    line("Pending", YELLOW, s.pending_count(), s.pending_amount());
    line("Paid", GREEN, s.paid_count, s.paid_amount);
    line("Unpaid", YELLOW, s.unpaid_count(), s.unpaid_amount());
    messages::rule();
    Ok(())
}
