use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::list_records;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::colors::{color_for_status, colorize};
use crate::utils::table::{Column, Table};
use crate::utils::{date, formatting, money};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { status, verbose } = cmd {
        let pool = open_db(cfg)?;
        let records = list_records(&pool.conn, *status)?;

        if records.is_empty() {
            match status {
                Some(s) => messages::info(format!("No {} invoices.", s.as_str())),
                None => messages::info("No invoices. Run `rinvoicer populate` first."),
            }
            return Ok(());
        }

        let mut columns = vec![
            Column::left("Invoice", 9),
            Column::left("Date", 12),
            Column::left("Week", 25),
            Column::right("Hours", 7),
            Column::right("Amount", 12),
        ];
        if *verbose {
            columns.push(Column::left("Due", 12));
        }
        columns.push(Column::left("Status", 22));

        let mut table = Table::new(columns);
        for r in &records {
            let week_end = r.week_end().unwrap_or(r.created);
            let mut row = vec![
                r.number.clone(),
                date::to_us(&r.created),
                format!("{} - {}", date::to_us(&r.week_start()), date::to_us(&week_end)),
                format!("{:.1}", r.total_hours),
                money(r.total_amount),
            ];
            if *verbose {
                row.push(date::to_us(&r.due));
            }
            row.push(colorize(
                &r.status_label(),
                color_for_status(r.submitted, r.paid),
            ));
            table.add_row(row);
        }

        let title = match status {
            Some(s) => format!("INVOICES ({})", s.as_str().to_uppercase()),
            None => "INVOICES".to_string(),
        };
        messages::header(formatting::bold(&title));
        print!("{}", table.render());

        let hours: f64 = records.iter().map(|r| r.total_hours).sum();
        let amount: f64 = records.iter().map(|r| r.total_amount).sum();
        println!(
            "Total: {} invoices, {}, {}",
            records.len(),
            formatting::hours(hours),
            money(amount)
        );
    }
    Ok(())
}
