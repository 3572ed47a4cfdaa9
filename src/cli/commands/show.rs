use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::get_record;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::colors::{CYAN, RESET};
use crate::utils::table::{Column, Table};
use crate::utils::{date, formatting, money, time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { number } = cmd {
        let pool = open_db(cfg)?;
        let r = get_record(&pool.conn, number)?;

        messages::header(formatting::bold(&format!("INVOICE {}", r.number)));

        let field = |label: &str, value: String| {
            println!("{CYAN}{label:<16}{RESET}{value}");
        };
        field("Created:", date::to_us(&r.created));
        field("Payment terms:", format!("Net {}", r.payment_terms));
        field("Due:", date::to_us(&r.due));
        field("Submitted:", formatting::yes_no(r.submitted).to_string());
        field("Paid:", formatting::yes_no(r.paid).to_string());
        println!();
        field("From:", r.parties.payee.clone());
        field("", r.parties.payee_address.clone());
        field("To:", r.parties.payor.clone());
        field("", r.parties.payor_address.clone());
        field("", r.parties.payor_phone.clone());
        println!();

        let mut table = Table::new(vec![
            Column::left("Day", 16),
            Column::left("In", 9),
            Column::left("Out", 9),
            Column::right("Hours", 6),
            Column::right("Rate", 9),
            Column::right("Total", 11),
        ]);
        for d in r.days.iter().flatten() {
            table.add_row(vec![
                d.description(),
                time::to_clock(&d.time_in),
                time::to_clock(&d.time_out),
                format!("{:.1}", d.hours),
                money(d.unit_price),
                money(d.line_total),
            ]);
        }
        print!("{}", table.render());

        println!(
            "{:>width$}",
            format!(
                "{}  {}",
                formatting::hours(r.total_hours),
                money(r.total_amount)
            ),
            width = table.total_width()
        );
    }
    Ok(())
}
