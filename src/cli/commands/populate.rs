use crate::cli::commands::{open_db, parse_date_arg};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::generator::GeneratorParams;
use crate::core::records::RecordLogic;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::{date, money};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Populate { from, to } = cmd {
        let from = parse_date_arg(from)?;
        let to = parse_date_arg(to)?;

        let params = GeneratorParams::from_config(cfg)?;
        let mut pool = open_db(cfg)?;
        let records = RecordLogic::populate(&mut pool, &params, from, to)?;

        if records.is_empty() {
            messages::warning(format!("No complete work week between {from} and {to}"));
            return Ok(());
        }

        let total: f64 = records.iter().map(|r| r.total_amount).sum();
        let first = &records[0];
        let last = &records[records.len() - 1];

        messages::success(format!("Inserted {} invoices", records.len()));
        println!(
            "   Range  : {} ({}) → {} ({})",
            date::to_us(&first.created),
            first.number,
            date::to_us(&last.created),
            last.number
        );
        println!("   Total  : {}", money(total));
        println!("   Average: {}", money(total / records.len() as f64));
    }
    Ok(())
}
