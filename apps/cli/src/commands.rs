//! Command handlers. Each one maps a parsed subcommand onto core operations.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::info;
use wariflex_core::allocation::{allocate_participants, Allocation};
use wariflex_core::expenses::{Expense, NewExpense};
use wariflex_core::export::{export_file_name, render_csv, ExpenseReport};
use wariflex_core::modes::{amounts_to_percentages, AmountShare};
use wariflex_core::participants::{round_percentages, Participant};
use wariflex_core::shares::{even_split, fill_remaining, set_share_with_policy, toggle_lock};

use crate::cli::{Command, ShareSpec};
use crate::config::Config;
use crate::main_lib::build_service;

pub async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        // Never touches the store.
        Command::Split {
            amount,
            even,
            shares,
            by_amount,
        } => {
            let participants = match even {
                Some(count) => even_split(&unnamed_participants(count))?,
                None => build_participants(amount, &shares, by_amount, config)?,
            };
            let participants =
                round_percentages(&participants, config.settings.percentage_precision);
            let allocation = allocate_participants(amount, &participants)?;
            print!("{}", format_breakdown(&participants, &allocation));
        }
        Command::Add {
            title,
            amount,
            memo,
            shares,
            by_amount,
        } => {
            let service = build_service(config)?;
            let participants = build_participants(amount, &shares, by_amount, config)?;
            let expense = service
                .create_expense(NewExpense {
                    title,
                    total_amount: amount,
                    memo,
                    participants,
                })
                .await?;
            info!("Recorded expense {}", expense.id);
            println!("{}", expense.id);
        }
        Command::List { settled } => {
            let service = build_service(config)?;
            let expenses = if settled {
                service.get_settled_expenses()?
            } else {
                service.get_active_expenses()?
            };
            for expense in &expenses {
                println!("{}", format_summary(expense));
            }
        }
        Command::Show { id } => {
            let service = build_service(config)?;
            let expense = service.get_expense(&id)?;
            let allocation = service.get_breakdown(&id)?;
            println!("{}", format_summary(&expense));
            if let Some(memo) = &expense.memo {
                println!("  {}", memo);
            }
            print!("{}", format_breakdown(&expense.participants, &allocation));
        }
        Command::Edit {
            id,
            set,
            toggle_lock: lock_names,
            fill,
        } => {
            if set.is_none() && lock_names.is_empty() && !fill {
                bail!("nothing to edit: pass --set, --toggle-lock or --fill");
            }
            let service = build_service(config)?;
            let expense = service.get_expense(&id)?;
            let mut participants = expense.participants.clone();

            for name in &lock_names {
                let participant_id = find_by_name(&participants, name)?;
                participants = toggle_lock(&participants, &participant_id);
            }
            if let Some(spec) = &set {
                let value = spec
                    .value
                    .ok_or_else(|| anyhow!("--set needs NAME=PERCENT"))?;
                let participant_id = find_by_name(&participants, &spec.name)?;
                participants = set_share_with_policy(
                    &participants,
                    &participant_id,
                    value,
                    config.settings.drift_policy,
                );
            }
            if fill {
                participants = fill_remaining(&participants)?;
            }

            let updated = service.update_participants(&id, participants).await?;
            let allocation = service.get_breakdown(&id)?;
            print!("{}", format_breakdown(&updated.participants, &allocation));
        }
        Command::Settle { id } => {
            let service = build_service(config)?;
            let expense = service.settle_expense(&id).await?;
            println!("{}", format_summary(&expense));
        }
        Command::Delete { id } => {
            let service = build_service(config)?;
            let removed = service.delete_expense(&id).await?;
            if removed == 0 {
                bail!("no expense with id {}", id);
            }
            info!("Deleted expense {}", id);
        }
        Command::ClearHistory => {
            let service = build_service(config)?;
            let removed = service.clear_history().await?;
            println!("Removed {} settled expense(s)", removed);
        }
        Command::Export { id, output } => {
            let service = build_service(config)?;
            let expense = service.get_expense(&id)?;
            let allocation = service.get_breakdown(&id)?;
            let report = ExpenseReport::build(&expense, &allocation, None)?;
            let csv = render_csv(&report, &config.settings)?;
            let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(&expense)));
            std::fs::write(&path, csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Turns command-line shares into a participant set.
///
/// Without any value the split is even. In percent mode the given values are
/// locked and the rest is shared by everyone else. With `by_amount`, values
/// are amounts and missing ones count as 0; the last participant takes the
/// complement.
fn build_participants(
    total_amount: u64,
    shares: &[ShareSpec],
    by_amount: bool,
    config: &Config,
) -> anyhow::Result<Vec<Participant>> {
    let blank: Vec<Participant> = shares.iter().map(|s| Participant::new(&s.name)).collect();
    if shares.iter().all(|s| s.value.is_none()) {
        return Ok(even_split(&blank)?);
    }

    if by_amount {
        let amounts = shares
            .iter()
            .zip(&blank)
            .map(|(spec, p)| {
                let amount = match spec.value {
                    Some(v) => whole_units(v)
                        .ok_or_else(|| anyhow!("amount for '{}' must be a whole number", spec.name))?,
                    None => 0,
                };
                Ok(AmountShare::new(p.id.clone(), amount))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        return Ok(amounts_to_percentages(
            total_amount,
            &blank,
            &amounts,
            config.settings.percentage_precision,
        )?);
    }

    let participants: Vec<Participant> = shares
        .iter()
        .zip(blank)
        .map(|(spec, p)| match spec.value {
            Some(v) => p.with_percentage(v).locked(),
            None => p,
        })
        .collect();
    Ok(fill_remaining(&participants)?)
}

fn unnamed_participants(count: usize) -> Vec<Participant> {
    (1..=count)
        .map(|n| Participant::with_id(format!("p{}", n), format!("P{}", n)))
        .collect()
}

fn whole_units(value: Decimal) -> Option<u64> {
    if value.fract().is_zero() {
        value.to_u64()
    } else {
        None
    }
}

fn find_by_name(participants: &[Participant], name: &str) -> anyhow::Result<String> {
    participants
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(|p| p.id.clone())
        .ok_or_else(|| anyhow!("no participant named '{}'", name))
}

fn format_summary(expense: &Expense) -> String {
    format!(
        "{}  {}  {}  {}",
        expense.id,
        expense.created_at.format("%Y-%m-%d"),
        expense.total_amount,
        expense.title
    )
}

fn format_breakdown(participants: &[Participant], allocation: &Allocation) -> String {
    let width = participants
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for p in participants {
        let amount = allocation.amount_for(&p.id).unwrap_or(0);
        out.push_str(&format!(
            "{:<width$}  {:>7}%  {:>12}{}\n",
            p.name,
            p.percentage.normalize(),
            amount,
            if p.locked { "  (locked)" } else { "" },
            width = width
        ));
    }
    out.push_str(&format!(
        "{:<width$}  {:>8}  {:>12}\n",
        "",
        "total",
        allocation.sum(),
        width = width
    ));
    out
}
