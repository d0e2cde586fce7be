use super::ui;
use crate::core::FundraisingBackend;
use crate::core::backend::EmailRequest;
use crate::core::investor::{EmailDraft, InvestorMatch, rank_matches};
use crate::core::profile::StartupProfile;
use anyhow::{Context, Result};
use comfy_table::Cell;
use futures::future::join_all;
use tracing::{info, warn};

fn join_or_dash(items: &[String], limit: usize) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    let mut shown = items.iter().take(limit).cloned().collect::<Vec<_>>().join(", ");
    if items.len() > limit {
        shown.push_str(&format!(" +{}", items.len() - limit));
    }
    shown
}

pub fn display_matches(investors: &[InvestorMatch]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Investor"),
        ui::header_cell("Firm"),
        ui::header_cell("Match"),
        ui::header_cell("Check size"),
        ui::header_cell("Location"),
        ui::header_cell("Sectors"),
        ui::header_cell("Portfolio"),
    ]);

    for investor in investors {
        table.add_row(vec![
            Cell::new(&investor.name),
            Cell::new(&investor.firm),
            ui::score_cell(investor.match_score),
            Cell::new(&investor.investment_range),
            Cell::new(&investor.location),
            Cell::new(join_or_dash(&investor.sectors, 3)),
            Cell::new(join_or_dash(&investor.portfolio, 3)),
        ]);
    }
    table.to_string()
}

pub async fn run(profile: &StartupProfile, backend: &dyn FundraisingBackend) -> Result<()> {
    let pb = ui::new_spinner("Finding investors...");
    let result = backend.match_investors(profile).await;
    pb.finish_and_clear();

    let mut investors = result.context("Investor matching failed")?;
    if investors.is_empty() {
        println!("No matching investors found.");
        return Ok(());
    }
    rank_matches(&mut investors);
    info!(count = investors.len(), "Matched investors");

    println!(
        "Investors for {}\n",
        ui::style_text(&profile.company_name, ui::StyleType::Title)
    );
    println!("{}", display_matches(&investors));
    Ok(())
}

pub fn display_email(investor: &str, draft: &EmailDraft) -> String {
    format!(
        "{} {}\n{} {}\n\n{}",
        ui::style_text("To:", ui::StyleType::TotalLabel),
        investor,
        ui::style_text("Subject:", ui::StyleType::TotalLabel),
        draft.subject,
        draft.body.trim_end()
    )
}

/// Drafts one outreach email per investor. Drafts are requested
/// concurrently; a failed draft is reported and does not stop the others.
pub async fn email(
    profile: &StartupProfile,
    backend: &dyn FundraisingBackend,
    investors: &[String],
    firm: Option<&str>,
    tone: Option<&str>,
) -> Result<()> {
    if investors.is_empty() {
        anyhow::bail!("At least one investor name is required");
    }

    let pb = ui::new_progress_bar(investors.len() as u64);
    pb.set_message("Drafting emails...");

    let futures = investors.iter().map(|name| {
        let pb_clone = pb.clone();
        let request = EmailRequest {
            profile: profile.clone(),
            investor_name: name.clone(),
            investor_firm: firm.map(str::to_string),
            tone: tone.map(str::to_string),
        };
        async move {
            let result = backend.draft_email(&request).await;
            pb_clone.inc(1);
            (request.investor_name, result)
        }
    });
    let drafts = join_all(futures).await;
    pb.finish_and_clear();

    let total = drafts.len();
    let mut failed = 0;
    for (i, (name, result)) in drafts.into_iter().enumerate() {
        match result {
            Ok(draft) => println!("{}", display_email(&name, &draft)),
            Err(e) => {
                failed += 1;
                warn!(investor = %name, error = %e, "Email draft failed");
                println!(
                    "{}",
                    ui::style_text(
                        &format!("Could not draft an email to {name}: {e}"),
                        ui::StyleType::Error
                    )
                );
            }
        }
        if i < total - 1 {
            ui::print_separator();
        }
    }

    if failed == total {
        anyhow::bail!("All email drafts failed");
    }
    Ok(())
}
