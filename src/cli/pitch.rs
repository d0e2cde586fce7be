use super::ui;
use crate::core::export::export_markdown;
use crate::core::improve;
use crate::core::pitch::{PitchData, display_name};
use crate::core::profile::StartupProfile;
use crate::core::{FundraisingBackend, MatchConfidence, PitchStore, SectionResolver};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

impl PitchData {
    pub fn display(&self) -> String {
        let mut output = String::new();
        for (i, (key, section)) in self.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            let mut heading = ui::style_text(&display_name(key), ui::StyleType::Heading);
            if let Some(confidence) = section.confidence {
                heading.push_str(&format!(
                    " {}",
                    ui::style_text(
                        &format!("({:.0}% confidence)", confidence * 100.0),
                        ui::StyleType::Subtle
                    )
                ));
            }
            output.push_str(&heading);
            output.push('\n');

            let body = if section.text.is_empty() {
                section.original.as_deref().unwrap_or("")
            } else {
                section.text.as_str()
            };
            output.push_str(body.trim_end());
            output.push('\n');
        }
        output
    }
}

/// Generates a fresh pitch and replaces whatever was stored.
pub async fn generate(
    profile: &StartupProfile,
    backend: &dyn FundraisingBackend,
    store: &dyn PitchStore,
) -> Result<()> {
    let pb = ui::new_spinner(&format!("Generating pitch for {}...", profile.company_name));
    let result = backend.generate_pitch(profile).await;
    pb.finish_and_clear();

    let pitch = result.context("Pitch generation failed")?;
    store.save(&pitch).await.context("Failed to save pitch")?;
    info!(sections = pitch.len(), "Saved generated pitch");

    println!(
        "Pitch: {}\n",
        ui::style_text(&profile.company_name, ui::StyleType::Title)
    );
    println!("{}", pitch.display());
    Ok(())
}

pub async fn show(store: &dyn PitchStore) -> Result<()> {
    let pitch = store.load().await.context("Failed to load stored pitch")?;
    if pitch.is_empty() {
        println!("No pitch saved yet. Run `raisekit generate` first.");
        return Ok(());
    }
    println!("{}", pitch.display());
    Ok(())
}

pub async fn improve(
    backend: &dyn FundraisingBackend,
    store: &dyn PitchStore,
    section: &str,
    feedback: &str,
) -> Result<()> {
    let pb = ui::new_spinner(&format!("Improving {section}..."));
    let result = improve::improve_section(
        backend,
        store,
        &SectionResolver::default(),
        section,
        feedback,
    )
    .await;
    pb.finish_and_clear();
    let resolved = result?;

    match resolved.confidence {
        MatchConfidence::Exact => {}
        MatchConfidence::Partial => println!(
            "{}",
            ui::style_text(
                &format!(
                    "Note: '{section}' matched the '{}' section by name.",
                    display_name(&resolved.key)
                ),
                ui::StyleType::Warning
            )
        ),
        MatchConfidence::Fallback => println!(
            "{}",
            ui::style_text(
                &format!(
                    "Warning: no section named '{section}' came back. Showing '{}' instead, check it is the one you meant.",
                    display_name(&resolved.key)
                ),
                ui::StyleType::Warning
            )
        ),
    }

    let updated: PitchData = [(resolved.key.as_str(), resolved.section.clone())]
        .into_iter()
        .collect();
    println!("{}", updated.display());
    if let Some(original) = resolved.section.original.as_deref() {
        println!(
            "{}\n{}",
            ui::style_text("Previously:", ui::StyleType::Subtle),
            ui::style_text(original.trim_end(), ui::StyleType::Subtle)
        );
    }
    Ok(())
}

pub async fn export(store: &dyn PitchStore, title: Option<&str>, output: &Path) -> Result<()> {
    let pitch = store.load().await.context("Failed to load stored pitch")?;
    if pitch.is_empty() {
        anyhow::bail!("No pitch saved yet, nothing to export");
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create export file: {}", output.display()))?;
    let count = export_markdown(&pitch, title, BufWriter::new(file))
        .with_context(|| format!("Failed to export pitch to {}", output.display()))?;

    info!(count, path = %output.display(), "Exported pitch");
    println!("Exported {count} sections to {}", output.display());
    Ok(())
}
