use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use miette::Result;

use bled::error::BledError;
use bled::prompt::InquirePrompter;
use bled::template::{resolve_template_root, TemplateCatalog};
use bled::GenerateOptions;

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<()> {
    print_intro();

    let cwd = std::env::current_dir().map_err(|e| BledError::Io {
        context: "getting current directory".into(),
        source: e,
    })?;

    let options = GenerateOptions {
        project: cli.project,
        databases: cli.database.into(),
        auths: cli.auth.into(),
        cwd: cwd.clone(),
    };

    let Some(config) = unless_cancelled(bled::resolve_config(options, &mut InquirePrompter))?
    else {
        println!("{}", style("Operation cancelled.").red());
        return Ok(());
    };

    let root = resolve_template_root(cli.templates_dir.as_deref())?;
    let catalog = TemplateCatalog::discover(&root)?;

    if cli.dry_run {
        let plan = bled::plan_generation(config, &catalog, &cwd)?;
        let files = plan.bundle.files()?;
        println!(
            "\n{} Dry run: {} would be copied to {}",
            style("==>").cyan().bold(),
            style(&plan.bundle.key).cyan(),
            style(plan.destination.display()).cyan()
        );
        for file in &files {
            println!("  {} {}", style("copy").green(), file.display());
        }
        println!("\n{} files, no files written.", files.len());
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("Preparing to be BLED🩸...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let project = match bled::generate(config, &catalog, &cwd) {
        Ok(project) => project,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_with_message("Ready to be BLED🩸");

    println!(
        "\n{} Project generated at {} from {} ({} files)",
        style("✓").green().bold(),
        style(project.path.display()).cyan(),
        style(project.key).cyan(),
        project.files.len()
    );
    println!("\n{}", style("You are all set!").bold());

    Ok(())
}

/// `None` when the user cancelled a prompt. Every other error stays fatal.
fn unless_cancelled<T>(result: bled::error::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(BledError::PromptCancelled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn print_intro() {
    println!("{}\n", style(" Welcome to the BLED stack🩸! ").white().on_red().bold());
    println!("BLED is a high performant backend framework that is built on top of:");
    for (name, blurb) in [
        ("Bun:", "a fast JavaScript all-in-one toolkit"),
        ("Lucia:", "a highly customizable open-source authentication flow"),
        (
            "Elysia:",
            "a performant, ergonomic web framework for building backend servers for Bun",
        ),
        (
            "Drizzle:",
            "an open-source TypeScript ORM that is lightweight and production ready",
        ),
    ] {
        println!("  {} {}", style(format!("{name:<14}")).bold(), blurb);
    }
    println!();
}
