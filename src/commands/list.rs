use std::path::PathBuf;

use console::style;
use miette::Result;

use bled::template::{resolve_template_root, TemplateCatalog, TemplateKey};

pub fn run(templates_dir: Option<PathBuf>) -> Result<()> {
    let root = resolve_template_root(templates_dir.as_deref())?;
    let catalog = TemplateCatalog::discover(&root)?;
    let keys: Vec<&TemplateKey> = catalog.keys().collect();

    if keys.is_empty() {
        println!(
            "No templates found in {}",
            style(catalog.root().display()).cyan()
        );
        return Ok(());
    }

    println!(
        "{} ({} template{} in {})\n",
        style("Available templates").bold(),
        keys.len(),
        if keys.len() == 1 { "" } else { "s" },
        catalog.root().display()
    );

    for key in keys {
        println!(
            "  {:<20} {} {} {} {}",
            style(key).cyan(),
            key.database.label(),
            style(format!("({})", key.database.hint())).dim(),
            style("+").dim(),
            key.auth.label()
        );
    }

    Ok(())
}
