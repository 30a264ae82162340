use anyhow::{Context, Result};
use cvscrub_config::{Config, load_term_file};
use cvscrub_core::{Error as ScrubError, Mapping};
use cvscrub_engine::Pipeline;
use std::path::Path;

use super::{collect_inputs, mapping_path, scrubbed_path};
use crate::cli::ScrubArgs;

pub async fn handle(args: ScrubArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let record_mapping = args.mapping || config.output.mapping;
    let pipeline = Pipeline::from_config(&config)?.with_mapping(record_mapping);

    let metadata = tokio::fs::metadata(&args.path)
        .await
        .with_context(|| format!("Input not found: {}", args.path.display()))?;

    if metadata.is_dir() {
        let Some(out_dir) = args.output.as_deref() else {
            anyhow::bail!("--output <DIR> is required when scrubbing a directory");
        };
        scrub_dir(&pipeline, &config, &args.path, out_dir).await
    } else {
        scrub_file(&pipeline, &args.path, args.output.as_deref()).await
    }
}

/// Stored config with command-line overrides applied
fn resolve_config(args: &ScrubArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;

    if let Some(salt) = &args.salt {
        config.salt = Some(salt.clone());
    }
    if let Some(path) = &args.local_terms {
        config.local_terms.extend(load_term_file(path)?);
    }
    if let Some(path) = &args.brands {
        config.brands = load_term_file(path)?;
    }
    if args.no_entities {
        config.detectors.entities = false;
    }
    if let Some(pattern) = &args.pattern {
        config.output.pattern = pattern.clone();
    }
    if args.recursive {
        config.output.recursive = true;
    }

    Ok(config)
}

async fn scrub_file(pipeline: &Pipeline, input: &Path, output: Option<&Path>) -> Result<()> {
    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let source = input.display().to_string();
    let scrubbed = pipeline
        .run(&text, Some(&source))
        .with_context(|| format!("Failed to scrub {}", input.display()))?;

    match output {
        Some(path) => {
            write_file(path, &scrubbed.text).await?;
            println!("✓ Scrubbed {} → {}", input.display(), path.display());
        }
        None => print!("{}", scrubbed.text),
    }

    if let Some(mapping) = &scrubbed.mapping {
        let path = mapping_path(output.unwrap_or(input));
        write_mapping(&path, mapping).await?;
        eprintln!("✓ Mapping written to {}", path.display());
    }

    Ok(())
}

async fn scrub_dir(pipeline: &Pipeline, config: &Config, root: &Path, out_dir: &Path) -> Result<()> {
    let inputs: Vec<_> = collect_inputs(root, &config.output.pattern, config.output.recursive)?
        .into_iter()
        .filter(|path| !path.starts_with(out_dir))
        .collect();

    if inputs.is_empty() {
        println!(
            "No files matching '{}' in {}",
            config.output.pattern,
            root.display()
        );
        return Ok(());
    }

    let mut scrubbed_count = 0;
    let mut skipped = 0;

    for input in &inputs {
        let text = tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?;

        let source = input.display().to_string();
        let scrubbed = match pipeline.run(&text, Some(&source)) {
            Ok(scrubbed) => scrubbed,
            Err(ScrubError::SurnameNotFound) => {
                tracing::warn!(file = %input.display(), "no surname field, skipping");
                skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to scrub {}", input.display()));
            }
        };

        let output = scrubbed_path(out_dir, root, input);
        write_file(&output, &scrubbed.text).await?;

        if let Some(mapping) = &scrubbed.mapping {
            write_mapping(&mapping_path(&output), mapping).await?;
        }

        tracing::info!(
            file = %input.display(),
            replaced = scrubbed.replaced,
            "scrubbed"
        );
        scrubbed_count += 1;
    }

    println!(
        "✓ Scrubbed {} file(s) into {}",
        scrubbed_count,
        out_dir.display()
    );
    if skipped > 0 {
        println!("  Skipped {} file(s) without a surname field", skipped);
    }

    Ok(())
}

async fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

async fn write_mapping(path: &Path, mapping: &Mapping) -> Result<()> {
    write_file(path, &mapping.to_json()?).await
}
