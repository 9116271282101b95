use std::sync::Arc;

use anyhow::{anyhow, Context};
use boxc_acl::EffectiveAccessState;
use boxc_events::{FileProgressTracker, JobReport, ReindexJob};
use boxc_indexing::{IndexerConfig, IndexingServices, PipelineDriver};
use boxc_store::{InMemoryRepository, InMemorySearchIndex, ObjectRepository, RepositoryFixture};
use boxc_types::{FieldValue, ObjectId, OutputDocument, ResourceType};
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli, config: IndexerConfig) -> anyhow::Result<()> {
    let workspace = Workspace::open(&cli, &config)?;
    match cli.command {
        Command::Index(args) => cmd_index(&workspace, args, cli.format),
        Command::Reindex(args) => cmd_reindex(&workspace, args, &config, cli.format),
        Command::Acl(args) => cmd_acl(&workspace, args, cli.format),
    }
}

/// A repository fixture loaded into memory with services over it.
struct Workspace {
    repo: Arc<InMemoryRepository>,
    index: Arc<InMemorySearchIndex>,
    driver: Arc<PipelineDriver>,
}

impl Workspace {
    fn open(cli: &Cli, config: &IndexerConfig) -> anyhow::Result<Self> {
        let fixture = RepositoryFixture::load(&cli.repo)
            .with_context(|| format!("loading repository {}", cli.repo.display()))?;
        let repo = Arc::new(fixture.into_repository());
        let index = Arc::new(InMemorySearchIndex::new());
        let services = IndexingServices::in_memory(repo.clone(), index.clone(), &config.acl_cache)?;
        let driver = Arc::new(PipelineDriver::with_default_filters(Arc::new(services))?);
        Ok(Self { repo, index, driver })
    }
}

fn parse_id(raw: &str) -> anyhow::Result<ObjectId> {
    ObjectId::new(raw).with_context(|| format!("invalid object id {raw:?}"))
}

fn cmd_index(ws: &Workspace, args: IndexArgs, format: OutputFormat) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let object = ws.repo.get_content_object(&id)?;

    // Works aggregate formats from their files' documents.
    if object.resource_type() == ResourceType::Work {
        let summary = ws.driver.index_batch(object.members());
        for failed in &summary.failed {
            eprintln!("{} member {}: {}", "warning:".yellow(), failed.id, failed.reason);
        }
    }

    let doc = ws.driver.index_object(&id)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc)?),
        OutputFormat::Text => print_document(&doc),
    }
    Ok(())
}

fn print_document(doc: &OutputDocument) {
    for (field, value) in doc.fields() {
        let rendered = match value {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(", "),
            FieldValue::Long(n) => n.to_string(),
            FieldValue::Date(date) => date.to_rfc3339(),
        };
        println!("{:>22}  {}", field.as_str().bold(), rendered);
    }
}

fn cmd_reindex(
    ws: &Workspace,
    args: ReindexArgs,
    config: &IndexerConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let start = match args.start {
        Some(raw) => parse_id(&raw)?,
        None => ws
            .repo
            .root_id()
            .ok_or_else(|| anyhow!("repository has no root object"))?,
    };

    let mut workers = config.workers.clone();
    if let Some(count) = args.workers {
        workers.count = count;
    }
    let mut job = ReindexJob::new(Arc::clone(&ws.driver), &workers);
    if let Some(path) = args.progress.or_else(|| workers.progress_path.clone()) {
        job = job.with_progress(Arc::new(FileProgressTracker::open(&path)?));
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(async {
        let cancel = job.cancel_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
        job.run(&start).await
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report_json(&report))?),
        OutputFormat::Text => print_report(&report, ws.index.len()),
    }
    Ok(())
}

fn report_json(report: &JobReport) -> serde_json::Value {
    serde_json::json!({
        "indexed": report.indexed.iter().map(ObjectId::as_str).collect::<Vec<_>>(),
        "skipped": report.skipped,
        "failed": report.failed.iter().map(|f| serde_json::json!({
            "id": f.id.as_str(),
            "reason": f.reason,
            "structural": f.structural,
        })).collect::<Vec<_>>(),
        "cancelled": report.cancelled,
        "elapsedMs": report.elapsed.as_millis() as u64,
    })
}

fn print_report(report: &JobReport, documents: usize) {
    let mark = if report.is_complete() { "✓".green().bold() } else { "!".yellow().bold() };
    println!(
        "{} Reindexed {} objects in {:.2?} ({} skipped, {} failed)",
        mark,
        report.indexed.len().to_string().bold(),
        report.elapsed,
        report.skipped,
        report.failed.len(),
    );
    println!("  Documents in index: {documents}");
    for failed in &report.failed {
        let kind = if failed.structural { "structural".red() } else { "transient".yellow() };
        println!("  {} {} [{}] {}", "✗".red(), failed.id, kind, failed.reason);
    }
    if report.cancelled {
        println!("  {}", "Cancelled before completion; rerun with --progress to resume.".yellow());
    }
}

fn cmd_acl(ws: &Workspace, args: AclArgs, format: OutputFormat) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let state = ws.driver.services().acl().resolve(&id)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state_json(&state))?),
        OutputFormat::Text => print_state(&state),
    }
    Ok(())
}

fn state_json(state: &EffectiveAccessState) -> serde_json::Value {
    let roles = |map: &std::collections::BTreeMap<String, boxc_types::Role>| {
        map.iter()
            .map(|(principal, role)| (principal.clone(), serde_json::Value::from(role.as_str())))
            .collect::<serde_json::Map<_, _>>()
    };
    serde_json::json!({
        "id": state.object.as_str(),
        "resourceType": state.resource_type.as_str(),
        "patron": roles(&state.patron),
        "staff": roles(&state.staff),
        "embargoed": state.is_embargoed(),
        "embargoedViaAncestor": state.is_embargoed_via_ancestor(),
        "markedForDeletion": state.marked_for_deletion,
        "publicAccess": state.has_public_access(),
        "staffOnly": state.is_staff_only(),
        "distinctPatronSettings": state.has_distinct_patron_settings,
    })
}

fn print_state(state: &EffectiveAccessState) {
    println!("{} ({})", state.object.to_string().bold(), state.resource_type.as_str().cyan());
    println!("  Patron:");
    if state.patron.is_empty() {
        println!("    {}", "(none)".dimmed());
    }
    for (principal, role) in &state.patron {
        println!("    {principal}: {}", role.as_str().green());
    }
    println!("  Staff:");
    if state.staff.is_empty() {
        println!("    {}", "(none)".dimmed());
    }
    for (principal, role) in &state.staff {
        println!("    {principal}: {}", role.as_str().blue());
    }
    if let Some(until) = state.own_embargo {
        println!("  Embargo until: {}", until.to_rfc3339().yellow());
    } else if let Some(until) = state.ancestor_embargo {
        println!("  Inherited embargo until: {}", until.to_rfc3339().yellow());
    }
    if state.marked_for_deletion {
        println!("  {}", "Marked for deletion".red());
    }
    let settings = if state.has_distinct_patron_settings { "own" } else { "inherited" };
    println!("  Patron settings: {settings}");
}
