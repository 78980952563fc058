//! Sync and report commands
//!
//! Both run the same pipeline: read every document, merge, rewrite in
//! memory, report. Only `sync` writes the results back.

use anyhow::{bail, Context, Result};
use chrono::Utc;

use super::app::DocumentArgs;
use super::output::Output;
use crate::domain::{aggregate, Aggregation, DocumentOutcome, SourceDocument};
use crate::storage::{DocumentPath, DocumentStore, Workspace, WorkspaceError};

/// What to do with rewritten documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write changed documents back
    Write,
    /// List changes without writing
    DryRun,
    /// Report only
    ReportOnly,
}

impl Mode {
    fn as_str(&self) -> &'static str {
        match self {
            Mode::Write => "sync",
            Mode::DryRun => "dry_run",
            Mode::ReportOnly => "report",
        }
    }
}

struct WriteFailure {
    document: String,
    error: String,
}

pub fn execute(output: &Output, args: &DocumentArgs, mode: Mode) -> Result<()> {
    let workspace = Workspace::current_or_cwd()?;
    output.verbose_ctx(
        mode.as_str(),
        &format!("Workspace root: {}", workspace.root().display()),
    );

    let project = &workspace.config().project;
    let strict = args.strict || project.strict;
    let incomplete_only = args.incomplete || project.report.incomplete_only;

    let documents = select_documents(&workspace, args)?;
    output.verbose_ctx(
        mode.as_str(),
        &format!(
            "{} document(s), strict={}, incomplete_only={}",
            documents.len(),
            strict,
            incomplete_only
        ),
    );

    // Everything is read before anything is written
    let store = workspace.store();
    let mut sources = Vec::with_capacity(documents.len());
    for doc in &documents {
        let content = store.read(&doc.path)?;
        match &content {
            Some(text) => output.verbose_ctx(
                "read",
                &format!("{} ({} bytes)", doc.path.display(), text.len()),
            ),
            None => output.warn(&format!("Document not found: {}", doc.name)),
        }

        let source = SourceDocument::new(&doc.name, content);
        sources.push(if doc.writable { source } else { source.read_only() });
    }

    let run = aggregate(&sources, incomplete_only);
    output.verbose_ctx(
        "merge",
        &format!(
            "{} unique task(s), {} reconciled across documents",
            run.statuses.len(),
            run.statuses.reconciled()
        ),
    );

    let mut written = vec![false; documents.len()];
    let mut failures = Vec::new();
    if mode == Mode::Write {
        for (i, (doc, outcome)) in documents.iter().zip(&run.documents).enumerate() {
            let Some(rewrite) = outcome.pending_write() else {
                continue;
            };

            match store.write(&doc.path, &rewrite.content) {
                Ok(()) => {
                    output.verbose_ctx(
                        "write",
                        &format!("{} ({} line(s) changed)", doc.path.display(), rewrite.changes.len()),
                    );
                    for change in &rewrite.changes {
                        output.verbose_ctx(
                            "write",
                            &format!("  {}: {} -> {}", change.line_number, change.before, change.after),
                        );
                    }
                    written[i] = true;
                }
                Err(e) => failures.push(WriteFailure {
                    document: doc.name.clone(),
                    error: e.to_string(),
                }),
            }
        }
    }

    if output.is_json() {
        print_json(output, &run, mode, &written, &failures);
    } else {
        print_text(output, &run, mode, &written, &failures);
    }

    if !failures.is_empty() {
        bail!("Failed to write {} document(s)", failures.len());
    }

    let missing: Vec<&str> = run.missing().collect();
    if strict && !missing.is_empty() {
        bail!("Missing document(s) in strict mode: {}", missing.join(", "));
    }

    Ok(())
}

/// Explicit paths win; otherwise the configured set is used
fn select_documents(workspace: &Workspace, args: &DocumentArgs) -> Result<Vec<DocumentPath>> {
    if !args.paths.is_empty() {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let store = DocumentStore::new(cwd);
        return Ok(args
            .paths
            .iter()
            .map(|p| store.resolve(&p.to_string_lossy(), true))
            .collect());
    }

    if !workspace.is_configured() {
        return Err(WorkspaceError::NotInWorkspace.into());
    }

    workspace.documents(args.set.as_deref())
}

fn print_text(
    output: &Output,
    run: &Aggregation,
    mode: Mode,
    written: &[bool],
    failures: &[WriteFailure],
) {
    for (outcome, was_written) in run.documents.iter().zip(written) {
        print_document(outcome, mode, *was_written);
        println!();
    }

    let overall = run.overall();
    println!("== Overall ==");
    println!(
        "{} unique task(s) across {} document(s), {} reconciled",
        run.statuses.len(),
        run.documents.len(),
        run.statuses.reconciled()
    );
    if overall.total == 0 {
        println!("No sections found");
    } else {
        print!("{}", overall);
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("Write failures:");
        for failure in failures {
            eprintln!("  {}: {}", failure.document, failure.error);
        }
    }

    output.verbose_ctx("report", &format!("Reported {} document(s)", run.documents.len()));
}

fn print_document(outcome: &DocumentOutcome, mode: Mode, written: bool) {
    let mut header = format!("== {} ", outcome.name);
    if outcome.missing {
        header.push_str("(missing) ");
    } else if !outcome.writable {
        header.push_str("(read-only) ");
    }
    println!("{}==", header);

    print!("{}", outcome.report);

    let Some(rewrite) = outcome.pending_write() else {
        return;
    };

    match mode {
        Mode::Write if written => {
            println!("Updated {} line(s)", rewrite.changes.len());
        }
        Mode::DryRun => {
            println!("Would update {} line(s):", rewrite.changes.len());
            for change in &rewrite.changes {
                println!("  {:>4} - {}", change.line_number, change.before);
                println!("  {:>4} + {}", change.line_number, change.after);
            }
        }
        _ => {}
    }
}

fn print_json(
    output: &Output,
    run: &Aggregation,
    mode: Mode,
    written: &[bool],
    failures: &[WriteFailure],
) {
    let documents: Vec<_> = run
        .documents
        .iter()
        .zip(written)
        .map(|(outcome, was_written)| {
            let changes = outcome
                .pending_write()
                .map(|r| r.changes.clone())
                .unwrap_or_default();
            serde_json::json!({
                "name": outcome.name,
                "missing": outcome.missing,
                "writable": outcome.writable,
                "changed": !changes.is_empty(),
                "written": was_written,
                "changes": changes,
                "report": outcome.report,
            })
        })
        .collect();

    let failures: Vec<_> = failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "document": f.document,
                "error": f.error,
            })
        })
        .collect();

    output.data(&serde_json::json!({
        "generated_at": Utc::now().to_rfc3339(),
        "mode": mode.as_str(),
        "documents": documents,
        "overall": {
            "documents": run.documents.len(),
            "unique_tasks": run.statuses.len(),
            "reconciled": run.statuses.reconciled(),
            "metrics": run.overall(),
        },
        "statuses": run.statuses,
        "missing": run.missing().collect::<Vec<_>>(),
        "write_failures": failures,
    }));
}
