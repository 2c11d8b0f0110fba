//! `admin` subcommands over one editor session.
//!
//! Every mutating action hydrates the session, applies one edit and saves,
//! so each invocation leaves the cache consistent.

use crate::args::AdminAction;
use crate::error::{CliError, CliResult};
use folio_core::service::{EditorSnapshot, ProfileForm, RecordForm};
use folio_core::{AdminSession, DocumentCache, Record, RemoteSource, SectionKind};
use std::io::{BufRead, Write};
use std::path::Path;

const RESET_PROMPT: &str = "Load sample data from the data file and discard saved edits?";

pub async fn run<C: DocumentCache, R: RemoteSource>(
    session: &mut AdminSession<C>,
    source: &R,
    action: AdminAction,
    output: &Path,
) -> CliResult<()> {
    if let AdminAction::Reset { yes } = action {
        if !yes && !confirm(RESET_PROMPT, std::io::stdin().lock()) {
            println!("reset cancelled");
            return Ok(());
        }
        session.reset_from_sample(source).await?;
        println!("{}", session.status());
        return Ok(());
    }

    let origin = session.hydrate(source).await?;
    if !session.status().is_empty() {
        println!("{}", session.status());
    }
    log::debug!(
        "event=admin_hydrate module=cli status=ok origin={}",
        origin.as_str()
    );

    match action {
        AdminAction::List { section } => list(session, section),
        AdminAction::Add { section, fields } => {
            let id = session.add_record(section)?;
            let index = session.document().section(section).len() - 1;
            edit_record(session, section, index, &fields)?;
            save(session)?;
            println!("added {id}");
            Ok(())
        }
        AdminAction::Set {
            section,
            index,
            fields,
        } => {
            edit_record(session, section, index, &fields)?;
            save(session)
        }
        AdminAction::Profile { fields } => {
            let mut snapshot = EditorSnapshot::capture(session.document());
            for (key, value) in &fields {
                apply_profile_field(&mut snapshot.profile, key, value)?;
            }
            session.sync_from_editors(&snapshot)?;
            save(session)
        }
        AdminAction::Move {
            section,
            index,
            direction,
        } => {
            if session.move_record(section, index, direction.into())? {
                save(session)
            } else {
                println!("nothing to move");
                Ok(())
            }
        }
        AdminAction::Delete {
            section,
            index,
            yes,
        } => {
            let removed = session.remove_record(section, index, |record| {
                yes || confirm_delete(section, record)
            })?;
            match removed {
                Some(_) => save(session),
                None => {
                    println!("nothing deleted");
                    Ok(())
                }
            }
        }
        AdminAction::Export { path } => {
            session.export(&path)?;
            println!("{}", session.status());
            Ok(())
        }
        AdminAction::Import { path } => {
            let result = session.import_file(&path);
            println!("{}", session.status());
            Ok(result?)
        }
        AdminAction::Preview { output: custom } => {
            session.publish_preview()?;
            let output = custom.as_deref().unwrap_or(output);
            folio_core::write_page(session.document(), output)?;
            println!("preview written to {}", output.display());
            Ok(())
        }
        AdminAction::Reset { .. } => Ok(()),
    }
}

/// Reads the password from stdin when not given on the command line.
pub fn read_password(given: Option<String>) -> CliResult<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn save<C: DocumentCache>(session: &mut AdminSession<C>) -> CliResult<()> {
    session.save()?;
    println!("{}", session.status());
    Ok(())
}

fn list<C: DocumentCache>(session: &AdminSession<C>, only: Option<SectionKind>) -> CliResult<()> {
    let kpis = session.kpis();
    println!(
        "total={} publications={} latest_year={}",
        kpis.total_records,
        kpis.publications,
        kpis.latest_year
            .map_or_else(|| "-".to_string(), |year| year.to_string())
    );

    let document = session.document();
    for kind in SectionKind::ALL {
        if only.is_some_and(|only| only != kind) {
            continue;
        }
        let records = document.section(kind);
        println!("{} ({})", kind.heading(), records.len());
        for (index, record) in records.iter().enumerate() {
            println!(
                "  [{index}] {} {}",
                record.id.as_deref().unwrap_or("-"),
                summary(kind, record)
            );
        }
    }
    Ok(())
}

fn edit_record<C: DocumentCache>(
    session: &mut AdminSession<C>,
    section: SectionKind,
    index: usize,
    fields: &[(String, String)],
) -> CliResult<()> {
    let mut snapshot = EditorSnapshot::capture(session.document());
    let rows = snapshot.sections.entry(section).or_default();
    let row: &mut RecordForm = rows.get_mut(index).ok_or_else(|| {
        CliError::Usage(format!("{section} has no record at index {index}"))
    })?;
    for (key, value) in fields {
        if section.field(key).is_none() {
            return Err(CliError::Usage(format!(
                "unknown field `{key}` for {section}"
            )));
        }
        row.set(key, value.clone());
    }
    session.sync_from_editors(&snapshot)?;
    Ok(())
}

fn apply_profile_field(form: &mut ProfileForm, key: &str, value: &str) -> CliResult<()> {
    let value = value.to_string();
    match key {
        "name" => form.name = value,
        "affiliation" => form.affiliation = value,
        "intro" => form.intro = value,
        "email" => form.email = value,
        "photo" => form.photo = value,
        "interests" | "areaOfInterest" => form.area_of_interest = value,
        _ => match key.strip_prefix("links.") {
            Some(link) if !link.is_empty() => {
                form.links.insert(link.to_string(), value);
            }
            _ => return Err(CliError::Usage(format!("unknown profile field `{key}`"))),
        },
    }
    Ok(())
}

fn summary(section: SectionKind, record: &Record) -> String {
    section
        .fields()
        .iter()
        .map(|spec| record.text(spec.key))
        .find(|text| !text.trim().is_empty())
        .unwrap_or_else(|| "(empty)".to_string())
}

fn confirm_delete(section: SectionKind, record: &Record) -> bool {
    let prompt = format!("Delete \"{}\" from {section}?", summary(section, record));
    confirm(&prompt, std::io::stdin().lock())
}

/// Asks `prompt` on stderr; only an explicit yes read from `input` confirms.
fn confirm(prompt: &str, mut input: impl BufRead) -> bool {
    eprint!("{prompt} [y/N] ");
    if std::io::stderr().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}
