use super::{toast, CliError, ScopeArgs};
use crate::alerts::AlertCounts;
use crate::api::models::Document;
use crate::api::{ApiClient, ApiError};
use crate::chat::Transcript;
use crate::library::{self, Category, SearchScope, NEW_CHAT_NOTICE};
use crate::render;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinSet};
use tracing::warn;

const HELP: &str = "\
Commands:
  /new                      start a new chat
  /category <name>          filter by category (all, employee_contracts, nda, loan_agreements, general)
  /select <id> [<id>...]    lock the context to specific documents
  /clear                    clear the document selection
  /upload <path> [category] upload a PDF contract
  /help                     show this help
  /quit                     leave
Anything else is sent as a question.";

#[derive(Debug, PartialEq)]
enum Input {
    Query(String),
    NewChat,
    Category(Category),
    Select(Vec<i64>),
    Clear,
    Upload {
        path: PathBuf,
        category: Option<Category>,
    },
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Query(line.to_string());
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    match (name, args.as_slice()) {
        ("new", []) => Input::NewChat,
        ("clear", []) => Input::Clear,
        ("help", []) => Input::Help,
        ("quit" | "exit", []) => Input::Quit,
        ("category", [_, ..]) => match args.join(" ").parse() {
            Ok(category) => Input::Category(category),
            Err(e) => Input::Invalid(e),
        },
        ("select", [_, ..]) => {
            let ids: Result<Vec<i64>, _> = args
                .iter()
                .flat_map(|a| a.split(','))
                .filter(|a| !a.is_empty())
                .map(str::parse)
                .collect();
            match ids {
                Ok(ids) => Input::Select(ids),
                Err(_) => Input::Invalid("Document ids must be numbers".into()),
            }
        }
        ("upload", [path]) => Input::Upload {
            path: PathBuf::from(*path),
            category: None,
        },
        ("upload", [path, category]) => match category.parse() {
            Ok(category) => Input::Upload {
                path: PathBuf::from(*path),
                category: Some(category),
            },
            Err(e) => Input::Invalid(e),
        },
        _ => Input::Invalid(format!("Unknown command: /{}. Type /help.", command)),
    }
}

struct UploadOutcome {
    file_name: String,
    result: Result<(), ApiError>,
}

/// Starts an upload in the background. Its outcome is collected from `uploads`.
fn spawn_upload(
    uploads: &mut JoinSet<UploadOutcome>,
    client: &ApiClient,
    path: PathBuf,
    category: Option<Category>,
) {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();
    let client = client.clone();
    uploads.spawn(async move {
        let result = client
            .upload(&path, category.and_then(Category::filter))
            .await
            .map(|_| ());
        UploadOutcome { file_name, result }
    });
}

/// Reports a finished upload. Only successes reach the transcript.
fn record_upload(transcript: &mut Transcript, joined: Result<UploadOutcome, JoinError>) {
    match joined {
        Ok(UploadOutcome {
            file_name,
            result: Ok(()),
        }) => {
            transcript.append_system_notice(&library::upload_notice(&file_name));
            toast("Contract uploaded successfully");
        }
        Ok(UploadOutcome {
            file_name,
            result: Err(e),
        }) => {
            warn!(file = %file_name, error = %e, "upload failed");
            toast("Upload failed.");
        }
        Err(e) => {
            warn!(error = %e, "upload task did not finish");
            toast("Upload failed.");
        }
    }
}

/// Waits for every outstanding upload so none is cut off on exit.
async fn drain_uploads(uploads: &mut JoinSet<UploadOutcome>, transcript: &mut Transcript) {
    while let Some(joined) = uploads.join_next().await {
        record_upload(transcript, joined);
    }
}

/// Applies `--category` / `--doc` to a fresh scope, posting the notices the
/// equivalent interactive commands would.
fn apply_scope_args(
    args: &ScopeArgs,
    documents: &[Document],
    transcript: &mut Transcript,
) -> SearchScope {
    let mut scope = SearchScope::default();
    if args.category != Category::All {
        let notice = scope.set_category(args.category);
        transcript.append_system_notice(&notice);
    }
    if !args.docs.is_empty() {
        match scope.select(library::select_by_ids(documents, &args.docs)) {
            Some(notice) => transcript.append_system_notice(&notice),
            None => warn!(ids = ?args.docs, "none of the requested documents exist"),
        }
    }
    scope
}

pub async fn ask(
    client: &ApiClient,
    query: &str,
    args: &ScopeArgs,
    json: bool,
) -> Result<(), CliError> {
    let documents = if args.docs.is_empty() {
        Vec::new()
    } else {
        client.list_documents(None).await?
    };

    let mut transcript = Transcript::new();
    let scope = apply_scope_args(args, &documents, &mut transcript);
    if !transcript.send(client, query, &scope).await {
        return Err(CliError::EmptyQuery);
    }

    let reply = transcript.last();
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
    } else {
        print!("{}", render::message(reply));
    }
    Ok(())
}

/// Prints messages appended since the last call and returns the new mark.
fn print_new(transcript: &Transcript, printed: usize) -> usize {
    let start = if printed > transcript.len() { 0 } else { printed };
    for msg in &transcript.messages()[start..] {
        println!("{}", render::message(msg));
    }
    transcript.len()
}

pub async fn interactive(client: &ApiClient, args: &ScopeArgs) -> Result<(), CliError> {
    let (documents, alerts) = futures::join!(client.list_documents(None), client.list_alerts());
    let documents = documents.unwrap_or_else(|e| {
        warn!(error = %e, "could not load documents");
        Vec::new()
    });
    match alerts {
        Ok(alerts) => {
            let counts = AlertCounts::tally(&alerts);
            println!(
                "Critical: {}  Upcoming renewals: {}  Documents: {}",
                counts.critical,
                counts.reminder,
                documents.len()
            );
        }
        Err(e) => warn!(error = %e, "could not load alerts"),
    }
    println!("Type /help for commands.\n");

    let mut transcript = Transcript::new();
    let mut scope = apply_scope_args(args, &documents, &mut transcript);
    let mut uploads = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printed = print_new(&transcript, 0);
    prompt()?;

    loop {
        let line = tokio::select! {
            Some(joined) = uploads.join_next(), if !uploads.is_empty() => {
                record_upload(&mut transcript, joined);
                printed = print_new(&transcript, printed);
                prompt()?;
                continue;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };

        match parse_input(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Help => println!("{}", HELP),
            Input::Invalid(message) => toast(&message),
            Input::NewChat => {
                transcript.reset();
                scope.reset();
                transcript.append_system_notice(NEW_CHAT_NOTICE);
                toast("New chat started");
                printed = 0;
            }
            Input::Category(category) => {
                let notice = scope.set_category(category);
                transcript.append_system_notice(&notice);
                toast(&notice);
            }
            Input::Clear => {
                let notice = scope.clear_selection();
                transcript.append_system_notice(&notice);
                toast("Selection cleared");
            }
            Input::Select(ids) => match client.list_documents(None).await {
                Ok(listed) => match scope.select(library::select_by_ids(&listed, &ids)) {
                    Some(notice) => {
                        transcript.append_system_notice(&notice);
                        toast(&format!("{} Contracts selected", scope.selected().len()));
                    }
                    None => toast("No matching documents"),
                },
                Err(e) => {
                    warn!(error = %e, "could not load documents");
                    toast("Could not load the library.");
                }
            },
            Input::Upload { path, category } => {
                toast("Uploading document...");
                spawn_upload(&mut uploads, client, path, category);
            }
            Input::Query(text) => {
                if let Some(request) = transcript.append_user_turn(&text, &scope) {
                    printed = print_new(&transcript, printed);
                    eprintln!("Thinking...");

                    // Input stays closed until the answer settles; uploads keep reporting.
                    let chat = client.chat(&request);
                    tokio::pin!(chat);
                    let outcome = loop {
                        tokio::select! {
                            outcome = &mut chat => break outcome,
                            Some(joined) = uploads.join_next(), if !uploads.is_empty() => {
                                record_upload(&mut transcript, joined);
                                printed = print_new(&transcript, printed);
                            }
                        }
                    };
                    transcript.settle(outcome);
                }
            }
        }

        printed = print_new(&transcript, printed);
        prompt()?;
    }

    if !uploads.is_empty() {
        eprintln!("Waiting for {} upload(s) to finish...", uploads.len());
        drain_uploads(&mut uploads, &mut transcript).await;
        print_new(&transcript, printed);
    }
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}
