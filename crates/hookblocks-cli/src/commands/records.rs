//! Record management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use hookblocks_core::error::{AppError, ErrorKind};
use hookblocks_core::types::actor::Actor;
use hookblocks_entity::record::meta::parse_priority;
use hookblocks_entity::record::{ContentRecord, CreateRecord, UpdateRecord};
use hookblocks_service::{AdminRow, AdminSort, AppContext, NoticeLevel};

use crate::output::{self, OutputFormat};

/// Arguments for record commands
#[derive(Debug, Args)]
pub struct RecordsArgs {
    /// Record subcommand
    #[command(subcommand)]
    pub command: RecordsCommand,
}

/// Record subcommands
#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// List all records
    List {
        /// Sort column: order, hook, or priority
        #[arg(short, long, default_value_t = AdminSort::Order)]
        sort: AdminSort,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Show one record
    Show {
        /// Record ID
        id: Uuid,
    },
    /// Create a draft record
    Create {
        /// Title
        #[arg(short, long)]
        title: String,
        /// Hook the body is emitted at
        #[arg(long, default_value = "")]
        hook: String,
        /// Priority (empty, zero or non-numeric means the default)
        #[arg(short, long)]
        priority: Option<String>,
        /// Markup body
        #[arg(short, long, default_value = "", conflicts_with = "body_file")]
        body: String,
        /// Read the body from a file
        #[arg(long)]
        body_file: Option<String>,
        /// Ordering value
        #[arg(short, long, default_value_t = 0)]
        order: i32,
    },
    /// Edit record fields
    Update {
        /// Record ID
        id: Uuid,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New hook name
        #[arg(long)]
        hook: Option<String>,
        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
        /// New body
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,
        /// Read the new body from a file
        #[arg(long)]
        body_file: Option<String>,
        /// New ordering value
        #[arg(short, long)]
        order: Option<i32>,
    },
    /// Publish a record
    Publish {
        /// Record ID
        id: Uuid,
    },
    /// Move a published record back to draft
    Unpublish {
        /// Record ID
        id: Uuid,
    },
    /// Move a record to the trash
    Trash {
        /// Record ID
        id: Uuid,
    },
    /// Restore a trashed record as a draft
    Restore {
        /// Record ID
        id: Uuid,
    },
    /// Permanently delete a record
    Delete {
        /// Record ID
        id: Uuid,
    },
}

/// Record display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RecordRow {
    /// Record ID
    id: String,
    /// Title
    title: String,
    /// Status
    status: String,
    /// Hook
    hook: String,
    /// Priority
    priority: i32,
    /// Order
    order: i32,
}

impl From<AdminRow> for RecordRow {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            status: row.status.to_string(),
            hook: if row.hook.is_empty() {
                "-".to_string()
            } else {
                row.hook
            },
            priority: row.priority,
            order: row.order,
        }
    }
}

/// Execute record commands
pub async fn execute(
    args: &RecordsArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let actor = Actor::operator();
    let records = &ctx.records;

    match &args.command {
        RecordsCommand::List { sort, desc } => {
            let rows: Vec<RecordRow> = records
                .admin_rows(&actor, *sort, *desc)
                .await?
                .into_iter()
                .map(RecordRow::from)
                .collect();
            output::print_list(&rows, format);
            return Ok(());
        }
        RecordsCommand::Show { id } => {
            let record = records.get(&actor, *id).await?;
            print_record(&record, format);
            return Ok(());
        }
        RecordsCommand::Create {
            title,
            hook,
            priority,
            body,
            body_file,
            order,
        } => {
            let body = match body_file {
                Some(path) => read_body(path).await?,
                None => body.clone(),
            };
            let record = records
                .create(
                    &actor,
                    CreateRecord {
                        title: title.clone(),
                        hook_name: hook.clone(),
                        priority: priority.as_deref().map(parse_priority),
                        body,
                        order: *order,
                    },
                )
                .await?;
            output::print_success(&format!("Record {} created as draft", record.id));
            print_record(&record, format);
        }
        RecordsCommand::Update {
            id,
            title,
            hook,
            priority,
            body,
            body_file,
            order,
        } => {
            let body = match body_file {
                Some(path) => Some(read_body(path).await?),
                None => body.clone(),
            };
            let record = records
                .update(
                    &actor,
                    *id,
                    UpdateRecord {
                        title: title.clone(),
                        hook_name: hook.clone(),
                        priority: priority.as_deref().map(parse_priority),
                        body,
                        order: *order,
                    },
                )
                .await?;
            output::print_success(&format!("Record {} updated", record.id));
        }
        RecordsCommand::Publish { id } => {
            let outcome = records.publish(&actor, *id).await?;
            for notice in records.take_notices(&actor).await? {
                match notice.level {
                    NoticeLevel::Info => output::print_success(&notice.message),
                    NoticeLevel::Error => output::print_warning(&notice.message),
                }
            }
            if !outcome.decision.is_allowed() {
                output::print_warning(&format!("Record {id} left as draft"));
            }
        }
        RecordsCommand::Unpublish { id } => {
            records.unpublish(&actor, *id).await?;
            output::print_success(&format!("Record {id} moved to draft"));
        }
        RecordsCommand::Trash { id } => {
            records.trash(&actor, *id).await?;
            output::print_success(&format!("Record {id} moved to trash"));
        }
        RecordsCommand::Restore { id } => {
            records.restore(&actor, *id).await?;
            output::print_success(&format!("Record {id} restored as draft"));
        }
        RecordsCommand::Delete { id } => {
            records.delete(&actor, *id).await?;
            output::print_success(&format!("Record {id} deleted"));
        }
    }

    ctx.persist().await
}

/// Print one record in the selected format
fn print_record(record: &ContentRecord, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(record),
        OutputFormat::Table => {
            output::print_kv("id", &record.id.to_string());
            output::print_kv("title", &record.title);
            output::print_kv("status", record.status.as_str());
            output::print_kv("hook", &record.hook_name);
            output::print_kv("priority", &record.priority.to_string());
            output::print_kv("order", &record.order.to_string());
            output::print_kv(
                "updated",
                &record.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            );
            println!();
            println!("{}", record.body);
        }
    }
}

async fn read_body(path: &str) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Failed to read body file '{path}'"),
                e,
            )
        })
}
