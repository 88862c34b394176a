use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::charts::ChartKey;
use crate::commands::{CreateOptions, ListOptions};
use crate::form::{Priority, RequestType, TaskClassification};
use crate::query::{SortColumn, SortDirection};
use crate::report::{ChartCapture, parse_capture};
use crate::types::{TicketId, Zone, ZoneFilter};
use crate::workflow::BatchTarget;

#[derive(Parser)]
#[command(name = "ticketdesk")]
#[command(about = "Trouble-ticket results table, batch status workflow and analytics export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format shared by every command
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Query controls of the results table
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Case-insensitive search over service number, handler and ID
    #[arg(short, long)]
    pub search: Option<String>,

    /// Zone label, or "All"
    #[arg(short, long, value_parser = parse_zone_filter)]
    pub zone: Option<ZoneFilter>,

    /// Column to sort by: id, zone, servicenumber, handler, status, duration
    #[arg(long, value_parser = parse_sort_column)]
    pub sort: Option<SortColumn>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page number (clamped to the available pages)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

impl From<TableArgs> for ListOptions {
    fn from(args: TableArgs) -> Self {
        let direction = if args.asc {
            Some(SortDirection::Ascending)
        } else if args.desc {
            Some(SortDirection::Descending)
        } else {
            None
        };
        ListOptions {
            search: args.search,
            zone: args.zone,
            sort: args.sort,
            direction,
            page: args.page,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a page of the results table
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        table: TableArgs,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Select tickets and run a batch status action
    Batch {
        /// start (Pending -> In-Progress) or resolve (In-Progress -> Resolved)
        #[arg(value_parser = parse_batch_target)]
        action: BatchTarget,

        /// Ticket IDs to select
        #[arg(required = true, value_parser = parse_ticket_id)]
        ids: Vec<TicketId>,

        #[command(flatten)]
        table: TableArgs,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Move one ticket to its next status
    Advance {
        /// Ticket ID
        #[arg(value_parser = parse_ticket_id)]
        id: TicketId,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Submit a new trouble ticket
    #[command(visible_alias = "c")]
    Create {
        /// Service number
        #[arg(long)]
        service_number: String,

        /// Task classification: provisioning, maintenance, others
        #[arg(long, value_parser = parse_classification)]
        classification: TaskClassification,

        /// Request type: email, phone, sms, manual (default: email)
        #[arg(long, default_value = "email", value_parser = parse_request_type)]
        request_type: RequestType,

        /// Specific request type
        #[arg(long)]
        specific_request_type: String,

        /// Zone label
        #[arg(long, value_parser = parse_zone)]
        zone: Zone,

        /// Assigned handler
        #[arg(long)]
        handler: String,

        /// Remarks
        #[arg(long)]
        remarks: String,

        /// Priority: high, medium, low (default: medium)
        #[arg(long, default_value = "medium", value_parser = parse_priority)]
        priority: Priority,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Print the analytics chart series
    Charts {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Plan the analytics slide deck from captured chart images
    Report {
        /// Captured chart as KEY=PATH or KEY=PATH@WIDTHxHEIGHT
        /// (keys: history-line, handler-bar, task-doughnut, zonal-bar)
        #[arg(long = "capture", value_parser = parse_capture_arg)]
        captures: Vec<(ChartKey, ChartCapture)>,

        /// Write the deck plan here instead of stdout
        #[arg(short, long)]
        output_file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        output: OutputOptions,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            cmd_advance, cmd_batch, cmd_charts, cmd_config_init, cmd_config_show, cmd_create,
            cmd_list, cmd_report,
        };

        match self {
            Commands::List { table, output } => cmd_list(&table.into(), output),

            Commands::Batch {
                action,
                ids,
                table,
                output,
            } => cmd_batch(action, &ids, &table.into(), output).await,

            Commands::Advance { id, output } => cmd_advance(&id, output).await,

            Commands::Create {
                service_number,
                classification,
                request_type,
                specific_request_type,
                zone,
                handler,
                remarks,
                priority,
                output,
            } => {
                cmd_create(
                    CreateOptions {
                        service_number,
                        classification: Some(classification),
                        request_type,
                        specific_request_type,
                        zone: Some(zone),
                        handler,
                        remarks,
                        priority,
                    },
                    output,
                )
                .await
            }

            Commands::Charts { output } => cmd_charts(output),

            Commands::Report {
                captures,
                output_file,
                output,
            } => cmd_report(captures, output_file.as_deref(), output),

            Commands::Config { action } => match action {
                ConfigAction::Show { output } => cmd_config_show(output),
                ConfigAction::Init { force, output } => cmd_config_init(force, output),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T>(s: &str, field_name: &str, valid_values: &[&str]) -> Result<T, String>
where
    T: std::str::FromStr,
{
    s.parse().map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn zone_labels() -> Vec<&'static str> {
    Zone::ALL.iter().map(|z| z.label()).collect()
}

fn parse_zone(s: &str) -> Result<Zone, String> {
    parse_with_validation(s, "zone", &zone_labels())
}

fn parse_zone_filter(s: &str) -> Result<ZoneFilter, String> {
    let options: Vec<String> = ZoneFilter::options().iter().map(|z| z.to_string()).collect();
    let valid: Vec<&str> = options.iter().map(String::as_str).collect();
    parse_with_validation(s, "zone", &valid)
}

fn parse_sort_column(s: &str) -> Result<SortColumn, String> {
    parse_with_validation(s, "sort column", SortColumn::ALL_STRINGS)
}

fn parse_batch_target(s: &str) -> Result<BatchTarget, String> {
    parse_with_validation(s, "batch action", &["start", "resolve"])
}

fn parse_classification(s: &str) -> Result<TaskClassification, String> {
    parse_with_validation(
        s,
        "task classification",
        &["provisioning", "maintenance", "others"],
    )
}

fn parse_request_type(s: &str) -> Result<RequestType, String> {
    parse_with_validation(s, "request type", &["email", "phone", "sms", "manual"])
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    parse_with_validation(s, "priority", &["high", "medium", "low"])
}

fn parse_ticket_id(s: &str) -> Result<TicketId, String> {
    TicketId::new(s).map_err(|e| e.to_string())
}

fn parse_capture_arg(s: &str) -> Result<(ChartKey, ChartCapture), String> {
    parse_capture(s).map_err(|e| e.to_string())
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "ticketdesk", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_zone_case_insensitive() {
        assert_eq!(parse_zone("ser - adama").unwrap(), Zone::SerAdama);
        assert_eq!(parse_zone_filter("all").unwrap(), ZoneFilter::All);
    }

    #[test]
    fn test_parse_zone_error_lists_valid_values() {
        let err = parse_zone("Atlantis").unwrap_err();
        assert!(err.starts_with("Invalid zone. Must be one of: CAAZ"));
        assert!(err.contains("ER - Dire Dawa"));
    }

    #[test]
    fn test_parse_batch_target() {
        assert_eq!(parse_batch_target("START").unwrap(), BatchTarget::Start);
        assert_eq!(parse_batch_target("resolved").unwrap(), BatchTarget::Resolve);
        assert!(parse_batch_target("reopen").is_err());
    }

    #[test]
    fn test_parse_ticket_id_rejects_blank() {
        assert!(parse_ticket_id("  ").is_err());
        assert_eq!(parse_ticket_id(" 1004 ").unwrap().as_str(), "1004");
    }

    #[test]
    fn test_list_args_to_options() {
        let cli = Cli::try_parse_from([
            "ticketdesk", "list", "--zone", "CAAZ", "--sort", "handler", "--asc", "--page", "2",
        ])
        .unwrap();
        let Commands::List { table, .. } = cli.command else {
            panic!("expected list");
        };
        let options = ListOptions::from(table);
        assert_eq!(options.zone, Some(ZoneFilter::Only(Zone::Caaz)));
        assert_eq!(options.sort, Some(SortColumn::Handler));
        assert_eq!(options.direction, Some(SortDirection::Ascending));
        assert_eq!(options.page, 2);
    }

    #[test]
    fn test_report_captures_parse() {
        let cli = Cli::try_parse_from([
            "ticketdesk",
            "report",
            "--capture",
            "history-line=a.png",
            "--capture",
            "zonal-bar=b.png@640x360",
        ])
        .unwrap();
        let Commands::Report { captures, .. } = cli.command else {
            panic!("expected report");
        };
        assert_eq!(captures.len(), 2);
        assert_eq!(captures[1].1.width, 640);
    }
}
