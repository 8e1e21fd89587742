//! caseflow-runner: headless desk runner for CaseFlow.
//!
//! Usage:
//!   caseflow-runner --status OPEN
//!   caseflow-runner --endpoint http://localhost:8080/posts --select 7
//!   caseflow-runner --input posts.json --ipc-mode

use anyhow::{Context, Result};
use caseflow_core::{
    case_builder::Case,
    case_store::StatusFilter,
    config::DeskConfig,
    engine::CaseDesk,
    snapshot::DeskSnapshot,
    source::StaticCaseSource,
    types::CaseId,
};
use std::env;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Reload,
    Select { case_id: CaseId },
    Filter { status: String },
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let select = parse_arg::<CaseId>(&args, "--select")?;

    let config = match arg_value(&args, "--config") {
        Some(path) => DeskConfig::load(path)?,
        None => DeskConfig::default(),
    }
    .with_env_overrides()
    .with_endpoint_override(arg_value(&args, "--endpoint").map(String::from));

    let mut desk = CaseDesk::from_config(&config)?;
    if let Some(path) = arg_value(&args, "--input") {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read posts file {path}"))?;
        desk.replace_source(Box::new(StaticCaseSource::from_json(&json)?));
    }
    if let Some(filter) = parse_arg::<StatusFilter>(&args, "--status")? {
        desk.set_status_filter(filter)?;
    }

    if !ipc_mode {
        println!("CaseFlow — risk case triage");
        println!("  source:  {}", desk.source().describe());
        println!("  filter:  {}", desk.state().status_filter);
        println!();
    }

    desk.reload().await?;

    if ipc_mode {
        run_ipc_loop(&mut desk).await?;
    } else {
        if let Some(case_id) = select {
            desk.select_case(case_id)?;
        }
        print_summary(&desk.snapshot());
    }

    Ok(())
}

async fn run_ipc_loop(desk: &mut CaseDesk) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    write_snapshot(&mut stdout, &desk.snapshot()).await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string()).await?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Reload => desk.reload().await?,
            IpcCommand::Select { case_id } => desk.select_case(case_id)?,
            IpcCommand::Filter { status } => match status.parse::<StatusFilter>() {
                Ok(filter) => desk.set_status_filter(filter)?,
                Err(e) => {
                    log::warn!("Rejected filter: {status}");
                    write_error(&mut stdout, &e.to_string()).await?;
                    continue;
                }
            },
        }
        write_snapshot(&mut stdout, &desk.snapshot()).await?;
    }
    Ok(())
}

async fn write_snapshot(stdout: &mut io::Stdout, snapshot: &DeskSnapshot) -> Result<()> {
    let mut line = serde_json::to_string(snapshot)?;
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

async fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let mut line = serde_json::json!({ "error": message }).to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

fn print_summary(snapshot: &DeskSnapshot) {
    let counts = &snapshot.status_counts;

    println!("=== DESK SUMMARY ===");
    match &snapshot.error {
        Some(error) => println!("  status:   failed ({error})"),
        None => println!("  status:   ready"),
    }
    println!("  filter:   {}", snapshot.status_filter);
    println!("  visible:  {}", snapshot.visible_count);
    println!(
        "  OPEN: {} | REVIEW: {} | CLOSED: {}",
        counts.open, counts.review, counts.closed
    );

    println!();
    println!("=== CASES ===");
    if snapshot.visible_cases.is_empty() {
        println!("  (No cases match this filter)");
    }
    for case in &snapshot.visible_cases {
        let marker = if Some(case.id) == snapshot.selected_case_id {
            '>'
        } else {
            ' '
        };
        println!(
            "{marker} {:>4}  {:<22} {:<6} {:<5} risk {:>3}/100",
            case.id, case.subject_name, case.status, case.risk_category, case.risk_score
        );
    }

    println!();
    println!("=== SELECTED ===");
    match &snapshot.selected_case {
        Some(case) => print_case_detail(case),
        None => println!("  (Select a case to see details)"),
    }
}

fn print_case_detail(case: &Case) {
    println!("  {} [{}]", case.subject_name, case.status);
    println!(
        "  Case ID: {} | Category: {} | Risk: {}/100 ({:?})",
        case.id,
        case.risk_category,
        case.risk_score,
        case.risk_band()
    );
    println!("  Signals:");
    for signal in &case.signals {
        println!("    - {signal}");
    }
    println!("  {}", case.summary);
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Parse a flag's value. A missing flag is None; a malformed value is an error.
fn parse_arg<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    arg_value(args, flag)
        .map(|v| {
            v.parse::<T>()
                .with_context(|| format!("Invalid value for {flag}: {v}"))
        })
        .transpose()
}
