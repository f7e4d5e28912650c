//! Scripted walk through a portal session against an in-memory ledger.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;

use wavesync_application::{PortalSnapshot, WavePortal};
use wavesync_core::config::PortalConfig;
use wavesync_core::entry::{Address, RawEntry};
use wavesync_core::transaction::TxPhase;
use wavesync_infrastructure::{AgentResponse, InMemoryLedger, StaticSigningAgent};

const DEMO_ACCOUNT: &str = "0x8ba1f109551bd432803012645ac136ddd64dba72";

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Wave message to submit (repeatable)
    #[arg(short, long = "message")]
    pub messages: Vec<String>,

    /// Reject the authorization prompt
    #[arg(long)]
    pub reject: bool,

    /// Run without a signing agent
    #[arg(long)]
    pub no_agent: bool,

    /// Revert the first submitted wave
    #[arg(long)]
    pub revert: bool,

    /// Print the final snapshot and logs as JSON
    #[arg(long)]
    pub json: bool,

    /// Simulated mining delay in milliseconds
    #[arg(long, default_value_t = 200)]
    pub mining_ms: u64,
}

fn history() -> Vec<RawEntry> {
    vec![
        RawEntry::new("0x1111", 1_640_995_200, "gm from the first visitor"),
        RawEntry::new("0x2222", 1_640_995_260, "waving back"),
    ]
}

pub async fn run(args: DemoArgs, config: &PortalConfig) -> Result<()> {
    let account = Address::from(DEMO_ACCOUNT);
    let response = if args.no_agent {
        AgentResponse::Absent
    } else if args.reject {
        AgentResponse::Reject
    } else {
        AgentResponse::Approve
    };

    let ledger = InMemoryLedger::new(account.clone())
        .with_waves(history())
        .with_mining_delay(Duration::from_millis(args.mining_ms));
    if args.revert {
        ledger.revert_next_write("execution reverted");
    }

    let agent = Arc::new(StaticSigningAgent::new(account, response));
    let portal = WavePortal::new(agent, Arc::new(ledger), config);
    tracing::info!("[Demo] Contract {}", config.contract_address);

    if portal.start().await.is_none() {
        if let Err(e) = portal.connect().await {
            println!("{} {}", "Connection failed:".red().bold(), e);
        }
    }

    for message in &args.messages {
        match portal.submit(message).await {
            Ok(receipt) => println!("{} {}", "Mined".green(), receipt.hash),
            Err(e) => println!("{} {}", "Wave failed:".red(), e),
        }
    }

    let snapshot = portal.snapshot();
    portal.shutdown().await;

    if args.json {
        println!("{}", snapshot.to_json().context("Failed to render snapshot")?);
    } else {
        print_snapshot(&snapshot);
    }
    Ok(())
}

fn print_snapshot(snapshot: &PortalSnapshot) {
    match &snapshot.account {
        Some(address) => println!("{} {}", "Connected:".bold(), address),
        None => println!("{} {}", "Connected:".bold(), "no".dimmed()),
    }
    if let Some(total) = snapshot.total_waves {
        println!("{} {}", "Total waves:".bold(), total);
    }

    println!();
    for entry in &snapshot.entries {
        println!(
            "{} {}",
            entry.timestamp().format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            entry.address().as_str().cyan()
        );
        println!("    {}", entry.message());
    }

    if let Some(tx) = &snapshot.transaction {
        let phase = match &tx.phase {
            TxPhase::Idle => "idle".normal(),
            TxPhase::Submitted => "mining".yellow(),
            TxPhase::Confirmed => "confirmed".green(),
            TxPhase::Failed(reason) => format!("failed ({})", reason).as_str().red(),
        };
        println!();
        println!("{} \"{}\" {}", "Last wave:".bold(), tx.message, phase);
    }
    if let Some(notice) = &snapshot.notice {
        println!("{} {}", "Notice:".yellow().bold(), notice);
    }
}
