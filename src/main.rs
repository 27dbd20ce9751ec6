use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use minion_client::args::{Args, Plans, Scans, Sites, SubCommand};
use minion_client::errors::*;
use minion_client::models::Site;
use minion_client::{CallbackEvent, MinionClient};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use strum::VariantNames;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match (args.verbose, args.quiet) {
        (0, 0) => "info",
        (0, _) => "warn",
        _ => "debug",
    };
    env_logger::init_from_env(Env::default().default_filter_or(log_level));

    let mut client = MinionClient::new(&args.endpoint, &args.api_user, &args.api_key);
    if let Some(timeout) = args.timeout {
        client = client.with_timeout(Duration::from_secs(timeout));
    }
    debug!("Using {:?}", client);

    match args.subcommand {
        SubCommand::Sites { subcommand } => match subcommand {
            Sites::Ls { url: None } => {
                let sites = client.get_sites().await.context("Failed to list sites")?;
                print_json(&sites)?;
            }
            Sites::Ls { url: Some(url) } => {
                let sites = client
                    .get_sites_by_url(&url)
                    .await
                    .with_context(|| format!("Failed to list sites for {:?}", url))?;
                print_json(&sites)?;
            }
            Sites::Create { url, plans, groups } => {
                let template = Site::new(url).with_plans(plans).with_groups(groups);
                let site = client
                    .create_site(&template)
                    .await
                    .with_context(|| format!("Failed to create site {:?}", template.url))?;
                print_json(&site)?;
            }
        },
        SubCommand::Plans { subcommand } => match subcommand {
            Plans::Get { name } => {
                let plan = client
                    .get_plan_by_name(&name)
                    .await
                    .with_context(|| format!("Failed to look up plan {:?}", name))?;
                print_json(&plan)?;
            }
        },
        SubCommand::Scans { subcommand } => match subcommand {
            Scans::Ls {
                site_id,
                plan_name,
                limit,
            } => {
                let scans = client
                    .get_scans(&site_id, &plan_name, limit)
                    .await
                    .context("Failed to list scans")?;
                print_json(&scans)?;
            }
            Scans::Get { id } => {
                let scan = client
                    .get_scan(&id)
                    .await
                    .with_context(|| format!("Failed to fetch scan {:?}", id))?;
                print_json(&scan)?;
            }
            Scans::Create {
                site_id,
                plan_name,
                callback_url,
            } => {
                let plan = client
                    .get_plan_by_name(&plan_name)
                    .await
                    .with_context(|| format!("Failed to look up plan {:?}", plan_name))?;
                let scan = client
                    .create_scan(&site_id, &plan.name, &callback_url)
                    .await
                    .context("Failed to create scan")?;
                print_json(&scan)?;
            }
        },
        SubCommand::CallbackEvents => {
            for event in CallbackEvent::VARIANTS {
                println!("{}", event);
            }
        }
    }

    Ok(())
}
