use anyhow::Result;
use tracing::info;

use crate::client::RosterClient;

pub async fn run_list(url: &str) -> Result<()> {
    let client = RosterClient::new(url)?;
    let activities = client.list_activities().await?;
    info!("Fetched {} activities from {}", activities.len(), url);

    for activity in activities.values() {
        println!(
            "{} ({}/{}) - {}",
            activity.name,
            activity.participants.len(),
            activity.max_participants,
            activity.schedule
        );
        println!("  {}", activity.description);
        if activity.participants.is_empty() {
            println!("  (no participants)");
        }
        for p in &activity.participants {
            println!("  - {p}");
        }
    }
    Ok(())
}

pub async fn run_signup(url: &str, activity: &str, email: &str) -> Result<()> {
    let client = RosterClient::new(url)?;
    let message = client.sign_up(activity, email).await?;
    println!("{message}");
    Ok(())
}

pub async fn run_withdraw(url: &str, activity: &str, email: &str) -> Result<()> {
    let client = RosterClient::new(url)?;
    let message = client.withdraw(activity, email).await?;
    println!("{message}");
    Ok(())
}
