use super::CliError;
use crate::alerts::{in_bucket, AlertBucket, AlertCounts};
use crate::api::models::Alert;
use crate::api::ApiClient;
use crate::render;

pub async fn list(client: &ApiClient, bucket: Option<AlertBucket>) -> Result<(), CliError> {
    let alerts = client.list_alerts().await?;
    let counts = AlertCounts::tally(&alerts);
    println!(
        "Critical: {}  Upcoming renewals: {}",
        counts.critical, counts.reminder
    );

    let shown: Vec<&Alert> = match bucket {
        Some(bucket) => in_bucket(&alerts, bucket),
        None => alerts.iter().collect(),
    };
    if shown.is_empty() {
        println!("Nothing expiring.");
    }
    for alert in shown {
        println!("{}", render::alert(alert));
    }
    Ok(())
}
