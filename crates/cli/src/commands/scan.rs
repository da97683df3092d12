//! BLE neighborhood scan.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use openmeccanoid_ble::scan;

pub async fn execute(timeout_secs: u64) -> Result<()> {
    println!("Scanning for {timeout_secs} s...");
    let found = scan(Duration::from_secs(timeout_secs)).await?;

    if found.is_empty() {
        println!("{}", "No BLE peripherals seen".yellow());
        return Ok(());
    }

    println!("{}", "Peripherals:".bold());
    for peripheral in &found {
        // Robots get a green marker, everything else is dimmed.
        let marker = if peripheral.is_robot() {
            "●".green()
        } else {
            "●".dimmed()
        };
        let name = peripheral.local_name.as_deref().unwrap_or("(no name)");
        match peripheral.rssi {
            Some(rssi) => println!(
                "  {marker} {} {} {} dBm",
                name.bold(),
                peripheral.address.dimmed(),
                rssi
            ),
            None => println!("  {marker} {} {}", name.bold(), peripheral.address.dimmed()),
        }
    }
    Ok(())
}
