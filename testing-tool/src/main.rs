use anyhow::Result;
use carcare_backend::client::{ApiClient, ServiceSearch};
use carcare_backend::models::{ReminderStatus, ServiceType};
use carcare_backend::store::FleetStore;
use colored::*;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚗 CarCare Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: servidor y usuario
    let base_url = prompt("Server URL [http://localhost:3000]: ")?;
    let base_url = if base_url.is_empty() { "http://localhost:3000".to_string() } else { base_url };
    let user_id = prompt("User ID [demo-user]: ")?;
    let user_id = if user_id.is_empty() { "demo-user".to_string() } else { user_id };

    let client = ApiClient::new(base_url, user_id);
    let mut store = FleetStore::new();

    // Paso 2: comprobar que el servidor responde
    match client.health().await {
        Ok(health) => println!("{} {}", "✅ Server up:".bright_green(), health),
        Err(e) => {
            println!("{} {}", "❌ Server unreachable:".bright_red(), e);
            return Ok(());
        }
    }

    // Paso 3: menú principal
    loop {
        println!();
        println!("{}", "📋 MAIN MENU".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🌱 Seed demo data");
        println!("2. 📊 Dashboard");
        println!("3. ⏰ Reminders");
        println!("4. 🔍 Search services");
        println!("5. 🚪 Exit");

        let choice = prompt("Choose an option (1-5): ")?;
        let outcome = match choice.as_str() {
            "1" => seed(&client).await,
            "2" => dashboard(&client, &mut store).await,
            "3" => reminders(&client, &mut store).await,
            "4" => search(&client).await,
            "5" => {
                println!("{}", "👋 Bye!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Invalid option, try again.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{} {}", "❌ Error:".bright_red(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn seed(client: &ApiClient) -> Result<()> {
    let report = client.seed().await?;
    if report.seeded {
        println!(
            "{} {} vehicles, {} services, {} reminders",
            "🌱 Seeded:".bright_green().bold(),
            report.vehicles_created,
            report.services_created,
            report.reminders_created
        );
    } else {
        println!("{}", "⚠️ User already has vehicles, nothing seeded".bright_yellow());
    }
    Ok(())
}

async fn dashboard(client: &ApiClient, store: &mut FleetStore) -> Result<()> {
    let stats = client.stats().await?;
    store.refresh(client).await?;

    println!("{}", "📊 DASHBOARD".bright_cyan().bold());
    println!("   Vehicles:          {}", stats.summary.total_vehicles);
    println!("   Services:          {}", stats.summary.total_services);
    println!("   Total cost:        ${}", stats.summary.total_cost);
    println!("   Pending reminders: {}", stats.summary.pending_reminders);

    // El resumen del store local debe coincidir con el del servidor
    if store.summary() != stats.summary {
        println!("{}", "⚠️ Local store summary differs from server".bright_yellow());
    }

    for vehicle in &stats.vehicles {
        println!(
            "   🚗 {} | {} mi | {} services | ${}",
            vehicle.display_name.bold(),
            vehicle.mileage,
            vehicle.service_count,
            vehicle.total_cost
        );
    }

    println!("{}", "🔧 Recent services:".bright_blue());
    for service in &stats.recent_services {
        println!(
            "   {} {} - {} (${})",
            service.service_date.format("%Y-%m-%d"),
            service.service_type.label(),
            service.description,
            service.cost
        );
    }
    Ok(())
}

async fn reminders(client: &ApiClient, store: &mut FleetStore) -> Result<()> {
    store.refresh(client).await?;

    println!("{}", "⏰ REMINDERS".bright_cyan().bold());
    for (vehicle, reminder, status) in store.reminders(chrono::Utc::now()) {
        let badge = match status {
            ReminderStatus::Overdue => status.label().bright_red(),
            ReminderStatus::DueSoon => status.label().bright_yellow(),
            ReminderStatus::Upcoming => status.label().bright_blue(),
            ReminderStatus::Completed => status.label().bright_green(),
        };
        println!("   [{}] {} - {}", badge, vehicle.vehicle.display_name(), reminder.description);
    }
    Ok(())
}

async fn search(client: &ApiClient) -> Result<()> {
    let query = prompt("Text (empty for all): ")?;
    let service_type = prompt("Type (e.g. OIL_CHANGE, empty for all): ")?;

    let search = ServiceSearch {
        query: Some(query).filter(|q| !q.is_empty()),
        vehicle_id: None,
        service_type: if service_type.is_empty() {
            None
        } else {
            Some(service_type.parse::<ServiceType>().map_err(anyhow::Error::msg)?)
        },
    };

    let result = client.search_services(&search).await?;
    println!("{} {} services", "🔍 Found".bright_green().bold(), result.count);
    for service in &result.services {
        println!("   {} {} - {}", service.service_date.format("%Y-%m-%d"), service.service_type.label(), service.provider);
    }
    println!("   Total: ${}", result.total_cost);
    if let Some(average) = result.average_cost {
        println!("   Average: ${}", average.round_dp(2));
    }
    Ok(())
}
