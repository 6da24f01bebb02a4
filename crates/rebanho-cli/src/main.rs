//! rebanho CLI - a command-line front-end for the rebanho livestock API.
//!
//! Initializes the session (silent refresh via the server-held cookie),
//! logs in with `REBANHO_EMAIL`/`REBANHO_PASSWORD` when anonymous, and
//! prints the requested view.

use std::io;

use anyhow::{bail, Result};
use rebanho_core::api::ListParams;
use rebanho_core::{ApiClient, Config, SessionManager};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("rebanho CLI starting");

    let mut config = Config::load()?;
    let session = SessionManager::new(config.api_url())?;
    let mut client = ApiClient::new(session);

    // Recover a prior session before touching any resource
    if !client.session_mut().initialize().await {
        login(&mut client, &mut config).await?;
    }

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("dashboard");

    let result = match command {
        "dashboard" => show_dashboard(&mut client).await,
        "animais" => list_animals(&mut client).await,
        "fazendas" => list_farms(&mut client).await,
        "doencas" => list_diseases(&mut client).await,
        "vacinas" => list_vaccinations(&mut client).await,
        "logout" => {
            let server_ok = client.session_mut().logout().await;
            if server_ok {
                println!("Sessão encerrada.");
            } else {
                println!("Sessão local encerrada (servidor não confirmou).");
            }
            Ok(())
        }
        other => bail!("unknown command: {} (expected dashboard | animais | fazendas | doencas | vacinas | logout)", other),
    };

    if let Err(e) = result {
        eprintln!("Erro: {}", e);
        std::process::exit(1);
    }

    info!("rebanho CLI done");
    Ok(())
}

async fn login(client: &mut ApiClient, config: &mut Config) -> Result<()> {
    let identifier = std::env::var("REBANHO_EMAIL")
        .ok()
        .or_else(|| config.last_identifier.clone());
    let Some(identifier) = identifier else {
        bail!("no session to recover and REBANHO_EMAIL is not set");
    };
    let Ok(secret) = std::env::var("REBANHO_PASSWORD") else {
        bail!("REBANHO_PASSWORD is not set");
    };

    if !client.session_mut().login(&identifier, &secret).await? {
        bail!("login rejected for {}", identifier);
    }

    config.last_identifier = Some(identifier);
    config.save()?;

    if let Some(user) = client.session().current_user() {
        println!("Conectado como {} <{}>", user.name, user.email);
    }
    Ok(())
}

async fn show_dashboard(client: &mut ApiClient) -> Result<()> {
    let summary = client.dashboard().await?;
    println!("Animais:            {}", summary.total_animals);
    println!("Fazendas:           {}", summary.total_farms);
    println!("Doenças ativas:     {}", summary.active_diseases);
    println!("Vacinas aplicadas:  {}", summary.vaccinations_applied);
    if !summary.animals_by_species.is_empty() {
        println!("Por espécie:");
        for entry in &summary.animals_by_species {
            println!("  {:<12} {}", entry.species, entry.total);
        }
    }
    Ok(())
}

async fn list_animals(client: &mut ApiClient) -> Result<()> {
    let animals = client.list_animals(&ListParams::default()).await?;
    if animals.is_empty() {
        println!("Nenhum animal cadastrado.");
        return Ok(());
    }
    for animal in &animals {
        let status = animal
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:<10} {}",
            animal.display_label(),
            status,
            animal.breed.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn list_farms(client: &mut ApiClient) -> Result<()> {
    let farms = client.list_farms(&ListParams::default()).await?;
    if farms.is_empty() {
        println!("Nenhuma fazenda cadastrada.");
        return Ok(());
    }
    for farm in &farms {
        match farm.total_animals {
            Some(total) => println!("{:<40} {} animais", farm.display_label(), total),
            None => println!("{}", farm.display_label()),
        }
    }
    Ok(())
}

async fn list_diseases(client: &mut ApiClient) -> Result<()> {
    let records = client.list_diseases(None).await?;
    if records.is_empty() {
        println!("Nenhum registro de doença.");
        return Ok(());
    }
    for record in &records {
        let state = if record.is_active() { "ativa" } else { "recuperada" };
        println!(
            "animal {:<8} {:<25} {:<10} desde {}",
            record.animal_id, record.disease, state, record.diagnosed_on
        );
    }
    Ok(())
}

async fn list_vaccinations(client: &mut ApiClient) -> Result<()> {
    let applications = client.list_vaccinations(None).await?;
    if applications.is_empty() {
        println!("Nenhuma vacina registrada.");
        return Ok(());
    }
    for application in &applications {
        let next = application
            .next_dose_on
            .map(|d| format!(" (próxima: {})", d))
            .unwrap_or_default();
        println!(
            "animal {:<8} {:<20} em {}{}",
            application.animal_id, application.vaccine, application.applied_on, next
        );
    }
    Ok(())
}
