//! Saved-location command handlers.
//!
//! Server addresses come from the backend; locations added here stay in the
//! session file until the user saves them elsewhere.

use std::process::ExitCode;

use clap::Subcommand;
use dryclean_client::{
    AddressBook, ApiClient, EntryView, ListView, LocationForm, LocationListView, MapsClient,
    MapsStatus, SessionStore,
};
use dryclean_core::{AppConfig, Origin, StateOption};

use crate::ConsoleNotifier;

#[derive(Debug, Subcommand)]
pub enum AddressCommands {
    /// List saved and session-local locations
    List,
    /// Delete a location by id
    Delete { id: String },
    /// Add a session-local location
    Add {
        /// Street address; looked up from the zip when omitted and maps are configured
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        zip: String,
        /// State value, e.g. NY
        #[arg(long)]
        state: Option<String>,
    },
}

fn print_entry(entry: &EntryView) {
    let origin = match entry.origin {
        Origin::Server => "saved",
        Origin::Local => "session",
    };
    let default = if entry.is_default { " [default]" } else { "" };
    println!("{}  {} ({origin}){default}", entry.id, entry.title);
    println!("    {}", entry.subtitle);
    println!("    map: {}", entry.map_image_url);
}

fn load_states(config: &AppConfig) -> Vec<StateOption> {
    match dryclean_core::load_state_options(&config.states_path) {
        Ok(states) => states,
        Err(e) => {
            tracing::warn!(error = %e, "state options unavailable; using raw region names");
            Vec::new()
        }
    }
}

pub(crate) async fn run_address_command(
    config: &AppConfig,
    client: ApiClient,
    session: &mut SessionStore,
    command: AddressCommands,
) -> anyhow::Result<ExitCode> {
    let maps = MapsClient::from_config(config)?;
    let view = LocationListView::new(maps.static_maps());

    match command {
        AddressCommands::List => {
            let book = AddressBook::with_notifier(
                client,
                session.credentials().map(|c| c.user_id),
                ConsoleNotifier,
            );
            book.mount().await;
            match view.render(&book, session.local_addresses()) {
                ListView::Loading => println!("loading..."),
                ListView::Empty { message } => println!("{message}"),
                ListView::Entries(entries) => entries.iter().for_each(print_entry),
            }
        }
        AddressCommands::Delete { id } => {
            let book = AddressBook::with_notifier(
                client,
                session.credentials().map(|c| c.user_id),
                ConsoleNotifier,
            );
            book.mount().await;
            let locals = session.local_addresses().to_vec();
            let result = view
                .delete(&book, &locals, &id, |deleted| {
                    session.remove_local_address(deleted);
                })
                .await;
            // The notifier has already printed the failure.
            if let Err(e) = result {
                tracing::debug!(address_id = %id, error = %e, "delete failed");
                return Ok(ExitCode::FAILURE);
            }
            session.save()?;
        }
        AddressCommands::Add {
            address,
            zip,
            state,
        } => {
            let status = if maps.is_configured() {
                MapsStatus::Ready
            } else {
                MapsStatus::Unconfigured
            };
            let mut form = LocationForm::new(load_states(config), status);
            form.open();
            if let Some(address) = &address {
                form.set_address(address);
            }
            form.set_zip(&zip, &maps).await;
            // An explicit --state beats the geocoded one.
            if let Some(state) = &state {
                form.set_state(state);
            }

            let mut added = None;
            form.submit(|record| added = Some(record))?;
            if let Some(record) = added {
                println!("added {}: {}", record.id, record.formatted());
                session.add_local_address(record);
                session.save()?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
