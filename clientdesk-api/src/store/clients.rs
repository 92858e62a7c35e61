use serde::Serialize;
use shared_types::{Client, ClientOption, NewClient};

use super::{decode_records, Collection, RecordStore, Snapshot, StoreError};

#[derive(Serialize)]
struct ClientDocument<'a> {
    #[serde(flatten)]
    client: &'a NewClient,
    created_at: String,
    updated_at: String,
}

/// Write a validated client and return its id
pub async fn add_client(store: &RecordStore, client: &NewClient) -> Result<String, StoreError> {
    let now = chrono::Utc::now().to_rfc3339();
    let document = ClientDocument {
        client,
        created_at: now.clone(),
        updated_at: now,
    };
    store.push(Collection::Clients, &document).await
}

pub fn decode_clients(snapshot: &Snapshot) -> Vec<Client> {
    decode_records(snapshot, "client")
}

pub async fn list_clients(store: &RecordStore) -> Result<Vec<Client>, StoreError> {
    let snapshot = store.snapshot(Collection::Clients).await?;
    Ok(decode_clients(&snapshot))
}

/// Picker entries for the add-project form
pub async fn client_options(store: &RecordStore) -> Result<Vec<ClientOption>, StoreError> {
    let clients = list_clients(store).await?;
    Ok(clients.iter().map(ClientOption::from).collect())
}
