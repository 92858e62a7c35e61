use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Client record as held by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Raw add-client form input
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateClientRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub notes: Option<String>,
}

/// Validated client ready to be written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientsResponse {
    pub clients: Vec<Client>,
}

/// Entry of the client picker on the add-project form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientOption {
    pub id: String,
    pub full_name: String,
    pub company: String,
}

impl From<&Client> for ClientOption {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            full_name: client.full_name.clone(),
            company: client.company.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientOptionsResponse {
    pub clients: Vec<ClientOption>,
}
