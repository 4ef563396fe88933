use serde_json::{json, Value};
use yansi::Paint;

use crate::config::{self, SENTINEL_ID};
use crate::error::SeedError;
use crate::http;

/// One seeded account. Transient; built per run and discarded after the report.
/// Request bodies are built from the `credentials()` subset, so the struct
/// itself never crosses the wire.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub email: String,
    pub id: String,
    pub token: String,
}

impl UserRecord {
    /// Candidate record before the backend has assigned anything.
    /// The email is always derived from the username.
    pub fn candidate(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            email: format!("{}@mail.com", username),
            id: SENTINEL_ID.to_string(),
            token: String::new(),
        }
    }

    fn credentials(&self) -> Value {
        json!({
            "username": self.username,
            "password": self.password,
            "email": self.email,
        })
    }
}

/// Insertion-ordered set of provisioned records, keyed by username.
#[derive(Debug, Default)]
pub struct UserRegistry {
    records: Vec<UserRecord>,
}

impl UserRegistry {
    pub fn insert(&mut self, record: UserRecord) {
        self.records.push(record);
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.username == username)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record whose creation ended in `NotFound`.
    pub fn drop_sentinels(&mut self) {
        self.records.retain(|r| {
            if r.id == SENTINEL_ID {
                println!(
                    "{}",
                    Paint::new(format!(
                        "! User '{}' could not be created or found; dropping from report",
                        r.username
                    ))
                    .yellow()
                );
                false
            } else {
                true
            }
        });
    }
}

/// How a creation attempt resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The backend accepted the POST and assigned this id
    Created(String),
    /// Creation failed but the user list already carried the username
    AlreadyExists(String),
    /// Creation failed and no matching username was listed
    NotFound,
}

/// Try to create `record` on the backend; on any failure fall back to
/// scanning the user list for an existing entry with the same username.
///
/// Every creation failure takes the fallback path, whether the cause was a
/// conflict, a 4xx/5xx or a transport error.
pub async fn create_user(
    client: &reqwest::Client,
    api_url: &str,
    record: &UserRecord,
) -> CreateOutcome {
    let url = format!("{}/users", api_url);
    println!("Creating user: {}", record.username);

    match http::submit(client, &url, &record.credentials()).await {
        Ok(resp) => match parse_id(resp).await {
            Ok(id) => return CreateOutcome::Created(id),
            Err(e) => {
                tracing::warn!(username = %record.username, error = %e, "creation response unusable");
            }
        },
        Err(e) => {
            tracing::debug!(username = %record.username, error = %e, "creation failed, scanning user list");
        }
    }

    match find_existing(client, api_url, &record.username).await {
        Some(id) => {
            println!(
                "{}",
                Paint::new(format!(
                    "+ User '{}' already exists in backend",
                    record.username
                ))
                .cyan()
            );
            CreateOutcome::AlreadyExists(id)
        }
        None => CreateOutcome::NotFound,
    }
}

/// GET the full user list and linearly scan for `username`.
async fn find_existing(client: &reqwest::Client, api_url: &str, username: &str) -> Option<String> {
    let url = format!("{}/users", api_url);
    let resp = http::fetch(client, &url, false).await.ok()?;
    let users: Vec<Value> = resp.json().await.ok()?;
    users
        .iter()
        .find(|u| u.get("username").and_then(Value::as_str) == Some(username))
        .and_then(|u| u.get("id"))
        .and_then(id_to_string)
}

/// POST the credentials to the login endpoint. Any failure yields an empty
/// token; login never aborts provisioning.
pub async fn login(client: &reqwest::Client, api_url: &str, record: &UserRecord) -> String {
    let url = format!("{}/auth/login", api_url);
    let resp = match http::submit(client, &url, &record.credentials()).await {
        Ok(resp) => resp,
        Err(_) => return String::new(),
    };
    let body: Value = match resp.json().await {
        Ok(body) => body,
        Err(_) => return String::new(),
    };
    body.get("access_token")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Provision a single username/password pair: create-or-reuse, then login.
pub async fn provision_user(
    client: &reqwest::Client,
    api_url: &str,
    username: &str,
    password: &str,
) -> UserRecord {
    let mut record = UserRecord::candidate(username, password);
    record.id = match create_user(client, api_url, &record).await {
        CreateOutcome::Created(id) | CreateOutcome::AlreadyExists(id) => id,
        CreateOutcome::NotFound => SENTINEL_ID.to_string(),
    };
    record.token = login(client, api_url, &record).await;
    record
}

/// Provision the fixed batch sequentially, then drop sentinel records.
pub async fn provision_all(client: &reqwest::Client, api_url: &str) -> UserRegistry {
    let mut registry = UserRegistry::default();
    for (username, password) in config::SEED_USERS {
        let record = provision_user(client, api_url, username, password).await;
        registry.insert(record);
    }
    registry.drop_sentinels();
    registry
}

/// Extract response body id. Backends hand ids back as JSON numbers or
/// strings depending on the ORM; both normalize to a string here.
async fn parse_id(resp: reqwest::Response) -> Result<String, SeedError> {
    let body: Value = resp
        .json()
        .await
        .map_err(|e| SeedError::InvalidResponse(e.to_string()))?;
    body.get("id")
        .and_then(id_to_string)
        .ok_or_else(|| SeedError::InvalidResponse("missing 'id' field".to_string()))
}

fn id_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_derives_email_from_username() {
        let rec = UserRecord::candidate("alice", "pass");
        assert_eq!(rec.email, "alice@mail.com");
        assert_eq!(rec.id, SENTINEL_ID);
        assert!(rec.token.is_empty());
    }

    #[test]
    fn credentials_body_has_exactly_three_fields() {
        let rec = UserRecord::candidate("bob", "pass");
        let body = rec.credentials();
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["username"], "bob");
        assert_eq!(obj["password"], "pass");
        assert_eq!(obj["email"], "bob@mail.com");
    }

    #[test]
    fn id_to_string_accepts_numbers_and_strings() {
        assert_eq!(id_to_string(&json!(42)), Some("42".to_string()));
        assert_eq!(id_to_string(&json!("42")), Some("42".to_string()));
        assert_eq!(id_to_string(&json!(null)), None);
        assert_eq!(id_to_string(&json!({"id": 1})), None);
    }

    #[test]
    fn drop_sentinels_keeps_order_of_survivors() {
        let mut registry = UserRegistry::default();
        for name in ["alice", "bob", "chloe"] {
            registry.insert(UserRecord::candidate(name, "pass"));
        }
        registry.records[0].id = "7".to_string();
        registry.records[2].id = "9".to_string();
        registry.drop_sentinels();
        let names: Vec<_> = registry.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "chloe"]);
        assert!(registry.get("bob").is_none());
    }
}
