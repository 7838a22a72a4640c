//! [`RestStore`] — a [`PetitionStore`] over the hosted PostgREST endpoint.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, header};
use serde::{Deserialize, Serialize, de::IgnoredAny};
use uuid::Uuid;
use verivoice_core::{
  petition::{NewPetition, PetitionRecord},
  signer::{NewSigner, Signer},
  store::PetitionStore,
};

use crate::{Error, Result, error::ErrorBody};

/// Media type asking PostgREST for a single JSON object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Connection settings for the hosted store.
#[derive(Debug, Clone, Deserialize)]
pub struct RestConfig {
  /// Project base URL, e.g. `https://xyz.example.co`. `/rest/v1` is appended.
  pub url:     String,
  /// Access key sent as both `apikey` and bearer token.
  pub api_key: String,
}

/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RestStore {
  client:  Client,
  pub(crate) base: String,
  api_key: String,
}

/// Insert body for `signers`; the store fills in `id` and `signed_at`.
#[derive(Serialize)]
struct SignerInsert<'a> {
  petition_id: Uuid,
  name:        &'a str,
  nationality: &'a str,
  verified:    bool,
}

impl RestStore {
  pub fn new(config: RestConfig) -> Result<Self> {
    if config.url.trim().is_empty() {
      return Err(Error::Config("store url is empty".into()));
    }
    if config.api_key.trim().is_empty() {
      return Err(Error::Config("store api key is empty".into()));
    }

    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self {
      client,
      base: config.url.trim_end_matches('/').to_owned(),
      api_key: config.api_key,
    })
  }

  fn table(&self, name: &str) -> String { format!("{}/rest/v1/{name}", self.base) }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    req
      .header("apikey", &self.api_key)
      .bearer_auth(&self.api_key)
  }

  fn get(&self, table: &str) -> RequestBuilder {
    self.auth(self.client.get(self.table(table)))
  }

  /// `POST` returning the inserted row as a single object.
  fn insert(&self, table: &str) -> RequestBuilder {
    self
      .auth(self.client.post(self.table(table)))
      .header("Prefer", "return=representation")
      .header(header::ACCEPT, SINGLE_OBJECT)
  }

  /// Turn a non-success response into [`Error::Status`], decoding the
  /// PostgREST error body when there is one.
  async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
      Ok(body) => (body.code, body.message.unwrap_or(text)),
      Err(_) => (None, text),
    };
    Err(Error::Status { status, code, message })
  }
}

// ─── PetitionStore impl ──────────────────────────────────────────────────────

impl PetitionStore for RestStore {
  type Error = Error;

  async fn insert_petition(&self, input: NewPetition) -> Result<PetitionRecord> {
    let resp = self.insert("petitions").json(&input).send().await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  async fn list_petitions(&self) -> Result<Vec<PetitionRecord>> {
    let resp = self
      .get("petitions")
      .query(&[("select", "*"), ("order", "created_at.desc")])
      .send()
      .await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  async fn get_petition(&self, id: Uuid) -> Result<Option<PetitionRecord>> {
    let resp = self
      .get("petitions")
      .header(header::ACCEPT, SINGLE_OBJECT)
      .query(&[("select", "*".to_owned()), ("id", format!("eq.{id}"))])
      .send()
      .await?;

    match Self::check(resp).await {
      Ok(resp) => Ok(Some(resp.json().await?)),
      Err(e) if e.is_no_rows() => {
        tracing::debug!(petition_id = %id, "no petition row");
        Ok(None)
      }
      Err(e) => Err(e),
    }
  }

  async fn list_signers(&self, petition_id: Uuid) -> Result<Vec<Signer>> {
    let resp = self
      .get("signers")
      .query(&[
        ("select", "*".to_owned()),
        ("petition_id", format!("eq.{petition_id}")),
        ("order", "signed_at.desc".to_owned()),
      ])
      .send()
      .await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  async fn insert_signer(&self, input: NewSigner) -> Result<Signer> {
    let body = SignerInsert {
      petition_id: input.petition_id,
      name:        &input.name,
      nationality: &input.nationality,
      verified:    true,
    };
    let resp = self.insert("signers").json(&body).send().await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  async fn signer_exists(&self, petition_id: Uuid, name: &str) -> Result<bool> {
    let resp = self
      .get("signers")
      .query(&[
        ("select", "id".to_owned()),
        ("petition_id", format!("eq.{petition_id}")),
        ("name", format!("eq.{name}")),
        ("limit", "1".to_owned()),
      ])
      .send()
      .await?;
    let rows: Vec<IgnoredAny> = Self::check(resp).await?.json().await?;
    Ok(!rows.is_empty())
  }
}
