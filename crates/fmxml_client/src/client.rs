//! Gateway client with CRUD workflows.

use crate::transport::Transport;
use fmxml_core::{
    normalize, with_flag, ClientConfig, ClientError, ClientResult, CommandMap, Directive,
    GatewayError, Record, RequestDescriptor, RequestOverride, ResultSet, Value, RECID_FIELD,
    UPDATE_RECID_FIELD,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for a record-oriented database gateway.
///
/// Every operation takes optional per-call command parameters, merged over
/// the configuration's defaults, and an optional [`RequestOverride`] for
/// one-off server or credential changes.
///
/// # Examples
///
/// ```rust,no_run
/// use fmxml_client::{Client, ClientConfig, HttpConfig, HttpTransport, Record};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("https://gateway.example.com/fmi/xml")
///     .with_auth("admin", "admin")
///     .with_database("Contacts")
///     .with_layout("people");
/// let client = Client::new(config, HttpTransport::with_config(&HttpConfig::default())?);
///
/// let query = Record::from_iter([("email", "ada@example.com")]);
/// let data = Record::from_iter([("email", "ada@example.com"), ("name", "Ada")]);
/// let saved = client.upsert(&query, data, None, None).await?;
/// println!("saved {} record(s)", saved.count);
/// # Ok(())
/// # }
/// ```
pub struct Client<T: Transport> {
    config: ClientConfig,
    transport: Arc<T>,
}

impl<T: Transport> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> Client<T> {
    /// Creates a new client.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Returns the base configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Finds records matching `query`.
    ///
    /// Nothing matching is an empty result, not an error.
    pub async fn find(
        &self,
        query: &Record,
        command: Option<&CommandMap>,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        let command = with_flag(command.cloned(), Directive::Find);
        self.execute(query, command, patch).await
    }

    /// Returns every record in the layout.
    #[doc(alias = "findall")]
    pub async fn find_all(
        &self,
        command: Option<&CommandMap>,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        let command = with_flag(command.cloned(), Directive::FindAll);
        self.execute(&Record::new(), command, patch).await
    }

    /// Saves a record: edits the row named by its `-recid`, or creates a new
    /// row when it has none.
    pub async fn save(
        &self,
        record: &Record,
        command: Option<&CommandMap>,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        let directive = if record.rec_id().is_some() {
            Directive::Edit
        } else {
            Directive::New
        };
        let command = with_flag(command.cloned(), directive);
        self.execute(record, command, patch).await
    }

    /// Saves a record with the create directive, whatever its `-recid`.
    ///
    /// This is what [`Client::update`] uses for its write. Unlike
    /// [`Client::save`] it never issues an edit.
    pub async fn save_existing(
        &self,
        record: &Record,
        command: Option<&CommandMap>,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        let command = with_flag(command.cloned(), Directive::New);
        self.execute(record, command, patch).await
    }

    /// Updates the first record matching `query`, or creates `data` as a new
    /// record when nothing matches.
    ///
    /// The save runs with the configured credentials; `patch` only applies
    /// to the find.
    pub async fn upsert(
        &self,
        query: &Record,
        mut data: Record,
        command: Option<&CommandMap>,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        let found = self.find(query, command, patch).await?;

        if let Some(rec_id) = found.first().and_then(Record::rec_id) {
            debug!(%rec_id, "upsert matched existing record");
            data.insert(RECID_FIELD, rec_id.clone());
        }

        self.save(&data, command, None).await
    }

    /// Updates the first record matching `query`.
    ///
    /// Fails with the "no records match" gateway error, without writing,
    /// when nothing matches. The matched identifier is read from
    /// [`UPDATE_RECID_FIELD`] and the write goes through
    /// [`Client::save_existing`]; `patch` only applies to the find.
    pub async fn update(
        &self,
        query: &Record,
        mut data: Record,
        command: Option<&CommandMap>,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        let found = self.find(query, command, patch).await?;
        if found.count == 0 {
            return Err(GatewayError::no_records().into());
        }

        match found.first().and_then(|r| r.get(UPDATE_RECID_FIELD)) {
            Some(rec_id) => data.insert(RECID_FIELD, rec_id.clone()),
            None => data.remove(RECID_FIELD),
        };

        self.save_existing(&data, command, None).await
    }

    /// Deletes the row with the given identifier.
    pub async fn delete_by_rec_id(
        &self,
        rec_id: impl Into<Value>,
        command: Option<&CommandMap>,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        let mut command = with_flag(command.cloned(), Directive::Delete);
        command.insert(RECID_FIELD.to_string(), rec_id.into());
        self.execute(&Record::new(), command, patch).await
    }

    /// Deletes the first record matching `query`.
    ///
    /// A query carrying `-recid` deletes that row directly, without a find
    /// and without the per-call options. Otherwise the first match is
    /// deleted, and nothing matching fails with the "no records match"
    /// gateway error.
    #[doc(alias = "remove")]
    pub async fn delete(
        &self,
        query: &Record,
        command: Option<&CommandMap>,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        if let Some(rec_id) = query.rec_id() {
            return self.delete_by_rec_id(rec_id.clone(), None, None).await;
        }

        let found = self.find(query, command, patch).await?;
        let Some(record) = found.first() else {
            return Err(GatewayError::no_records().into());
        };
        let rec_id = record.rec_id().cloned().ok_or_else(|| {
            ClientError::MalformedResponse(format!("matched record has no {RECID_FIELD}"))
        })?;

        self.delete_by_rec_id(rec_id, command, patch).await
    }

    async fn execute(
        &self,
        payload: &Record,
        command: CommandMap,
        patch: Option<&RequestOverride>,
    ) -> ClientResult<ResultSet> {
        let request = RequestDescriptor::build(&self.config, payload, command, patch);
        debug!(?request, "sending gateway request");

        let response = self.transport.send(&request).await?;
        match normalize(response) {
            Ok(result) => {
                debug!(count = result.count, total = ?result.total, "gateway request done");
                Ok(result)
            }
            Err(err) => {
                warn!(directive = ?request.directive(), error = %err, "gateway request failed");
                Err(err)
            }
        }
    }
}
