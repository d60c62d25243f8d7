//! Row read/insert/update/delete against named backend tables.
//!
//! Queries follow the backend's REST conventions: filters are query
//! parameters (`id=eq.<v>`, `or=(a.eq.x,b.eq.y)`), ordering is
//! `order=<col>.desc`, and single-row reads negotiate the object media type
//! so a missing row comes back as an error rather than an empty array.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use super::{Backend, BackendError, error_for_response};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// One read query: table, column projection, filters, ordering.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: &'static str,
    params: Vec<(String, String)>,
}

impl SelectQuery {
    pub fn new(table: &'static str, columns: &str) -> Self {
        Self {
            table,
            params: vec![("select".to_string(), columns.to_string())],
        }
    }

    /// Equality filter on a single column.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Disjunction of equality filters: rows whose `column` is any of `values`.
    pub fn eq_any(mut self, column: &str, values: &[&str]) -> Self {
        let alternatives: Vec<String> = values
            .iter()
            .map(|value| format!("{column}.eq.{value}"))
            .collect();
        self.params
            .push(("or".to_string(), format!("({})", alternatives.join(","))));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.desc")));
        self
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl Backend {
    #[instrument(skip(self, token))]
    pub async fn select_rows<T: DeserializeOwned>(
        &self,
        token: &str,
        query: SelectQuery,
    ) -> Result<Vec<T>, BackendError> {
        info!(table = query.table(), "Fetching rows");
        let request = self
            .http
            .get(self.rest_url(query.table()))
            .query(query.params());

        let response = self.authorize(request, token).send().await?;
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches exactly one row; zero or several matches surface as an error.
    #[instrument(skip(self, token))]
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        token: &str,
        query: SelectQuery,
    ) -> Result<T, BackendError> {
        info!(table = query.table(), "Fetching single row");
        let request = self
            .http
            .get(self.rest_url(query.table()))
            .query(query.params())
            .header("Accept", SINGLE_OBJECT);

        let response = self.authorize(request, token).send().await?;
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    #[instrument(skip(self, token, row))]
    pub async fn insert_row<B: Serialize + ?Sized>(
        &self,
        token: &str,
        table: &str,
        row: &B,
    ) -> Result<(), BackendError> {
        info!(table, "Inserting row");
        let request = self
            .http
            .post(self.rest_url(table))
            .header("Prefer", "return=minimal")
            .json(row);

        let response = self.authorize(request, token).send().await?;
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(())
    }

    /// Patches the single row whose `id_column` equals `id`.
    #[instrument(skip(self, token, patch))]
    pub async fn update_row<B: Serialize + ?Sized>(
        &self,
        token: &str,
        table: &str,
        id_column: &str,
        id: &str,
        patch: &B,
    ) -> Result<(), BackendError> {
        info!(table, id, "Updating row");
        let request = self
            .http
            .patch(self.rest_url(table))
            .query(&[(id_column, format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(patch);

        let response = self.authorize(request, token).send().await?;
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(())
    }

    /// Physical delete scoped to one row. There is no soft-delete.
    #[instrument(skip(self, token))]
    pub async fn delete_row(
        &self,
        token: &str,
        table: &str,
        id_column: &str,
        id: &str,
    ) -> Result<(), BackendError> {
        info!(table, id, "Deleting row");
        let request = self
            .http
            .delete(self.rest_url(table))
            .query(&[(id_column, format!("eq.{id}"))]);

        let response = self.authorize(request, token).send().await?;
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(())
    }
}
