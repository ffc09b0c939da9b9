//! reqwest-backed [`DataSource`].

use url::Url;

use crate::component::collaborators::DataSource;
use crate::component::errors::FetchError;
use crate::domain::server_page::ServerPage;
use crate::domain::table::ConfigurationError;
use crate::dto::api::RowsQuery;

#[derive(Clone, Debug)]
pub struct HttpDataSource {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl HttpDataSource {
    /// Uses an absolute endpoint URL.
    pub fn new(endpoint: &str) -> Result<Self, ConfigurationError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| ConfigurationError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        Ok(Self::with_client(reqwest::Client::new(), endpoint))
    }

    /// Resolves a possibly relative `data-src` against the page URL.
    pub fn relative_to(page: &Url, src: &str) -> Result<Self, ConfigurationError> {
        let endpoint = page
            .join(src)
            .map_err(|err| ConfigurationError::InvalidEndpoint(format!("{src}: {err}")))?;
        Ok(Self::with_client(reqwest::Client::new(), endpoint))
    }

    pub fn with_client(http_client: reqwest::Client, endpoint: Url) -> Self {
        Self {
            http_client,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint URL with the request parameters appended to any query the
    /// endpoint already carries.
    pub fn request_url(&self, query: &RowsQuery) -> Result<Url, FetchError> {
        let params = query
            .to_query_string()
            .map_err(|err| FetchError::Encode(err.to_string()))?;
        let mut url = self.endpoint.clone();
        let combined = match self.endpoint.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{params}"),
            _ => params,
        };
        url.set_query(Some(&combined));
        Ok(url)
    }
}

impl DataSource for HttpDataSource {
    async fn fetch(&self, query: &RowsQuery) -> Result<ServerPage, FetchError> {
        let url = self.request_url(query)?;
        log::debug!("GET {url}");

        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<ServerPage>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SortDirection;

    fn query() -> RowsQuery {
        RowsQuery {
            page: Some(1),
            row_count: Some(15),
            sort_column: Some("id".to_string()),
            sort_direction: Some(SortDirection::Asc),
            search: None,
        }
    }

    #[test]
    fn appends_parameters_to_endpoint() {
        let source = HttpDataSource::new("http://localhost:8080/api/v1/rows").unwrap();
        assert_eq!(
            source.request_url(&query()).unwrap().as_str(),
            "http://localhost:8080/api/v1/rows?page=1&rowCount=15&sortColumn=id&sortDirection=asc"
        );
    }

    #[test]
    fn keeps_existing_endpoint_query() {
        let source = HttpDataSource::new("http://localhost/rows?dataset=clients").unwrap();
        assert_eq!(
            source.request_url(&query()).unwrap().query(),
            Some("dataset=clients&page=1&rowCount=15&sortColumn=id&sortDirection=asc")
        );
    }

    #[test]
    fn resolves_relative_src_against_page() {
        let page = Url::parse("http://localhost:8080/?page=2").unwrap();
        let source = HttpDataSource::relative_to(&page, "/api/v1/rows").unwrap();
        assert_eq!(source.endpoint().as_str(), "http://localhost:8080/api/v1/rows");
    }

    #[test]
    fn rejects_relative_endpoint_without_base() {
        assert!(matches!(
            HttpDataSource::new("/api/v1/rows"),
            Err(ConfigurationError::InvalidEndpoint(_))
        ));
    }
}
