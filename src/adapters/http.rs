use crate::domain::model::ProjectName;
use crate::domain::ports::{ConfigProvider, WebApp};
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

/// Client for the OpenGrok web application REST API (`<uri>/api/v1/...`).
#[derive(Debug, Clone)]
pub struct RestWebApp {
    client: Client,
    api_base: Url,
    api_token: Option<String>,
}

impl RestWebApp {
    pub fn new(uri: &str, timeout: std::time::Duration, api_token: Option<String>) -> Result<Self> {
        let mut api_base = Url::parse(uri)?;
        api_base
            .path_segments_mut()
            .map_err(|_| AdminError::InvalidConfigValueError {
                field: "uri".to_string(),
                value: uri.to_string(),
                reason: "URI cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "v1"]);

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base,
            api_token,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.webapp_uri(),
            config.timeout(),
            config.api_token().map(str::to_string),
        )
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        tracing::debug!("{} -> {}", operation, status);

        if !status.is_success() {
            return Err(AdminError::WebAppError {
                operation: operation.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl WebApp for RestWebApp {
    async fn get_configuration(&self) -> Result<String> {
        let url = self.endpoint(&["configuration"]);
        let response = self
            .send("get configuration", self.client.get(url))
            .await?;
        Ok(response.text().await?)
    }

    async fn set_configuration(&self, config: String) -> Result<()> {
        let url = self.endpoint(&["configuration"]);
        let request = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/xml")
            .body(config);
        self.send("set configuration", request).await?;
        Ok(())
    }

    async fn add_project(&self, project: &ProjectName) -> Result<()> {
        let url = self.endpoint(&["projects"]);
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .body(project.as_str().to_string());
        self.send("add project", request).await?;
        Ok(())
    }

    async fn delete_project(&self, project: &ProjectName) -> Result<()> {
        let url = self.endpoint(&["projects", project.as_str()]);
        self.send("delete project", self.client.delete(url)).await?;
        Ok(())
    }

    async fn get_config_value(&self, field: &str) -> Result<String> {
        let url = self.endpoint(&["configuration", field]);
        let response = self
            .send("get configuration value", self.client.get(url))
            .await?;
        Ok(response.text().await?.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn client_for(server: &MockServer, token: Option<&str>) -> RestWebApp {
        RestWebApp::new(
            &server.url("/source"),
            Duration::from_secs(5),
            token.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_building() {
        let app = RestWebApp::new("http://localhost:8080/source/", Duration::from_secs(1), None)
            .unwrap();
        assert_eq!(
            app.endpoint(&["configuration", "sourceRoot"]).as_str(),
            "http://localhost:8080/source/api/v1/configuration/sourceRoot"
        );
        assert_eq!(
            app.endpoint(&["projects", "my project"]).as_str(),
            "http://localhost:8080/source/api/v1/projects/my%20project"
        );
    }

    #[tokio::test]
    async fn test_get_configuration() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/source/api/v1/configuration");
            then.status(200).body("<?xml version=\"1.0\"?><java/>");
        });

        let config = client_for(&server, None).get_configuration().await.unwrap();
        mock.assert();
        assert_eq!(config, "<?xml version=\"1.0\"?><java/>");
    }

    #[tokio::test]
    async fn test_add_project_posts_name() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/source/api/v1/projects")
                .header("content-type", "text/plain")
                .header("authorization", "Bearer t0ken")
                .body("foo");
            then.status(201);
        });

        let project = ProjectName::parse("foo").unwrap();
        client_for(&server, Some("t0ken"))
            .add_project(&project)
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_delete_project_error_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/source/api/v1/projects/foo");
            then.status(404);
        });

        let project = ProjectName::parse("foo").unwrap();
        let err = client_for(&server, None)
            .delete_project(&project)
            .await
            .unwrap_err();
        mock.assert();
        assert!(matches!(
            err,
            AdminError::WebAppError { status: 404, .. }
        ));
    }

    #[tokio::test]
    async fn test_get_config_value_is_trimmed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/source/api/v1/configuration/sourceRoot");
            then.status(200).body("/var/opengrok/src\n");
        });

        let value = client_for(&server, None)
            .get_config_value("sourceRoot")
            .await
            .unwrap();
        assert_eq!(value, "/var/opengrok/src");
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_token() {
        use crate::config::toml_config::TomlConfig;
        use crate::config::{AdminConfig, Overrides};

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/source/api/v1/configuration")
                .header("authorization", "Bearer from-file");
            then.status(200).body("<java/>");
        });

        let mut file = TomlConfig::default();
        file.webapp.api_token = Some("from-file".to_string());
        let overrides = Overrides {
            uri: Some(server.url("/source")),
            ..Default::default()
        };
        let config = AdminConfig::resolve(overrides, file);

        let app = RestWebApp::from_config(&config).unwrap();
        assert_eq!(app.get_configuration().await.unwrap(), "<java/>");
        mock.assert();
    }
}
