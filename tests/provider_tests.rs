/* tests/provider_tests.rs */

use std::sync::{Arc, Mutex};
use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pollbox::auth::StaticTokenProvider;
use pollbox::backend::{
	ConfigStoreBackend, ConfigStoreSettings, VaultBackend, VaultSettings,
};
use pollbox::codec::FormatError;
use pollbox::provider::{Provider, ProviderError, ProviderOptions};
use pollbox::remote::{ConfigStoreClient, TransportError, VaultClient};
use pollbox::snapshot::{SnapshotEvent, SnapshotStore};

fn config_settings() -> ConfigStoreSettings {
	ConfigStoreSettings {
		application: "MyApp".to_owned(),
		environment: "Prod".to_owned(),
		configuration: "Main".to_owned(),
		client_id: "client1".to_owned(),
	}
}

fn config_backend(server: &MockServer) -> ConfigStoreBackend {
	ConfigStoreBackend::new(
		ConfigStoreClient::new(server.uri()),
		Arc::new(StaticTokenProvider::new("token")),
		config_settings(),
	)
	.unwrap()
}

fn vault_settings() -> VaultSettings {
	VaultSettings {
		secret_id: "sec1".to_owned(),
		path: Some("prefix".to_owned()),
		path_separator: '-',
	}
}

fn vault_backend(server: &MockServer) -> VaultBackend {
	VaultBackend::new(
		VaultClient::new(server.uri()),
		Arc::new(StaticTokenProvider::new("token")),
		vault_settings(),
	)
	.unwrap()
}

fn document_response(version: &str, body: &str) -> ResponseTemplate {
	ResponseTemplate::new(200)
		.set_body_raw(body.as_bytes().to_vec(), "application/json")
		.insert_header("x-configuration-version", version)
}

// Identifiers are lower-cased before transmission, so the mock path is
// all-lowercase even though the settings above are mixed-case.
const CONFIG_PATH: &str = "/v1/applications/myapp/environments/prod/configurations/main";

#[tokio::test]
async fn test_initial_load_flattens_document() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(CONFIG_PATH))
		.and(query_param("client_id", "client1"))
		.and(query_param("client_configuration_version", "0"))
		.respond_with(document_response("v1", r#"{"a":{"b":"1"},"c":"2"}"#))
		.expect(1)
		.mount(&server)
		.await;

	let provider = Provider::builder()
		.backend(config_backend(&server))
		.register()
		.await
		.unwrap();

	assert_eq!(provider.get("a:b"), Some("1".to_owned()));
	assert_eq!(provider.get("c"), Some("2".to_owned()));
	assert_eq!(provider.snapshot().len(), 2);
}

#[tokio::test]
async fn test_unchanged_version_is_a_noop() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(CONFIG_PATH))
		.and(query_param("client_configuration_version", "0"))
		.respond_with(document_response("v1", r#"{"a":"1"}"#))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path(CONFIG_PATH))
		.and(query_param("client_configuration_version", "v1"))
		.respond_with(ResponseTemplate::new(304))
		.expect(2)
		.mount(&server)
		.await;

	let provider = Provider::builder()
		.backend(config_backend(&server))
		.build()
		.unwrap();
	provider.load().await.unwrap();

	let mut rx = provider.subscribe();

	// Two consecutive cycles against an unchanged remote: no notifications.
	provider.reload().await.unwrap();
	provider.reload().await.unwrap();

	assert!(rx.try_recv().is_err());
	assert_eq!(provider.get("a"), Some("1".to_owned()));
	assert_eq!(provider.store().version(), 1);
}

#[tokio::test]
async fn test_identical_content_produces_no_notification() {
	let server = MockServer::start().await;
	// The remote bumps its revision but serves identical content.
	Mock::given(method("GET"))
		.and(path(CONFIG_PATH))
		.and(query_param("client_configuration_version", "0"))
		.respond_with(document_response("v1", r#"{"a":"1"}"#))
		.up_to_n_times(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path(CONFIG_PATH))
		.respond_with(document_response("v2", r#"{"a":"1"}"#))
		.mount(&server)
		.await;

	let provider = Provider::builder()
		.backend(config_backend(&server))
		.build()
		.unwrap();
	provider.load().await.unwrap();

	let mut rx = provider.subscribe();
	provider.reload().await.unwrap();

	assert!(rx.try_recv().is_err());
	assert_eq!(provider.store().version(), 1);
}

#[tokio::test]
async fn test_vault_payload_decodes_with_prefix() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/v1/secrets/sec1/payload"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"entries": [
				{"key": "prefix-sub-key", "textValue": "v"},
				{"key": "prefix-db-host", "textValue": "localhost"},
			]
		})))
		.mount(&server)
		.await;

	let provider = Provider::builder()
		.backend(vault_backend(&server))
		.register()
		.await
		.unwrap();

	assert_eq!(provider.get("sub:key"), Some("v".to_owned()));
	assert_eq!(provider.get("db:host"), Some("localhost".to_owned()));
}

#[tokio::test]
async fn test_empty_vault_payload_is_a_noop() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/v1/secrets/sec1/payload"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"entries": []
		})))
		.mount(&server)
		.await;

	let provider = Provider::builder()
		.backend(vault_backend(&server))
		.register()
		.await
		.unwrap();

	assert!(provider.snapshot().is_empty());
}

#[tokio::test]
async fn test_binary_entry_fails_initial_load() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/v1/secrets/sec1/payload"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"entries": [{"key": "blob", "binaryValue": "AAAA"}]
		})))
		.mount(&server)
		.await;

	let provider = Provider::builder()
		.backend(vault_backend(&server))
		.build()
		.unwrap();

	let err = provider.load().await.unwrap_err();
	assert!(matches!(
		err,
		ProviderError::Format(FormatError::BinaryValue { .. })
	));
	assert!(provider.snapshot().is_empty());
}

#[tokio::test]
async fn test_binary_entry_on_reload_leaves_previous_snapshot() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/v1/secrets/sec1/payload"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"entries": [{"key": "prefix-k", "textValue": "v"}]
		})))
		.up_to_n_times(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/v1/secrets/sec1/payload"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"entries": [{"key": "blob", "binaryValue": "AAAA"}]
		})))
		.mount(&server)
		.await;

	let provider = Provider::builder()
		.backend(vault_backend(&server))
		.build()
		.unwrap();
	provider.load().await.unwrap();

	// Background reload with no callback: the default disposition for a
	// reload failure is "ignore", and the last-known snapshot stays put.
	provider.reload().await.unwrap();

	assert_eq!(provider.get("k"), Some("v".to_owned()));
}

#[tokio::test]
async fn test_optional_provider_swallows_unreachable_remote() {
	// Nothing listens on this port.
	let backend = VaultBackend::new(
		VaultClient::new("http://127.0.0.1:9"),
		Arc::new(StaticTokenProvider::new("token")),
		vault_settings(),
	)
	.unwrap();

	let provider = Provider::builder()
		.backend(backend)
		.options(ProviderOptions::new().optional(true))
		.register()
		.await
		.unwrap();

	assert!(provider.snapshot().is_empty());
}

#[tokio::test]
async fn test_non_optional_initial_load_failure_is_fatal() {
	let backend = VaultBackend::new(
		VaultClient::new("http://127.0.0.1:9"),
		Arc::new(StaticTokenProvider::new("token")),
		vault_settings(),
	)
	.unwrap();

	let provider = Provider::builder().backend(backend).build().unwrap();

	let err = provider.load().await.unwrap_err();
	assert!(matches!(err, ProviderError::Transport(_)));
}

#[tokio::test]
async fn test_callback_can_suppress_initial_load_failure() {
	let backend = VaultBackend::new(
		VaultClient::new("http://127.0.0.1:9"),
		Arc::new(StaticTokenProvider::new("token")),
		vault_settings(),
	)
	.unwrap();

	let seen: Arc<Mutex<Vec<(bool, String)>>> = Arc::new(Mutex::new(Vec::new()));
	let recorder = Arc::clone(&seen);

	let options = ProviderOptions::new().on_load_exception(Arc::new(move |ctx| {
		recorder
			.lock()
			.unwrap()
			.push((ctx.reload, ctx.error.to_string()));
		ctx.ignore = true;
	}));

	let provider = Provider::builder()
		.backend(backend)
		.options(options)
		.register()
		.await
		.unwrap();

	assert!(provider.snapshot().is_empty());

	let seen = seen.lock().unwrap();
	assert_eq!(seen.len(), 1);
	assert!(!seen[0].0, "initial load must report reload=false");
	assert!(seen[0].1.contains("transport error"));
}

#[tokio::test]
async fn test_fetch_deadline_surfaces_as_timeout() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/v1/secrets/sec1/payload"))
		.respond_with(
			ResponseTemplate::new(200)
				.set_body_json(serde_json::json!({"entries": []}))
				.set_delay(Duration::from_millis(500)),
		)
		.mount(&server)
		.await;

	let provider = Provider::builder()
		.backend(vault_backend(&server))
		.options(ProviderOptions::new().load_timeout(Duration::from_millis(50)))
		.build()
		.unwrap();

	let err = provider.load().await.unwrap_err();
	assert!(matches!(
		err,
		ProviderError::Transport(TransportError::Timeout { .. })
	));
}

#[tokio::test]
async fn test_validation_fails_before_any_network_call() {
	let server = MockServer::start().await;

	let mut settings = config_settings();
	settings.application = String::new();

	let err = ConfigStoreBackend::new(
		ConfigStoreClient::new(server.uri()),
		Arc::new(StaticTokenProvider::new("token")),
		settings,
	)
	.unwrap_err();
	assert_eq!(err.field, "application");

	let err = VaultBackend::new(
		VaultClient::new(server.uri()),
		Arc::new(StaticTokenProvider::new("token")),
		VaultSettings {
			secret_id: "sec1".to_owned(),
			path: None,
			path_separator: '\0',
		},
	)
	.unwrap_err();
	assert_eq!(err.field, "path_separator");

	assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_builder_requires_a_backend() {
	let builder: pollbox::ProviderBuilder<VaultBackend> = Provider::builder();
	let err = builder.build().unwrap_err();
	assert!(matches!(err, ProviderError::Builder(_)));
}

#[tokio::test]
async fn test_background_reload_picks_up_new_revision() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path(CONFIG_PATH))
		.and(query_param("client_configuration_version", "0"))
		.respond_with(document_response("v1", r#"{"a":"1"}"#))
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path(CONFIG_PATH))
		.respond_with(document_response("v2", r#"{"a":"2"}"#))
		.mount(&server)
		.await;

	let store = Arc::new(SnapshotStore::new());
	let provider = Provider::builder()
		.store(Arc::clone(&store))
		.backend(config_backend(&server))
		.options(ProviderOptions::new().reload_period(Duration::from_millis(50)))
		.register()
		.await
		.unwrap();

	assert!(provider.is_watching());
	assert_eq!(provider.get("a"), Some("1".to_owned()));

	let mut rx = store.subscribe();
	let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
		.await
		.expect("no reload within deadline")
		.unwrap();

	match event {
		SnapshotEvent::Replaced { new, .. } => assert_eq!(new.get("a"), Some("2")),
	}
	assert_eq!(provider.get("a"), Some("2".to_owned()));
}
