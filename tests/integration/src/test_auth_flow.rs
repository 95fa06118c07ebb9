//! The per-connection handshake against the client handle.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mskauth_core::{MskAuthConfig, MskAuthError};
    use mskauth_sasl::{AuthEvent, AuthPhase, ChannelNotifier, MskIamClient, NullNotifier};

    use crate::init_tracing;

    fn static_options() -> Vec<(&'static str, &'static str)> {
        vec![
            ("aws.access.key.id", "AKIDSTATIC"),
            ("aws.secret.access.key", "AWS_SECRET_ACCESS_KEY"),
            ("aws.region", "us-east-1"),
        ]
    }

    #[tokio::test]
    async fn test_should_complete_handshake_with_static_credentials() {
        init_tracing();
        let config = MskAuthConfig::from_options(static_options()).unwrap();
        let client = MskIamClient::new(config, Arc::new(NullNotifier)).unwrap();

        let mut auth = client.new_authentication("broker-1").unwrap();
        assert_eq!(auth.phase(), AuthPhase::SendClientFirst);

        let message = auth.client_first_message().unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&message).unwrap();
        assert_eq!(payload["host"], "broker-1");
        assert!(payload
            .as_object()
            .unwrap()
            .keys()
            .all(|k| k != "x-amz-security-token"));
        assert_eq!(auth.phase(), AuthPhase::AwaitServerResponse);

        auth.handle_server_response(b"").unwrap();
        client.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_surface_broker_rejection() {
        init_tracing();
        let config = MskAuthConfig::from_options(static_options()).unwrap();
        let client = MskIamClient::new(config, Arc::new(NullNotifier)).unwrap();

        let mut auth = client.new_authentication("broker-1").unwrap();
        auth.client_first_message().unwrap();

        let err = auth
            .handle_server_response(b"[1a2b3c] Access denied")
            .unwrap_err();
        assert!(matches!(
            &err,
            MskAuthError::AuthRejected(reason) if reason == "[1a2b3c] Access denied"
        ));
        // The failed connection attempt never touched the store.
        assert!(client.store().snapshot().is_ok());
        client.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_run_concurrent_authentications() {
        init_tracing();
        let config = MskAuthConfig::from_options(static_options()).unwrap();
        let client = Arc::new(MskIamClient::new(config, Arc::new(NullNotifier)).unwrap());

        let attempts: Vec<_> = (0..8)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    let mut auth = client
                        .new_authentication(format!("broker-{i}"))
                        .expect("snapshot available");
                    let message = auth.client_first_message().expect("payload built");
                    auth.handle_server_response(b"").expect("accepted");
                    message
                })
            })
            .collect();

        for attempt in attempts {
            let message = attempt.await.unwrap();
            assert!(!message.is_empty());
        }
    }

    #[tokio::test]
    async fn test_should_report_wake_event_stream_on_startup() {
        init_tracing();
        let (notifier, mut events) = ChannelNotifier::new();
        let config = MskAuthConfig::from_options(static_options()).unwrap();
        let client = MskIamClient::new(config, Arc::new(notifier)).unwrap();

        // Seeding the store counts as an install and wakes (not-yet-existing)
        // workers; no error events are emitted on the happy path.
        assert_eq!(
            events.try_recv().unwrap(),
            AuthEvent::BrokersWoken {
                reason: "AWS_MSK_IAM credential refresh".to_owned()
            }
        );
        assert!(events.try_recv().is_err());
        client.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_use_static_session_token_when_configured() {
        init_tracing();
        let mut options = static_options();
        options.push(("aws.session.token", "static-token"));
        let config = MskAuthConfig::from_options(options).unwrap();
        let client = MskIamClient::new(config, Arc::new(NullNotifier)).unwrap();

        let mut auth = client.new_authentication("broker-1").unwrap();
        let message = auth.client_first_message().unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&message).unwrap();
        assert_eq!(payload["x-amz-security-token"], "static-token");
        client.shutdown().await;
    }
}
