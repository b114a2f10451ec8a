use crate::config::AppConfig;
use crate::processor::ReportProcessor;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Consumes the report topic with SASL/SCRAM auth. A consecutive-failure
/// circuit breaker backs off when the broker misbehaves; individual messages
/// are processed on their own tasks so a slow handler never stalls the
/// consumer loop.
pub async fn start_consumer(config: &AppConfig, processor: Arc<ReportProcessor>) -> anyhow::Result<()> {
    info!("Initializing Kafka consumer for topic: {}", config.kafka_topic);

    let mut client_config = ClientConfig::new();
    client_config
        .set("bootstrap.servers", &config.kafka_bootstrap_servers)
        .set("group.id", &config.kafka_group_id)
        .set("auto.offset.reset", &config.kafka_auto_offset_reset)
        .set("security.protocol", &config.kafka_security_protocol)
        .set("sasl.mechanism", &config.kafka_sasl_mechanism)
        .set("sasl.username", &config.kafka_username)
        .set("sasl.password", &config.kafka_password);

    let consumer: StreamConsumer = client_config.create()?;

    consumer.subscribe(&[&config.kafka_topic])?;
    info!("Subscribed to topic: {}", config.kafka_topic);

    let mut consecutive_failures = 0;
    let max_retries = config.kafka_max_retries;
    let cooldown_duration = Duration::from_secs(config.kafka_circuit_breaker_cooldown);

    loop {
        if consecutive_failures >= max_retries {
            warn!(
                "Circuit breaker tripped ({} consecutive failures), sleeping {} seconds",
                consecutive_failures, config.kafka_circuit_breaker_cooldown
            );
            tokio::time::sleep(cooldown_duration).await;
            consecutive_failures = 0;
            info!("Circuit breaker reset, resuming consumption");
        }

        match consumer.recv().await {
            Ok(m) => {
                consecutive_failures = 0;

                let payload = match m.payload() {
                    None => {
                        warn!("Received empty payload from Kafka");
                        continue;
                    }
                    Some(p) => p,
                };

                let processor = processor.clone();
                let payload_vec = payload.to_vec();
                tokio::spawn(async move {
                    if let Err(e) = processor.process(&payload_vec).await {
                        error!("Error processing message: {}", e);
                    }
                });
            }
            Err(e) => {
                error!(
                    "Kafka error: {} ({} / {} failures)",
                    e,
                    consecutive_failures + 1,
                    max_retries
                );
                consecutive_failures += 1;

                // Brief pause so a transient broker hiccup doesn't spin.
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }
}
