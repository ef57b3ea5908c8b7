//! Consumidor del feed MQTT de telemetría
//!
//! Loop de eventos rumqttc en una tarea tokio dedicada. Un solo
//! consumidor: los eventos de una conexión se procesan en orden de
//! llegada. Ningún payload malo ni error de conexión tumba el proceso;
//! los errores de conexión hacen backoff y el cliente reintenta.

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use tokio::task::JoinHandle;

use crate::config::EnvironmentConfig;
use crate::services::telemetry_service::TelemetryService;

pub struct MqttListener {
    host: String,
    port: u16,
    topic: String,
    client_id: String,
    service: Arc<TelemetryService>,
}

impl MqttListener {
    pub fn new(config: &EnvironmentConfig, service: TelemetryService) -> Self {
        Self {
            host: config.mqtt_broker_host.clone(),
            port: config.mqtt_broker_port,
            topic: config.mqtt_topic.clone(),
            client_id: config.mqtt_client_id.clone(),
            service: Arc::new(service),
        }
    }

    /// Lanzar el consumidor en background
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(self) {
        let mut options = MqttOptions::new(self.client_id.clone(), self.host.clone(), self.port);
        options.set_keep_alive(Duration::from_secs(60));

        let (client, mut eventloop) = AsyncClient::new(options, 64);

        log::info!(
            "📶 Conectando al broker MQTT {}:{} (topic: {})",
            self.host,
            self.port,
            self.topic
        );

        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    log::info!("✅ Conectado al broker MQTT");
                    // Re-suscribir también después de cada reconexión
                    if let Err(e) = client.subscribe(self.topic.clone(), QoS::AtLeastOnce).await {
                        log::error!("❌ Error suscribiendo a {}: {}", self.topic, e);
                    } else {
                        log::info!("📬 Suscrito al topic: {}", self.topic);
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    log::debug!("📨 Mensaje recibido en {}", publish.topic);
                    self.service.handle_payload(&publish.payload).await;
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("❌ Error de conexión MQTT: {}; reintentando en 5s", e);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            }
        }
    }
}
