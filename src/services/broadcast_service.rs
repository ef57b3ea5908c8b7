//! Fanout de eventos en vivo
//!
//! Hub de broadcast hacia los WebSockets conectados, montado sobre
//! tokio::sync::broadcast. publish es fire-and-forget: nunca espera a
//! ningún suscriptor y con cero suscriptores es un no-op, así el camino
//! de ingesta/cierre de trip no puede bloquearse en un viewer lento.

use serde_json::Value;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct BroadcastHub {
    tx: broadcast::Sender<String>,
}

impl BroadcastHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publicar un evento a todos los suscriptores actuales.
    /// Un error de envío solo significa que no hay suscriptores.
    pub fn publish(&self, event: &Value) {
        match serde_json::to_string(event) {
            Ok(msg) => {
                let delivered = self.tx.send(msg).unwrap_or(0);
                log::debug!("📡 Broadcast a {} suscriptores", delivered);
            }
            Err(e) => {
                log::error!("❌ Error serializando evento de broadcast: {}", e);
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let hub = BroadcastHub::new(16);
        assert_eq!(hub.subscriber_count(), 0);
        // No debe entrar en pánico ni bloquear
        hub.publish(&json!({"type": "trip_started", "trip_id": 1}));
    }

    #[tokio::test]
    async fn test_all_subscribers_receive() {
        let hub = BroadcastHub::new(16);
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.publish(&json!({"device": "V1", "lat": 12.9}));

        let msg1 = rx1.recv().await.unwrap();
        let msg2 = rx2.recv().await.unwrap();
        assert_eq!(msg1, msg2);
        let parsed: Value = serde_json::from_str(&msg1).unwrap();
        assert_eq!(parsed["device"], "V1");
    }

    #[tokio::test]
    async fn test_dropped_subscriber_does_not_affect_others() {
        let hub = BroadcastHub::new(16);
        let rx_dropped = hub.subscribe();
        let mut rx_alive = hub.subscribe();

        drop(rx_dropped);
        hub.publish(&json!({"device": "V1"}));

        let msg = rx_alive.recv().await.unwrap();
        assert!(msg.contains("V1"));
        assert_eq!(hub.subscriber_count(), 1);
    }
}
