use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Producer-side seam onto the message broker. The coordinator only
/// ever publishes; delivery durability is the broker's concern.
#[async_trait]
pub trait TopicPublisher: Send + Sync + 'static {
    async fn publish(&self, payload: Vec<u8>) -> anyhow::Result<()>;
}

/// In-process topic with named, independently-cursored subscriptions.
///
/// Each subscription owns an unbounded queue, so publishing never
/// awaits a consumer and a stuck subscriber cannot delay delivery to
/// any other subscription. The consumer-facing contract is
/// at-least-once: subscribers must tolerate redelivered payloads.
pub struct TopicBus {
    topic: String,
    subscriptions: DashMap<String, mpsc::UnboundedSender<Vec<u8>>>,
}

/// One named durable subscription's receive cursor.
pub struct Subscription {
    name: String,
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl Subscription {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next delivered payload, or `None` once the topic is gone.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.rx.recv().await
    }
}

impl TopicBus {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            subscriptions: DashMap::new(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Creates (or replaces) a named subscription. Subscriptions are
    /// expected to be set up at startup, before the first publish;
    /// messages published earlier are not replayed.
    pub fn subscribe(&self, name: impl Into<String>) -> Subscription {
        let name = name.into();
        let (tx, rx) = mpsc::unbounded_channel();
        if self.subscriptions.insert(name.clone(), tx).is_some() {
            warn!(topic = %self.topic, subscription = %name, "Replaced existing subscription");
        }
        debug!(topic = %self.topic, subscription = %name, "Subscription created");
        Subscription { name, rx }
    }

    /// Fans `payload` out to every live subscription. Subscriptions
    /// whose receiver has been dropped are pruned and logged; one dead
    /// consumer never affects the rest.
    pub fn fan_out(&self, payload: &[u8]) {
        let mut dead = Vec::new();
        for entry in self.subscriptions.iter() {
            if entry.value().send(payload.to_vec()).is_err() {
                dead.push(entry.key().clone());
            }
        }
        for name in dead {
            self.subscriptions.remove(&name);
            warn!(topic = %self.topic, subscription = %name, "Dropped dead subscription");
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

#[async_trait]
impl TopicPublisher for TopicBus {
    async fn publish(&self, payload: Vec<u8>) -> anyhow::Result<()> {
        if self.subscriptions.is_empty() {
            warn!(topic = %self.topic, "Publishing to a topic with no subscriptions");
        }
        self.fan_out(&payload);
        Ok(())
    }
}
