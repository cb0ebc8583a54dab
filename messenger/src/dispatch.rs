//! Dispatch orchestration: filter incoming events and fan out to webhooks.

use std::sync::Arc;

use herald_events::{EventBus, MissedBlock, VoteTransaction};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::MessengerConfig;
use crate::format::{render, Notification};
use crate::resolver::AccountResolver;
use crate::webhook::{Delivery, DeliveryChannel, HttpChannel};

/// Whether a vote transaction casts or withdraws, carried by the bus topic
/// it arrived on.
#[derive(Clone, Copy, Debug)]
enum VoteKind {
    Cast,
    Withdraw,
}

/// The notification dispatcher.
///
/// Holds the immutable configuration, the account resolver seam and the
/// delivery channel; [`Messenger::attach`] wires it to a host node's bus.
#[derive(Clone)]
pub struct Messenger {
    config: Arc<MessengerConfig>,
    resolver: Arc<dyn AccountResolver>,
    channel: Arc<dyn DeliveryChannel>,
}

impl Messenger {
    pub fn new(
        config: MessengerConfig,
        resolver: Arc<dyn AccountResolver>,
        channel: Arc<dyn DeliveryChannel>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
            channel,
        }
    }

    /// Messenger delivering over HTTP, the production wiring.
    pub fn with_http_channel(config: MessengerConfig, resolver: Arc<dyn AccountResolver>) -> Self {
        Self::new(config, resolver, Arc::new(HttpChannel::new()))
    }

    /// Subscribe to the bus topics this configuration enables.
    ///
    /// Spawns one listener task per event kind with a non-empty hook list
    /// and returns the task handles. A disabled messenger logs once and
    /// installs nothing; so does a kind with no hooks, silently.
    pub fn attach(&self, bus: &EventBus) -> Vec<JoinHandle<()>> {
        if !self.config.enabled {
            info!("messenger disabled; enable it in the config to receive notifications");
            return Vec::new();
        }

        let mut handles = Vec::new();

        if !self.config.events.vote.is_empty() {
            let mut rx = bus.subscribe_vote();
            let messenger = self.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(tx) => messenger.handle_vote(&tx, VoteKind::Cast),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "vote listener lagged behind the bus");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }));
        }

        if !self.config.events.unvote.is_empty() {
            let mut rx = bus.subscribe_unvote();
            let messenger = self.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(tx) => messenger.handle_vote(&tx, VoteKind::Withdraw),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "unvote listener lagged behind the bus");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }));
        }

        if !self.config.events.missed.is_empty() {
            let mut rx = bus.subscribe_missed();
            let messenger = self.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(missed) => messenger.handle_missed(&missed),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "missed-block listener lagged behind the bus");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }));
        }

        info!(
            vote = !self.config.events.vote.is_empty(),
            unvote = !self.config.events.unvote.is_empty(),
            missed = !self.config.events.missed.is_empty(),
            "messenger attached"
        );

        handles
    }

    fn handle_vote(&self, tx: &VoteTransaction, kind: VoteKind) {
        let Some(delegate_key) = tx.asset.first_vote_target() else {
            warn!(id = %tx.id, "dropping vote event with malformed asset");
            return;
        };

        let delegate = match self.resolver.resolve_by_public_key(&delegate_key) {
            Ok(account) => account,
            Err(e) => {
                warn!(id = %tx.id, "dropping vote event: {e}");
                return;
            }
        };
        let voter = match self.resolver.resolve_by_public_key(&tx.sender_public_key) {
            Ok(account) => account,
            Err(e) => {
                warn!(id = %tx.id, "dropping vote event: {e}");
                return;
            }
        };

        if !self.config.notifies_for(&delegate.username) {
            debug!(delegate = %delegate.username, "vote event filtered out");
            return;
        }

        let (notification, hooks) = match kind {
            VoteKind::Cast => (
                Notification::Vote {
                    voter: voter.address,
                    delegate: delegate.username,
                    balance: voter.balance,
                    transaction: tx.id.clone(),
                },
                &self.config.events.vote,
            ),
            VoteKind::Withdraw => (
                Notification::Unvote {
                    voter: voter.address,
                    delegate: delegate.username,
                    balance: voter.balance,
                    transaction: tx.id.clone(),
                },
                &self.config.events.unvote,
            ),
        };

        self.fan_out(&notification, hooks);
    }

    fn handle_missed(&self, missed: &MissedBlock) {
        if !self.config.notifies_for(&missed.username) {
            debug!(delegate = %missed.username, "missed-block event filtered out");
            return;
        }

        let notification = Notification::MissedBlock {
            delegate: missed.username.clone(),
        };
        self.fan_out(&notification, &self.config.events.missed);
    }

    /// Submit one delivery per hook, independently; a bad hook entry is
    /// skipped without affecting the others.
    fn fan_out(&self, notification: &Notification, hooks: &[String]) {
        for hook_id in hooks {
            let Some(webhook) = self.config.webhooks.get(hook_id) else {
                warn!(hook = %hook_id, "hook references an unconfigured webhook, skipping");
                continue;
            };
            let message = render(notification, webhook.style, &self.config.explorer);
            self.channel
                .submit(Delivery::new(&webhook.url, &webhook.field, &message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EventHooks, WebhookConfig};
    use crate::format::WebhookStyle;
    use crate::resolver::{Account, MemoryResolver};
    use crate::webhook::NullChannel;
    use herald_events::VoteAsset;
    use herald_types::{ArkAmount, PublicKey, TxId, WalletAddress};
    use std::collections::BTreeMap;

    fn delegate_key() -> PublicKey {
        PublicKey::new("02".to_string() + &"aa".repeat(32))
    }

    fn voter_key() -> PublicKey {
        PublicKey::new("03".to_string() + &"bb".repeat(32))
    }

    fn resolver() -> MemoryResolver {
        MemoryResolver::new()
            .with_account(
                delegate_key(),
                Account {
                    address: WalletAddress::new("DELEGATE_ADDR"),
                    username: "genesis_1".to_string(),
                    balance: ArkAmount::from_satoshi(1_000_000_000),
                },
            )
            .with_account(
                voter_key(),
                Account {
                    address: WalletAddress::new("ADDR123"),
                    username: String::new(),
                    balance: ArkAmount::from_satoshi(250_000_000),
                },
            )
    }

    fn config(hooks: EventHooks, webhooks: BTreeMap<String, WebhookConfig>) -> MessengerConfig {
        MessengerConfig {
            enabled: true,
            events: hooks,
            webhooks,
            ..Default::default()
        }
    }

    fn slack_hook(url: &str) -> WebhookConfig {
        WebhookConfig {
            url: url.to_string(),
            field: "text".to_string(),
            style: WebhookStyle::Slack,
        }
    }

    fn vote_tx() -> VoteTransaction {
        VoteTransaction {
            id: TxId::new("TXID1"),
            sender_public_key: voter_key(),
            asset: VoteAsset {
                votes: vec![format!("+{}", delegate_key())],
            },
        }
    }

    fn messenger(config: MessengerConfig) -> (Messenger, Arc<NullChannel>) {
        let channel = Arc::new(NullChannel::new());
        let messenger = Messenger::new(config, Arc::new(resolver()), channel.clone());
        (messenger, channel)
    }

    #[test]
    fn vote_event_fans_out_to_each_hook() {
        let (m, channel) = messenger(config(
            EventHooks {
                vote: vec!["a".to_string(), "b".to_string()],
                ..Default::default()
            },
            BTreeMap::from([
                ("a".to_string(), slack_hook("https://a.example/hook")),
                ("b".to_string(), slack_hook("https://b.example/hook")),
            ]),
        ));

        m.handle_vote(&vote_tx(), VoteKind::Cast);

        let submitted = channel.submitted();
        assert_eq!(submitted.len(), 2);
        assert_eq!(submitted[0].url, "https://a.example/hook");
        assert_eq!(submitted[1].url, "https://b.example/hook");
    }

    #[test]
    fn unknown_hook_id_is_skipped_but_others_fire() {
        let (m, channel) = messenger(config(
            EventHooks {
                vote: vec!["missing".to_string(), "good".to_string()],
                ..Default::default()
            },
            BTreeMap::from([("good".to_string(), slack_hook("https://good.example/hook"))]),
        ));

        m.handle_vote(&vote_tx(), VoteKind::Cast);

        let submitted = channel.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].url, "https://good.example/hook");
    }

    #[test]
    fn delegate_filter_drops_unlisted_delegates() {
        let mut cfg = config(
            EventHooks {
                vote: vec!["a".to_string()],
                ..Default::default()
            },
            BTreeMap::from([("a".to_string(), slack_hook("https://a.example/hook"))]),
        );
        cfg.delegates = vec!["alice".to_string()];
        let (m, channel) = messenger(cfg);

        // The vote targets genesis_1, which is not in the filter.
        m.handle_vote(&vote_tx(), VoteKind::Cast);

        assert!(channel.submitted().is_empty());
    }

    #[test]
    fn malformed_asset_drops_the_event() {
        let (m, channel) = messenger(config(
            EventHooks {
                vote: vec!["a".to_string()],
                ..Default::default()
            },
            BTreeMap::from([("a".to_string(), slack_hook("https://a.example/hook"))]),
        ));

        let tx = VoteTransaction {
            id: TxId::new("TXID2"),
            sender_public_key: voter_key(),
            asset: VoteAsset::default(),
        };
        m.handle_vote(&tx, VoteKind::Cast);

        assert!(channel.submitted().is_empty());
    }

    #[test]
    fn unresolvable_voter_drops_the_event() {
        let (m, channel) = messenger(config(
            EventHooks {
                vote: vec!["a".to_string()],
                ..Default::default()
            },
            BTreeMap::from([("a".to_string(), slack_hook("https://a.example/hook"))]),
        ));

        let tx = VoteTransaction {
            id: TxId::new("TXID3"),
            sender_public_key: PublicKey::new("03".to_string() + &"ff".repeat(32)),
            asset: VoteAsset {
                votes: vec![format!("+{}", delegate_key())],
            },
        };
        m.handle_vote(&tx, VoteKind::Cast);

        assert!(channel.submitted().is_empty());
    }

    #[test]
    fn unvote_uses_the_unvote_hooks_and_template() {
        let (m, channel) = messenger(config(
            EventHooks {
                unvote: vec!["a".to_string()],
                ..Default::default()
            },
            BTreeMap::from([("a".to_string(), slack_hook("https://a.example/hook"))]),
        ));

        m.handle_vote(&vote_tx(), VoteKind::Withdraw);

        let submitted = channel.submitted();
        assert_eq!(submitted.len(), 1);
        let message = submitted[0].payload["text"].as_str().unwrap();
        assert!(message.contains("unvoted"));
    }

    #[test]
    fn missed_block_notifies_with_the_username() {
        let (m, channel) = messenger(config(
            EventHooks {
                missed: vec!["a".to_string()],
                ..Default::default()
            },
            BTreeMap::from([("a".to_string(), slack_hook("https://a.example/hook"))]),
        ));

        m.handle_missed(&MissedBlock {
            username: "genesis_1".to_string(),
        });

        let submitted = channel.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(
            submitted[0].payload["text"].as_str().unwrap(),
            "*genesis_1* missed a block"
        );
    }

    #[test]
    fn missed_block_respects_the_delegate_filter() {
        let mut cfg = config(
            EventHooks {
                missed: vec!["a".to_string()],
                ..Default::default()
            },
            BTreeMap::from([("a".to_string(), slack_hook("https://a.example/hook"))]),
        );
        cfg.delegates = vec!["alice".to_string()];
        let (m, channel) = messenger(cfg);

        m.handle_missed(&MissedBlock {
            username: "bob".to_string(),
        });

        assert!(channel.submitted().is_empty());
    }
}
