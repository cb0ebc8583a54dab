//! Message formatting for notification events.
//!
//! One template per (event kind, webhook style) pair, resolved through an
//! exhaustive match so a missing combination is a compile error rather
//! than a runtime lookup failure.

use herald_types::{ArkAmount, TxId, WalletAddress};
use serde::{Deserialize, Serialize};

/// Message style of a webhook endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStyle {
    /// Slack mrkdwn: `*bold*`, `<url|label>` links.
    Slack,
    /// Discord markdown: `**bold**`, `[label](url)` links.
    Discord,
    /// Plain text with a bare URL.
    #[default]
    #[serde(other)]
    Default,
}

/// A notification ready for rendering, one variant per event kind.
#[derive(Clone, Debug)]
pub enum Notification {
    /// A wallet cast a vote for a delegate.
    Vote {
        voter: WalletAddress,
        delegate: String,
        balance: ArkAmount,
        transaction: TxId,
    },
    /// A wallet withdrew its vote from a delegate.
    Unvote {
        voter: WalletAddress,
        delegate: String,
        balance: ArkAmount,
        transaction: TxId,
    },
    /// A delegate failed to produce its assigned block.
    MissedBlock { delegate: String },
}

/// Render a notification in the given style.
///
/// Pure and deterministic; `explorer` is the block-explorer base URL used
/// in transaction links.
pub fn render(notification: &Notification, style: WebhookStyle, explorer: &str) -> String {
    match notification {
        Notification::Vote {
            voter,
            delegate,
            balance,
            transaction,
        } => match style {
            WebhookStyle::Discord => format!(
                "⬆️ **{voter}** voted for **{delegate}** with **{balance} ARK**. \
                 [Open transaction]({explorer}/transaction/{transaction})"
            ),
            WebhookStyle::Slack => format!(
                "⬆️ *{voter}* voted for *{delegate}* with *{balance} ARK*. \
                 <{explorer}/transaction/{transaction}|Open transaction>"
            ),
            WebhookStyle::Default => format!(
                "⬆️ {voter} voted for {delegate} with {balance} ARK. \
                 {explorer}/transaction/{transaction}"
            ),
        },
        Notification::Unvote {
            voter,
            delegate,
            balance,
            transaction,
        } => match style {
            WebhookStyle::Discord => format!(
                "⬇️ **{voter}** unvoted **{delegate}** with **{balance} ARK**. \
                 [Open transaction]({explorer}/transaction/{transaction})"
            ),
            WebhookStyle::Slack => format!(
                "⬇️ *{voter}* unvoted *{delegate}* with *{balance} ARK*. \
                 <{explorer}/transaction/{transaction}|Open transaction>"
            ),
            WebhookStyle::Default => format!(
                "⬇️ {voter} unvoted {delegate} with {balance} ARK. \
                 {explorer}/transaction/{transaction}"
            ),
        },
        Notification::MissedBlock { delegate } => match style {
            WebhookStyle::Discord => format!("**{delegate}** missed a block"),
            WebhookStyle::Slack => format!("*{delegate}* missed a block"),
            WebhookStyle::Default => format!("{delegate} missed a block"),
        },
    }
}
