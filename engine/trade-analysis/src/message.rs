//! Draft trade messages
//!
//! A [`TradeMessageWriter`] can be plugged into the proposal builder to phrase
//! the message sent to the other manager (e.g. an LLM client). Without one, or
//! when it fails, a fixed template is used so a proposal always carries a
//! usable message.

use crate::error::MessageError;
use crate::proposal::{ProposalPlayer, TradeProposal};
use roster_valuation::Position;
use tracing::{debug, warn};

/// Everything a writer needs to phrase one proposal
#[derive(Debug, Clone, Copy)]
pub struct MessageRequest<'a> {
    pub proposal: &'a TradeProposal,
    pub user_surplus: Option<&'a Position>,
    pub target_surplus: Option<&'a Position>,
}

impl<'a> MessageRequest<'a> {
    pub fn new(
        proposal: &'a TradeProposal,
        user_surplus: Option<&'a Position>,
        target_surplus: Option<&'a Position>,
    ) -> Self {
        Self { proposal, user_surplus, target_surplus }
    }

    /// Instruction for a text-generation backend
    pub fn prompt(&self) -> String {
        let proposal = self.proposal;
        format!(
            "Write a trade message to {}.\n\
             My surplus: {}\n\
             Their surplus: {}\n\
             I send: {}\n\
             I receive: {}\n\
             Rationale: {}\n\
             Fairness: {}\n\
             Risk: {}\n\
             Use plain language and end with a simple question.",
            proposal.target_team_name,
            position_or_na(self.user_surplus),
            position_or_na(self.target_surplus),
            player_list(&proposal.your_offer),
            player_list(&proposal.their_return),
            proposal.rationale,
            proposal.fairness,
            proposal.risk_level,
        )
    }

    /// Standing instruction sent alongside [`MessageRequest::prompt`]
    pub fn system_prompt(&self) -> &'static str {
        "You are writing a concise fantasy football trade message. \
         Be polite, direct, and specific. Do not overhype. Keep it under 120 words."
    }
}

/// Phrases the message that accompanies a trade proposal
pub trait TradeMessageWriter: Send + Sync {
    fn write_message(&self, request: &MessageRequest<'_>) -> Result<String, MessageError>;
}

/// Offline writer that always returns the fixed template
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateMessageWriter;

impl TradeMessageWriter for TemplateMessageWriter {
    fn write_message(&self, request: &MessageRequest<'_>) -> Result<String, MessageError> {
        Ok(template_message(request.proposal))
    }
}

/// The fixed offer message used when no writer is configured
pub fn template_message(proposal: &TradeProposal) -> String {
    let upgrade_at = proposal
        .their_return
        .first()
        .map_or("that position", |p| p.position.as_str());

    format!(
        "Hey! I'm looking to upgrade at {} and noticed you have strong depth there.\n\
         \n\
         Would you be interested in trading:\n\
         - You get: {}\n\
         - I get: {}\n\
         \n\
         {}\n\
         \n\
         Let me know if you'd like to discuss!",
        upgrade_at,
        player_list(&proposal.your_offer),
        player_list(&proposal.their_return),
        proposal.rationale,
    )
}

/// Message used when a configured writer errors or returns nothing
fn fallback_message(request: &MessageRequest<'_>) -> String {
    let proposal = request.proposal;
    format!(
        "Hey! I think we might match up well on a trade.\n\
         \n\
         I can send: {}\n\
         I'd be looking for: {}\n\
         \n\
         I have surplus at {} and you have surplus at {}, so this could help both sides.\n\
         {}\n\
         \n\
         If this framework works for you, I can adjust details.",
        player_list(&proposal.your_offer),
        player_list(&proposal.their_return),
        position_or_na(request.user_surplus),
        position_or_na(request.target_surplus),
        proposal.rationale,
    )
}

/// Resolve the draft message for a proposal, never failing
pub(crate) fn draft_message(
    writer: Option<&dyn TradeMessageWriter>,
    request: &MessageRequest<'_>,
) -> String {
    let Some(writer) = writer else {
        return template_message(request.proposal);
    };

    match writer.write_message(request) {
        Ok(message) if !message.trim().is_empty() => message.trim().to_string(),
        Ok(_) => {
            debug!("Trade message writer returned empty text, using fallback");
            fallback_message(request)
        }
        Err(e) => {
            warn!("Trade message writer failed, using fallback: {}", e);
            fallback_message(request)
        }
    }
}

fn player_list(players: &[ProposalPlayer]) -> String {
    players.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
}

fn position_or_na(position: Option<&Position>) -> &str {
    position.map_or("N/A", |p| p.as_str())
}
