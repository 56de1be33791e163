//! # Trade Analysis
//!
//! Trade tooling built on positional dynasty values:
//!
//! - **Need matching**: find positions where a roster is over- or under-invested
//!   and rank other teams whose needs mirror it
//! - **Proposals**: turn a surplus/deficit pairing into a concrete 1-for-1 offer
//!   with impact scores, a risk level and a draft message
//! - **Fairness**: label a completed trade by the value gap between both sides
//!
//! Everything here is synchronous and side-effect free apart from logging.

pub mod config;
pub mod error;
pub mod fairness;
pub mod message;
pub mod needs;
pub mod proposal;

pub use config::{AnalysisConfig, FairnessConfig, NeedThresholds, ProposalConfig};
pub use error::{AnalysisError, MessageError};
pub use fairness::{
    classify_fairness, classify_trade, FairnessClassifier, FairnessWinner, TradeFairness,
};
pub use message::{MessageRequest, TemplateMessageWriter, TradeMessageWriter};
pub use needs::{
    compute_need, find_trade_targets, PositionShare, PositionalNeed, TeamProfile, TradeTarget,
};
pub use proposal::{
    ProposalBuilder, ProposalFairness, ProposalPlayer, RiskLevel, TradeProposal,
};
