//! Request lifecycle stages

use serde::{Deserialize, Serialize};

/// Stage of one ensemble request
///
/// The lifecycle is strictly linear:
/// `Received → FannedOut → Collected → Digested → Adjudicated → Returned`.
/// A failure at `Adjudicated` ends the request; there are no backward moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStage {
    Received,
    FannedOut,
    Collected,
    Digested,
    Adjudicated,
    Returned,
}

impl RequestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStage::Received => "received",
            RequestStage::FannedOut => "fanned_out",
            RequestStage::Collected => "collected",
            RequestStage::Digested => "digested",
            RequestStage::Adjudicated => "adjudicated",
            RequestStage::Returned => "returned",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStage::Received => "Received",
            RequestStage::FannedOut => "Querying backends",
            RequestStage::Collected => "Candidates collected",
            RequestStage::Digested => "Attachments summarized",
            RequestStage::Adjudicated => "Adjudicated",
            RequestStage::Returned => "Returned",
        }
    }

    /// The only legal successor, `None` once returned
    pub fn next(&self) -> Option<RequestStage> {
        match self {
            RequestStage::Received => Some(RequestStage::FannedOut),
            RequestStage::FannedOut => Some(RequestStage::Collected),
            RequestStage::Collected => Some(RequestStage::Digested),
            RequestStage::Digested => Some(RequestStage::Adjudicated),
            RequestStage::Adjudicated => Some(RequestStage::Returned),
            RequestStage::Returned => None,
        }
    }
}

impl std::fmt::Display for RequestStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
