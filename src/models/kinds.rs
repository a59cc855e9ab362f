use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    #[serde(rename = "top-up")]
    TopUp,
    #[serde(rename = "withdrawal")]
    Withdrawal,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::TopUp => write!(f, "top-up"),
            TransactionType::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-up" => Ok(TransactionType::TopUp),
            "withdrawal" => Ok(TransactionType::Withdrawal),
            _ => Err(format!("Invalid TransactionType: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            _ => Err(format!("Invalid TransactionStatus: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayoutProvider {
    Bank,
    Card,
}

impl std::fmt::Display for PayoutProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoutProvider::Bank => write!(f, "bank"),
            PayoutProvider::Card => write!(f, "card"),
        }
    }
}

impl FromStr for PayoutProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank" => Ok(PayoutProvider::Bank),
            "card" => Ok(PayoutProvider::Card),
            _ => Err(format!("Invalid PayoutProvider: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_display() {
        for kind in [TransactionType::TopUp, TransactionType::Withdrawal] {
            let wire = serde_json::to_string(&kind).unwrap();
            assert_eq!(wire, format!("\"{kind}\""));
            assert_eq!(kind.to_string().parse::<TransactionType>().unwrap(), kind);
        }
        for status in [TransactionStatus::Pending, TransactionStatus::Completed, TransactionStatus::Failed] {
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{status}\""));
        }
        assert_eq!(serde_json::to_string(&PayoutProvider::Card).unwrap(), "\"card\"");
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!("refund".parse::<TransactionType>().is_err());
        assert!("cancelled".parse::<TransactionStatus>().is_err());
        assert!("crypto".parse::<PayoutProvider>().is_err());
    }
}
