//! Error handling
//!
//! [`ClientError`] is what the RPC-facing code returns. [`parse_error`]
//! turns any of them into a message fit for an end user, recognising the
//! AMAF program's own error codes in transaction logs.

use anchor_lang::prelude::*;
use solana_client::client_error::{ClientError as RpcClientError, ClientErrorKind};
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_sdk::instruction::InstructionError;
use solana_sdk::transaction::TransactionError;

/// Errors returned by the AMAF program, in on-chain order
#[error_code]
pub enum ProgramErrorCode {
    #[msg("Market already resolved")]
    MarketResolved,
    #[msg("Market not resolved")]
    MarketNotResolved,
    #[msg("Bet already claimed")]
    AlreadyClaimed,
    #[msg("Not a winning bet")]
    NotWinner,
    #[msg("You have already claimed AMAF tokens within the last 24 hours. Please wait before claiming again.")]
    ClaimTooSoon,
    #[msg("Question too long")]
    QuestionTooLong,
    #[msg("Description too long")]
    DescriptionTooLong,
    #[msg("Invalid mint")]
    InvalidMint,
    #[msg("Invalid owner")]
    InvalidOwner,
}

impl ProgramErrorCode {
    /// Look up a custom error number (6000 and up)
    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(anchor_lang::error::ERROR_CODE_OFFSET)?;
        Some(match index {
            0 => Self::MarketResolved,
            1 => Self::MarketNotResolved,
            2 => Self::AlreadyClaimed,
            3 => Self::NotWinner,
            4 => Self::ClaimTooSoon,
            5 => Self::QuestionTooLong,
            6 => Self::DescriptionTooLong,
            7 => Self::InvalidMint,
            8 => Self::InvalidOwner,
            _ => return None,
        })
    }

    /// Look up an error by its variant name as printed in program logs
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "MarketResolved" => Self::MarketResolved,
            "MarketNotResolved" => Self::MarketNotResolved,
            "AlreadyClaimed" => Self::AlreadyClaimed,
            "NotWinner" => Self::NotWinner,
            "ClaimTooSoon" => Self::ClaimTooSoon,
            "QuestionTooLong" => Self::QuestionTooLong,
            "DescriptionTooLong" => Self::DescriptionTooLong,
            "InvalidMint" => Self::InvalidMint,
            "InvalidOwner" => Self::InvalidOwner,
            _ => return None,
        })
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MarketResolved => "This market has already been resolved",
            Self::MarketNotResolved => "Market has not been resolved yet",
            Self::AlreadyClaimed => "This bet has already been claimed",
            Self::NotWinner => "You did not win this bet",
            Self::ClaimTooSoon => "You must wait 24 hours between claims",
            Self::QuestionTooLong => "Question exceeds maximum length (200 characters)",
            Self::DescriptionTooLong => "Description exceeds maximum length (500 characters)",
            Self::InvalidMint => "Invalid token mint address",
            Self::InvalidOwner => "Invalid account ownership",
        }
    }
}

/// Failures of the program client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcClientError),

    #[error("{0}")]
    Anchor(#[from] anchor_lang::error::Error),

    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// An error reduced to what a user interface shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedError {
    pub user_message: String,
    pub technical_details: Option<String>,
    pub error_code: Option<String>,
}

impl ParsedError {
    fn from_program_code(code: &str, technical_details: String) -> Self {
        let user_message = ProgramErrorCode::from_name(code)
            .map(|e| e.user_message().to_string())
            .unwrap_or_else(|| code.to_string());
        Self {
            user_message,
            technical_details: Some(technical_details),
            error_code: Some(code.to_string()),
        }
    }
}

/// Reduce a [`ClientError`] to a user-facing message
pub fn parse_error(error: &ClientError) -> ParsedError {
    match error {
        ClientError::Anchor(anchor_lang::error::Error::AnchorError(e)) => {
            let details = format!(
                "Anchor Error: {}\nCode: {} ({})",
                e.error_msg, e.error_name, e.error_code_number
            );
            let mut parsed = ParsedError::from_program_code(&e.error_name, details);
            if ProgramErrorCode::from_name(&e.error_name).is_none() {
                parsed.user_message = e.error_msg.clone();
            }
            parsed
        }
        ClientError::Rpc(e) => parse_rpc_error(e),
        other => parse_message(&other.to_string()),
    }
}

/// Shorthand for `parse_error(error).user_message`
pub fn format_error_for_user(error: &ClientError) -> String {
    parse_error(error).user_message
}

fn parse_rpc_error(error: &RpcClientError) -> ParsedError {
    if let ClientErrorKind::RpcError(RpcError::RpcResponseError {
        data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
        ..
    }) = error.kind()
    {
        if let Some(logs) = result.logs.as_deref().filter(|logs| !logs.is_empty()) {
            let mut parsed = parse_logs(logs);
            if let Some(details) = parsed.technical_details.as_mut() {
                details.push_str(&format!("\n\nMessage: {error}"));
            }
            return parsed;
        }
    }

    if let Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) =
        error.get_transaction_error()
    {
        if let Some(program_error) = ProgramErrorCode::from_code(code) {
            return ParsedError::from_program_code(&format!("{program_error:?}"), error.to_string());
        }
    }

    parse_message(&error.to_string())
}

/// Interpret the logs of a failed transaction
pub fn parse_logs(logs: &[String]) -> ParsedError {
    let technical_details = format!("Transaction Logs:\n{}", logs.join("\n"));

    if let Some(code) = logs.iter().find_map(|line| anchor_error_name(line)) {
        return ParsedError::from_program_code(code, technical_details);
    }

    let user_message = logs
        .last()
        .and_then(|line| line.split_once("Program log: Error: "))
        .map(|(_, message)| message.to_string())
        .unwrap_or_else(|| "Transaction failed".to_string());

    ParsedError {
        user_message,
        technical_details: Some(technical_details),
        error_code: None,
    }
}

/// Extract `Name` from an `AnchorError ... Error Code: Name. Error Number: ...` line
fn anchor_error_name(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once("Error Code: ")?;
    let (name, _) = rest.split_once('.')?;
    Some(name.trim())
}

/// Classify a free-form error message
pub fn parse_message(message: &str) -> ParsedError {
    let lower = message.to_lowercase();
    let user_message = if lower.contains("user rejected") {
        "Transaction was rejected by wallet"
    } else if lower.contains("insufficient funds") {
        "Insufficient funds for transaction"
    } else if lower.contains("timeout") || lower.contains("timed out") {
        "Transaction timed out. Please try again"
    } else if lower.contains("network") || lower.contains("connection refused") {
        "Network error. Please check your connection"
    } else {
        message
    };

    ParsedError {
        user_message: user_message.to_string(),
        technical_details: Some(message.to_string()),
        error_code: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logs(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_codes_follow_program_order() {
        assert!(matches!(
            ProgramErrorCode::from_code(6000),
            Some(ProgramErrorCode::MarketResolved)
        ));
        assert!(matches!(
            ProgramErrorCode::from_code(6004),
            Some(ProgramErrorCode::ClaimTooSoon)
        ));
        assert!(matches!(
            ProgramErrorCode::from_code(6008),
            Some(ProgramErrorCode::InvalidOwner)
        ));
        assert!(ProgramErrorCode::from_code(6009).is_none());
        assert!(ProgramErrorCode::from_code(42).is_none());
    }

    #[test]
    fn test_anchor_error_log_is_recognised() {
        let parsed = parse_logs(&logs(&[
            "Program Gh8YHDTXiRY8ZA3zkxSsrUb1az7Vxc4z9SH9U6LvoMW invoke [1]",
            "Program log: Instruction: ClaimDailyAmaf",
            "Program log: AnchorError thrown in programs/amafcoin/src/lib.rs:160. Error Code: ClaimTooSoon. Error Number: 6004. Error Message: You have already claimed AMAF tokens within the last 24 hours. Please wait before claiming again..",
            "Program Gh8YHDTXiRY8ZA3zkxSsrUb1az7Vxc4z9SH9U6LvoMW failed: custom program error: 0x1774",
        ]));
        assert_eq!(parsed.user_message, "You must wait 24 hours between claims");
        assert_eq!(parsed.error_code.as_deref(), Some("ClaimTooSoon"));
        assert!(parsed.technical_details.unwrap().starts_with("Transaction Logs:"));
    }

    #[test]
    fn test_program_log_error_line() {
        let parsed = parse_logs(&logs(&[
            "Program log: Instruction: PlaceBet",
            "Program log: Error: insufficient funds",
        ]));
        assert_eq!(parsed.user_message, "insufficient funds");
        assert_eq!(parsed.error_code, None);

        let parsed = parse_logs(&logs(&["Program failed to complete"]));
        assert_eq!(parsed.user_message, "Transaction failed");
    }

    #[test]
    fn test_generic_messages() {
        assert_eq!(
            parse_message("User rejected the request.").user_message,
            "Transaction was rejected by wallet"
        );
        assert_eq!(
            parse_message("Attempt to debit an account but found no record of a prior credit: insufficient funds").user_message,
            "Insufficient funds for transaction"
        );
        assert_eq!(
            parse_message("operation timed out").user_message,
            "Transaction timed out. Please try again"
        );
        assert_eq!(parse_message("something odd").user_message, "something odd");
    }

    #[test]
    fn test_parse_anchor_error() {
        let err = ClientError::from(error!(ProgramErrorCode::NotWinner));
        let parsed = parse_error(&err);
        assert_eq!(parsed.user_message, "You did not win this bet");
        assert_eq!(parsed.error_code.as_deref(), Some("NotWinner"));
    }

    #[test]
    fn test_parse_other_client_errors() {
        let err = ClientError::AccountNotFound(Pubkey::new_unique());
        let parsed = parse_error(&err);
        assert!(parsed.user_message.starts_with("account not found"));
        assert_eq!(format_error_for_user(&err), parsed.user_message);
    }
}
