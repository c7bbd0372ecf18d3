//! M-Pesa notification body parser.
//!
//! Pattern banks cover the common sent/received notification shapes; a
//! basic fallback still extracts an amount, code and phone from bodies the
//! banks do not recognize.
//!
//! # Invariants
//! - Parsing is total: unrecognized input yields an invalid
//!   `ParsedTransaction`, never an error.
//! - Matching is case-insensitive over the whole body.

use once_cell::sync::Lazy;
use regex::Regex;

static SENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"(?i)ksh([\d,\.]+)\s+sent\s+to\s+(\d{10})\s+(.+?)\s+on\s+\d+/\d+/\d+\s+at\s+\d+:\d+\s+\w+",
        )
        .expect("valid sent-with-phone regex"),
        Regex::new(r"(?i)(\w+)\s+confirmed\.\s+ksh([\d,\.]+)\s+sent\s+to\s+(.+?)\s+on\s+\d+/\d+/\d+")
            .expect("valid confirmed-sent regex"),
    ]
});

static RECEIVED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"(?i)(\w+)\s+confirmed\.\s+you\s+have\s+received\s+ksh([\d,\.]+)\s+from\s+(.+?)\s+(\d{10})",
        )
        .expect("valid confirmed-received regex"),
        Regex::new(r"(?i)ksh([\d,\.]+)\s+received\s+from\s+(\d{10})\s+(.+?)\s+on\s+\d+/\d+/\d+")
            .expect("valid received-with-phone regex"),
    ]
});

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ksh\s*([\d,]+(?:\.\d+)?)").expect("valid amount regex"));
static BARE_AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)").expect("valid bare amount regex"));
static LABELLED_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:transaction|code|ref(?:erence)?)\s*[:.]?\s*([A-Z0-9]{8,12})")
        .expect("valid labelled code regex")
});
static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([A-Z0-9]{8,12})\b").expect("valid code regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{10})\b").expect("valid phone regex"));
static BALANCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)balance\s+is\s+ksh\s*([\d,\.]+)").expect("valid balance regex")
});

/// Direction of the parsed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Sent,
    Received,
    /// Amount was found but the body matched no known notification shape.
    Unknown,
}

/// Account bucket suggested for a parsed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Business,
    Personal,
}

/// Structured transaction data extracted from one notification body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    /// Transacted amount in KSh; 0.0 when none was found.
    pub amount: f64,
    /// 10-digit counterparty phone number, when present.
    pub recipient_phone: Option<String>,
    /// Counterparty display name, when present.
    pub recipient_name: Option<String>,
    /// M-Pesa confirmation code; `"UNKNOWN"` when none was found.
    pub transaction_code: String,
    /// Post-transaction account balance, when stated.
    pub balance: Option<f64>,
    pub transaction_type: TransactionType,
    /// Whether enough data was extracted to act on this transaction.
    pub is_valid: bool,
}

/// Parses one notification body into structured transaction data.
///
/// Sent patterns are tried first, then received patterns, then a basic
/// amount/code/phone fallback.
pub fn parse_sms(body: &str) -> ParsedTransaction {
    let text = body.trim();

    for pattern in SENT_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            return build_matched(text, &captures, TransactionType::Sent);
        }
    }
    for pattern in RECEIVED_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            return build_matched(text, &captures, TransactionType::Received);
        }
    }

    parse_basic(text)
}

/// Suggests whether a transaction belongs to a business or personal bucket.
///
/// Business keywords in the counterparty name, or amounts above 5,000 KSh,
/// lean business; with no data at all the caller gets Business, matching
/// how the consumer defaults.
pub fn classify_account_type(recipient_name: Option<&str>, amount: Option<f64>) -> AccountType {
    const BUSINESS_KEYWORDS: [&str; 12] = [
        "supplier",
        "vendor",
        "wholesale",
        "ltd",
        "limited",
        "company",
        "shop",
        "store",
        "market",
        "traders",
        "distributors",
        "services",
    ];

    if recipient_name.is_none() && amount.is_none() {
        return AccountType::Business;
    }

    let name = recipient_name.unwrap_or_default().to_lowercase();
    let has_business_keyword = BUSINESS_KEYWORDS
        .iter()
        .any(|keyword| name.contains(keyword));
    let is_large_amount = amount.is_some_and(|a| a > 5_000.0);

    if has_business_keyword || is_large_amount {
        AccountType::Business
    } else {
        AccountType::Personal
    }
}

fn build_matched(
    text: &str,
    captures: &regex::Captures<'_>,
    transaction_type: TransactionType,
) -> ParsedTransaction {
    let amount = first_amount_capture(captures);
    let transaction_code = extract_code(text);
    let recipient_phone = extract_phone_from_captures(captures);
    let recipient_name = extract_name_from_captures(captures, &transaction_code);
    let balance = extract_balance(text);

    ParsedTransaction {
        amount,
        recipient_phone,
        recipient_name,
        is_valid: amount > 0.0 && !transaction_code.is_empty(),
        transaction_code,
        balance,
        transaction_type,
    }
}

fn parse_basic(text: &str) -> ParsedTransaction {
    let amount = AMOUNT_RE
        .captures(text)
        .or_else(|| BARE_AMOUNT_RE.captures(text))
        .map(|captures| parse_amount(&captures[1]))
        .unwrap_or(0.0);

    let code = extract_code(text);
    ParsedTransaction {
        amount,
        recipient_phone: extract_phone(text),
        recipient_name: None,
        transaction_code: if code.is_empty() {
            "UNKNOWN".to_string()
        } else {
            code
        },
        balance: extract_balance(text),
        transaction_type: TransactionType::Unknown,
        is_valid: amount > 0.0,
    }
}

fn parse_amount(raw: &str) -> f64 {
    raw.replace(',', "").parse::<f64>().unwrap_or(0.0)
}

// Amount-like capture: digits with optional thousands separators and
// decimals. Every pattern bank places the amount capture before any phone
// capture, so the first numeric hit is the amount.
fn looks_numeric(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

fn first_amount_capture(captures: &regex::Captures<'_>) -> f64 {
    captures
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|part| looks_numeric(part))
        .map(parse_amount)
        .unwrap_or(0.0)
}

fn extract_code(text: &str) -> String {
    if let Some(captures) = LABELLED_CODE_RE.captures(text) {
        return captures[1].to_string();
    }
    CODE_RE
        .captures(text)
        .map(|captures| captures[1].to_string())
        .unwrap_or_default()
}

fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.captures(text).map(|captures| captures[1].to_string())
}

fn extract_phone_from_captures(captures: &regex::Captures<'_>) -> Option<String> {
    captures
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|part| part.len() == 10 && part.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

fn extract_name_from_captures(
    captures: &regex::Captures<'_>,
    transaction_code: &str,
) -> Option<String> {
    captures
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().trim())
        .find(|part| {
            !part.is_empty()
                && *part != transaction_code
                && !looks_numeric(part)
                && !part.to_lowercase().contains("ksh")
        })
        .map(str::to_string)
}

fn extract_balance(text: &str) -> Option<f64> {
    BALANCE_RE
        .captures(text)
        .map(|captures| parse_amount(&captures[1]))
}

#[cfg(test)]
mod tests {
    use super::{classify_account_type, parse_sms, AccountType, TransactionType};

    #[test]
    fn parses_confirmed_received_notification() {
        let parsed = parse_sms(
            "QGH7RT1KL9 Confirmed. You have received Ksh2,500.00 from JANE WANJIKU 0722000111 \
             on 12/3/26 at 1:15 PM New M-PESA balance is Ksh3,100.00",
        );

        assert_eq!(parsed.transaction_type, TransactionType::Received);
        assert_eq!(parsed.amount, 2_500.0);
        assert_eq!(parsed.recipient_phone.as_deref(), Some("0722000111"));
        assert_eq!(parsed.recipient_name.as_deref(), Some("JANE WANJIKU"));
        assert_eq!(parsed.transaction_code, "QGH7RT1KL9");
        assert_eq!(parsed.balance, Some(3_100.0));
        assert!(parsed.is_valid);
    }

    #[test]
    fn parses_confirmed_sent_notification() {
        let parsed = parse_sms(
            "QAB1CD2EF3 Confirmed. Ksh1,000.00 sent to John Kamau on 1/2/26 at 10:05 AM",
        );

        assert_eq!(parsed.transaction_type, TransactionType::Sent);
        assert_eq!(parsed.amount, 1_000.0);
        assert_eq!(parsed.transaction_code, "QAB1CD2EF3");
        assert_eq!(parsed.recipient_name.as_deref(), Some("John Kamau"));
        assert!(parsed.is_valid);
    }

    #[test]
    fn fallback_extracts_amount_and_code() {
        let parsed = parse_sms("Payment of Ksh350 ref: AB12CD34EF received, thank you");

        assert_eq!(parsed.transaction_type, TransactionType::Unknown);
        assert_eq!(parsed.amount, 350.0);
        assert_eq!(parsed.transaction_code, "AB12CD34EF");
        assert!(parsed.is_valid);
    }

    #[test]
    fn unparseable_body_is_invalid_not_an_error() {
        let parsed = parse_sms("see you at lunch?");

        assert_eq!(parsed.amount, 0.0);
        assert_eq!(parsed.transaction_code, "UNKNOWN");
        assert_eq!(parsed.transaction_type, TransactionType::Unknown);
        assert!(!parsed.is_valid);
    }

    #[test]
    fn account_type_uses_keywords_and_amount() {
        assert_eq!(
            classify_account_type(Some("Acme Traders"), Some(200.0)),
            AccountType::Business
        );
        assert_eq!(
            classify_account_type(Some("John Kamau"), Some(12_000.0)),
            AccountType::Business
        );
        assert_eq!(
            classify_account_type(Some("John Kamau"), Some(200.0)),
            AccountType::Personal
        );
        assert_eq!(classify_account_type(None, None), AccountType::Business);
    }
}
