//! Transfer codes
//!
//! Moves a complete dataset between two installations. The state is
//! serialized to JSON and base64-encoded into a payload that can be pasted
//! or carried in a QR image. The first eight characters, upper-cased, form a
//! reference code that people can read aloud to check they scanned the
//! right thing. A reference code alone cannot be imported.
//!
//! Payloads are not encrypted; anyone holding one can read the data.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ImportError, TrackerError, TrackerResult};
use crate::models::{
    BudgetConfiguration, Expense, PeriodStartDay, PersistedState, DEFAULT_MONTHLY_BUDGET,
};

/// Length of the human-readable reference code
pub const REFERENCE_CODE_LEN: usize = 8;

/// Standard alphabet, accepting codes with or without `=` padding
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Document carried inside a transfer code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    pub expenses: Vec<Expense>,
    pub monthly_budget: String,
    pub period_start_day: PeriodStartDay,
    /// Informational only, never checked on import
    pub exported_at: DateTime<Utc>,
}

impl TransferPayload {
    /// Build the document for a state
    pub fn from_state(state: &PersistedState, exported_at: DateTime<Utc>) -> Self {
        Self {
            expenses: state.expenses.clone(),
            monthly_budget: state.budget.monthly_budget.clone(),
            period_start_day: state.budget.period_start_day,
            exported_at,
        }
    }
}

/// An encoded dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCode {
    /// Full transfer code; the only form that can be imported
    pub payload: String,
    /// Short confirmation code derived from the payload
    pub reference_code: String,
}

/// Encode a state into a transfer code
pub fn export_state(state: &PersistedState, exported_at: DateTime<Utc>) -> TrackerResult<TransferCode> {
    let document = TransferPayload::from_state(state, exported_at);
    let json = serde_json::to_string(&document)
        .map_err(|e| TrackerError::Export(format!("Failed to serialize transfer data: {}", e)))?;

    let payload = STANDARD.encode(json.as_bytes());
    let reference_code = reference_code(&payload);

    tracing::info!(
        expenses = state.expenses.len(),
        payload_len = payload.len(),
        "generated transfer code"
    );

    Ok(TransferCode {
        payload,
        reference_code,
    })
}

/// Derive the reference code shown next to a payload
pub fn reference_code(payload: &str) -> String {
    payload
        .chars()
        .take(REFERENCE_CODE_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Decode a transfer code back into a state
///
/// Whitespace anywhere in the input is ignored, so line-wrapped codes can be
/// pasted as-is. Trailing `=` padding is optional.
pub fn import_state(input: &str) -> Result<PersistedState, ImportError> {
    let code: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    if code.chars().count() == REFERENCE_CODE_LEN {
        return Err(ImportError::NeedsFullCode);
    }

    let bytes = LENIENT
        .decode(code.as_bytes())
        .map_err(|_| ImportError::InvalidEncoding)?;
    let text = String::from_utf8(bytes).map_err(|_| ImportError::InvalidEncoding)?;
    let value: Value = serde_json::from_str(&text).map_err(|_| ImportError::InvalidEncoding)?;

    let state = state_from_value(value)?;
    tracing::debug!(expenses = state.expenses.len(), "decoded transfer code");
    Ok(state)
}

/// Validate decoded JSON and build a state from it
///
/// Only the expense list is required. Missing or malformed budget fields
/// fall back to their defaults. Key names written by earlier releases
/// (`budget`, `monthStartDate`) are accepted too.
fn state_from_value(value: Value) -> Result<PersistedState, ImportError> {
    let Value::Object(mut fields) = value else {
        return Err(ImportError::InvalidStructure);
    };

    let items = match fields.remove("expenses") {
        Some(Value::Array(items)) => items,
        _ => return Err(ImportError::InvalidStructure),
    };

    let expenses = items
        .into_iter()
        .map(serde_json::from_value::<Expense>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ImportError::InvalidStructure)?;

    let monthly_budget = take_field(&mut fields, "monthlyBudget", "budget")
        .and_then(budget_text)
        .unwrap_or_else(|| DEFAULT_MONTHLY_BUDGET.to_string());

    let period_start_day = take_field(&mut fields, "periodStartDay", "monthStartDate")
        .and_then(start_day)
        .unwrap_or_default();

    Ok(PersistedState::new(
        expenses,
        BudgetConfiguration {
            monthly_budget,
            period_start_day,
        },
    ))
}

fn take_field(fields: &mut Map<String, Value>, key: &str, legacy_key: &str) -> Option<Value> {
    fields.remove(key).or_else(|| fields.remove(legacy_key))
}

fn budget_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn start_day(value: Value) -> Option<PeriodStartDay> {
    let day = match value {
        Value::Number(n) => u32::try_from(n.as_u64()?).ok()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    PeriodStartDay::new(day).ok()
}

/// An import that has been validated but not yet applied
///
/// Importing replaces everything, so the caller shows
/// [`confirmation_prompt`](Self::confirmation_prompt) and only then hands
/// this to `Session::commit_import`. Dropping it cancels the import.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImport {
    state: PersistedState,
}

impl PendingImport {
    /// Decode and validate a transfer code
    pub fn from_code(input: &str) -> Result<Self, ImportError> {
        import_state(input).map(|state| Self { state })
    }

    /// Number of expenses that will replace the current ones
    pub fn expense_count(&self) -> usize {
        self.state.expenses.len()
    }

    /// The state that will be applied
    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    /// Question to ask before replacing the current data
    pub fn confirmation_prompt(&self) -> String {
        format!(
            "This will replace your current data with {} expenses. Continue?",
            self.expense_count()
        )
    }

    pub(crate) fn into_state(self) -> PersistedState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
    }

    fn sample_state(count: usize) -> PersistedState {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let expenses = (0..count)
            .map(|i| {
                let date = base + Duration::hours(7 * i as i64) + Duration::milliseconds(i as i64);
                let amount = format!("{}.{:02}", i, (i * 7) % 100);
                Expense::new(&format!("Item \"{}\" ünïcode", i), &amount, date).unwrap()
            })
            .collect();
        PersistedState::new(
            expenses,
            BudgetConfiguration {
                monthly_budget: "1234.56".into(),
                period_start_day: PeriodStartDay::new(15).unwrap(),
            },
        )
    }

    fn encode_json(json: &str) -> String {
        STANDARD.encode(json.as_bytes())
    }

    #[test]
    fn test_round_trip_empty() {
        let state = PersistedState::default();
        let code = export_state(&state, exported_at()).unwrap();
        assert_eq!(import_state(&code.payload).unwrap(), state);
    }

    #[test]
    fn test_round_trip_single() {
        let state = sample_state(1);
        let code = export_state(&state, exported_at()).unwrap();
        assert_eq!(import_state(&code.payload).unwrap(), state);
    }

    #[test]
    fn test_round_trip_many() {
        let state = sample_state(75);
        let code = export_state(&state, exported_at()).unwrap();
        assert_eq!(import_state(&code.payload).unwrap(), state);
    }

    #[test]
    fn test_round_trip_ignores_line_wrapping() {
        let state = sample_state(3);
        let code = export_state(&state, exported_at()).unwrap();
        let wrapped: String = code
            .payload
            .as_bytes()
            .chunks(40)
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(import_state(&format!("  {}\n", wrapped)).unwrap(), state);
    }

    #[test]
    fn test_round_trip_without_padding() {
        let (state, payload) = (0..20)
            .map(|count| {
                let state = sample_state(count);
                let payload = export_state(&state, exported_at()).unwrap().payload;
                (state, payload)
            })
            .find(|(_, payload)| payload.ends_with('='))
            .unwrap();

        let unpadded = payload.trim_end_matches('=');
        assert_ne!(unpadded, payload);
        assert_eq!(import_state(unpadded).unwrap(), state);
        assert_eq!(import_state(&payload).unwrap(), state);
    }

    #[test]
    fn test_reference_code_shape() {
        for count in [0, 1, 20] {
            let code = export_state(&sample_state(count), exported_at()).unwrap();
            assert_eq!(code.reference_code.len(), REFERENCE_CODE_LEN);
            assert!(code.reference_code.is_ascii());
            assert!(!code.reference_code.chars().any(|c| c.is_ascii_lowercase()));
            assert!(code
                .payload
                .to_ascii_uppercase()
                .starts_with(&code.reference_code));
        }
    }

    #[test]
    fn test_reference_code_is_rejected() {
        let code = export_state(&sample_state(2), exported_at()).unwrap();
        assert_eq!(
            import_state(&code.reference_code),
            Err(ImportError::NeedsFullCode)
        );
        assert_eq!(import_state("abcdefgh"), Err(ImportError::NeedsFullCode));
        assert_eq!(import_state("ABCD EFGH"), Err(ImportError::NeedsFullCode));
        // Decodes to the JSON text [1,23], but eight characters always mean a reference code
        assert_eq!(import_state("WzEsMjNd"), Err(ImportError::NeedsFullCode));
    }

    #[test]
    fn test_invalid_encoding() {
        assert_eq!(import_state("not base64 at all!"), Err(ImportError::InvalidEncoding));
        assert_eq!(import_state(""), Err(ImportError::InvalidEncoding));
        assert_eq!(
            import_state(&encode_json("hello there, world")),
            Err(ImportError::InvalidEncoding)
        );
        assert_eq!(
            import_state(&STANDARD.encode([0xff, 0xfe, 0xfd, 0x00, 0x01, 0x02, 0x03])),
            Err(ImportError::InvalidEncoding)
        );
    }

    #[test]
    fn test_invalid_structure() {
        for json in [
            r#"{"monthlyBudget":"500","periodStartDay":3}"#,
            r#"{"expenses":"none"}"#,
            r#"{"expenses":null}"#,
            r#"[1,2,3,4,5]"#,
            r#"{"expenses":[{"id":"1","description":"x"}]}"#,
        ] {
            assert_eq!(
                import_state(&encode_json(json)),
                Err(ImportError::InvalidStructure),
                "{}",
                json
            );
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let state = import_state(&encode_json(r#"{"expenses":[]}"#)).unwrap();
        assert!(state.expenses.is_empty());
        assert_eq!(state.budget.monthly_budget, "1000");
        assert_eq!(state.budget.period_start_day.get(), 1);
    }

    #[test]
    fn test_malformed_fields_default() {
        let json = r#"{"expenses":[],"monthlyBudget":"","periodStartDay":31}"#;
        let state = import_state(&encode_json(json)).unwrap();
        assert_eq!(state.budget.monthly_budget, "1000");
        assert_eq!(state.budget.period_start_day.get(), 1);

        let json = r#"{"expenses":[],"monthlyBudget":[1],"periodStartDay":"soon"}"#;
        let state = import_state(&encode_json(json)).unwrap();
        assert_eq!(state.budget.monthly_budget, "1000");
        assert_eq!(state.budget.period_start_day.get(), 1);
    }

    #[test]
    fn test_accepts_legacy_key_names() {
        let json = r#"{"expenses":[{"id":"1710028800000","description":"Lunch","amount":12.5,"date":"2024-03-10T00:00:00.000Z"}],"budget":"750","monthStartDate":12,"exportDate":"2024-03-10T10:00:00.000Z"}"#;
        let state = import_state(&encode_json(json)).unwrap();

        assert_eq!(state.expenses.len(), 1);
        assert_eq!(state.expenses[0].description, "Lunch");
        assert_eq!(
            state.expenses[0].date.date_naive(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(state.budget.monthly_budget, "750");
        assert_eq!(state.budget.period_start_day.get(), 12);
    }

    #[test]
    fn test_numeric_budget_accepted() {
        let json = r#"{"expenses":[],"monthlyBudget":250,"periodStartDay":"5"}"#;
        let state = import_state(&encode_json(json)).unwrap();
        assert_eq!(state.budget.monthly_budget, "250");
        assert_eq!(state.budget.period_start_day.get(), 5);
    }

    #[test]
    fn test_pending_import_prompt() {
        let code = export_state(&sample_state(4), exported_at()).unwrap();
        let pending = PendingImport::from_code(&code.payload).unwrap();
        assert_eq!(pending.expense_count(), 4);
        assert_eq!(
            pending.confirmation_prompt(),
            "This will replace your current data with 4 expenses. Continue?"
        );
        assert_eq!(pending.state().budget.monthly_budget, "1234.56");
    }

    #[test]
    fn test_payload_carries_export_time() {
        let code = export_state(&sample_state(0), exported_at()).unwrap();
        let json = String::from_utf8(STANDARD.decode(&code.payload).unwrap()).unwrap();
        let document: TransferPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(document.exported_at, exported_at());
        assert_eq!(document.period_start_day.get(), 15);
    }
}
