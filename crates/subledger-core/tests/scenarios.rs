//! End-to-end extraction scenarios.
//!
//! Each test feeds decoded messages through the public entry points and
//! checks the resulting candidates.

use chrono::NaiveDate;

use subledger_core::{
    Currency, ExtractionConfig, Extractor, Headers, InputMessage, extract_subscriptions,
    parse_batch,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn message(id: &str, text: &str) -> InputMessage {
    InputMessage::new(id, text, Headers::new())
}

#[test]
fn test_iso_dated_renewal() {
    let batch = vec![message(
        "a",
        "Your Netflix subscription of $15.99 renewed on 2024-03-05",
    )];

    let out = extract_subscriptions(&batch, ["netflix"], None).unwrap();

    assert_eq!(out.len(), 1);
    let c = &out[0];
    assert_eq!(c.provider, "netflix");
    assert_eq!(c.amount(), Some(15.99));
    assert_eq!(c.currency(), Some(Currency::Usd));
    assert_eq!(c.start_date(), Some(ymd(2024, 3, 5)));
    assert_eq!(c.next_billing_date(), Some(ymd(2024, 4, 4)));
    assert_eq!(c.evidence.source_message_id, "a");
}

#[test]
fn test_no_currency_token_is_rejected() {
    let batch = vec![message(
        "b",
        "Your Netflix subscription renewed on 2024-03-05",
    )];

    let out = extract_subscriptions(&batch, ["netflix"], None).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_duplicate_key_keeps_first() {
    let batch = vec![
        message(
            "c1",
            "Spotify receipt\nYour plan: Premium\nCharged $9.99 on 2024-01-01",
        ),
        message(
            "c2",
            "Spotify receipt\nYour plan: Premium\nCharged $10.99 on 2024-02-01",
        ),
    ];

    let out = extract_subscriptions(&batch, ["spotify"], None).unwrap();

    assert_eq!(out.len(), 1);
    let c = &out[0];
    assert_eq!(c.provider, "spotify");
    assert_eq!(c.product.as_deref(), Some("Premium"));
    assert_eq!(c.amount(), Some(9.99));
    assert_eq!(c.start_date(), Some(ymd(2024, 1, 1)));
    assert_eq!(c.evidence.source_message_id, "c1");
}

#[test]
fn test_long_form_date() {
    let batch = vec![message(
        "d",
        "Your Netflix subscription of $15.99 renewed on Jan 5, 2024",
    )];

    let out = extract_subscriptions(&batch, ["netflix"], None).unwrap();

    assert_eq!(out[0].start_date(), Some(ymd(2024, 1, 5)));
    assert_eq!(out[0].next_billing_date(), Some(ymd(2024, 2, 4)));
}

#[test]
fn test_malformed_date_keeps_candidate() {
    let batch = vec![message(
        "e",
        "Your Netflix subscription of $15.99 renewed on 2024-13-45",
    )];

    let out = extract_subscriptions(&batch, ["netflix"], None).unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].amount(), Some(15.99));
    assert_eq!(out[0].start_date(), None);
    assert_eq!(out[0].next_billing_date(), None);
}

#[test]
fn test_iso_timestamp_date() {
    let batch = vec![message(
        "t",
        "Your Netflix subscription of $15.99 renewed at 2024-03-05T08:15:00Z",
    )];

    let out = extract_subscriptions(&batch, ["netflix"], None).unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].start_date(), Some(ymd(2024, 3, 5)));
    assert_eq!(out[0].next_billing_date(), Some(ymd(2024, 4, 4)));
}

#[test]
fn test_header_provider_from_json_batch() {
    let json = r#"[
        {
            "id": "h1",
            "text": "ChatGPT Plus: monthly renewal, 20.00 USD",
            "headers": [
                {"name": "Subject", "value": "Your receipt"},
                {"name": "from", "value": "OpenAI <billing@openai.com>"}
            ]
        },
        {
            "id": "h2",
            "text": "Weekly digest from ChatGPT",
            "headers": []
        }
    ]"#;

    let batch = parse_batch(json).unwrap();
    let extractor =
        Extractor::new(ExtractionConfig::default().with_brands(["chatgpt"])).unwrap();
    let report = extractor.extract_with_report(&batch);

    assert_eq!(report.scanned, 2);
    assert_eq!(report.accepted, 1);
    let c = &report.candidates[0];
    assert_eq!(c.provider, "openai");
    assert_eq!(c.amount(), Some(20.0));
    assert_eq!(c.currency(), Some(Currency::Usd));
}

#[test]
fn test_output_serializes_for_storage() {
    let batch = vec![message(
        "s",
        "Apple One membership renewal: €19,95 on 2025/6/1",
    )];
    let out = extract_subscriptions(&batch, ["apple"], None).unwrap();

    let value = serde_json::to_value(&out).unwrap();
    let c = &value[0];
    assert_eq!(c["provider"], "apple");
    assert_eq!(c["product"], "renewal");
    assert_eq!(c["amount"], 19.95);
    assert_eq!(c["currency"], "EUR");
    assert_eq!(c["start_date"], "2025-06-01");
    assert_eq!(c["next_billing_date"], "2025-07-01");
}
