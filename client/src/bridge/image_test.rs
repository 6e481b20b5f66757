use super::*;

fn data_url(b64: &str) -> String {
    format!("data:image/jpeg;base64,{b64}")
}

// --- data_url_byte_len ---

#[test]
fn four_chars_decode_to_three_bytes() {
    assert_eq!(data_url_byte_len(&data_url("AAAA")), 3);
}

#[test]
fn padding_is_subtracted() {
    assert_eq!(data_url_byte_len(&data_url("AAA=")), 2);
    assert_eq!(data_url_byte_len(&data_url("AA==")), 1);
}

#[test]
fn empty_payload_is_zero_bytes() {
    assert_eq!(data_url_byte_len(&data_url("")), 0);
}

#[test]
fn padding_only_payload_does_not_underflow() {
    // Truncated captures can arrive with padding but no body.
    assert_eq!(data_url_byte_len(&data_url("=")), 0);
    assert_eq!(data_url_byte_len(&data_url("==")), 0);
    assert_eq!(data_url_byte_len(&data_url("A==")), 0);
}

#[test]
fn non_base64_data_url_falls_back_to_string_length() {
    let url = "data:text/plain,hello";
    assert_eq!(data_url_byte_len(url), url.len());
}

// --- fits_budget ---

#[test]
fn small_capture_fits() {
    assert!(fits_budget(&data_url("AAAA")));
}

#[test]
fn budget_boundary() {
    // 170_666 groups of 4 decode to 511_998 bytes, just under 500 KiB.
    let under = data_url(&"A".repeat(170_666 * 4));
    assert!(fits_budget(&under));

    // One more group tips it to 512_001 bytes.
    let over = data_url(&"A".repeat(170_667 * 4));
    assert!(!fits_budget(&over));
}

// --- quality ladder ---

#[test]
fn quality_ladder_descends() {
    for pair in QUALITY_LADDER.windows(2) {
        assert!(pair[0] > pair[1]);
    }
    assert!(QUALITY_LADDER[0] < 1.0);
    assert!(QUALITY_LADDER[3] > 0.0);
}
