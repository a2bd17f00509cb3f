use phish_inspect::*;

#[test]
fn test_parse_simple_email() {
    let raw = b"From: Bank Alerts <alerts@bank.com>\r\n\
                To: customer@example.com\r\n\
                Subject: Statement ready\r\n\
                Authentication-Results: mx.example.net; spf=pass; dkim=pass\r\n\
                \r\n\
                hello";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.from, "Bank Alerts <alerts@bank.com>");
    assert_eq!(email.subject, "Statement ready");
    assert_eq!(email.auth_results, "mx.example.net; spf=pass; dkim=pass");
    assert_eq!(email.body, "hello");
}

#[test]
fn test_missing_headers_use_defaults() {
    let raw = b"X-Mailer: test\r\n\
                \r\n\
                Body only";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.subject, DEFAULT_SUBJECT);
    assert_eq!(email.from, DEFAULT_FROM);
    assert_eq!(email.auth_results, "");
    assert_eq!(email.body, "Body only");
}

#[test]
fn test_headers_are_case_insensitive() {
    let raw = b"SUBJECT: Shouting\r\n\
                from: quiet@example.com\r\n\
                authentication-RESULTS: mx; dmarc=fail\r\n\
                \r\n\
                text";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.subject, "Shouting");
    assert_eq!(email.from, "quiet@example.com");
    assert_eq!(email.auth_results, "mx; dmarc=fail");
}

#[test]
fn test_first_header_occurrence_wins() {
    let raw = b"Subject: first\r\n\
                Subject: second\r\n\
                \r\n\
                text";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.subject, "first");
}

#[test]
fn test_folded_authentication_results() {
    let raw = b"From: a@example.com\r\n\
                Authentication-Results: mx.example.net;\r\n \
                spf=fail smtp.mailfrom=example.com\r\n\
                \r\n\
                text";

    let email = parse_email(raw).unwrap();

    assert!(email.auth_results.contains("spf=fail"));
}

#[test]
fn test_header_list_keeps_order() {
    let raw = b"Received: from relay\r\n\
                From: a@example.com\r\n\
                Subject: Hi\r\n\
                \r\n\
                text";

    let email = parse_email(raw).unwrap();

    let keys: Vec<&str> = email.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["Received", "From", "Subject"]);
    assert_eq!(email.header("received"), Some("from relay"));
    assert_eq!(email.header("x-missing"), None);
}

#[test]
fn test_multipart_keeps_only_plain_text() {
    let raw = b"From: a@example.com\r\n\
                Subject: Multi\r\n\
                MIME-Version: 1.0\r\n\
                Content-Type: multipart/alternative; boundary=\"XYZ\"\r\n\
                \r\n\
                --XYZ\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                A\r\n\
                --XYZ\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <html>B</html>\r\n\
                --XYZ--\r\n";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.body, "A");
    assert!(!email.body.contains("<html>"));
}

#[test]
fn test_html_only_multipart_yields_empty_body() {
    let raw = b"From: a@example.com\r\n\
                Content-Type: multipart/alternative; boundary=\"XYZ\"\r\n\
                \r\n\
                --XYZ\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <html><body>Only HTML</body></html>\r\n\
                --XYZ--\r\n";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.body, "");
}

#[test]
fn test_nested_multipart_concatenates_in_order() {
    let raw = b"From: a@example.com\r\n\
                Content-Type: multipart/mixed; boundary=\"OUTER\"\r\n\
                \r\n\
                --OUTER\r\n\
                Content-Type: multipart/alternative; boundary=\"INNER\"\r\n\
                \r\n\
                --INNER\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                first part\r\n\
                --INNER\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <p>ignored</p>\r\n\
                --INNER--\r\n\
                --OUTER\r\n\
                Content-Type: text/plain\r\n\
                Content-Disposition: attachment; filename=\"notes.txt\"\r\n\
                \r\n\
                second part\r\n\
                --OUTER--\r\n";

    let email = parse_email(raw).unwrap();

    let first = email.body.find("first part").unwrap();
    let second = email.body.find("second part").unwrap();
    assert!(first < second);
    assert!(!email.body.contains("ignored"));
}

#[test]
fn test_attached_message_plain_text_is_collected() {
    let raw = b"From: forwarder@example.com\r\n\
                Subject: Fwd: notice\r\n\
                Content-Type: multipart/mixed; boundary=\"OUTER\"\r\n\
                \r\n\
                --OUTER\r\n\
                Content-Type: message/rfc822\r\n\
                \r\n\
                From: alerts@bank.com\r\n\
                Subject: notice\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                urgent inner\r\n\
                --OUTER--\r\n";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.body.trim_end(), "urgent inner");
    assert!(score_email(&email).has(Rule::Urgency));
}

#[test]
fn test_attached_multipart_message_keeps_only_plain_text() {
    let raw = b"From: forwarder@example.com\r\n\
                Content-Type: multipart/mixed; boundary=\"OUTER\"\r\n\
                \r\n\
                --OUTER\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                see below\r\n\
                --OUTER\r\n\
                Content-Type: message/rfc822\r\n\
                \r\n\
                From: alerts@bank.com\r\n\
                Content-Type: multipart/alternative; boundary=\"INNER\"\r\n\
                \r\n\
                --INNER\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                inner text\r\n\
                --INNER\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <p>inner html</p>\r\n\
                --INNER--\r\n\
                --OUTER--\r\n";

    let email = parse_email(raw).unwrap();

    let outer = email.body.find("see below").unwrap();
    let inner = email.body.find("inner text").unwrap();
    assert!(outer < inner);
    assert!(!email.body.contains("inner html"));
}

#[test]
fn test_single_part_html_taken_verbatim() {
    let raw = b"From: a@example.com\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <html><body>Hi</body></html>";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.body, "<html><body>Hi</body></html>");
}

#[test]
fn test_base64_body_is_decoded() {
    let raw = b"From: a@example.com\r\n\
                Content-Type: text/plain; charset=utf-8\r\n\
                Content-Transfer-Encoding: base64\r\n\
                \r\n\
                aGVsbG8=";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.body, "hello");
}

#[test]
fn test_invalid_base64_body_fails_to_decode() {
    let raw = b"From: a@example.com\r\n\
                Content-Type: text/plain\r\n\
                Content-Transfer-Encoding: base64\r\n\
                \r\n\
                !!!not base64 urgent!!!";

    let err = parse_email(raw).unwrap_err();

    assert!(matches!(err, ParseError::Decode(_)));
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_headers_without_body() {
    let raw = b"From: a@example.com\r\nSubject: Empty\r\n\r\n";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.subject, "Empty");
    assert_eq!(email.body, "");
}

#[test]
fn test_mbox_separator_line_is_skipped() {
    let raw = b"From sender@example.com Mon Jan  1 12:00:00 2024\n\
                From: sender@example.com\n\
                Subject: From mbox\n\
                \n\
                text";

    let email = parse_email(raw).unwrap();

    assert_eq!(email.from, "sender@example.com");
    assert_eq!(email.subject, "From mbox");
}

#[test]
fn test_garbage_bytes_fail() {
    let raw = b"\x00\xff\xfe\x01 definitely not an email \x02\x03";

    let err = parse_email(raw).unwrap_err();

    assert!(matches!(err, ParseError::Structure(_)));
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_plain_prose_fails() {
    let err = parse_email(b"just some words without any headers").unwrap_err();

    assert!(matches!(err, ParseError::Structure(_)));
}

#[test]
fn test_empty_input_fails() {
    let err = parse_email(b"").unwrap_err();

    assert!(err.to_string().contains("empty"));
}
