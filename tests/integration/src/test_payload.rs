//! The full SASL payload, as the broker receives it.

#[cfg(test)]
mod tests {
    use mskauth_sasl::build_sasl_payload;
    use mskauth_sigv4::timestamp::SigningTimestamp;

    use crate::{static_credential, temporary_credential};

    #[test]
    fn test_should_build_full_payload_without_token() {
        let payload = build_sasl_payload(
            &static_credential("AWS_ACCESS_KEY_ID"),
            "hostname",
            &SigningTimestamp::from_parts("20100101", "000000"),
        );
        assert_eq!(
            payload,
            "{\"version\":\"2020_10_22\",\"host\":\"hostname\",\
             \"user-agent\":\"librdkafka\",\"action\":\"kafka-cluster:Connect\",\
             \"x-amz-algorithm\":\"AWS4-HMAC-SHA256\",\
             \"x-amz-credential\":\"AWS_ACCESS_KEY_ID/20100101/us-east-1/kafka-cluster/aws4_request\",\
             \"x-amz-date\":\"20100101T000000Z\",\
             \"x-amz-signedheaders\":\"host\",\
             \"x-amz-expires\":\"900\",\
             \"x-amz-signature\":\"d3eeeddfb2c2b76162d583d7499c2364eb9a92b248218e31866659b18997ef44\"}"
        );
    }

    #[test]
    fn test_should_emit_fields_in_broker_order() {
        let payload = build_sasl_payload(
            &temporary_credential("ASIATEST", 900_000),
            "hostname",
            &SigningTimestamp::from_parts("20100101", "000000"),
        );

        let keys = [
            "\"version\"",
            "\"host\"",
            "\"user-agent\"",
            "\"action\"",
            "\"x-amz-algorithm\"",
            "\"x-amz-credential\"",
            "\"x-amz-date\"",
            "\"x-amz-security-token\"",
            "\"x-amz-signedheaders\"",
            "\"x-amz-expires\"",
            "\"x-amz-signature\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| payload.find(k).unwrap_or_else(|| panic!("{k} missing")))
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "fields out of order in {payload}"
        );
        assert!(!payload.contains(' '), "payload must carry no whitespace");
        assert!(payload.ends_with("\"}"));
    }

    #[test]
    fn test_should_parse_as_json_with_exact_values() {
        let payload = build_sasl_payload(
            &temporary_credential("ASIATEST", 900_000),
            "b-1.cluster.kafka.us-east-1.amazonaws.com",
            &SigningTimestamp::from_parts("20260101", "120000"),
        );
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(value["version"], "2020_10_22");
        assert_eq!(value["host"], "b-1.cluster.kafka.us-east-1.amazonaws.com");
        assert_eq!(value["user-agent"], "librdkafka");
        assert_eq!(value["action"], "kafka-cluster:Connect");
        assert_eq!(value["x-amz-algorithm"], "AWS4-HMAC-SHA256");
        assert_eq!(
            value["x-amz-credential"],
            "ASIATEST/20260101/us-east-1/kafka-cluster/aws4_request"
        );
        assert_eq!(value["x-amz-date"], "20260101T120000Z");
        assert_eq!(value["x-amz-security-token"], "session-token");
        assert_eq!(value["x-amz-signedheaders"], "host");
        assert_eq!(value["x-amz-expires"], "900");
        let signature = value["x-amz-signature"].as_str().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
