//! SigV4 signing vectors verified end-to-end across crates.
//!
//! These are the exact byte sequences the broker and STS check; each vector
//! was confirmed against the deployed mechanism.

#[cfg(test)]
mod tests {
    use mskauth_sigv4::canonical::{
        build_canonical_request, build_string_to_sign, canonical_headers, credential_scope,
    };
    use mskauth_sigv4::encode::uri_encode;
    use mskauth_sigv4::signer::{authorization_header, build_signature};
    use mskauth_sigv4::timestamp::SigningTimestamp;
    use mskauth_sts::request::{AssumeRoleParams, sign_assume_role};

    const EMPTY_BODY_HASH: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_should_uri_encode_reserved_characters() {
        assert_eq!(uri_encode("testString-123/*&"), "testString-123%2F%2A%26");
    }

    fn connect_canonical_request(session_token: Option<&str>) -> String {
        let ts = SigningTimestamp::from_parts("20100101", "000000");
        let query = mskauth_sasl::payload::build_sasl_canonical_query_string(
            "AWS_ACCESS_KEY_ID",
            "us-east-1",
            &ts,
            session_token,
        );
        let headers = canonical_headers(&[("host", "hostname")]);
        build_canonical_request("GET", &query, &headers, "host", b"")
    }

    #[test]
    fn test_should_build_connect_canonical_request() {
        assert_eq!(
            connect_canonical_request(None),
            format!(
                "GET\n/\n\
                 Action=kafka-cluster%3AConnect&\
                 X-Amz-Algorithm=AWS4-HMAC-SHA256&\
                 X-Amz-Credential=AWS_ACCESS_KEY_ID%2F20100101%2Fus-east-1%2Fkafka-cluster%2Faws4_request&\
                 X-Amz-Date=20100101T000000Z&\
                 X-Amz-Expires=900&\
                 X-Amz-SignedHeaders=host\n\
                 host:hostname\n\n\
                 host\n\
                 {EMPTY_BODY_HASH}"
            )
        );
    }

    #[test]
    fn test_should_build_connect_canonical_request_with_security_token() {
        assert_eq!(
            connect_canonical_request(Some("security-token")),
            format!(
                "GET\n/\n\
                 Action=kafka-cluster%3AConnect&\
                 X-Amz-Algorithm=AWS4-HMAC-SHA256&\
                 X-Amz-Credential=AWS_ACCESS_KEY_ID%2F20100101%2Fus-east-1%2Fkafka-cluster%2Faws4_request&\
                 X-Amz-Date=20100101T000000Z&\
                 X-Amz-Expires=900&\
                 X-Amz-Security-Token=security-token&\
                 X-Amz-SignedHeaders=host\n\
                 host:hostname\n\n\
                 host\n\
                 {EMPTY_BODY_HASH}"
            )
        );
    }

    #[test]
    fn test_should_sign_connect_canonical_request() {
        let canonical_request = connect_canonical_request(None);
        let scope = credential_scope("20100101", "us-east-1", "kafka-cluster");
        let string_to_sign =
            build_string_to_sign("20100101T000000Z", &scope, &canonical_request);
        assert_eq!(
            string_to_sign,
            "AWS4-HMAC-SHA256\n\
             20100101T000000Z\n\
             20100101/us-east-1/kafka-cluster/aws4_request\n\
             8a719fb6d4b33f7d9c5b25b65af85a44d3627bdca66e1287b1a366fa90bafaa1"
        );

        let signature = build_signature(
            "AWS_SECRET_ACCESS_KEY",
            "20100101",
            "us-east-1",
            "kafka-cluster",
            &string_to_sign,
        );
        assert_eq!(
            signature,
            "d3eeeddfb2c2b76162d583d7499c2364eb9a92b248218e31866659b18997ef44"
        );
    }

    #[test]
    fn test_should_sign_sts_assume_role_request() {
        let signed = sign_assume_role(
            &AssumeRoleParams {
                access_key_id: "TESTKEY",
                secret_access_key: "TESTSECRET",
                region: "us-east-1",
                role_arn: "arn:aws:iam::789750736714:role/Identity_Account_Access_Role",
                role_session_name: "librdkafka_session",
                external_id: None,
                duration_sec: 900,
                host: "sts.amazonaws.com",
            },
            &SigningTimestamp::from_parts("20210910", "190714"),
        );

        assert_eq!(
            signed.body,
            "Action=AssumeRole&DurationSeconds=900&\
             RoleArn=arn%3Aaws%3Aiam%3A%3A789750736714%3Arole%2FIdentity_Account_Access_Role&\
             RoleSessionName=librdkafka_session&Version=2011-06-15"
        );
        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 Credential=TESTKEY/20210910/us-east-1/sts/aws4_request, \
             SignedHeaders=content-length;content-type;host;x-amz-date, \
             Signature=a825a6136b83c3feb7993b9d2947f6e479901f805089b08f717c0f2a03cd98f0"
        );
    }

    #[test]
    fn test_should_build_sts_canonical_request_from_parts() {
        // The same vector, assembled from the low-level pieces.
        let body = "Action=AssumeRole&DurationSeconds=900&\
                    RoleArn=arn%3Aaws%3Aiam%3A%3A789750736714%3Arole%2FIdentity_Account_Access_Role&\
                    RoleSessionName=librdkafka_session&Version=2011-06-15";
        let headers = canonical_headers(&[
            ("content-length", "171"),
            ("content-type", "application/x-www-form-urlencoded; charset=utf-8"),
            ("host", "sts.amazonaws.com"),
            ("x-amz-date", "20210910T190714Z"),
        ]);
        let canonical_request = build_canonical_request(
            "POST",
            "",
            &headers,
            "content-length;content-type;host;x-amz-date",
            body.as_bytes(),
        );
        assert_eq!(
            canonical_request,
            "POST\n/\n\n\
             content-length:171\n\
             content-type:application/x-www-form-urlencoded; charset=utf-8\n\
             host:sts.amazonaws.com\n\
             x-amz-date:20210910T190714Z\n\n\
             content-length;content-type;host;x-amz-date\n\
             452ff5eb28a9cd9928d29dd4e27815e5e4f0f3e8e7e59b37700f55584f43ffaa"
        );
    }

    #[test]
    fn test_should_assemble_authorization_header_from_signature() {
        let header = authorization_header(
            "TESTKEY",
            &credential_scope("20210910", "us-east-1", "sts"),
            "content-length;content-type;host;x-amz-date",
            "a825a6136b83c3feb7993b9d2947f6e479901f805089b08f717c0f2a03cd98f0",
        );
        assert_eq!(
            header,
            "AWS4-HMAC-SHA256 Credential=TESTKEY/20210910/us-east-1/sts/aws4_request, \
             SignedHeaders=content-length;content-type;host;x-amz-date, \
             Signature=a825a6136b83c3feb7993b9d2947f6e479901f805089b08f717c0f2a03cd98f0"
        );
    }
}
