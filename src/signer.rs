//！ This module implements the helpers for AWS Signature version '4' support.
use bytes::Bytes;
use hmac::{Hmac, Mac};
use hyper::{
    header::{self, InvalidHeaderValue},
    HeaderMap, Method, Uri,
};
use sha2::{Digest, Sha256};

use crate::{
    time::UtcTime,
    utils::{trim_bytes, EMPTY_CONTENT_SHA256},
    Credentials,
};

type HmacSha256 = Hmac<Sha256>;

/// Return HMacSHA256 digest of given key and data.
fn _hmac_hash(key: &[u8], data: &str) -> Vec<u8> {
    let mut hasher = HmacSha256::new_from_slice(key).expect("");
    hasher.update(data.as_bytes());
    hasher.finalize().into_bytes().to_vec()
}

/// Compute Mac-SHA-256 of data and return hash as hex encoded value.
///
/// Return Hex(HMAC-SHA256(key, data)).
#[inline]
pub fn hmac_hash_hex(key: &[u8], data: &str) -> String {
    hex::encode(_hmac_hash(key, data))
}

/// Compute SHA-256 of data and return hash as hex encoded value.
#[inline]
pub fn sha256_hash(date: &[u8]) -> String {
    hex::encode(Sha256::digest(date))
}

/// Get scope string.
///
/// `date.Format(<YYYYMMDD>) + "/" + <region> + "/" + <service> + "/aws4_request"`
#[inline]
fn _get_scope(date: &UtcTime, region: &str, service_name: &str) -> String {
    format!(
        "{}/{}/{}/aws4_request",
        date.aws_format_date(),
        region,
        service_name
    )
}

/// Get canonical query string.
///
/// query string parameters is assumed be URI-encoded
fn _get_canonical_query_string(query: &str) -> String {
    let mut querys: Vec<(&str, &str)> = query
        .split('&')
        .filter(|&x| !x.is_empty())
        .map(|q| {
            let i = q.find('=');
            if let Some(i) = i {
                (&q[0..i], &q[i + 1..])
            } else {
                (q, "")
            }
        })
        .collect();
    querys.sort_by_key(|x| x.0);
    querys
        .iter()
        .map(|&(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&")
}

/// Get canonical request hash and signed_headers.
///
/// `Hex(SHA256Hash(Canonical Request)))`
///
/// CanonicalRequest =
///     HTTPRequestMethod + '\n' +
///     CanonicalURI + '\n' +
///     CanonicalQueryString + '\n' +
///     CanonicalHeaders + '\n' +
///     SignedHeaders + '\n' +
///     HashedPayload
fn _get_canonical_request_hash(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    content_sha256: &str,
) -> (String, String) {
    let mut cr: Vec<u8> = Vec::new();

    // HTTPRequestMethod
    cr.extend_from_slice(method.as_str().as_bytes());
    cr.push(b'\n');

    // CanonicalURI
    cr.extend_from_slice(uri.path().as_bytes());
    cr.push(b'\n');

    // CanonicalQueryString
    let querys = uri.query().unwrap_or("");
    let canonical_query_string = _get_canonical_query_string(querys);
    cr.extend_from_slice(canonical_query_string.as_bytes());
    cr.push(b'\n');

    // CanonicalHeaders and SignedHeaders
    let mut canonical_hdrs = headers
        .iter()
        .filter(|&(name, _)| name != header::USER_AGENT && name != header::AUTHORIZATION)
        .collect::<Vec<_>>();
    canonical_hdrs.sort_by_key(|f| f.0.as_str());
    let mut signed_headers: String = String::new();
    canonical_hdrs.iter().for_each(|(h, v)| {
        let h = h.as_str().to_lowercase();
        cr.extend_from_slice(h.as_bytes());
        cr.push(b':');
        cr.extend_from_slice(trim_bytes(v.as_bytes()));
        cr.push(b'\n');

        signed_headers += h.as_str();
        signed_headers += ";";
    });
    cr.push(b'\n');
    signed_headers.pop();
    cr.extend_from_slice(signed_headers.as_bytes());
    cr.push(b'\n');

    // HashedPayload
    cr.extend_from_slice(content_sha256.as_bytes());

    (sha256_hash(&cr), signed_headers)
}

/// Get string-to-sign
///
/// "AWS4-HMAC-SHA256" + "\n" +
/// timeStampISO8601Format + "\n" +
/// <Scope> + "\n" +
/// Hex(SHA256Hash(Canonical Request)))
#[inline]
fn _get_string_to_sign(date: &UtcTime, scope: &str, canonical_request_hash: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        date.aws_format_time(),
        scope,
        canonical_request_hash,
    )
}

/// Get signing key
///
/// DateKey = HMAC-SHA256("AWS4"+"<SecretAccessKey>", "<YYYYMMDD>")
/// DateRegionKey = HMAC-SHA256(<DateKey>, "<aws-region>")
/// DateRegionServiceKey = HMAC-SHA256(<DateRegionKey>, "<aws-service>")
/// SigningKey = HMAC-SHA256(<DateRegionServiceKey>, "aws4_request")
fn _get_signing_key(secret_key: &str, date: &UtcTime, region: &str, service_name: &str) -> Vec<u8> {
    let secret_access_key = format!("AWS4{}", secret_key);
    let date_key = _hmac_hash(secret_access_key.as_bytes(), &date.aws_format_date());
    let date_region_key = _hmac_hash(date_key.as_ref(), region);
    let date_region_service_key = _hmac_hash(date_region_key.as_ref(), service_name);
    _hmac_hash(date_region_service_key.as_ref(), "aws4_request")
}

/// Get authorization header value
#[inline]
fn _get_authorization_header_value(
    access_key: &str,
    scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        access_key, scope, signed_headers, signature
    )
}

/// Do signature V4 of given request params and
/// add the headers required by S3.
///
/// The payload is always a single chunk; the hash of `body` is signed
/// and sent in `x-amz-content-sha256`. A session token, when present,
/// participates in the signature via `x-amz-security-token`.
pub fn sign_request_v4(
    method: &Method,
    uri: &Uri,
    headers: &mut HeaderMap,
    region: &str,
    body: &Bytes,
    credentials: &Credentials,
) -> std::result::Result<(), InvalidHeaderValue> {
    let date = UtcTime::now();
    let server_name = "s3";

    // add s3 header
    if let Some(host) = uri.host() {
        let host = match uri.port_u16() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        headers.insert(header::HOST, host.parse()?);
    }
    headers.insert("x-amz-date", date.aws_format_time().parse()?);
    headers.insert(header::CONTENT_LENGTH, body.len().to_string().parse()?);
    if let Some(token) = credentials.session_token() {
        headers.insert("x-amz-security-token", token.parse()?);
    }
    let content_sha256 = if body.is_empty() {
        EMPTY_CONTENT_SHA256.to_string()
    } else {
        sha256_hash(body)
    };
    headers.insert("x-amz-content-sha256", content_sha256.parse()?);

    // Calculate s3 signature
    let scope = _get_scope(&date, region, server_name);
    let (canonical_request_hash, signed_headers) =
        _get_canonical_request_hash(method, uri, headers, &content_sha256);

    let string_to_sign = _get_string_to_sign(&date, &scope, &canonical_request_hash);

    let signing_key = _get_signing_key(credentials.secret_key(), &date, region, server_name);

    let signature = hmac_hash_hex(signing_key.as_ref(), &string_to_sign);

    let auth_header =
        _get_authorization_header_value(credentials.access_key(), &scope, &signed_headers, &signature);

    // add authorization header
    headers.insert(header::AUTHORIZATION, auth_header.parse()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{_get_canonical_query_string, _get_scope, _get_string_to_sign};
    use crate::time::UtcTime;
    use chrono::{TimeZone, Utc};

    fn fixed_date() -> UtcTime {
        UtcTime::new(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_canonical_query_string() {
        assert_eq!(_get_canonical_query_string(""), "");
        assert_eq!(_get_canonical_query_string("replication"), "replication=");
        assert_eq!(
            _get_canonical_query_string("b=2&a=1&replication"),
            "a=1&b=2&replication="
        );
    }

    #[test]
    fn test_scope() {
        assert_eq!(
            _get_scope(&fixed_date(), "us-east-1", "s3"),
            "20260115/us-east-1/s3/aws4_request"
        );
    }

    #[test]
    fn test_string_to_sign_shape() {
        let sts = _get_string_to_sign(&fixed_date(), "20260115/us-east-1/s3/aws4_request", "abc");
        let lines: Vec<&str> = sts.split('\n').collect();
        assert_eq!(lines[0], "AWS4-HMAC-SHA256");
        assert_eq!(lines[1], "20260115T120000Z");
        assert_eq!(lines[3], "abc");
    }
}
