use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::AwsCredentials;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

#[derive(Debug, thiserror::Error)]
#[error("Error creating HMAC: {0}")]
pub struct SigningError(String);

/// Request to presign with SigV4 query-string authentication.
/// Only the `host` header is signed.
#[derive(Debug, Clone)]
pub struct PresignRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    pub path: &'a str,
    pub query: &'a [(&'a str, &'a str)],
    pub service: &'a str,
    pub region: &'a str,
    pub expires_in_secs: u64,
}

/// Build a presigned `https://` URL for the request
pub fn presign_url(
    creds: &AwsCredentials,
    request: &PresignRequest<'_>,
    time: DateTime<Utc>,
) -> Result<String, SigningError> {
    let amz_date = time.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = time.format("%Y%m%d").to_string();
    let credential_scope = format!(
        "{}/{}/{}/aws4_request",
        date_stamp, request.region, request.service
    );

    let mut params: Vec<(String, String)> = request
        .query
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    params.push(("X-Amz-Algorithm".into(), ALGORITHM.into()));
    params.push((
        "X-Amz-Credential".into(),
        format!("{}/{}", creds.access_key_id, credential_scope),
    ));
    params.push(("X-Amz-Date".into(), amz_date.clone()));
    params.push((
        "X-Amz-Expires".into(),
        request.expires_in_secs.to_string(),
    ));
    params.push(("X-Amz-SignedHeaders".into(), "host".into()));
    if let Some(token) = &creds.session_token {
        params.push(("X-Amz-Security-Token".into(), token.clone()));
    }

    let canonical_querystring = canonical_query(&params);
    let canonical_request = format!(
        "{}\n{}\n{}\nhost:{}\n\nhost\n{}",
        request.method, request.path, canonical_querystring, request.host, UNSIGNED_PAYLOAD
    );

    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        credential_scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let signing_key = signature_key(
        &creds.secret_access_key,
        &date_stamp,
        request.region,
        request.service,
    )?;
    let signature = hex::encode(sign(&signing_key, &string_to_sign)?);

    Ok(format!(
        "https://{}{}?{}&X-Amz-Signature={}",
        request.host, request.path, canonical_querystring, signature
    ))
}

/// Encoded and sorted query string as SigV4 expects it
fn canonical_query(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn sign(key: &[u8], msg: &str) -> Result<Vec<u8>, SigningError> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).map_err(|err| SigningError(err.to_string()))?;
    mac.update(msg.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn signature_key(
    secret: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, SigningError> {
    let k_date = sign(format!("AWS4{secret}").as_bytes(), date_stamp)?;
    let k_region = sign(&k_date, region)?;
    let k_service = sign(&k_region, service)?;
    sign(&k_service, "aws4_request")
}
